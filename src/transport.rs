//! Loading datasets and delivering annotation sets
use super::*;
use reqwest::blocking::Client;
use std::fs;
use std::time::Duration;

/// Everything the review session needs from the outside world
pub trait Transport {
    /// Fetch the raw text of a dataset
    fn fetch(&self, url: &str) -> Result<String, Error>;
    /// Send the annotation set to be rendered into an annotated report
    fn annotate(&self, set: &AnnotationSet) -> Result<(), Error>;
    /// Send the annotation set to durable storage
    fn persist(&self, set: &AnnotationSet) -> Result<(), Error>;
}

pub struct HttpTransport {
    client: Client,
    annotate_url: String,
    persist_url: String,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<HttpTransport, Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Transport(format!("could not build HTTP client: {}", e)))?;
        Ok(HttpTransport {
            client,
            annotate_url: config.annotate_url.clone(),
            persist_url: config.persist_url.clone(),
        })
    }
}

fn is_remote(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

impl Transport for HttpTransport {
    /// Datasets given as plain paths are read from disk
    fn fetch(&self, url: &str) -> Result<String, Error> {
        if !is_remote(url) {
            return fs::read_to_string(url)
                .map_err(|e| Error::Transport(format!("could not read '{}': {}", url, e)));
        }
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::Transport(format!("could not fetch '{}': {}", url, e)))?;
        if !response.status().is_success() {
            return Err(Error::Transport(format!(
                "could not fetch '{}': HTTP {}",
                url,
                response.status()
            )));
        }
        response
            .text()
            .map_err(|e| Error::Transport(format!("could not read response '{}': {}", url, e)))
    }

    fn annotate(&self, set: &AnnotationSet) -> Result<(), Error> {
        let body = set.to_json()?;
        let response = self
            .client
            .post(&self.annotate_url)
            .body(body)
            .send()
            .map_err(|e| Error::Transport(format!("{}: {}", self.annotate_url, e)))?;
        if !response.status().is_success() {
            return Err(Error::Transport(format!(
                "{}: HTTP {}",
                self.annotate_url,
                response.status()
            )));
        }
        Ok(())
    }

    fn persist(&self, set: &AnnotationSet) -> Result<(), Error> {
        let data = set.to_json()?;
        let response = self
            .client
            .get(&self.persist_url)
            .query(&[("data", data)])
            .send()
            .map_err(|e| Error::Transport(format!("{}: {}", self.persist_url, e)))?;
        if !response.status().is_success() {
            return Err(Error::Transport(format!(
                "{}: HTTP {}",
                self.persist_url,
                response.status()
            )));
        }
        Ok(())
    }
}

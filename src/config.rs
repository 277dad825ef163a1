//! Endpoints and review settings, read from a JSON file
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Ratio text that marks an identification as needing review
pub const TARGET_RATIO: &str = "20";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Receives the annotation set and renders the annotated report
    pub annotate_url: String,
    /// Stores the annotation set for safekeeping
    pub persist_url: String,
    pub target_ratio: String,
    /// Request timeout for every HTTP call
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            annotate_url: "http://localhost:8000/cgi-bin/annotate.py".into(),
            persist_url: "http://localhost:8000/annotate".into(),
            target_ratio: TARGET_RATIO.into(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn from_json(s: &str) -> Result<Config, crate::Error> {
        serde_json::from_str(s).map_err(|e| crate::Error::Config(e.to_string()))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Config, crate::Error> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .map_err(|e| crate::Error::Config(format!("{}: {}", path.display(), e)))?;
        Config::from_json(&s)
    }
}

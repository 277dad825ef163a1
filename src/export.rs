//! Collect reviewer decisions into the payload understood by the annotation
//! server
use super::*;
use serde::Serialize;

/// A single rejected identification
#[derive(Serialize, PartialEq, Clone, Debug)]
pub struct Annotation {
    pub link: String,
    pub sequence: String,
    pub charge: String,
    pub segment: String,
    pub ipi: Option<String>,
    pub symbol: Option<String>,
    pub index: String,
}

/// Every rejected identification of one dataset, keyed by the dataset's
/// rendered `.html` report
#[derive(Serialize, PartialEq, Clone, Debug)]
pub struct AnnotationSet {
    pub file: String,
    #[serde(rename = "_id")]
    pub id: String,
    pub annotations: Vec<Annotation>,
}

impl AnnotationSet {
    /// Gather rejected peptides from the proteins carrying `ratio`.
    /// Accepted and undecided peptides are not exported.
    pub fn collect(data: &Dataset, url: &str, ratio: &str) -> AnnotationSet {
        let file = report_url(url);
        let filter = Filter::targets(ratio);

        let annotations = data
            .proteins
            .iter()
            .filter(|prot| filter.accepts(prot))
            .flat_map(|prot| {
                prot.peptides
                    .iter()
                    .filter(|pep| pep.annotation == Decision::Rejected)
                    .map(move |pep| Annotation {
                        link: pep.link.clone(),
                        sequence: pep.sequence.clone(),
                        charge: pep.charge.clone(),
                        segment: pep.segment.clone(),
                        ipi: prot.ipi.clone(),
                        symbol: prot.symbol.clone(),
                        index: prot.index.clone(),
                    })
            })
            .collect();

        AnnotationSet {
            id: file.clone(),
            file,
            annotations,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// The report URL for a dataset: its first `.txt` swapped for `.html`
pub fn report_url(url: &str) -> String {
    url.replacen(".txt", ".html", 1)
}

/// The chromatogram for a peptide lives beside the dataset file, so swap
/// the last path segment of the dataset URL for the peptide's `src`
pub fn chromatogram_url(dataset_url: &str, src: &str) -> String {
    match dataset_url.rfind('/') {
        Some(idx) => format!("{}/{}", &dataset_url[..idx], src),
        None => src.to_string(),
    }
}

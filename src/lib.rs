//! Manual review of peptide identifications from combined DTASelect files.
//!
//! A dataset is parsed into proteins and their peptides, narrowed to the
//! proteins carrying at least one peptide at the target ratio, and walked
//! peptide by peptide. Each peptide can be accepted or rejected; once the
//! last protein is passed the rejected peptides are sent to the annotation
//! server.
mod config;
mod cursor;
mod dataset;
pub mod export;
mod filter;
mod parser;
mod protein;
mod session;
mod transport;

pub use config::{Config, TARGET_RATIO};
pub use cursor::{Cursor, State, Step};
pub use dataset::{Dataset, Summary};
pub use export::{Annotation, AnnotationSet};
pub use filter::{Filter, ProteinFilter};
pub use parser::{Error as ParseError, ErrorKind, Parser};
pub use protein::{Decision, Peptide, Protein};
pub use session::{Command, Session};
pub use transport::{HttpTransport, Transport};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The cursor does not point at a peptide. Indicates a navigation bug.
    #[error("No peptide at cursor position ({protein}, {peptide:?})")]
    Cursor {
        protein: usize,
        peptide: Option<usize>,
    },

    #[error("Config error: {0}")]
    Config(String),
}

/// Parse a string containing a complete combined DTASelect file into a
/// `Dataset`
pub fn read_dta(input: &str) -> Result<Dataset, ParseError> {
    Parser::new(input).parse()
}

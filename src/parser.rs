//! Parse combined DTASelect (`combined_dta.txt`) files
//!
//! The first line is a header and is discarded. Every following line is
//! tab-delimited: a non-empty first column opens a new protein, an empty
//! first column (with more columns following) is a peptide of the most
//! recently opened protein.
use super::*;

use regex::Regex;
use std::fmt;
use std::str::Lines;

/// Columns of a protein row
const PROTEIN_INDEX: usize = 0;
const PROTEIN_SEQUENCE: usize = 4;

/// Columns of a peptide row
const IPI: usize = 1;
const DESCRIPTION: usize = 2;
const SYMBOL: usize = 3;
const SEQUENCE: usize = 4;
const RATIO: usize = 6;
const CHARGE: usize = 9;
const SEGMENT: usize = 10;
const LINK: usize = 11;

#[derive(PartialEq, PartialOrd, Debug, Clone, Copy)]
pub enum ErrorKind {
    /// A peptide row appeared before any protein row
    NoActiveGroup,
    /// A row is missing a column or a quoted token
    MalformedRow(&'static str),
}

/// Error that may occur during parsing of a DTASelect file
#[derive(PartialEq, PartialOrd, Debug, Clone, Copy)]
pub struct Error {
    pub kind: ErrorKind,
    pub line: usize,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            ErrorKind::NoActiveGroup => write!(
                f,
                "Error parsing file at line {}: peptide row without a protein",
                self.line
            ),
            ErrorKind::MalformedRow(what) => write!(
                f,
                "Error parsing file at line {}: malformed row, {}",
                self.line, what
            ),
        }
    }
}

impl std::error::Error for Error {}

/// Named view over the columns of a peptide row
struct PeptideRow<'s> {
    ipi: &'s str,
    description: &'s str,
    symbol: &'s str,
    sequence: &'s str,
    ratio: &'s str,
    charge: &'s str,
    segment: &'s str,
    src: &'s str,
    link: &'s str,
}

pub struct Parser<'s> {
    iter: Lines<'s>,
    quoted: Regex,
    line: usize,
}

impl<'s> Parser<'s> {
    /// Create a new parser operating on input data
    pub fn new(input: &'s str) -> Parser<'s> {
        Parser {
            iter: input.lines(),
            // Everything after the first quote, up to the closing one if any
            quoted: Regex::new(r#""([^"]*)"#).expect("static regex"),
            line: 0,
        }
    }

    /// Convenience function for creating Error struct
    fn err(&self, kind: ErrorKind) -> Error {
        Error {
            kind,
            line: self.line,
        }
    }

    fn next(&mut self) -> Option<&'s str> {
        let n = self.iter.next();
        if n.is_some() {
            self.line += 1;
        }
        n
    }

    fn unquote(&self, token: &'s str) -> Result<&'s str, Error> {
        self.quoted
            .captures(token)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| self.err(ErrorKind::MalformedRow("expected a quoted token")))
    }

    fn parse_row(&self, data: &[&'s str]) -> Result<PeptideRow<'s>, Error> {
        if data.len() <= LINK {
            return Err(self.err(ErrorKind::MalformedRow("too few columns")));
        }
        let mut tokens = data[LINK].split(',');
        let src = tokens
            .next()
            .ok_or_else(|| self.err(ErrorKind::MalformedRow("empty link column")))?;
        let link = tokens
            .next()
            .ok_or_else(|| self.err(ErrorKind::MalformedRow("expected two link tokens")))?;

        Ok(PeptideRow {
            ipi: data[IPI],
            description: data[DESCRIPTION],
            symbol: data[SYMBOL],
            sequence: data[SEQUENCE],
            ratio: data[RATIO],
            charge: data[CHARGE],
            segment: data[SEGMENT],
            src: self.unquote(src)?,
            link: self.unquote(link)?,
        })
    }

    /// A protein row only needs its index column, a short row gets an
    /// empty sequence
    fn parse_protein(&self, data: &[&'s str]) -> Protein {
        let sequence = data.get(PROTEIN_SEQUENCE).copied().unwrap_or("");
        Protein::new(sequence, data[PROTEIN_INDEX])
    }

    pub fn parse(mut self) -> Result<Dataset, Error> {
        let mut proteins: Vec<Protein> = Vec::new();

        // Header row
        let _ = self.next();

        while let Some(line) = self.next() {
            let data = line.split('\t').collect::<Vec<_>>();

            if !data[PROTEIN_INDEX].trim().is_empty() {
                proteins.push(self.parse_protein(&data));
            } else if data.len() > 1 {
                let protein = proteins
                    .last_mut()
                    .ok_or_else(|| self.err(ErrorKind::NoActiveGroup))?;
                let row = self.parse_row(&data)?;
                protein.set_identity(row.ipi, row.description, row.symbol);
                protein.add_peptide(Peptide {
                    sequence: row.sequence.into(),
                    ratio: row.ratio.into(),
                    charge: row.charge.into(),
                    segment: row.segment.into(),
                    link: row.link.into(),
                    src: row.src.into(),
                    annotation: Decision::Undecided,
                });
            }
        }

        Ok(Dataset { proteins })
    }
}

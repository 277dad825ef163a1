//! Utilities for narrowing datasets down to the proteins worth reviewing,
//! based on a set of composable rules
use super::*;

/// Protein-level filter
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum ProteinFilter {
    /// Include only proteins with at least one peptide whose ratio is
    /// exactly this text. Ratios are never compared numerically, "20.0"
    /// does not match "20".
    Ratio(String),
    /// Include only proteins that have at least one peptide
    NonEmpty,
}

/// Provides filtering functionality on datasets and proteins
#[derive(Debug, Clone, PartialEq, PartialOrd, Default)]
pub struct Filter {
    protein_filters: Vec<ProteinFilter>,
}

impl Filter {
    /// The filter applied before review: proteins with at least one
    /// peptide at the target ratio
    pub fn targets<S: Into<String>>(ratio: S) -> Filter {
        Filter::default().add_protein_filter(ProteinFilter::Ratio(ratio.into()))
    }

    /// Add a new `ProteinFilter` to the `Filter` object.
    ///
    /// This follows the Builder pattern
    pub fn add_protein_filter(mut self, filter: ProteinFilter) -> Self {
        self.protein_filters.push(filter);
        self
    }

    /// Return a new `Dataset` that only contains passing `Protein`s, in
    /// their original order
    pub fn filter_dataset(&self, dataset: Dataset) -> Dataset {
        Dataset {
            proteins: dataset
                .proteins
                .into_iter()
                .filter(|prot| self.accepts(prot))
                .collect(),
        }
    }

    /// Does the `Protein` pass every rule? Peptides are left untouched.
    pub fn accepts(&self, protein: &Protein) -> bool {
        self.protein_filters.iter().all(|filter| match filter {
            ProteinFilter::Ratio(ratio) => protein.has_ratio(ratio),
            ProteinFilter::NonEmpty => !protein.peptides.is_empty(),
        })
    }
}

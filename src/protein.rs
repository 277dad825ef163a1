#[derive(Copy, Clone, PartialEq, Eq, Debug)]
/// Reviewer's verdict on a single peptide identification
pub enum Decision {
    Undecided,
    Accepted,
    Rejected,
}

impl Default for Decision {
    fn default() -> Self {
        Decision::Undecided
    }
}

#[derive(PartialEq, Clone, Debug, Default)]
/// Protein-level entry from a combined DTASelect file, and the peptide
/// identifications that were listed beneath it
pub struct Protein {
    /// Protein sequence column of the opening row
    pub sequence: String,
    /// Row identifier, taken from the first column of the opening row
    pub index: String,
    /// IPI accession, read from the first peptide row
    pub ipi: Option<String>,
    /// Long-form description, read from the first peptide row
    pub description: Option<String>,
    /// Gene symbol, read from the first peptide row
    pub symbol: Option<String>,
    /// Peptides in file order
    pub peptides: Vec<Peptide>,
}

impl Protein {
    pub fn new<S: Into<String>>(sequence: S, index: S) -> Protein {
        Protein {
            sequence: sequence.into(),
            index: index.into(),
            ..Default::default()
        }
    }

    /// Record the identity columns of a peptide row. Only the first call
    /// has any effect, later rows never overwrite the protein's identity.
    pub fn set_identity(&mut self, ipi: &str, description: &str, symbol: &str) {
        if self.ipi.is_none() {
            self.ipi = Some(ipi.into());
            self.description = Some(description.into());
            self.symbol = Some(symbol.into());
        }
    }

    pub fn add_peptide(&mut self, peptide: Peptide) {
        self.peptides.push(peptide);
    }

    /// Does any peptide of this protein carry the given ratio?
    pub fn has_ratio(&self, ratio: &str) -> bool {
        self.peptides.iter().any(|pep| pep.ratio == ratio)
    }

    /// Index of the first peptide with `ratio` that comes after `after`, or
    /// the first one overall when `after` is `None`
    pub fn next_with_ratio(&self, after: Option<usize>, ratio: &str) -> Option<usize> {
        let start = after.map(|i| i + 1).unwrap_or(0);
        self.peptides
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, pep)| pep.ratio == ratio)
            .map(|(i, _)| i)
    }

    /// Index of the last peptide with `ratio` strictly before `before`, or
    /// the last one overall when `before` is `None`
    pub fn previous_with_ratio(&self, before: Option<usize>, ratio: &str) -> Option<usize> {
        let end = before.unwrap_or(self.peptides.len()).min(self.peptides.len());
        self.peptides[..end].iter().rposition(|pep| pep.ratio == ratio)
    }
}

#[derive(PartialEq, Clone, Debug)]
/// Peptide-level identification awaiting manual review
pub struct Peptide {
    /// Peptide sequence
    pub sequence: String,
    /// Quantification ratio, kept as the literal text from the file
    pub ratio: String,
    pub charge: String,
    pub segment: String,
    /// Cross-reference link for the annotation server
    pub link: String,
    /// Chromatogram file name, relative to the dataset's directory
    pub src: String,
    pub annotation: Decision,
}

impl Peptide {
    pub fn decide(&mut self, accept: bool) {
        self.annotation = if accept {
            Decision::Accepted
        } else {
            Decision::Rejected
        };
    }
}

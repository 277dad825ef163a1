//! Collection of `Protein` objects representing a single dataset
use super::*;

#[derive(PartialEq, Clone, Debug, Default)]
/// Container for the identifications read from one combined DTASelect file
pub struct Dataset {
    /// Proteins in file order
    pub proteins: Vec<Protein>,
}

impl Dataset {
    pub fn filter(self, filter: &Filter) -> Self {
        filter.filter_dataset(self)
    }

    /// Narrow the dataset in place, keeping only proteins that pass
    pub fn retain(&mut self, filter: &Filter) {
        self.proteins.retain(|prot| filter.accepts(prot));
    }

    pub fn peptide(&self, protein: usize, peptide: usize) -> Option<&Peptide> {
        self.proteins.get(protein)?.peptides.get(peptide)
    }

    pub fn peptide_mut(&mut self, protein: usize, peptide: usize) -> Option<&mut Peptide> {
        self.proteins.get_mut(protein)?.peptides.get_mut(peptide)
    }

    /// Count the decisions made on peptides carrying `ratio`
    pub fn summary(&self, ratio: &str) -> Summary {
        let mut summary = Summary::default();
        for pep in self
            .proteins
            .iter()
            .flat_map(|prot| prot.peptides.iter())
            .filter(|pep| pep.ratio == ratio)
        {
            match pep.annotation {
                Decision::Accepted => summary.accepted += 1,
                Decision::Rejected => summary.rejected += 1,
                Decision::Undecided => summary.undecided += 1,
            }
        }
        summary
    }
}

/// Review progress over the peptides of a dataset
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Summary {
    pub accepted: usize,
    pub rejected: usize,
    pub undecided: usize,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn retain_and_summary() {
        let input = "header\n\
                     1\t\t\t\tMAAA\n\
                     \t\t\t\tK.A.R\t\t20\t\t\t2\t1\t\"a\",\"a\"\n\
                     \t\t\t\tK.B.R\t\t20\t\t\t2\t1\t\"b\",\"b\"\n\
                     2\t\t\t\tMBBB\n\
                     \t\t\t\tK.C.R\t\t7\t\t\t2\t1\t\"c\",\"c\"\n";
        let mut data = read_dta(input).unwrap();
        data.retain(&Filter::targets("20"));
        assert_eq!(data.proteins.len(), 1);

        data.peptide_mut(0, 1).unwrap().decide(false);
        assert_eq!(
            data.summary("20"),
            Summary {
                accepted: 0,
                rejected: 1,
                undecided: 1
            }
        );
        assert!(data.peptide(0, 2).is_none());
        assert!(data.peptide(1, 0).is_none());
    }
}

//! Stepwise navigation over the qualifying peptides of a dataset
//!
//! The cursor only ever rests on peptides whose ratio matches the target,
//! moving across protein boundaries when the current protein runs out.
use super::*;
use log::debug;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum State {
    Positioned,
    /// Ran past the final protein. The last position is retained.
    Exhausted,
}

/// Outcome of a single cursor movement
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Step {
    Moved,
    /// Nowhere to go, the cursor did not change
    Stayed,
    /// Moved past the last protein of the dataset
    Exhausted,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Cursor {
    /// Index of the current protein
    pub protein: usize,
    /// Index of the current peptide. `None` until a qualifying peptide has
    /// been located in the current protein.
    pub peptide: Option<usize>,
    pub state: State,
    ratio: String,
}

impl Cursor {
    pub fn new<S: Into<String>>(ratio: S) -> Cursor {
        Cursor {
            protein: 0,
            peptide: None,
            state: State::Positioned,
            ratio: ratio.into(),
        }
    }

    pub fn ratio(&self) -> &str {
        &self.ratio
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == State::Exhausted
    }

    /// Move back to the start, before the first peptide of the first protein
    pub fn reset(&mut self) {
        self.protein = 0;
        self.peptide = None;
        self.state = State::Positioned;
    }

    /// The `(protein, peptide)` pair the cursor rests on, if any
    pub fn position(&self) -> Option<(usize, usize)> {
        self.peptide.map(|pep| (self.protein, pep))
    }

    /// Move to the next qualifying peptide, cascading into the following
    /// protein when this one has none left
    pub fn advance(&mut self, data: &Dataset) -> Step {
        if self.is_exhausted() {
            return Step::Exhausted;
        }
        let next = data
            .proteins
            .get(self.protein)
            .and_then(|prot| prot.next_with_ratio(self.peptide, &self.ratio));
        match next {
            Some(idx) => {
                self.peptide = Some(idx);
                debug!("cursor -> ({}, {})", self.protein, idx);
                Step::Moved
            }
            None => self.next_group(data),
        }
    }

    /// Equivalent to `advance`, kept separate so callers can tell a skip
    /// from a recorded decision
    pub fn skip(&mut self, data: &Dataset) -> Step {
        self.advance(data)
    }

    /// Move to the previous qualifying peptide, cascading into the end of
    /// the preceding protein. A no-op on the first qualifying peptide.
    pub fn retreat(&mut self, data: &Dataset) -> Step {
        if self.is_exhausted() {
            self.state = State::Positioned;
            return Step::Moved;
        }
        let prev = match self.peptide {
            Some(pep) => data
                .proteins
                .get(self.protein)
                .and_then(|prot| prot.previous_with_ratio(Some(pep), &self.ratio)),
            None => None,
        };
        match prev {
            Some(idx) => {
                self.peptide = Some(idx);
                debug!("cursor -> ({}, {})", self.protein, idx);
                Step::Moved
            }
            None if self.protein > 0 => {
                self.protein -= 1;
                self.peptide = data.proteins[self.protein].previous_with_ratio(None, &self.ratio);
                debug!("cursor -> ({}, {:?})", self.protein, self.peptide);
                Step::Moved
            }
            None => Step::Stayed,
        }
    }

    /// Jump to the first qualifying peptide of the next protein, or exhaust
    /// the cursor if this was the last one
    pub fn next_group(&mut self, data: &Dataset) -> Step {
        if self.is_exhausted() {
            return Step::Exhausted;
        }
        if self.protein + 1 < data.proteins.len() {
            self.protein += 1;
            self.peptide = data.proteins[self.protein].next_with_ratio(None, &self.ratio);
            debug!("cursor -> ({}, {:?})", self.protein, self.peptide);
            Step::Moved
        } else {
            debug!("cursor exhausted at protein {}", self.protein);
            self.state = State::Exhausted;
            Step::Exhausted
        }
    }

    /// Jump to the first qualifying peptide of the previous protein
    pub fn previous_group(&mut self, data: &Dataset) -> Step {
        if self.protein == 0 {
            return Step::Stayed;
        }
        self.state = State::Positioned;
        self.protein -= 1;
        self.peptide = data.proteins[self.protein].next_with_ratio(None, &self.ratio);
        debug!("cursor -> ({}, {:?})", self.protein, self.peptide);
        Step::Moved
    }
}

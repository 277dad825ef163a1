//! Review session: a queue of dataset URLs, the dataset under review, and
//! the cursor over it
use super::*;
use log::{debug, info, warn};

/// Reviewer input, independent of how it was entered
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Command {
    Advance,
    Retreat,
    Accept,
    Reject,
    Skip,
    NextGroup,
    PreviousGroup,
}

pub struct Session<T: Transport> {
    transport: T,
    urls: Vec<String>,
    current: usize,
    dataset: Dataset,
    cursor: Cursor,
    filter: Filter,
    finished: bool,
}

impl<T: Transport> Session<T> {
    pub fn new(transport: T, config: &Config) -> Session<T> {
        Session {
            transport,
            urls: Vec::new(),
            current: 0,
            dataset: Dataset::default(),
            cursor: Cursor::new(config.target_ratio.as_str()),
            filter: Filter::targets(config.target_ratio.as_str()),
            finished: true,
        }
    }

    /// Queue a newline delimited list of dataset URLs and load the first
    /// one. Blank lines are ignored. Commands are ignored until a dataset
    /// has loaded. If the first dataset cannot be loaded the session keeps
    /// its previous queue, dataset and cursor.
    pub fn start(&mut self, urls: &str) -> Result<(), Error> {
        let urls: Vec<String> = urls
            .lines()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(String::from)
            .collect();
        if urls.is_empty() {
            info!("no datasets to review");
            self.urls = urls;
            self.current = 0;
            self.dataset = Dataset::default();
            self.cursor.reset();
            self.finished = true;
            return Ok(());
        }

        let previous = std::mem::replace(&mut self.urls, urls);
        if let Err(e) = self.replace(0) {
            self.urls = previous;
            return Err(e);
        }
        self.begin()
    }

    /// Load the dataset at `urls[index]`, leaving the previous dataset and
    /// cursor untouched if it cannot be fetched or parsed
    fn replace(&mut self, index: usize) -> Result<(), Error> {
        let url = &self.urls[index];
        let text = self.transport.fetch(url)?;
        let mut dataset = read_dta(&text)?;
        dataset.retain(&self.filter);
        info!(
            "loaded {} ({} proteins to review)",
            url,
            dataset.proteins.len()
        );

        self.current = index;
        self.dataset = dataset;
        self.cursor.reset();
        self.finished = false;
        Ok(())
    }

    /// Move onto the first qualifying peptide of a freshly loaded dataset
    fn begin(&mut self) -> Result<(), Error> {
        let step = self.cursor.advance(&self.dataset);
        self.after(step)
    }

    pub fn apply(&mut self, command: Command) -> Result<(), Error> {
        if self.finished {
            warn!("{:?} ignored, all datasets have been reviewed", command);
            return Ok(());
        }
        debug!("{:?}", command);
        let step = match command {
            Command::Advance => self.cursor.advance(&self.dataset),
            Command::Skip => self.cursor.skip(&self.dataset),
            Command::Retreat => self.cursor.retreat(&self.dataset),
            Command::NextGroup => self.cursor.next_group(&self.dataset),
            Command::PreviousGroup => self.cursor.previous_group(&self.dataset),
            Command::Accept => self.decide(true)?,
            Command::Reject => self.decide(false)?,
        };
        self.after(step)
    }

    fn decide(&mut self, accept: bool) -> Result<Step, Error> {
        let (protein, peptide) = match self.cursor.position() {
            Some(pos) if !self.cursor.is_exhausted() => pos,
            _ => {
                return Err(Error::Cursor {
                    protein: self.cursor.protein,
                    peptide: self.cursor.peptide,
                })
            }
        };
        match self.dataset.peptide_mut(protein, peptide) {
            Some(pep) => pep.decide(accept),
            None => {
                debug_assert!(false, "cursor at ({}, {}) out of range", protein, peptide);
                return Err(Error::Cursor {
                    protein,
                    peptide: Some(peptide),
                });
            }
        }
        Ok(self.cursor.advance(&self.dataset))
    }

    fn after(&mut self, step: Step) -> Result<(), Error> {
        if step != Step::Exhausted {
            return Ok(());
        }
        self.export();
        if self.current + 1 < self.urls.len() {
            self.replace(self.current + 1)?;
            self.begin()
        } else {
            info!("all datasets reviewed");
            self.finished = true;
            Ok(())
        }
    }

    /// Deliver the rejected peptides of the current dataset. Failures are
    /// reported but never stop the review.
    fn export(&self) {
        let url = &self.urls[self.current];
        let set = AnnotationSet::collect(&self.dataset, url, self.cursor.ratio());
        info!(
            "exporting {} annotations for {}",
            set.annotations.len(),
            set.file
        );
        if let Err(e) = self.transport.annotate(&set) {
            warn!("annotate request for {} failed: {}", set.file, e);
        }
        if let Err(e) = self.transport.persist(&set) {
            warn!("persist request for {} failed: {}", set.file, e);
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// URL of the dataset under review
    pub fn url(&self) -> Option<&str> {
        self.urls.get(self.current).map(String::as_str)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current_protein(&self) -> Option<&Protein> {
        self.dataset.proteins.get(self.cursor.protein)
    }

    pub fn current_peptide(&self) -> Option<&Peptide> {
        let (protein, peptide) = self.cursor.position()?;
        self.dataset.peptide(protein, peptide)
    }

    pub fn chromatogram_url(&self) -> Option<String> {
        Some(export::chromatogram_url(
            self.url()?,
            &self.current_peptide()?.src,
        ))
    }

    pub fn summary(&self) -> Summary {
        self.dataset.summary(self.cursor.ratio())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Recorder {
        files: HashMap<String, String>,
        annotated: RefCell<Vec<AnnotationSet>>,
        persisted: RefCell<Vec<AnnotationSet>>,
        fail_exports: bool,
    }

    impl Transport for Recorder {
        fn fetch(&self, url: &str) -> Result<String, Error> {
            self.files
                .get(url)
                .cloned()
                .ok_or_else(|| Error::Transport(format!("404 {}", url)))
        }

        fn annotate(&self, set: &AnnotationSet) -> Result<(), Error> {
            self.annotated.borrow_mut().push(set.clone());
            if self.fail_exports {
                return Err(Error::Transport("annotate down".into()));
            }
            Ok(())
        }

        fn persist(&self, set: &AnnotationSet) -> Result<(), Error> {
            self.persisted.borrow_mut().push(set.clone());
            if self.fail_exports {
                return Err(Error::Transport("persist down".into()));
            }
            Ok(())
        }
    }

    const FIRST: &str = "header\n\
                         1\tipi1\tdesc\tsym\tSEQ1\n\
                         \tipi1\tdesc\tsym\tSEQ1a\t\t20\t\t\tchg\tseg\t\"src1\",\"link1\"\n\
                         \t\t\t\tSEQ1b\t\t15\t\t\tchg2\tseg2\t\"src2\",\"link2\"\n";

    const SECOND: &str = "header\n\
                          7\t\t\t\tMXXX\n\
                          \tIPI7\td\tS7\tK.X.R\t\t20\t\t\t2\t1\t\"x.png\",\"x\"\n\
                          \tIPI7\td\tS7\tK.Y.R\t\t20\t\t\t2\t1\t\"y.png\",\"y\"\n\
                          8\t\t\t\tMZZZ\n\
                          \tIPI8\td\tS8\tK.Z.R\t\t4\t\t\t2\t1\t\"z.png\",\"z\"\n";

    fn session(fail_exports: bool) -> Session<Recorder> {
        let mut files = HashMap::new();
        files.insert("http://h/a/combined_dta.txt".to_string(), FIRST.to_string());
        files.insert("http://h/b/combined_dta.txt".to_string(), SECOND.to_string());
        files.insert("http://h/bad/combined_dta.txt".to_string(), "header\n1\t\t\t\tM\n\t\t\t\tS\t\t20\t\t\t2\t1\t\"a\" \"b\"\n".to_string());
        let recorder = Recorder {
            files,
            fail_exports,
            ..Default::default()
        };
        Session::new(recorder, &Config::default())
    }

    #[test]
    fn single_group_example() {
        let mut s = session(false);
        s.start("http://h/a/combined_dta.txt\n").unwrap();
        assert_eq!(s.dataset().proteins.len(), 1);
        assert_eq!(s.dataset().proteins[0].index, "1");
        assert_eq!(s.dataset().proteins[0].peptides.len(), 2);
        assert_eq!(s.current_peptide().unwrap().sequence, "SEQ1a");
        assert_eq!(
            s.chromatogram_url().as_deref(),
            Some("http://h/a/src1")
        );

        s.apply(Command::Reject).unwrap();
        assert!(s.is_finished());
        let annotated = s.transport().annotated.borrow();
        let persisted = s.transport().persisted.borrow();
        assert_eq!(annotated.len(), 1);
        assert_eq!(annotated[0], persisted[0]);
        assert_eq!(annotated[0].file, "http://h/a/combined_dta.html");
        assert_eq!(annotated[0].annotations.len(), 1);
        assert_eq!(annotated[0].annotations[0].link, "link1");
        assert_eq!(annotated[0].annotations[0].index, "1");
    }

    #[test]
    fn accepted_and_undecided_are_not_exported() {
        let mut s = session(false);
        s.start("http://h/b/combined_dta.txt").unwrap();
        // protein 8 has no ratio 20 peptide
        assert_eq!(s.dataset().proteins.len(), 1);
        s.apply(Command::Accept).unwrap();
        assert_eq!(s.current_peptide().unwrap().sequence, "K.Y.R");
        s.apply(Command::Skip).unwrap();
        assert!(s.is_finished());
        assert!(s.transport().annotated.borrow()[0].annotations.is_empty());
    }

    #[test]
    fn correcting_a_decision() {
        let mut s = session(false);
        s.start("http://h/b/combined_dta.txt").unwrap();
        s.apply(Command::Reject).unwrap();
        s.apply(Command::Retreat).unwrap();
        assert_eq!(s.current_peptide().unwrap().sequence, "K.X.R");
        assert_eq!(
            s.summary(),
            Summary {
                accepted: 0,
                rejected: 1,
                undecided: 1
            }
        );
        s.apply(Command::Accept).unwrap();
        s.apply(Command::Reject).unwrap();
        let annotated = s.transport().annotated.borrow();
        assert_eq!(annotated[0].annotations.len(), 1);
        assert_eq!(annotated[0].annotations[0].sequence, "K.Y.R");
    }

    #[test]
    fn moves_on_to_next_dataset() {
        let mut s = session(true);
        s.start("  http://h/a/combined_dta.txt \n\nhttp://h/b/combined_dta.txt\n")
            .unwrap();
        s.apply(Command::Reject).unwrap();
        // export failures are only logged
        assert!(!s.is_finished());
        assert_eq!(s.url(), Some("http://h/b/combined_dta.txt"));
        assert_eq!(s.current_peptide().unwrap().sequence, "K.X.R");
        assert_eq!(s.current_protein().unwrap().symbol.as_deref(), Some("S7"));

        s.apply(Command::NextGroup).unwrap();
        assert!(s.is_finished());
        assert_eq!(s.transport().annotated.borrow().len(), 2);
        assert_eq!(s.transport().persisted.borrow().len(), 2);

        // nothing left to review
        s.apply(Command::Accept).unwrap();
        assert_eq!(s.transport().annotated.borrow().len(), 2);
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut s = session(false);
        s.start("http://h/b/combined_dta.txt\nhttp://h/bad/combined_dta.txt")
            .unwrap();
        s.apply(Command::Reject).unwrap();

        match s.apply(Command::Reject) {
            Err(Error::Parse(e)) => assert_eq!(e.line, 3),
            other => panic!("expected a parse error, got {:?}", other),
        }
        assert_eq!(s.url(), Some("http://h/b/combined_dta.txt"));
        assert_eq!(s.dataset().proteins[0].index, "7");
        assert_eq!(s.summary().rejected, 2);
        assert_eq!(s.transport().annotated.borrow().len(), 1);
    }

    #[test]
    fn missing_dataset() {
        let mut s = session(false);
        assert!(matches!(
            s.start("http://h/nope.txt"),
            Err(Error::Transport(_))
        ));
        assert!(s.is_finished());
        s.apply(Command::Advance).unwrap();
        assert!(s.transport().annotated.borrow().is_empty());

        let mut s = session(false);
        s.start("\n\n").unwrap();
        assert!(s.is_finished());
    }

    #[test]
    fn failed_restart_keeps_session() {
        let mut s = session(false);
        s.start("http://h/b/combined_dta.txt").unwrap();
        s.apply(Command::Reject).unwrap();

        assert!(matches!(
            s.start("http://h/nope.txt\nhttp://h/a/combined_dta.txt"),
            Err(Error::Transport(_))
        ));
        assert_eq!(s.url(), Some("http://h/b/combined_dta.txt"));
        assert!(!s.is_finished());
        assert_eq!(s.dataset().proteins[0].index, "7");
        assert_eq!(s.current_peptide().unwrap().sequence, "K.Y.R");
        assert_eq!(s.summary().rejected, 1);

        // the old queue is still live
        s.apply(Command::Skip).unwrap();
        assert!(s.is_finished());
        assert_eq!(
            s.transport().annotated.borrow()[0].file,
            "http://h/b/combined_dta.html"
        );
    }
}

use std::path::{Path, PathBuf};

/// What happened to one file during one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    Renamed,
    Tagged,
    Exported,
    ParseError,
    TagError,
}

/// Per-pass collection of per-file outcomes. Log lines report progress
/// as it happens; this is the machine-checkable record of the run.
pub struct RunReport {
    pass: &'static str,
    entries: Vec<(PathBuf, Outcome)>,
}

impl RunReport {
    pub fn new(pass: &'static str) -> Self {
        RunReport {
            pass,
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, path: &Path, outcome: Outcome) {
        self.entries.push((path.to_path_buf(), outcome));
    }

    pub fn entries(&self) -> &[(PathBuf, Outcome)] {
        &self.entries
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.entries.iter().filter(|(_, o)| *o == outcome).count()
    }

    pub fn summary(&self) -> String {
        let changed = self.count(Outcome::Renamed)
            + self.count(Outcome::Tagged)
            + self.count(Outcome::Exported);
        let errors = self.count(Outcome::ParseError) + self.count(Outcome::TagError);
        format!(
            "{}: {} files, {} changed, {} errors",
            self.pass,
            self.entries.len(),
            changed,
            errors
        )
    }
}

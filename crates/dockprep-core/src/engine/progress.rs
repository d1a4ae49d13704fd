use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    /// The input was segmented; `count` structures were found.
    StructuresFound { count: usize },
    /// Files about to be written by the selected policy.
    WriteStart { total_files: u64 },
    StructureWritten { path: PathBuf, line_count: usize },
    WriteFinish,
    /// A ligand candidate was ignored (e.g. no parseable atoms).
    CandidateSkipped { index: usize, reason: String },

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

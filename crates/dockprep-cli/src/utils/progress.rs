use dockprep::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use tracing::warn;

#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0)
            .with_style(Self::spinner_style())
            .with_message("Reading...");
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::StructuresFound { count } => {
                    pb.set_message(format!("Found {} structure(s)", count));
                }
                Progress::WriteStart { total_files } => {
                    pb.reset();
                    pb.set_length(total_files);
                    pb.set_position(0);
                    pb.set_style(Self::bar_style());
                    pb.set_message("Writing");
                }
                Progress::StructureWritten { path, line_count } => {
                    pb.inc(1);
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    pb.set_message(format!("{} ({} lines)", name, line_count));
                }
                Progress::WriteFinish => {
                    pb.finish_with_message("✓ Done");
                }
                Progress::CandidateSkipped { index, reason } => {
                    pb.println(format!("  Skipped structure #{}: {}", index, reason));
                }
                Progress::Message(msg) => {
                    if !pb.is_finished() {
                        pb.println(format!("  {}", msg));
                    } else {
                        pb.set_message(msg);
                    }
                }
            }
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .expect("Failed to create spinner style template")
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("[{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .expect("Failed to create bar style template")
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = CliProgressHandler::new();
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.length(), Some(0));
        assert!(pb.is_finished());
    }

    #[test]
    fn callback_tracks_written_files() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::StructuresFound { count: 3 });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.message(), "Found 3 structure(s)");
        }

        callback(Progress::WriteStart { total_files: 2 });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.length(), Some(2));
            assert_eq!(pb.position(), 0);
            assert!(!pb.is_finished());
        }

        callback(Progress::StructureWritten {
            path: PathBuf::from("/tmp/1abc-split-7.pdbqt"),
            line_count: 7,
        });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.position(), 1);
            assert_eq!(pb.message(), "1abc-split-7.pdbqt (7 lines)");
        }

        callback(Progress::WriteFinish);
        {
            let pb = handler.pb.lock().unwrap();
            assert!(pb.is_finished());
            assert_eq!(pb.message(), "✓ Done");
        }
    }

    #[test]
    fn messages_print_while_active_and_replace_text_when_finished() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::Message("No ligand candidate".to_string()));
        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.message(), "No ligand candidate");
    }
}

use crate::core::io::traits::RecordFile;
use crate::core::models::structure::StructureSet;
use crate::engine::error::EngineError;
use crate::engine::naming::OutputNamer;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::selection::{self, SavePolicy, StructureRole};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// A structure file produced by the split workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenStructure {
    pub path: PathBuf,
    pub role: StructureRole,
    /// Position of the structure in the input file.
    pub index: usize,
    pub line_count: usize,
}

#[derive(Debug, Clone)]
pub struct SplitResult {
    /// Every structure found in the input, in file order.
    pub structures: StructureSet,
    /// Files written, in write order.
    pub written: Vec<WrittenStructure>,
}

/// Splits `input` into structures and writes those selected by `policy` next to it.
///
/// Files already written when an error occurs are left in place.
#[instrument(skip_all, name = "split_workflow", fields(input = %input.display(), policy = %policy))]
pub fn run(
    input: &Path,
    policy: SavePolicy,
    reporter: &ProgressReporter,
) -> Result<SplitResult, EngineError> {
    info!("Reading structures.");
    let structures = StructureSet::read_from_path(input)?;
    debug!(
        "Structure line counts: {:?}",
        structures.iter().map(|s| s.len()).collect::<Vec<_>>()
    );
    reporter.report(Progress::StructuresFound {
        count: structures.len(),
    });

    let selections = selection::select(&structures, policy, reporter)?;
    if policy == SavePolicy::Mains
        && !selections.iter().any(|s| s.role == StructureRole::Ligand)
    {
        warn!("No ligand candidate with atoms was found; only the main structure is written.");
        reporter.report(Progress::Message(
            "No ligand candidate found; writing the main structure only".to_string(),
        ));
    }
    reporter.report(Progress::WriteStart {
        total_files: selections.len() as u64,
    });

    let mut namer = OutputNamer::new(input);
    let mut written = Vec::with_capacity(selections.len());
    for sel in selections {
        let Some(structure) = structures.get(sel.index) else {
            continue;
        };
        let path = namer.next_path(structure.len(), sel.role);
        structure.write_to_path(&path)?;
        info!(
            "Wrote {:?} structure #{} ({} lines) to {}",
            sel.role,
            sel.index,
            structure.len(),
            path.display()
        );
        reporter.report(Progress::StructureWritten {
            path: path.clone(),
            line_count: structure.len(),
        });
        written.push(WrittenStructure {
            path,
            role: sel.role,
            index: sel.index,
            line_count: structure.len(),
        });
    }
    reporter.report(Progress::WriteFinish);

    Ok(SplitResult {
        structures,
        written,
    })
}

/// Same as [`run`], taking the policy by name. An unknown name is rejected before the
/// input is opened.
pub fn run_by_name(
    input: &Path,
    policy: &str,
    reporter: &ProgressReporter,
) -> Result<SplitResult, EngineError> {
    let policy: SavePolicy = policy.parse()?;
    run(input, policy, reporter)
}

use crate::error::{CliError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const RECEPTOR_SUFFIX: &str = "_receptor.pdbqt";
pub const LIGAND_SUFFIX: &str = "_ligand.pdbqt";

/// Receptor and ligand paths to feed into the config emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockingInputs {
    pub receptor: PathBuf,
    pub ligand: PathBuf,
}

fn find_unique(entries: &[PathBuf], suffix: &str, dir: &Path) -> Result<Option<PathBuf>> {
    let mut matches = entries.iter().filter(|p| {
        p.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(suffix))
    });
    let first = matches.next().cloned();
    if let Some(second) = matches.next() {
        return Err(CliError::Argument(format!(
            "More than one '*{}' file in {}: {} and {}",
            suffix,
            dir.display(),
            first.as_deref().unwrap_or(Path::new("?")).display(),
            second.display()
        )));
    }
    Ok(first)
}

/// Lists the regular files of `dir` in sorted order.
fn sorted_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            entries.push(path);
        }
    }
    entries.sort();
    Ok(entries)
}

/// Resolves the receptor and ligand for the `conf` command.
///
/// Explicit paths take precedence. Any role left unset is looked up in `prep_dir` as
/// the single file ending in `_receptor.pdbqt` / `_ligand.pdbqt`. Without a prep
/// directory both explicit paths are required.
pub fn resolve_inputs(
    prep_dir: Option<&Path>,
    receptor: Option<&Path>,
    ligand: Option<&Path>,
) -> Result<DockingInputs> {
    if let (Some(r), Some(l)) = (receptor, ligand) {
        return Ok(DockingInputs {
            receptor: r.to_path_buf(),
            ligand: l.to_path_buf(),
        });
    }

    let Some(dir) = prep_dir else {
        return Err(CliError::Argument(
            "either --prep-path or both --receptor and --ligand must be given".to_string(),
        ));
    };
    if !dir.is_dir() {
        return Err(CliError::Argument(format!(
            "prep path is not a directory: {}",
            dir.display()
        )));
    }

    let entries = sorted_files(dir)?;
    debug!("Scanning {} file(s) in {}", entries.len(), dir.display());

    let receptor = match receptor {
        Some(r) => r.to_path_buf(),
        None => find_unique(&entries, RECEPTOR_SUFFIX, dir)?.ok_or_else(|| {
            CliError::Argument(format!(
                "no '*{}' file found in {}",
                RECEPTOR_SUFFIX,
                dir.display()
            ))
        })?,
    };
    let ligand = match ligand {
        Some(l) => l.to_path_buf(),
        None => find_unique(&entries, LIGAND_SUFFIX, dir)?.ok_or_else(|| {
            CliError::Argument(format!(
                "no '*{}' file found in {}",
                LIGAND_SUFFIX,
                dir.display()
            ))
        })?,
    };

    Ok(DockingInputs { receptor, ligand })
}

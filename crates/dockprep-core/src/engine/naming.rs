use super::selection::StructureRole;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Extension used when the input path has none.
pub const DEFAULT_EXTENSION: &str = "pdbqt";

/// Derives output paths for split structures from the input path.
///
/// With `<base>` the input path minus its extension:
///
/// - [`StructureRole::Part`]: `<base>-split-<len>_<n>.<ext>`, where `n` counts earlier
///   parts of the same length, so equal-length structures never share a file.
/// - [`StructureRole::Main`]: `<base>-split-<len>.<ext>`
/// - [`StructureRole::Ligand`]: `<base>-split-<len>_ligand.<ext>`
#[derive(Debug, Clone)]
pub struct OutputNamer {
    base: PathBuf,
    extension: String,
    next_index: HashMap<usize, usize>,
}

impl OutputNamer {
    pub fn new(input: &Path) -> Self {
        let extension = input
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
        Self {
            base: input.with_extension(""),
            extension,
            next_index: HashMap::new(),
        }
    }

    fn with_suffix(&self, suffix: &str) -> PathBuf {
        let mut name = self.base.clone().into_os_string();
        name.push(suffix);
        name.push(".");
        name.push(&self.extension);
        PathBuf::from(name)
    }

    /// Returns the path for the next structure of `line_count` lines in `role`.
    pub fn next_path(&mut self, line_count: usize, role: StructureRole) -> PathBuf {
        match role {
            StructureRole::Part => {
                let slot = self.next_index.entry(line_count).or_insert(0);
                let occurrence = *slot;
                *slot += 1;
                self.with_suffix(&format!("-split-{}_{}", line_count, occurrence))
            }
            StructureRole::Main => self.with_suffix(&format!("-split-{}", line_count)),
            StructureRole::Ligand => self.with_suffix(&format!("-split-{}_ligand", line_count)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_of_equal_length_get_increasing_indices() {
        let mut namer = OutputNamer::new(Path::new("data/1a1e.pdbqt"));
        assert_eq!(
            namer.next_path(41, StructureRole::Part),
            PathBuf::from("data/1a1e-split-41_0.pdbqt")
        );
        assert_eq!(
            namer.next_path(1031, StructureRole::Part),
            PathBuf::from("data/1a1e-split-1031_0.pdbqt")
        );
        assert_eq!(
            namer.next_path(41, StructureRole::Part),
            PathBuf::from("data/1a1e-split-41_1.pdbqt")
        );
    }

    #[test]
    fn main_and_ligand_names() {
        let mut namer = OutputNamer::new(Path::new("1a1e_n-e.pdbqt"));
        assert_eq!(
            namer.next_path(1031, StructureRole::Main),
            PathBuf::from("1a1e_n-e-split-1031.pdbqt")
        );
        assert_eq!(
            namer.next_path(41, StructureRole::Ligand),
            PathBuf::from("1a1e_n-e-split-41_ligand.pdbqt")
        );
    }

    #[test]
    fn only_the_last_extension_is_replaced() {
        let mut namer = OutputNamer::new(Path::new("./runs/v1.2/complex.model.pdbqt"));
        assert_eq!(
            namer.next_path(3, StructureRole::Main),
            PathBuf::from("./runs/v1.2/complex.model-split-3.pdbqt")
        );
    }

    #[test]
    fn missing_extension_defaults_to_pdbqt() {
        let mut namer = OutputNamer::new(Path::new("complex"));
        assert_eq!(
            namer.next_path(7, StructureRole::Main),
            PathBuf::from("complex-split-7.pdbqt")
        );
    }

    #[test]
    fn other_extensions_are_kept() {
        let mut namer = OutputNamer::new(Path::new("complex.pdb"));
        assert_eq!(
            namer.next_path(7, StructureRole::Part),
            PathBuf::from("complex-split-7_0.pdb")
        );
    }
}

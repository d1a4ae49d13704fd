use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use crate::core::models::atom::AtomTable;
use crate::core::models::structure::StructureSet;
use nalgebra::distance;
use std::fmt;
use std::str::FromStr;

/// Which structures of a split file are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SavePolicy {
    /// Every structure, each to its own file.
    #[default]
    All,
    /// The longest structure (the protein) and the structure whose centroid lies
    /// closest to it (the ligand).
    Mains,
    /// Only the longest structure.
    Largest,
}

impl FromStr for SavePolicy {
    type Err = EngineError;

    /// Parses `all`, `mains` or `largest`. Matching is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(SavePolicy::All),
            "mains" => Ok(SavePolicy::Mains),
            "largest" => Ok(SavePolicy::Largest),
            _ => Err(EngineError::InvalidPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for SavePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SavePolicy::All => "all",
            SavePolicy::Mains => "mains",
            SavePolicy::Largest => "largest",
        };
        f.write_str(name)
    }
}

/// The part a selected structure plays in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureRole {
    /// One of all structures, written under the `all` policy.
    Part,
    /// The longest structure.
    Main,
    /// The structure nearest to the main one.
    Ligand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub role: StructureRole,
}

/// The non-main structure whose centroid is nearest to the main structure's centroid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LigandMatch {
    pub index: usize,
    pub distance: f64,
}

/// Finds the ligand for the structure at `main_index`.
///
/// Candidates are all other structures by position. The first candidate wins ties.
/// Candidates without parseable atoms are skipped and reported.
///
/// # Errors
///
/// Returns [`EngineError::NoAtoms`] if the main structure has no parseable atoms.
pub fn nearest_ligand(
    set: &StructureSet,
    main_index: usize,
    reporter: &ProgressReporter,
) -> Result<Option<LigandMatch>, EngineError> {
    let Some(main) = set.get(main_index) else {
        return Ok(None);
    };
    if set.len() < 2 {
        return Ok(None);
    }

    let main_center = AtomTable::from_structure(main)
        .centroid()
        .ok_or(EngineError::NoAtoms {
            what: "main structure",
        })?;

    let mut best: Option<LigandMatch> = None;
    for (index, candidate) in set.iter().enumerate() {
        if index == main_index {
            continue;
        }
        let Some(center) = AtomTable::from_structure(candidate).centroid() else {
            reporter.report(Progress::CandidateSkipped {
                index,
                reason: "no parseable atom records".to_string(),
            });
            continue;
        };
        let d = distance(&main_center, &center);
        if best.is_none_or(|b| d < b.distance) {
            best = Some(LigandMatch { index, distance: d });
        }
    }
    Ok(best)
}

/// Chooses the structures to write under `policy`, in write order.
pub fn select(
    set: &StructureSet,
    policy: SavePolicy,
    reporter: &ProgressReporter,
) -> Result<Vec<Selection>, EngineError> {
    match policy {
        SavePolicy::All => Ok((0..set.len())
            .map(|index| Selection {
                index,
                role: StructureRole::Part,
            })
            .collect()),
        SavePolicy::Largest => Ok(set
            .largest_index()
            .map(|index| Selection {
                index,
                role: StructureRole::Main,
            })
            .into_iter()
            .collect()),
        SavePolicy::Mains => {
            let Some(main_index) = set.largest_index() else {
                return Ok(Vec::new());
            };
            let mut selections = vec![Selection {
                index: main_index,
                role: StructureRole::Main,
            }];
            if let Some(ligand) = nearest_ligand(set, main_index, reporter)? {
                selections.push(Selection {
                    index: ligand.index,
                    role: StructureRole::Ligand,
                });
            }
            Ok(selections)
        }
    }
}

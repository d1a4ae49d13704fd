use crate::core::utils::geometry::{self, Bounds};
use nalgebra::Point3;
use std::fmt;

/// A single atom row parsed from a PDBQT line.
///
/// Fields follow the token order of the line. For `ATOM`/`HETATM` lines the first
/// token is the record keyword, so `atom_name` holds that keyword and `atom_type`
/// holds the atom label (e.g. "N", "CA").
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// First token of the line.
    pub atom_name: String,
    /// Atom serial number.
    pub serial: i64,
    /// Third token of the line, the atom label.
    pub atom_type: String,
    /// Residue name (e.g. "ILE").
    pub residue_name: String,
    /// Chain identifier.
    pub chain_id: String,
    /// Residue sequence number.
    pub residue_number: i64,
    /// Cartesian coordinates in Angstroms.
    pub position: Point3<f64>,
}

/// The field a line failed to provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomField {
    Serial,
    ResidueNumber,
    X,
    Y,
    Z,
}

impl fmt::Display for AtomField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AtomField::Serial => "serial",
            AtomField::ResidueNumber => "residue_number",
            AtomField::X => "x",
            AtomField::Y => "y",
            AtomField::Z => "z",
        };
        f.write_str(name)
    }
}

/// Why a line was not turned into an [`AtomRecord`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    #[error("expected at least 9 tokens, found {found}")]
    TooFewTokens { found: usize },
    #[error("invalid integer for {field}: '{value}'")]
    InvalidInt { field: AtomField, value: String },
    #[error("invalid float for {field}: '{value}'")]
    InvalidFloat { field: AtomField, value: String },
}

/// A line dropped during parsing, kept so callers can audit what was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRejection {
    /// 1-based position of the line in the parsed input.
    pub line_number: usize,
    pub reason: RejectReason,
}

/// The result of parsing a sequence of lines: the accepted atoms in input order and
/// the lines that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomTable {
    records: Vec<AtomRecord>,
    rejected: Vec<LineRejection>,
}

impl AtomTable {
    pub(crate) fn new(records: Vec<AtomRecord>, rejected: Vec<LineRejection>) -> Self {
        Self { records, rejected }
    }

    pub fn records(&self) -> &[AtomRecord] {
        &self.records
    }

    pub fn rejected(&self) -> &[LineRejection] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.records.iter().map(|r| &r.position)
    }

    /// Mean position of all accepted atoms, or `None` for an empty table.
    pub fn centroid(&self) -> Option<Point3<f64>> {
        geometry::centroid(self.positions())
    }

    /// Axis-aligned extents of all accepted atoms, or `None` for an empty table.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.positions())
    }
}

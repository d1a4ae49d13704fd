//! Provides input/output functionality for the file formats handled by dockprep.
//!
//! PDBQT input is read in two ways: as a table of typed atom records ([`pdbqt`]) and
//! as raw `TER`-delimited structures that can be written back verbatim. The Vina
//! configuration format is covered by [`vina`], and [`table`] exports parsed atoms as CSV.

pub mod pdbqt;
pub mod table;
pub mod traits;
pub mod vina;

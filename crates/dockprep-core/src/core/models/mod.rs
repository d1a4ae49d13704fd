//! # Core Models Module
//!
//! Data structures describing the contents of a PDBQT file at two levels of detail.
//!
//! ## Key Components
//!
//! - [`atom`] - Typed atom records parsed from whitespace-separated lines, grouped into
//!   an [`atom::AtomTable`] that also remembers which lines were rejected
//! - [`structure`] - Raw `TER`-terminated line blocks ([`structure::Structure`]) and the
//!   ordered collection found in one file ([`structure::StructureSet`])
//!
//! All models are transient: they are built from file input, used for one computation
//! or write, and dropped.

pub mod atom;
pub mod structure;

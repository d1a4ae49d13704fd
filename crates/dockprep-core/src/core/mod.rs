//! # Core Module
//!
//! Fundamental building blocks shared by the engine and the workflows.
//!
//! - **Structural Representation** ([`models`]) - Atom records, atom tables and
//!   `TER`-delimited structures
//! - **File I/O** ([`io`]) - PDBQT parsing and segmentation, Vina configuration files
//!   and tabular export
//! - **Geometry** ([`utils`]) - Centroids and axis-aligned bounds

pub mod io;
pub mod models;
pub mod utils;

//! # Engine Module
//!
//! Decision logic between raw file contents and the files written by the workflows.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Docking search parameters and their builder
//! - **Selection** ([`selection`]) - Save policies and the choice of main and ligand structures
//! - **Naming** ([`naming`]) - Output paths for split structures, free of collisions
//! - **Search Box** ([`search_box`]) - Box center and size from ligand and receptor atoms
//! - **Progress Monitoring** ([`progress`]) - Progress events for front ends
//! - **Error Handling** ([`error`]) - Engine-level error type

pub mod config;
pub mod error;
pub mod naming;
pub mod progress;
pub mod search_box;
pub mod selection;

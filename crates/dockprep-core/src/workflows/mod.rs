//! # Workflows Module
//!
//! Top-level entry points of the library. Each workflow reads its inputs, runs the
//! engine logic and reports what it wrote.
//!
//! - **Split Workflow** ([`split`]) - Segments a PDBQT file at `TER` records and writes
//!   the structures chosen by a [`SavePolicy`](crate::engine::selection::SavePolicy).
//! - **Prepare Workflow** ([`prepare`]) - Builds the AutoDock Vina configuration for a
//!   receptor/ligand pair.

pub mod prepare;
pub mod split;

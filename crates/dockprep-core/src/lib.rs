//! # dockprep Core Library
//!
//! Preparation utilities for molecular docking with AutoDock Vina: reading PDBQT
//! structure files, splitting multi-structure files into protein and ligand
//! files, and deriving the docking search box from ligand and receptor coordinates.
//!
//! ## Architecture
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`AtomRecord`, `AtomTable`,
//!   `Structure`, `StructureSet`), the PDBQT and Vina config formats, and geometry helpers.
//!
//! - **[`engine`]: The Logic Core.** Selection policies for split structures, output
//!   naming, search-box computation, docking parameters and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Complete procedures built from the two layers
//!   below: splitting a PDBQT file and preparing a Vina configuration.

pub mod core;
pub mod engine;
pub mod workflows;

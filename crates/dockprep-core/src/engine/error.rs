use thiserror::Error;

use crate::core::io::pdbqt::PdbqtError;
use crate::core::io::vina::VinaConfigError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid save option: '{0}' (expected 'all', 'mains' or 'largest')")]
    InvalidPolicy(String),

    #[error("Failed to read structure data: {source}")]
    Pdbqt {
        #[from]
        source: PdbqtError,
    },

    #[error("Failed to write Vina configuration: {source}")]
    VinaConfig {
        #[from]
        source: VinaConfigError,
    },

    #[error("No atom records could be parsed from the {what}")]
    NoAtoms { what: &'static str },

    #[error(
        "Ligand center is not inside the receptor: {axis} = {value} lies outside [{min}, {max}]"
    )]
    LigandOutsideReceptor {
        axis: char,
        value: f64,
        min: f64,
        max: f64,
    },
}

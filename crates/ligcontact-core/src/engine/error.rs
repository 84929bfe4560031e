use crate::core::io::pdb::PdbError;
use crate::core::io::sdf::SdfError;
use crate::core::models::molecule::MoleculeRole;
use thiserror::Error;

/// Problems with the structures handed to an analysis.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to parse protein PDB: {0}")]
    Pdb(#[from] PdbError),

    #[error("Failed to parse ligand SDF: {0}")]
    Sdf(#[from] SdfError),

    #[error("{role} structure contains no atoms")]
    Empty { role: MoleculeRole },

    #[error("{role} structure has {atoms} atoms, exceeding the limit of {limit}")]
    TooManyAtoms {
        role: MoleculeRole,
        atoms: usize,
        limit: usize,
    },

    #[error("{role} input is {bytes} bytes, exceeding the limit of {limit}")]
    TooLarge {
        role: MoleculeRole,
        bytes: usize,
        limit: usize,
    },
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("Internal logic error: {0}")]
    Internal(String),
}

impl AnalysisError {
    /// True for failures caused by the caller's data rather than by the engine.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

use ligcontact::core::io::report::ReportError;
use ligcontact::engine::error::AnalysisError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_INVALID_INPUT: i32 = 2;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to read '{path}': {source}", path = path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write report: {0}")]
    Report(#[from] ReportError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Analysis(e) if e.is_invalid_input() => EXIT_INVALID_INPUT,
            CliError::ReadInput { .. } => EXIT_INVALID_INPUT,
            _ => EXIT_FAILURE,
        }
    }

    /// Message suitable for the terminal. Internal failures are reported without detail.
    pub fn user_message(&self) -> String {
        match self {
            CliError::Analysis(AnalysisError::Internal(_)) => {
                "Internal error during analysis. Re-run with -v or --log-file for details."
                    .to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ligcontact::core::models::molecule::MoleculeRole;
    use ligcontact::engine::error::InputError;

    #[test]
    fn invalid_input_maps_to_exit_code_two() {
        let err = CliError::from(AnalysisError::from(InputError::Empty {
            role: MoleculeRole::Ligand,
        }));
        assert_eq!(err.exit_code(), EXIT_INVALID_INPUT);
        assert!(err.user_message().contains("Ligand"));
    }

    #[test]
    fn internal_errors_hide_detail() {
        let err = CliError::from(AnalysisError::Internal("lock poisoned".to_string()));
        assert_eq!(err.exit_code(), EXIT_FAILURE);
        assert!(!err.user_message().contains("lock poisoned"));
    }

    #[test]
    fn configuration_errors_are_general_failures() {
        let err = CliError::Config("bad key".to_string());
        assert_eq!(err.exit_code(), EXIT_FAILURE);
        assert_eq!(err.user_message(), "Configuration error: bad key");
    }
}

//! CLI-level errors (wraps library errors)

use thiserror::Error;

use crate::errors::BstError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Bst(#[from] BstError),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Bst(e) => match e {
                BstError::Config { .. } => crate::exitcode::CONFIG,
                BstError::Io { .. } => crate::exitcode::IOERR,
                BstError::InvalidRange { .. } | BstError::InvalidSampleSize(_) => {
                    crate::exitcode::DATAERR
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_each_error_when_mapping_then_uses_sysexits_code() {
        assert_eq!(CliError::Usage("x".into()).exit_code(), 64);
        assert_eq!(
            CliError::from(BstError::InvalidRange { min: 2, max: 1 }).exit_code(),
            65
        );
        assert_eq!(
            CliError::from(BstError::Config {
                message: "bad".into()
            })
            .exit_code(),
            78
        );
    }
}

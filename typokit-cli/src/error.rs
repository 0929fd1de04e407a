//! Error handling for the CLI application

use std::fmt;

/// Failure kinds owned by the CLI rather than the core library
#[derive(Debug)]
pub enum CliError {
    /// Glob pattern could not be parsed
    InvalidPattern(String),
    /// No input file matched any pattern
    NoInputFiles(Vec<String>),
    /// CLI configuration file is unreadable or malformed
    ConfigError(String),
    /// Language data file failed validation
    ValidationFailed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::NoInputFiles(patterns) => write!(
                f,
                "No files found matching the provided patterns: {}",
                patterns.join(", ")
            ),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::ValidationFailed(msg) => write!(f, "Validation failed: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CliError::InvalidPattern("[invalid".to_string()).to_string(),
            "Invalid file pattern: [invalid"
        );
        assert_eq!(
            CliError::NoInputFiles(vec!["*.txt".into(), "*.html".into()]).to_string(),
            "No files found matching the provided patterns: *.txt, *.html"
        );
        assert_eq!(
            CliError::ConfigError("invalid format".to_string()).to_string(),
            "Configuration error: invalid format"
        );
        assert_eq!(
            CliError::ValidationFailed("bad levels".to_string()).to_string(),
            "Validation failed: bad levels"
        );
    }

    #[test]
    fn test_error_converts_to_anyhow() {
        fn fails() -> CliResult<()> {
            Err(CliError::ConfigError("missing table".to_string()).into())
        }

        let error = fails().unwrap_err();
        assert!(error.to_string().contains("missing table"));
        assert!(matches!(
            error.downcast_ref::<CliError>(),
            Some(CliError::ConfigError(_))
        ));
    }
}

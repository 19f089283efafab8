//! CLI error handling

use std::fmt;

use zyntiq_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Configuration error
    Config(zyntiq_errors::ConfigError),
    /// Library error
    App(zyntiq_errors::Error),
    /// Invalid command arguments
    InvalidArguments(String),
    /// Reading from the terminal failed
    Input(String),
    /// I/O error
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "Configuration error: {e}"),
            CliError::App(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                if e.is_retryable() {
                    write!(f, "\n  Retry: safe to retry this operation.")?;
                }
                Ok(())
            }
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Input(msg) => write!(f, "Input error: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::App(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<zyntiq_errors::ConfigError> for CliError {
    fn from(e: zyntiq_errors::ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<zyntiq_errors::Error> for CliError {
    fn from(e: zyntiq_errors::Error) -> Self {
        match e {
            zyntiq_errors::Error::Config(config) => CliError::Config(config),
            other => CliError::App(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zyntiq_errors::NetworkError;

    #[test]
    fn test_app_error_display_includes_code_and_retry() {
        let err = CliError::from(zyntiq_errors::Error::from(NetworkError::Timeout {
            url: "https://example.com".into(),
        }));
        let text = err.to_string();
        assert!(text.contains("Code: network.timeout"));
        assert!(text.contains("safe to retry"));
    }

    #[test]
    fn test_config_errors_are_unwrapped() {
        let err = CliError::from(zyntiq_errors::Error::from(
            zyntiq_errors::ConfigError::ParseError {
                message: "bad".into(),
            },
        ));
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error"));
    }
}

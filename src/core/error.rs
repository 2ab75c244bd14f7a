//! Error types for the logging core

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Environment name that has no logger configuration
    #[error("invalid environment specified '{0}'")]
    InvalidEnvironment(String),

    /// Several handlers failed for the same record
    #[error("{}", join_messages(.0))]
    Joined(Vec<LoggerError>),

    /// Failure reported by a custom handler's sink
    #[error("Writer error: {0}")]
    WriterError(String),
}

fn join_messages(errors: &[LoggerError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Join a list of errors, returning `None` for an empty list.
    ///
    /// A single error is returned as-is rather than wrapped.
    pub fn join(mut errors: Vec<LoggerError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(LoggerError::Joined(errors)),
        }
    }

    /// Create a writer error, for handlers that write somewhere other than
    /// an [`Output`](crate::core::Output)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LoggerError::config("ConsoleHandler", "invalid time format '%Q'");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for ConsoleHandler: invalid time format '%Q'"
        );

        let err = LoggerError::InvalidEnvironment("qa".to_string());
        assert_eq!(err.to_string(), "invalid environment specified 'qa'");
    }

    #[test]
    fn test_join() {
        assert!(LoggerError::join(Vec::new()).is_none());

        let single = LoggerError::join(vec![LoggerError::writer("a")]).unwrap();
        assert!(matches!(single, LoggerError::WriterError(_)));

        let joined = LoggerError::join(vec![
            LoggerError::config("JsonHandler", "a"),
            LoggerError::writer("b"),
        ])
        .unwrap();
        assert!(matches!(joined, LoggerError::Joined(ref v) if v.len() == 2));
        assert_eq!(
            joined.to_string(),
            "Invalid configuration for JsonHandler: a\nWriter error: b"
        );
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = LoggerError::io_operation("writing record", "console sink failed", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("writing record"));
        assert!(std::error::Error::source(&err).is_some());
    }
}

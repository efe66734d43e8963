use thiserror::Error;

/// Unified error type for the entire strand library
#[derive(Debug, Error)]
pub enum StrandError {
    /// A unit of work terminated via panic. The trigger value and the captured
    /// backtrace are written to the log record only; the error value itself is
    /// a fixed sentinel.
    #[error("panic captured in task handler")]
    Panic,

    /// Invalid caller-supplied configuration
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Execution-related errors
    #[error("execution failed in {component}: {message}")]
    Execution {
        component: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// HTTP request errors
    #[error("http request failed: {operation}")]
    Http {
        operation: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Serialization errors
    #[error("serialization failed: {format}")]
    Serialization {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// IO errors
    #[error("io operation failed: {operation}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// A config name was requested before it was loaded
    #[error("config {name} not found")]
    ConfigMissing { name: String },

    /// Text-to-value parsing errors
    #[error("parse failed: {message}")]
    Parse { message: String },

    /// Generic internal errors
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl StrandError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an execution error
    pub fn execution<S: Into<String>>(component: S, message: S) -> Self {
        Self::Execution {
            component: component.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create an execution error with source
    pub fn execution_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        component: S,
        message: S,
        source: E,
    ) -> Self {
        Self::Execution {
            component: component.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an HTTP error
    pub fn http<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        operation: S,
        source: E,
    ) -> Self {
        Self::Http {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        format: S,
        source: E,
    ) -> Self {
        Self::Serialization {
            format: format.into(),
            source: Box::new(source),
        }
    }

    /// Create an IO error
    pub fn io<S: Into<String>>(operation: S, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Create a missing-config error
    pub fn config_missing<S: Into<String>>(name: S) -> Self {
        Self::ConfigMissing { name: name.into() }
    }

    /// Create a parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// True when this value is the crash sentinel
    pub fn is_panic(&self) -> bool {
        matches!(self, Self::Panic)
    }

    /// Get error category for metrics/logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Panic => "panic",
            Self::Configuration { .. } => "configuration",
            Self::Execution { .. } => "execution",
            Self::Http { .. } => "http",
            Self::Serialization { .. } => "serialization",
            Self::Io { .. } => "io",
            Self::ConfigMissing { .. } => "config",
            Self::Parse { .. } => "parse",
            Self::Internal { .. } => "internal",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, StrandError>;

/// Convert from common error types
impl From<std::io::Error> for StrandError {
    fn from(err: std::io::Error) -> Self {
        Self::io("io_operation", err)
    }
}

impl From<serde_json::Error> for StrandError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization("json", err)
    }
}

impl From<chrono::ParseError> for StrandError {
    fn from(err: chrono::ParseError) -> Self {
        Self::parse(err.to_string())
    }
}

impl From<anyhow::Error> for StrandError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = StrandError::execution("fanout", "unit failed");
        assert!(matches!(err, StrandError::Execution { .. }));
        assert_eq!(err.category(), "execution");
    }

    #[test]
    fn test_panic_sentinel() {
        let err = StrandError::Panic;
        assert!(err.is_panic());
        assert_eq!(err.category(), "panic");
        assert_eq!(err.to_string(), "panic captured in task handler");
    }

    #[test]
    fn test_from_serde_json() {
        let bad: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err: StrandError = bad.unwrap_err().into();
        assert!(matches!(err, StrandError::Serialization { .. }));
        assert_eq!(err.category(), "serialization");
    }

    #[test]
    fn test_configuration_message() {
        let err = StrandError::configuration("max_concurrency must be at least 1");
        assert_eq!(
            err.to_string(),
            "configuration error: max_concurrency must be at least 1"
        );
    }
}

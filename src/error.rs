use thiserror::Error;

/// Result type for backport operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the backport engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid method pattern '{pattern}': expected '<owner> <name>(..)'")]
    InvalidMethodPattern { pattern: String },

    #[error("Cannot build replacement call: {message}")]
    TemplateBuild { message: String },

    #[error("Internal backport error: {message}")]
    Internal { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    /// Create a method pattern error
    pub fn pattern_error(pattern: impl Into<String>) -> Self {
        Self::InvalidMethodPattern { pattern: pattern.into() }
    }

    /// Create a template build error
    pub fn template_error(message: impl Into<String>) -> Self {
        Self::TemplateBuild { message: message.into() }
    }

    /// Create an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Document store returned {status} for {path}: {message}")]
    StoreError {
        status: u16,
        path: String,
        message: String,
    },

    #[error("Document not found: {path}")]
    NotFoundError { path: String },

    #[error("Image host error: {message}")]
    ImageHostError { message: String },

    #[error("Unsupported media type: {mime}")]
    UnsupportedMediaError { mime: String },

    #[error("Invalid editor state: {message}")]
    InvalidStateError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Input,
    Remote,
    Internal,
}

impl AdminError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AdminError::HttpError(_) => ErrorCategory::Network,
            AdminError::ConfigError { .. }
            | AdminError::MissingConfigError { .. }
            | AdminError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AdminError::ValidationError { .. } | AdminError::UnsupportedMediaError { .. } => {
                ErrorCategory::Input
            }
            AdminError::StoreError { .. }
            | AdminError::NotFoundError { .. }
            | AdminError::ImageHostError { .. } => ErrorCategory::Remote,
            AdminError::IoError(_)
            | AdminError::SerializationError(_)
            | AdminError::InvalidStateError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AdminError::HttpError(_) => "Could not reach a remote service".to_string(),
            AdminError::MissingConfigError { field } => {
                format!("Configuration value '{}' is required", field)
            }
            AdminError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            AdminError::ValidationError { message } => message.clone(),
            AdminError::NotFoundError { path } => format!("'{}' does not exist", path),
            AdminError::UnsupportedMediaError { .. } => "Please upload an image file".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection and the configured endpoints",
            ErrorCategory::Configuration => "Review the configuration file and environment variables",
            ErrorCategory::Input => "Correct the submitted values and try again",
            ErrorCategory::Remote => "Check credentials and that the referenced document exists",
            ErrorCategory::Internal => "Re-run with --verbose and inspect the log output",
        }
    }
}

pub type Result<T> = std::result::Result<T, AdminError>;

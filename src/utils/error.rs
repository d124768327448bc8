use crate::domain::model::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShippingError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Unknown destination country: {code}")]
    UnknownDestination { code: String },

    #[error("Malformed color '{value}': {reason}")]
    MalformedColor { value: String, reason: String },

    #[error("{context}: {message}")]
    Store {
        context: &'static str,
        message: String,
    },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// Whether an error came from what the user typed or from the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserInput,
    System,
}

impl ShippingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ShippingError::Validation(_) => ErrorCategory::UserInput,
            _ => ErrorCategory::System,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ShippingError::Validation(errors) => {
                format!("Please correct the following: {}", errors)
            }
            ShippingError::Store { context, message } => format!("{}: {}", context, message),
            ShippingError::ConfigError { .. } | ShippingError::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
            _ => format!("Something went wrong: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ShippingError::Validation(_) => "Fix the highlighted fields and submit again",
            ShippingError::UnknownDestination { .. } => {
                "Choose one of the supported destinations (see the countries command)"
            }
            ShippingError::MalformedColor { .. } => {
                "Colors are stored as r,g,b; check the stored record or re-enter the color"
            }
            ShippingError::Store { .. } | ShippingError::HttpError(_) => {
                "Check that the record store is reachable and try the operation again"
            }
            ShippingError::IoError(_) | ShippingError::SerializationError(_) => {
                "Check the data file path and that the file contains valid JSON"
            }
            ShippingError::CsvError(_) => "Check that the output can be written",
            ShippingError::ConfigError { .. } | ShippingError::InvalidConfigValueError { .. } => {
                "Review the configuration file and environment variables"
            }
        }
    }

    pub(crate) fn store(context: &'static str, message: impl Into<String>) -> Self {
        ShippingError::Store {
            context,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShippingError>;

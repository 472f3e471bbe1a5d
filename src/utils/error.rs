use thiserror::Error;

#[derive(Error, Debug)]
pub enum LotoError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid format for {input}")]
    InvalidDraw { input: String },

    #[error("{message}")]
    UsageError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("No unseen draw found for {format} after {attempts} attempts")]
    GenerationExhausted { format: String, attempts: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad command line or configuration, the user has to fix the invocation.
    Usage,
    /// Failure while reading history or producing a draw.
    Processing,
}

impl LotoError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LotoError::InvalidDraw { .. }
            | LotoError::UsageError { .. }
            | LotoError::InvalidConfigValueError { .. }
            | LotoError::ConfigError { .. } => ErrorCategory::Usage,
            LotoError::CsvError(_)
            | LotoError::IoError(_)
            | LotoError::SerializationError(_)
            | LotoError::ProcessingError { .. }
            | LotoError::GenerationExhausted { .. } => ErrorCategory::Processing,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Usage => 2,
            ErrorCategory::Processing => 1,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LotoError::InvalidDraw { input } => format!(
                "Invalid format for {input}, expected balls joined by '-' then chance numbers joined by '+' (e.g. 1-2-3-4-5+6)"
            ),
            LotoError::UsageError { message } => format!("Usage error: {message}"),
            LotoError::InvalidConfigValueError { field, value, reason } => {
                format!("Invalid value for {field}: {reason} (got '{value}')")
            }
            LotoError::GenerationExhausted { format, attempts } => format!(
                "Every generated {format} draw was already in the history ({attempts} attempts), try raising --max-attempts"
            ),
            other => other.to_string(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        LotoError::UsageError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LotoError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Serialization,
    Configuration,
    Validation,
    Processing,
}

impl ProcessorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProcessorError::IoError(_) => ErrorCategory::Io,
            ProcessorError::SerializationError(_) => ErrorCategory::Serialization,
            ProcessorError::ConfigValidationError { .. }
            | ProcessorError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ProcessorError::ValidationError { .. } => ErrorCategory::Validation,
            ProcessorError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ProcessorError::IoError(_) => ErrorSeverity::Critical,
            ProcessorError::SerializationError(_) => ErrorSeverity::Medium,
            ProcessorError::ConfigValidationError { .. }
            | ProcessorError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            ProcessorError::ValidationError { .. } => ErrorSeverity::Medium,
            ProcessorError::ProcessingError { .. } => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ProcessorError::IoError(_) => {
                "Check that the input and output paths exist and are writable".to_string()
            }
            ProcessorError::SerializationError(_) => {
                "Check the JSON structure of the input files".to_string()
            }
            ProcessorError::ConfigValidationError { .. } => {
                "Fix the configuration file and try again".to_string()
            }
            ProcessorError::InvalidConfigValueError { field, reason, .. } => {
                format!("Adjust the '{}' setting: {}", field, reason)
            }
            ProcessorError::ValidationError { .. } => {
                "Fix the offending record fields or adjust the validation settings".to_string()
            }
            ProcessorError::ProcessingError { .. } => {
                "Re-run with --verbose to see processing details".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ProcessorError::IoError(e) => format!("File operation failed: {}", e),
            ProcessorError::SerializationError(e) => format!("Invalid JSON data: {}", e),
            ProcessorError::ConfigValidationError { field, message } => {
                format!("Configuration problem ({}): {}", field, message)
            }
            ProcessorError::InvalidConfigValueError { field, value, .. } => {
                format!("Configuration value '{}' is not valid for '{}'", value, field)
            }
            ProcessorError::ValidationError { message } => {
                format!("Record validation failed: {}", message)
            }
            ProcessorError::ProcessingError { message } => {
                format!("Processing failed: {}", message)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ProcessorError>;

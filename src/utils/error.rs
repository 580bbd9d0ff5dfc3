use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Database operation failed: {0}")]
    DatabaseError(#[from] mongodb::error::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration parsing error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Alert store error: {message}")]
    StoreError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Database,
    Configuration,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ChatError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ChatError::DatabaseError(_) | ChatError::StoreError { .. } => ErrorCategory::Database,
            ChatError::IoError(_) => ErrorCategory::Io,
            ChatError::ConfigValidationError { .. }
            | ChatError::InvalidConfigValueError { .. }
            | ChatError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 資料庫暫時無法連線，可重試
            ErrorCategory::Database => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ChatError::DatabaseError(_) | ChatError::StoreError { .. } => {
                "Unable to read alerts from the database right now.".to_string()
            }
            ChatError::IoError(e) => format!("File access failed: {}", e),
            ChatError::ConfigValidationError { field, .. } => {
                format!("The configuration could not be parsed ({}).", field)
            }
            ChatError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value for '{}' is invalid: {}", field, reason)
            }
            ChatError::MissingConfigError { field } => {
                format!("Configuration value '{}' is required.", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Database => {
                "Check that MongoDB is reachable and MONGO_URI points at the right cluster"
            }
            ErrorCategory::Configuration => {
                "Review the TOML config file and command line flags, then restart"
            }
            ErrorCategory::Io => "Verify the file path exists and is readable",
        }
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;

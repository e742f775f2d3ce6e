use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::IoError(_) => ErrorCategory::Io,
            ReportError::TomlError(_)
            | ReportError::InvalidConfigValueError { .. }
            | ReportError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ReportError::IoError(_) => ErrorSeverity::Critical,
            ReportError::TomlError(_)
            | ReportError::InvalidConfigValueError { .. }
            | ReportError::MissingConfigError { .. } => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ReportError::IoError(_) => {
                "Check that the source document exists and the output directory is writable"
                    .to_string()
            }
            ReportError::TomlError(_) => {
                "Check the configuration file for TOML syntax errors".to_string()
            }
            ReportError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' and run again", field)
            }
            ReportError::MissingConfigError { field } => {
                format!("Add the missing '{}' field to the configuration", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReportError::IoError(e) => format!("File access failed: {}", e),
            ReportError::TomlError(e) => format!("Configuration file is not valid TOML: {}", e),
            ReportError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            ReportError::MissingConfigError { field } => {
                format!("Configuration is missing '{}'", field)
            }
        }
    }
}

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServicesError {
    #[error("Failed to fetch {url}: {reason}")]
    FetchError { url: String, reason: String },

    #[error("Failed to store cache file {}: {source}", path.display())]
    StoreError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open {}: {source}", path.display())]
    OpenError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Data,
    Configuration,
    Output,
}

impl ServicesError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FetchError { .. } => ErrorCategory::Network,
            Self::StoreError { .. } | Self::OpenError { .. } | Self::IoError(_) => {
                ErrorCategory::Storage
            }
            Self::ParseError { .. } => ErrorCategory::Data,
            Self::SerializationError(_) | Self::CsvError(_) => ErrorCategory::Output,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check network connectivity and the source URL, or install nmap so a local copy exists"
            }
            ErrorCategory::Storage => {
                "Check that the cache path is writable and the resolved file is readable"
            }
            ErrorCategory::Data => {
                "The services file is malformed; delete the cached copy so it is downloaded again"
            }
            ErrorCategory::Configuration => "Review the command line flags or the TOML config file",
            ErrorCategory::Output => "Try a different --format",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::FetchError { url, .. } => format!("Could not download the services file from {}", url),
            Self::StoreError { path, .. } => {
                format!("Could not write the cache file {}", path.display())
            }
            Self::OpenError { path, .. } => format!("Could not open {}", path.display()),
            Self::ParseError { line, .. } => {
                format!("The services file is malformed (line {})", line)
            }
            other => other.to_string(),
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 2,
            ErrorCategory::Network => 3,
            ErrorCategory::Storage => 4,
            ErrorCategory::Data => 5,
            ErrorCategory::Output => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ServicesError>;

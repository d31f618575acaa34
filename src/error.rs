use thiserror::Error;

#[derive(Error, Debug)]
pub enum BashUtilsError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot open archive: {path}")]
    ArchiveOpen {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Archive extraction failed: {path}")]
    ArchiveExtract {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Program not found: {program}")]
    ProgramNotFound { program: String },

    #[error("Program {program} exited with status {status}")]
    ProgramFailed { program: String, status: String },

    #[error("No option definitions found in the help output of {program}")]
    NoOptionsFound { program: String },

    #[error("Malformed option definition: {token}")]
    MalformedOption { token: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for BashUtilsError {
    fn user_message(&self) -> String {
        match self {
            BashUtilsError::ArchiveOpen { path, source } => {
                format!("Cannot open archive {}: {}", path, source)
            }
            BashUtilsError::ArchiveExtract { path, source } => {
                format!("Failed to extract {}: {}", path, source)
            }
            BashUtilsError::ProgramNotFound { program } => {
                format!("Program '{}' was not found on PATH", program)
            }
            BashUtilsError::ProgramFailed { program, status } => {
                format!("'{}' produced no help output ({})", program, status)
            }
            BashUtilsError::NoOptionsFound { program } => {
                format!("No option definitions found in '{}' help output", program)
            }
            BashUtilsError::MalformedOption { token } => {
                format!("Cannot derive an option name from '{}'", token)
            }
            BashUtilsError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            BashUtilsError::ArchiveOpen { .. } => Some(
                "Check that the path exists and points to a valid ZIP archive.".to_string()
            ),
            BashUtilsError::ProgramNotFound { .. } => Some(
                "Install the program or pass a different one with --program.".to_string()
            ),
            BashUtilsError::ProgramFailed { .. } => Some(
                "Try a different help flag with --help-flag.".to_string()
            ),
            BashUtilsError::NoOptionsFound { .. } => Some(
                "The help text must list options in GNU style (-x, --long-option[=VALUE]).".to_string()
            ),
            BashUtilsError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string()
            ),
            _ => None,
        }
    }
}

impl BashUtilsError {
    /// Process exit status for this error. Every failure maps to 1.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

impl From<toml::de::Error> for BashUtilsError {
    fn from(error: toml::de::Error) -> Self {
        BashUtilsError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BashUtilsError>;

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts and CI systems to distinguish between
/// successful runs, application failures, and usage errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - requested stages completed
    Success = 0,
    /// Application error (config error, unreachable source, file I/O error, etc.)
    ApplicationError = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ApplicationError => write!(f, "Application Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
        }
    }
}

/// Application-specific errors for dependency resolution.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
///
/// Cycles, filtered packages, and malformed mapping records are not
/// represented here: those are recoverable conditions that are reported
/// as warnings while the run continues.
#[derive(Debug, Error)]
pub enum DepvizError {
    #[error("Failed to load config file: {path}\nReason: {reason}\n\n💡 Hint: Please verify that the file exists and contains one key;value pair per line")]
    ConfigError { path: PathBuf, reason: String },

    #[error("Missing required config parameter: {name}\n\n💡 Hint: Add a '{name};<value>' line to the config file")]
    MissingParameter { name: String },

    #[error("Invalid value for config parameter: {name}\nExpected: {expected}\nGot: '{value}'\n\n💡 Hint: Please correct the value in the config file")]
    InvalidParameter {
        name: String,
        expected: String,
        value: String,
    },

    #[error("Dependency source unavailable: {location}\nDetails: {details}\n\n💡 Hint: Please verify the 'repository' setting and that the source is reachable")]
    SourceUnavailable { location: String, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },
}

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Problems with the command line. Reported together with the usage block.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Invalid quality '{0}': expected an integer between 1 and 31")]
    InvalidQuality(String),

    #[error("Unknown classifier '{0}': expected 'file' or 'exiftool'")]
    InvalidClassifier(String),

    #[error("Option {0} requires a value")]
    MissingValue(String),

    #[error("No file or folder specified")]
    MissingTarget,

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("{0}")]
    Other(String),
}

/// Failures while resolving the target or running the collaborators.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("File or folder not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to walk directory")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to determine file type of {}: {reason}", path.display())]
    Classify { path: PathBuf, reason: String },

    #[error("Failed to start {program}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Transcoder failed on {} ({})", input.display(), describe_code(*code))]
    TranscoderFailed { input: PathBuf, code: Option<i32> },

    #[error("ExifTool error: {0}")]
    ExifTool(String),
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::file_command::FileChannel;

/// Coarse classification of [`StepKitError`] so callers can tell a missing
/// value apart from a malformed one without matching every variant.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrorKind {
    /// A required input or runner-provided variable is absent.
    Configuration,
    /// A runner file is missing or lacks the required permissions.
    ResourceAccess,
    /// A value is present but not in an accepted shape.
    ValueShape,
    /// The underlying write failed.
    Io,
}

#[derive(Debug, Error)]
pub enum StepKitError {
    #[error("Input required and not supplied: {name}")]
    MissingInput { name: String },
    #[error("Unable to find environment variable for file command {channel}")]
    MissingFileChannel { channel: FileChannel },
    #[error("Unable to find environment variable for ${var}. Check if your runtime environment supports job summaries.")]
    MissingSummaryPath { var: &'static str },
    #[error("Missing file at path: {}", .path.display())]
    MissingFile { path: PathBuf },
    #[error("Unable to access summary file: '{}'. Check if the file has correct read/write permissions.", .path.display())]
    SummaryAccess { path: PathBuf, source: io::Error },
    #[error("Input does not meet YAML 1.2 \"Core Schema\" specification: {name}\nSupport boolean input list: `true | True | TRUE | false | False | FALSE`")]
    InvalidBoolean { name: String },
    #[error("Unexpected input: {field} should not contain the delimiter \"{delimiter}\"")]
    DelimiterCollision {
        field: &'static str,
        delimiter: String,
    },
    #[error("failed writing to {}: {source}", .path.display())]
    FileWrite { path: PathBuf, source: io::Error },
    #[error("failed writing workflow command: {0}")]
    CommandWrite(#[source] io::Error),
}

impl StepKitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingInput { .. }
            | Self::MissingFileChannel { .. }
            | Self::MissingSummaryPath { .. } => ErrorKind::Configuration,
            Self::MissingFile { .. } | Self::SummaryAccess { .. } => ErrorKind::ResourceAccess,
            Self::InvalidBoolean { .. } | Self::DelimiterCollision { .. } => ErrorKind::ValueShape,
            Self::FileWrite { .. } | Self::CommandWrite(_) => ErrorKind::Io,
        }
    }
}

use std::io;

use step_kit::{ErrorKind, StepKitError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Step(#[from] StepKitError),
    #[error("failed to print value: {0}")]
    Print(#[source] io::Error),
}

impl Error {
    /// Classification of the underlying step error; print failures are I/O.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Step(err) => err.kind(),
            Self::Print(_) => ErrorKind::Io,
        }
    }
}

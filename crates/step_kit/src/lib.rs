#![forbid(unsafe_code)]
//! Signals from a CI build step to its hosting runner.
//!
//! A step talks to the runner over two narrow channels:
//! - **Workflow commands**: single lines of the form `::name k=v,k=v::message`
//!   written to stdout ([`issue_command`], [`WorkflowCommand`]). Messages are
//!   escaped with [`escape_data`], property values with [`escape_property`].
//! - **File channels**: runner-provided files named by `GITHUB_ENV`,
//!   `GITHUB_PATH`, `GITHUB_STATE`, and `GITHUB_OUTPUT`, which receive
//!   heredoc-style blocks closed by a fresh random delimiter
//!   ([`prepare_key_value_message`], [`issue_file_command`]).
//!
//! [`StepContext`] wraps both behind the usual step operations (inputs,
//! outputs, state, masking, annotations, log groups) and picks the file
//! channel when the runner provides one. [`Summary`] accumulates an HTML job
//! summary and flushes it to `GITHUB_STEP_SUMMARY` on request.
//!
//! ```rust,no_run
//! use step_kit::{AnnotationProperties, InputOptions, StepContext, SummaryWriteOptions};
//! # #[tokio::main]
//! # async fn main() -> Result<(), step_kit::StepKitError> {
//! let step = StepContext::default();
//! let who = step.get_input("who-to-greet", InputOptions::required())?;
//! step.set_output("greeting", &format!("hello {who}"))?;
//! step.warning(
//!     "deprecated input",
//!     &AnnotationProperties::new().file("action.yml").start_line(12),
//! )?;
//!
//! let mut summary = step.summary();
//! summary
//!     .add_heading("Greeting", Some(2))
//!     .add_table([["who", who.as_str()]])
//!     .write(SummaryWriteOptions::default())
//!     .await?;
//! # Ok(()) }
//! ```
//!
//! Nothing here installs a `tracing` subscriber or logs to stdout; stdout
//! belongs to the command channel.

mod annotation;
mod builder;
mod command;
mod context;
mod defaults;
mod env;
mod error;
mod escape;
mod file_command;
mod input;
pub mod path_utils;
mod summary;
mod value;

pub use annotation::AnnotationProperties;
pub use builder::StepContextBuilder;
pub use command::{issue, issue_command, issue_command_to, CommandProperties, WorkflowCommand};
pub use context::{StepContext, StepOutcome};
pub use defaults::SUMMARY_ENV_VAR;
pub use env::{EnvStore, MemoryEnv, ProcessEnv};
pub use error::{ErrorKind, StepKitError};
pub use escape::{escape_data, escape_property};
pub use file_command::{issue_file_command, prepare_key_value_message, FileChannel};
pub use input::InputOptions;
pub use summary::{
    Summary, SummaryImageOptions, SummaryTableCell, SummaryWriteOptions, TableCell,
};
pub use value::to_command_value;

mod error;
mod run;
mod summary;

use std::{io, process::ExitCode};

use clap::{Parser, Subcommand};
use step_kit::StepContext;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "STEP_KIT_LOG";

#[derive(Debug, Parser)]
#[command(name = "step-kit")]
#[command(about = "Report outputs, state, annotations, and summaries to the CI runner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the value of a step input.
    GetInput(run::InputArgs),
    /// Print `true` or `false` for a boolean step input.
    GetBooleanInput(run::InputArgs),
    /// Set a step output.
    SetOutput(run::KeyValueArgs),
    /// Export an environment variable to subsequent steps.
    ExportVar(run::KeyValueArgs),
    /// Prepend a directory to `PATH` for subsequent steps.
    AddPath { path: String },
    /// Mask a value in the job log.
    AddMask { secret: String },
    /// Save state for the post-job hook.
    SaveState(run::KeyValueArgs),
    /// Print previously saved state.
    GetState { name: String },
    /// Emit a debug message (visible when step debugging is enabled).
    Debug { message: String },
    /// Emit a notice annotation.
    Notice(run::AnnotationArgs),
    /// Emit a warning annotation.
    Warning(run::AnnotationArgs),
    /// Emit an error annotation.
    Error(run::AnnotationArgs),
    /// Open a collapsible log group.
    GroupStart { name: String },
    /// Close the current log group.
    GroupEnd,
    /// Log an error and exit with a failure status.
    Fail { message: String },
    /// Append to (or reset) the job summary.
    #[command(subcommand)]
    Summary(summary::SummaryCommand),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, error::Error> {
    init_tracing();

    let cli = Cli::parse();
    let step = StepContext::default();
    let mut stdout = io::stdout();
    if let Err(err) = run::dispatch(&step, cli.command, &mut stdout).await {
        tracing::error!(kind = ?err.kind(), %err, "step-kit command failed");
        return Err(err);
    }
    Ok(step.exit_code())
}

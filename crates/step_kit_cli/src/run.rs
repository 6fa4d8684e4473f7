use std::io::Write;

use clap::Args;
use step_kit::{AnnotationProperties, InputOptions, StepContext};
use tracing::debug;

use crate::{error::Error, Command};

#[derive(Debug, Clone, Args)]
pub(crate) struct InputArgs {
    pub name: String,

    /// Fail when the input is missing or empty.
    #[arg(long)]
    pub required: bool,

    /// Keep leading/trailing whitespace.
    #[arg(long)]
    pub no_trim: bool,
}

impl InputArgs {
    fn options(&self) -> InputOptions {
        InputOptions {
            required: self.required,
            trim_whitespace: !self.no_trim,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub(crate) struct KeyValueArgs {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct AnnotationArgs {
    pub message: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub file: Option<String>,

    #[arg(long = "line")]
    pub start_line: Option<u64>,

    #[arg(long)]
    pub end_line: Option<u64>,

    #[arg(long = "col")]
    pub start_column: Option<u64>,

    #[arg(long)]
    pub end_column: Option<u64>,
}

impl AnnotationArgs {
    fn properties(&self) -> AnnotationProperties {
        AnnotationProperties {
            title: self.title.clone(),
            file: self.file.clone(),
            start_line: self.start_line,
            end_line: self.end_line,
            start_column: self.start_column,
            end_column: self.end_column,
        }
    }
}

fn print_value(out: &mut dyn Write, value: &str) -> Result<(), Error> {
    writeln!(out, "{value}").map_err(Error::Print)
}

/// Executes one subcommand. Values queried by the caller (inputs, state)
/// are printed to `out`; everything else goes through `step`.
pub(crate) async fn dispatch(
    step: &StepContext,
    command: Command,
    out: &mut dyn Write,
) -> Result<(), Error> {
    debug!(?command, "dispatching");
    match command {
        Command::GetInput(args) => {
            let value = step.get_input(&args.name, args.options())?;
            return print_value(out, &value);
        }
        Command::GetBooleanInput(args) => {
            let value = step.get_boolean_input(&args.name, args.options())?;
            return print_value(out, if value { "true" } else { "false" });
        }
        Command::GetState { name } => return print_value(out, &step.get_state(&name)),
        Command::SetOutput(args) => step.set_output(&args.name, &args.value)?,
        Command::ExportVar(args) => step.export_variable(&args.name, &args.value)?,
        Command::AddPath { path } => step.add_path(&path)?,
        Command::AddMask { secret } => step.set_secret(&secret)?,
        Command::SaveState(args) => step.save_state(&args.name, &args.value)?,
        Command::Debug { message } => step.debug(&message)?,
        Command::Notice(args) => step.notice(&args.message, &args.properties())?,
        Command::Warning(args) => step.warning(&args.message, &args.properties())?,
        Command::Error(args) => step.error(&args.message, &args.properties())?,
        Command::GroupStart { name } => step.start_group(&name)?,
        Command::GroupEnd => step.end_group()?,
        Command::Fail { message } => step.set_failed(&message)?,
        Command::Summary(command) => crate::summary::run(step, command).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        io,
        sync::{Arc, Mutex},
    };

    use clap::Parser;
    use step_kit::{ErrorKind, MemoryEnv, StepOutcome};

    use super::*;
    use crate::Cli;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn parse(argv: &[&str]) -> Command {
        let mut full = vec!["step-kit"];
        full.extend_from_slice(argv);
        Cli::try_parse_from(full).expect("valid argv").command
    }

    fn step(env: Arc<MemoryEnv>) -> (StepContext, Captured) {
        let commands = Captured::default();
        let step = StepContext::builder()
            .env(env)
            .stdout(commands.clone())
            .build();
        (step, commands)
    }

    #[tokio::test]
    async fn annotation_flags_map_to_properties() {
        let (step, commands) = step(Arc::new(MemoryEnv::new()));
        let mut out = Vec::<u8>::new();
        let cmd = parse(&["warning", "oops", "--file", "a.ts", "--line", "1"]);
        dispatch(&step, cmd, &mut out).await.unwrap();
        assert_eq!(commands.text().trim_end(), "::warning file=a.ts,line=1::oops");
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn get_input_prints_value() {
        let env = Arc::new(MemoryEnv::with_vars([("INPUT_MY_NAME", "  value  ")]));
        let (step, commands) = step(env);
        let mut out = Vec::<u8>::new();
        dispatch(&step, parse(&["get-input", "my-name"]), &mut out)
            .await
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "value\n");
        assert_eq!(commands.text(), "");

        let cmd = parse(&["get-input", "other", "--required"]);
        let err = dispatch(&step, cmd, &mut Vec::<u8>::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn set_output_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("output");
        fs::write(&output, "").unwrap();
        let env = Arc::new(MemoryEnv::with_vars([(
            "GITHUB_OUTPUT",
            output.to_string_lossy().into_owned(),
        )]));
        let (step, commands) = step(env);

        dispatch(&step, parse(&["set-output", "answer", "42"]), &mut Vec::<u8>::new())
            .await
            .unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("answer<<ghadelimiter_"));
        assert_eq!(written.lines().nth(1), Some("42"));
        assert_eq!(commands.text(), "");
    }

    #[tokio::test]
    async fn fail_sets_failure_outcome() {
        let (step, commands) = step(Arc::new(MemoryEnv::new()));
        dispatch(&step, parse(&["fail", "boom"]), &mut Vec::<u8>::new())
            .await
            .unwrap();
        assert_eq!(step.outcome(), StepOutcome::Failure);
        assert_eq!(commands.text().trim_end(), "::error::boom");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn print_failure_is_reported_as_io() {
        let (step, _) = step(Arc::new(MemoryEnv::with_vars([("STATE_k", "v")])));
        let err = dispatch(&step, parse(&["get-state", "k"]), &mut BrokenPipe)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Print(_)));
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}

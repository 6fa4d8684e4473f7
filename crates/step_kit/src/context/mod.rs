mod group;

use std::{
    fmt,
    io::Write,
    process::ExitCode,
    sync::{
        atomic::{AtomicU8, Ordering},
        Arc, Mutex, PoisonError,
    },
};

use serde::Serialize;
use tracing::debug;

use crate::{
    annotation::AnnotationProperties,
    builder::StepContextBuilder,
    command::{issue_command_to, CommandProperties},
    defaults::{EOL, PATH_ENV, PATH_LIST_SEPARATOR, RUNNER_DEBUG_ENV, STATE_PREFIX},
    env::EnvStore,
    file_command::{issue_file_command, prepare_key_value_message, FileChannel},
    input::{input_env_keys, parse_boolean, InputOptions},
    summary::Summary,
    value::to_command_value,
    StepKitError,
};

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Result reported to the runner through the process exit status.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[repr(u8)]
pub enum StepOutcome {
    Success = 0,
    Failure = 1,
}

/// Entry point for everything a step reports to its runner.
///
/// Commands go to the configured stdout sink; file-channel writes and input
/// lookups go through the configured [`EnvStore`]. Prefer file channels when
/// the runner provides them and fall back to the legacy stdout commands
/// otherwise.
#[derive(Clone)]
pub struct StepContext {
    env: Arc<dyn EnvStore>,
    stdout: SharedWriter,
    exit_code: Arc<AtomicU8>,
}

impl fmt::Debug for StepContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepContext")
            .field("env", &self.env)
            .field("outcome", &self.outcome())
            .finish_non_exhaustive()
    }
}

impl Default for StepContext {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl StepContext {
    pub fn builder() -> StepContextBuilder {
        StepContextBuilder::default()
    }

    pub(crate) fn from_parts(env: Arc<dyn EnvStore>, stdout: SharedWriter) -> Self {
        Self {
            env,
            stdout,
            exit_code: Arc::new(AtomicU8::new(StepOutcome::Success as u8)),
        }
    }

    pub fn env(&self) -> &Arc<dyn EnvStore> {
        &self.env
    }

    /// Writes one workflow command to the stdout sink.
    pub fn issue_command<M>(
        &self,
        name: &str,
        properties: CommandProperties,
        message: &M,
    ) -> Result<(), StepKitError>
    where
        M: Serialize + ?Sized,
    {
        let mut out = self.stdout.lock().unwrap_or_else(PoisonError::into_inner);
        issue_command_to(&mut **out, name, properties, message).map_err(StepKitError::CommandWrite)
    }

    fn write_line(&self, text: &str) -> Result<(), StepKitError> {
        let mut out = self.stdout.lock().unwrap_or_else(PoisonError::into_inner);
        write!(out, "{text}{EOL}")
            .and_then(|()| out.flush())
            .map_err(StepKitError::CommandWrite)
    }

    // -----------------------------------------------------------------------
    // Inputs
    // -----------------------------------------------------------------------

    /// Reads input `name` from `INPUT_{NAME}`.
    ///
    /// Missing inputs read as `""` unless `options.required` is set.
    pub fn get_input(&self, name: &str, options: InputOptions) -> Result<String, StepKitError> {
        let value = input_env_keys(name)
            .iter()
            .find_map(|key| self.env.get(key))
            .unwrap_or_default();

        if options.required && value.is_empty() {
            return Err(StepKitError::MissingInput {
                name: name.to_string(),
            });
        }

        if options.trim_whitespace {
            Ok(value.trim().to_string())
        } else {
            Ok(value)
        }
    }

    /// Reads a newline-separated input, dropping empty lines.
    pub fn get_multiline_input(
        &self,
        name: &str,
        options: InputOptions,
    ) -> Result<Vec<String>, StepKitError> {
        let raw = self.get_input(name, options)?;
        Ok(raw
            .split('\n')
            .filter(|line| !line.is_empty())
            .map(|line| {
                if options.trim_whitespace {
                    line.trim().to_string()
                } else {
                    line.to_string()
                }
            })
            .collect())
    }

    /// Reads a YAML 1.2 core-schema boolean (`true|True|TRUE|false|False|FALSE`).
    pub fn get_boolean_input(&self, name: &str, options: InputOptions) -> Result<bool, StepKitError> {
        let value = self.get_input(name, options)?;
        parse_boolean(&value).ok_or_else(|| StepKitError::InvalidBoolean {
            name: name.to_string(),
        })
    }

    // -----------------------------------------------------------------------
    // Outputs, state, environment
    // -----------------------------------------------------------------------

    pub fn set_output<V>(&self, name: &str, value: &V) -> Result<(), StepKitError>
    where
        V: Serialize + ?Sized,
    {
        if FileChannel::Output.resolve(self.env.as_ref()).is_some() {
            let block = prepare_key_value_message(name, value)?;
            return issue_file_command(self.env.as_ref(), FileChannel::Output, &block);
        }

        self.write_line("")?;
        self.issue_command(
            "set-output",
            CommandProperties::new().with("name", name),
            &to_command_value(value),
        )
    }

    /// Sets `name` for this process and for subsequent steps.
    pub fn export_variable<V>(&self, name: &str, value: &V) -> Result<(), StepKitError>
    where
        V: Serialize + ?Sized,
    {
        let converted = to_command_value(value);
        self.env.set(name, &converted);

        if FileChannel::Env.resolve(self.env.as_ref()).is_some() {
            let block = prepare_key_value_message(name, &converted)?;
            return issue_file_command(self.env.as_ref(), FileChannel::Env, &block);
        }

        self.issue_command(
            "set-env",
            CommandProperties::new().with("name", name),
            &converted,
        )
    }

    /// Registers `secret` so the runner masks it in logs.
    pub fn set_secret(&self, secret: &str) -> Result<(), StepKitError> {
        self.issue_command("add-mask", CommandProperties::new(), secret)
    }

    /// Prepends `path` to `PATH` for this process and subsequent steps.
    pub fn add_path(&self, path: &str) -> Result<(), StepKitError> {
        if FileChannel::Path.resolve(self.env.as_ref()).is_some() {
            issue_file_command(self.env.as_ref(), FileChannel::Path, path)?;
        } else {
            self.issue_command("add-path", CommandProperties::new(), path)?;
        }

        let current = self.env.get(PATH_ENV).unwrap_or_default();
        let updated = format!("{path}{PATH_LIST_SEPARATOR}{current}");
        self.env.set(PATH_ENV, &updated);
        debug!(%path, "prepended to PATH");
        Ok(())
    }

    /// Saves state for the post-job hook of the same action.
    pub fn save_state<V>(&self, name: &str, value: &V) -> Result<(), StepKitError>
    where
        V: Serialize + ?Sized,
    {
        if FileChannel::State.resolve(self.env.as_ref()).is_some() {
            let block = prepare_key_value_message(name, value)?;
            return issue_file_command(self.env.as_ref(), FileChannel::State, &block);
        }

        self.issue_command(
            "save-state",
            CommandProperties::new().with("name", name),
            &to_command_value(value),
        )
    }

    pub fn get_state(&self, name: &str) -> String {
        self.env
            .get(&format!("{STATE_PREFIX}{name}"))
            .unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Results
    // -----------------------------------------------------------------------

    /// Marks the step failed and logs `message` as an error. Does not exit.
    pub fn set_failed(&self, message: &str) -> Result<(), StepKitError> {
        self.exit_code
            .store(StepOutcome::Failure as u8, Ordering::SeqCst);
        self.error(message, &AnnotationProperties::default())
    }

    pub fn outcome(&self) -> StepOutcome {
        match self.exit_code.load(Ordering::SeqCst) {
            0 => StepOutcome::Success,
            _ => StepOutcome::Failure,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.outcome() as u8)
    }

    // -----------------------------------------------------------------------
    // Logging
    // -----------------------------------------------------------------------

    pub fn set_command_echo(&self, enabled: bool) -> Result<(), StepKitError> {
        let message = if enabled { "on" } else { "off" };
        self.issue_command("echo", CommandProperties::new(), message)
    }

    /// Whether the runner has step debug logging enabled (`RUNNER_DEBUG=1`).
    pub fn is_debug(&self) -> bool {
        self.env.get(RUNNER_DEBUG_ENV).as_deref() == Some("1")
    }

    pub fn debug(&self, message: &str) -> Result<(), StepKitError> {
        self.issue_command("debug", CommandProperties::new(), message)
    }

    pub fn error(&self, message: &str, properties: &AnnotationProperties) -> Result<(), StepKitError> {
        self.issue_command("error", properties.to_command_properties(), message)
    }

    pub fn warning(
        &self,
        message: &str,
        properties: &AnnotationProperties,
    ) -> Result<(), StepKitError> {
        self.issue_command("warning", properties.to_command_properties(), message)
    }

    pub fn notice(&self, message: &str, properties: &AnnotationProperties) -> Result<(), StepKitError> {
        self.issue_command("notice", properties.to_command_properties(), message)
    }

    /// Writes a plain log line.
    pub fn info(&self, message: &str) -> Result<(), StepKitError> {
        self.write_line(message)
    }

    /// A fresh summary buffer resolving its file through this context's env.
    pub fn summary(&self) -> Summary {
        Summary::new(Arc::clone(&self.env))
    }
}

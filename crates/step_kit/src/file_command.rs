use std::{
    fmt,
    fs::OpenOptions,
    io::Write,
    path::PathBuf,
};

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::{
    defaults::{DELIMITER_PREFIX, EOL, FILE_CHANNEL_PREFIX},
    env::EnvStore,
    value::to_command_value,
    StepKitError,
};

/// Runner-managed files addressed through `GITHUB_{CHANNEL}`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum FileChannel {
    Env,
    Path,
    State,
    Output,
}

impl FileChannel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Env => "ENV",
            Self::Path => "PATH",
            Self::State => "STATE",
            Self::Output => "OUTPUT",
        }
    }

    /// Name of the environment variable holding this channel's file path.
    pub fn env_var(self) -> String {
        format!("{FILE_CHANNEL_PREFIX}{}", self.as_str())
    }

    /// Resolves the channel's file path if the runner provided one.
    pub fn resolve(self, env: &dyn EnvStore) -> Option<PathBuf> {
        env.get(&self.env_var())
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
    }
}

impl fmt::Display for FileChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Appends `message` plus EOL to the file behind `channel`.
///
/// Fails without touching the filesystem when the channel variable is unset
/// or the file it names does not exist.
pub fn issue_file_command<M>(
    env: &dyn EnvStore,
    channel: FileChannel,
    message: &M,
) -> Result<(), StepKitError>
where
    M: Serialize + ?Sized,
{
    let path = channel
        .resolve(env)
        .ok_or(StepKitError::MissingFileChannel { channel })?;
    if !path.exists() {
        return Err(StepKitError::MissingFile { path });
    }

    let text = format!("{}{EOL}", to_command_value(message));
    let mut file = OpenOptions::new()
        .append(true)
        .open(&path)
        .map_err(|source| StepKitError::FileWrite {
            path: path.clone(),
            source,
        })?;
    file.write_all(text.as_bytes())
        .map_err(|source| StepKitError::FileWrite {
            path: path.clone(),
            source,
        })?;

    debug!(%channel, path = %path.display(), bytes = text.len(), "appended file command");
    Ok(())
}

/// Frames `key`/`value` as a heredoc block closed by a fresh delimiter.
///
/// ```text
/// {key}<<ghadelimiter_{uuid}
/// {value}
/// ghadelimiter_{uuid}
/// ```
pub fn prepare_key_value_message<V>(key: &str, value: &V) -> Result<String, StepKitError>
where
    V: Serialize + ?Sized,
{
    let delimiter = format!("{DELIMITER_PREFIX}{}", Uuid::new_v4());
    frame_key_value(key, &to_command_value(value), delimiter)
}

/// Builds the heredoc block, refusing keys or values that contain `delimiter`.
fn frame_key_value(key: &str, value: &str, delimiter: String) -> Result<String, StepKitError> {
    if key.contains(&delimiter) {
        return Err(StepKitError::DelimiterCollision {
            field: "name",
            delimiter,
        });
    }
    if value.contains(&delimiter) {
        return Err(StepKitError::DelimiterCollision {
            field: "value",
            delimiter,
        });
    }

    Ok(format!("{key}<<{delimiter}{EOL}{value}{EOL}{delimiter}"))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::{env::MemoryEnv, ErrorKind};

    fn split_block(block: &str) -> (String, String, String) {
        let (key, rest) = block.split_once("<<").unwrap();
        let (delimiter, rest) = rest.split_once(EOL).unwrap();
        let closing = format!("{EOL}{delimiter}");
        let value = rest.strip_suffix(closing.as_str()).unwrap();
        (key.to_string(), delimiter.to_string(), value.to_string())
    }

    #[test]
    fn channel_names_map_to_runner_variables() {
        assert_eq!(FileChannel::Env.env_var(), "GITHUB_ENV");
        assert_eq!(FileChannel::Path.env_var(), "GITHUB_PATH");
        assert_eq!(FileChannel::State.env_var(), "GITHUB_STATE");
        assert_eq!(FileChannel::Output.env_var(), "GITHUB_OUTPUT");
    }

    #[test]
    fn key_value_block_round_trips_tricky_values() {
        for value in ["plain", "a<<b", "line1\nline2\r\n<<EOF\nEOF", "", "ghadelimiter_"] {
            let block = prepare_key_value_message("my_key", value).unwrap();
            let (key, delimiter, decoded) = split_block(&block);
            assert_eq!(key, "my_key");
            assert!(delimiter.starts_with(DELIMITER_PREFIX));
            assert_eq!(decoded, value);
        }
    }

    #[test]
    fn delimiters_are_fresh_per_call() {
        let a = prepare_key_value_message("k", "v").unwrap();
        let b = prepare_key_value_message("k", "v").unwrap();
        assert_ne!(split_block(&a).1, split_block(&b).1);
    }

    #[test]
    fn delimiter_inside_key_or_value_is_rejected() {
        let delimiter = format!("{DELIMITER_PREFIX}fixed");

        let err = frame_key_value("k", &format!("a\n{delimiter}\nb"), delimiter.clone())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueShape);
        assert_eq!(
            err.to_string(),
            format!("Unexpected input: value should not contain the delimiter \"{delimiter}\"")
        );

        let err = frame_key_value(&format!("x{delimiter}"), "v", delimiter.clone()).unwrap_err();
        assert!(matches!(
            err,
            StepKitError::DelimiterCollision { field: "name", .. }
        ));

        let block = frame_key_value("k", "ghadelimiter_other", delimiter.clone()).unwrap();
        assert_eq!(
            block,
            format!("k<<{delimiter}{EOL}ghadelimiter_other{EOL}{delimiter}")
        );
    }

    #[test]
    fn non_string_values_are_coerced() {
        let block = prepare_key_value_message("count", &3).unwrap();
        assert_eq!(split_block(&block).2, "3");
        let block = prepare_key_value_message("nothing", &Option::<String>::None).unwrap();
        assert_eq!(split_block(&block).2, "");
    }

    #[test]
    fn missing_channel_variable_is_a_configuration_error() {
        let env = MemoryEnv::new();
        let err = issue_file_command(&env, FileChannel::Env, "x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("ENV"));
    }

    #[test]
    fn missing_file_is_a_resource_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent");
        let env = MemoryEnv::with_vars([("GITHUB_PATH", path.to_string_lossy().into_owned())]);
        let err = issue_file_command(&env, FileChannel::Path, "/opt/bin").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceAccess);
        assert!(!path.exists());
    }

    #[test]
    fn appends_message_with_terminator() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("path.txt");
        fs::write(&path, "existing\n").unwrap();
        let env = MemoryEnv::with_vars([("GITHUB_PATH", path.to_string_lossy().into_owned())]);

        issue_file_command(&env, FileChannel::Path, "/opt/a").unwrap();
        issue_file_command(&env, FileChannel::Path, "/opt/b").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            format!("existing\n/opt/a{EOL}/opt/b{EOL}")
        );
    }
}

pub(crate) const INPUT_PREFIX: &str = "INPUT_";
pub(crate) const STATE_PREFIX: &str = "STATE_";
pub(crate) const RUNNER_DEBUG_ENV: &str = "RUNNER_DEBUG";
pub(crate) const PATH_ENV: &str = "PATH";
pub(crate) const FILE_CHANNEL_PREFIX: &str = "GITHUB_";

/// Variable naming the job summary file for the current step.
pub const SUMMARY_ENV_VAR: &str = "GITHUB_STEP_SUMMARY";

pub(crate) const DELIMITER_PREFIX: &str = "ghadelimiter_";

#[cfg(windows)]
pub(crate) const EOL: &str = "\r\n";
#[cfg(not(windows))]
pub(crate) const EOL: &str = "\n";

#[cfg(windows)]
pub(crate) const PATH_LIST_SEPARATOR: &str = ";";
#[cfg(not(windows))]
pub(crate) const PATH_LIST_SEPARATOR: &str = ":";

use crate::defaults::INPUT_PREFIX;

const TRUE_LITERALS: [&str; 3] = ["true", "True", "TRUE"];
const FALSE_LITERALS: [&str; 3] = ["false", "False", "FALSE"];

/// Options for reading a step input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct InputOptions {
    /// Fail when the input is absent or empty.
    pub required: bool,
    /// Trim leading/trailing whitespace. Defaults to `true`.
    pub trim_whitespace: bool,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            required: false,
            trim_whitespace: true,
        }
    }
}

impl InputOptions {
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    pub fn trim_whitespace(mut self, enabled: bool) -> Self {
        self.trim_whitespace = enabled;
        self
    }
}

/// Candidate variable names for `name`, most canonical first.
///
/// The runner upper-cases input names and replaces spaces with `_` but keeps
/// dashes; callers may spell a dash or underscore interchangeably, so both
/// forms are probed.
pub(crate) fn input_env_keys(name: &str) -> Vec<String> {
    let upper = name.replace(' ', "_").to_uppercase();
    let underscored = format!("{INPUT_PREFIX}{}", upper.replace('-', "_"));
    let mut keys = vec![underscored];
    if upper.contains('-') {
        keys.push(format!("{INPUT_PREFIX}{upper}"));
    }
    keys
}

pub(crate) fn parse_boolean(value: &str) -> Option<bool> {
    if TRUE_LITERALS.contains(&value) {
        Some(true)
    } else if FALSE_LITERALS.contains(&value) {
        Some(false)
    } else {
        None
    }
}

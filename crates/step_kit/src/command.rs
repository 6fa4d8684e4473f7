use std::{
    fmt,
    io::{self, Write},
};

use serde::Serialize;
use serde_json::Value;

use crate::{
    defaults::EOL,
    escape::{escape_data, escape_property},
    value::{is_truthy, to_command_value},
};

/// Insertion-ordered `key=value` list attached to a workflow command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandProperties {
    entries: Vec<(String, Value)>,
}

impl CommandProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing an existing entry in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Renders the surviving (truthy) entries as `k=v,k=v`.
    fn render(&self) -> String {
        self.entries
            .iter()
            .filter(|(_, value)| is_truthy(value))
            .map(|(key, value)| format!("{key}={}", escape_property(&to_command_value(value))))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl<K, V> FromIterator<(K, V)> for CommandProperties
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Self::new();
        for (key, value) in iter {
            props.insert(key, value);
        }
        props
    }
}

const MISSING_COMMAND: &str = "missing.command";

/// A single `::name props::message` directive for the runner.
///
/// An empty name renders as `missing.command` so the runner never sees a
/// nameless directive.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowCommand {
    pub name: String,
    pub properties: CommandProperties,
    pub message: String,
}

impl WorkflowCommand {
    pub fn new<M>(name: impl Into<String>, properties: CommandProperties, message: &M) -> Self
    where
        M: Serialize + ?Sized,
    {
        Self {
            name: name.into(),
            properties,
            message: to_command_value(message),
        }
    }
}

impl fmt::Display for WorkflowCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() {
            MISSING_COMMAND
        } else {
            self.name.as_str()
        };
        write!(f, "::{name}")?;
        let props = self.properties.render();
        if !props.is_empty() {
            write!(f, " {props}")?;
        }
        write!(f, "::{}", escape_data(&self.message))
    }
}

/// Writes one command line (plus EOL) to `writer`.
pub fn issue_command_to<W, M>(
    writer: &mut W,
    name: &str,
    properties: CommandProperties,
    message: &M,
) -> io::Result<()>
where
    W: Write + ?Sized,
    M: Serialize + ?Sized,
{
    let command = WorkflowCommand::new(name, properties, message);
    write!(writer, "{command}{EOL}")?;
    writer.flush()
}

/// Writes one command line (plus EOL) to standard output.
pub fn issue_command<M>(name: &str, properties: CommandProperties, message: &M) -> io::Result<()>
where
    M: Serialize + ?Sized,
{
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    issue_command_to(&mut lock, name, properties, message)
}

/// [`issue_command`] without properties.
pub fn issue<M>(name: &str, message: &M) -> io::Result<()>
where
    M: Serialize + ?Sized,
{
    issue_command(name, CommandProperties::new(), message)
}

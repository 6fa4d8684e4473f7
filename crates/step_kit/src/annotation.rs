use crate::command::CommandProperties;

/// Optional location and title attached to `error`/`warning`/`notice`.
///
/// Columns are only meaningful when `start_line == end_line`; this is not
/// checked here.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct AnnotationProperties {
    pub title: Option<String>,
    pub file: Option<String>,
    pub start_line: Option<u64>,
    pub end_line: Option<u64>,
    pub start_column: Option<u64>,
    pub end_column: Option<u64>,
}

impl AnnotationProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn start_line(mut self, line: u64) -> Self {
        self.start_line = Some(line);
        self
    }

    pub fn end_line(mut self, line: u64) -> Self {
        self.end_line = Some(line);
        self
    }

    pub fn start_column(mut self, column: u64) -> Self {
        self.start_column = Some(column);
        self
    }

    pub fn end_column(mut self, column: u64) -> Self {
        self.end_column = Some(column);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Projects onto the wire names `title`, `file`, `line`, `endLine`,
    /// `col`, `endColumn`, skipping absent fields.
    pub fn to_command_properties(&self) -> CommandProperties {
        let mut props = CommandProperties::new();
        if let Some(title) = &self.title {
            props.insert("title", title.as_str());
        }
        if let Some(file) = &self.file {
            props.insert("file", file.as_str());
        }
        let numeric = [
            ("line", self.start_line),
            ("endLine", self.end_line),
            ("col", self.start_column),
            ("endColumn", self.end_column),
        ];
        for (key, value) in numeric {
            if let Some(value) = value {
                props.insert(key, value);
            }
        }
        props
    }
}

impl From<&AnnotationProperties> for CommandProperties {
    fn from(props: &AnnotationProperties) -> Self {
        props.to_command_properties()
    }
}

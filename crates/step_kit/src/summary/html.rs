//! HTML fragment rendering for the job summary.

/// Renders `<tag attrs>content</tag>`, or just `<tag attrs>` when there is
/// no content (void elements such as `img`, `hr`, `br`).
///
/// Attributes with empty values are skipped. Neither content nor attribute
/// values are escaped; summaries are raw HTML/markdown by design of the
/// runner's renderer.
pub(crate) fn wrap(tag: &str, content: Option<&str>, attrs: &[(&str, &str)]) -> String {
    let html_attrs: String = attrs
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!(" {key}=\"{value}\""))
        .collect();
    match content {
        Some(content) if !content.is_empty() => format!("<{tag}{html_attrs}>{content}</{tag}>"),
        _ => format!("<{tag}{html_attrs}>"),
    }
}

/// A table cell with header/span metadata.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SummaryTableCell {
    pub data: String,
    pub header: bool,
    pub colspan: Option<u32>,
    pub rowspan: Option<u32>,
}

impl SummaryTableCell {
    pub fn data(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }

    pub fn header(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            header: true,
            ..Self::default()
        }
    }

    pub fn colspan(mut self, span: u32) -> Self {
        self.colspan = Some(span);
        self
    }

    pub fn rowspan(mut self, span: u32) -> Self {
        self.rowspan = Some(span);
        self
    }
}

/// Either plain text (rendered as `<td>`) or a structured cell.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TableCell {
    Text(String),
    Cell(SummaryTableCell),
}

impl From<&str> for TableCell {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for TableCell {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<SummaryTableCell> for TableCell {
    fn from(cell: SummaryTableCell) -> Self {
        Self::Cell(cell)
    }
}

impl TableCell {
    pub(crate) fn render(&self) -> String {
        match self {
            Self::Text(text) => wrap("td", Some(text.as_str()), &[]),
            Self::Cell(cell) => {
                let tag = if cell.header { "th" } else { "td" };
                let colspan = cell.colspan.map(|n| n.to_string()).unwrap_or_default();
                let rowspan = cell.rowspan.map(|n| n.to_string()).unwrap_or_default();
                wrap(
                    tag,
                    Some(cell.data.as_str()),
                    &[("colspan", colspan.as_str()), ("rowspan", rowspan.as_str())],
                )
            }
        }
    }
}

/// Optional dimensions for [`crate::Summary::add_image`].
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SummaryImageOptions {
    pub width: Option<String>,
    pub height: Option<String>,
}

impl SummaryImageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn height(mut self, height: impl Into<String>) -> Self {
        self.height = Some(height.into());
        self
    }
}

//! Job summary buffer.
//!
//! Fragments accumulate in memory and reach the runner only when
//! [`Summary::write`] is called. A successful write always leaves the buffer
//! empty, whether it appended to or replaced the summary file.

mod html;

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::{fs::OpenOptions, io::AsyncWriteExt, sync::OnceCell};
use tracing::debug;

use crate::{
    defaults::{EOL, SUMMARY_ENV_VAR},
    env::{EnvStore, ProcessEnv},
    StepKitError,
};

use html::wrap;
pub use html::{SummaryImageOptions, SummaryTableCell, TableCell};

/// Options for [`Summary::write`].
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct SummaryWriteOptions {
    /// Replace the file contents instead of appending.
    pub overwrite: bool,
}

impl SummaryWriteOptions {
    pub fn overwrite() -> Self {
        Self { overwrite: true }
    }
}

pub struct Summary {
    env: Arc<dyn EnvStore>,
    buffer: String,
    file_path: OnceCell<PathBuf>,
}

impl fmt::Debug for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Summary")
            .field("buffer_len", &self.buffer.len())
            .field("file_path", &self.file_path.get())
            .finish()
    }
}

impl Default for Summary {
    fn default() -> Self {
        Self::new(Arc::new(ProcessEnv))
    }
}

impl Summary {
    /// Creates an empty summary resolving its file through `env`.
    pub fn new(env: Arc<dyn EnvStore>) -> Self {
        Self {
            env,
            buffer: String::new(),
            file_path: OnceCell::new(),
        }
    }

    /// Resolved summary file path, once a write has resolved it.
    pub fn resolved_path(&self) -> Option<&Path> {
        self.file_path.get().map(PathBuf::as_path)
    }

    async fn file_path(&self) -> Result<PathBuf, StepKitError> {
        let env = Arc::clone(&self.env);
        self.file_path
            .get_or_try_init(|| resolve_summary_path(env))
            .await
            .cloned()
    }

    /// Flushes the buffer to the summary file and empties it.
    pub async fn write(&mut self, options: SummaryWriteOptions) -> Result<&mut Self, StepKitError> {
        let path = self.file_path().await?;
        let write_error = |source: std::io::Error| StepKitError::FileWrite {
            path: path.clone(),
            source,
        };

        // The access check happened at first resolution; recreate the file if it was removed since.
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(!options.overwrite)
            .truncate(options.overwrite)
            .open(&path)
            .await
            .map_err(write_error)?;
        file.write_all(self.buffer.as_bytes())
            .await
            .map_err(write_error)?;
        file.flush().await.map_err(write_error)?;

        debug!(
            path = %path.display(),
            bytes = self.buffer.len(),
            overwrite = options.overwrite,
            "wrote job summary"
        );
        Ok(self.empty_buffer())
    }

    /// Empties the buffer and truncates the summary file.
    pub async fn clear(&mut self) -> Result<&mut Self, StepKitError> {
        self.empty_buffer()
            .write(SummaryWriteOptions::overwrite())
            .await
    }

    pub fn stringify(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty_buffer(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Resets the buffer without touching the file.
    pub fn empty_buffer(&mut self) -> &mut Self {
        self.buffer.clear();
        self
    }

    pub fn add_raw(&mut self, text: &str, add_eol: bool) -> &mut Self {
        self.buffer.push_str(text);
        if add_eol {
            self.add_eol();
        }
        self
    }

    pub fn add_eol(&mut self) -> &mut Self {
        self.buffer.push_str(EOL);
        self
    }

    fn add_element(&mut self, element: &str) -> &mut Self {
        self.add_raw(element, true)
    }

    /// `<pre lang=..><code>..</code></pre>`
    pub fn add_code_block(&mut self, code: &str, lang: Option<&str>) -> &mut Self {
        let inner = wrap("code", Some(code), &[]);
        let element = wrap("pre", Some(inner.as_str()), &[("lang", lang.unwrap_or_default())]);
        self.add_element(&element)
    }

    pub fn add_list<I, S>(&mut self, items: I, ordered: bool) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tag = if ordered { "ol" } else { "ul" };
        let list_items: String = items
            .into_iter()
            .map(|item| wrap("li", Some(item.as_ref()), &[]))
            .collect();
        let element = wrap(tag, Some(list_items.as_str()), &[]);
        self.add_element(&element)
    }

    /// Renders rows of cells as a `<table>`; plain strings become `<td>` cells.
    pub fn add_table<R, C, T>(&mut self, rows: R) -> &mut Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = T>,
        T: Into<TableCell>,
    {
        let body: String = rows
            .into_iter()
            .map(|row| {
                let cells: String = row
                    .into_iter()
                    .map(|cell| cell.into().render())
                    .collect();
                wrap("tr", Some(cells.as_str()), &[])
            })
            .collect();
        let element = wrap("table", Some(body.as_str()), &[]);
        self.add_element(&element)
    }

    /// Collapsible `<details>` with `label` as the `<summary>`.
    pub fn add_details(&mut self, label: &str, content: &str) -> &mut Self {
        let inner = format!("{}{content}", wrap("summary", Some(label), &[]));
        let element = wrap("details", Some(inner.as_str()), &[]);
        self.add_element(&element)
    }

    pub fn add_image(&mut self, src: &str, alt: &str, options: SummaryImageOptions) -> &mut Self {
        let width = options.width.unwrap_or_default();
        let height = options.height.unwrap_or_default();
        let element = wrap(
            "img",
            None,
            &[
                ("src", src),
                ("alt", alt),
                ("width", width.as_str()),
                ("height", height.as_str()),
            ],
        );
        self.add_element(&element)
    }

    /// Adds `<h{level}>`; levels outside 1–6, or none, fall back to `h1`.
    pub fn add_heading(&mut self, text: &str, level: Option<u8>) -> &mut Self {
        let tag = match level {
            Some(level @ 1..=6) => format!("h{level}"),
            _ => "h1".to_string(),
        };
        let element = wrap(&tag, Some(text), &[]);
        self.add_element(&element)
    }

    pub fn add_separator(&mut self) -> &mut Self {
        let element = wrap("hr", None, &[]);
        self.add_element(&element)
    }

    pub fn add_break(&mut self) -> &mut Self {
        let element = wrap("br", None, &[]);
        self.add_element(&element)
    }

    pub fn add_quote(&mut self, text: &str, cite: Option<&str>) -> &mut Self {
        let element = wrap("blockquote", Some(text), &[("cite", cite.unwrap_or_default())]);
        self.add_element(&element)
    }

    pub fn add_link(&mut self, text: &str, href: &str) -> &mut Self {
        let element = wrap("a", Some(text), &[("href", href)]);
        self.add_element(&element)
    }
}

async fn resolve_summary_path(env: Arc<dyn EnvStore>) -> Result<PathBuf, StepKitError> {
    let path = env
        .get(SUMMARY_ENV_VAR)
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
        .ok_or(StepKitError::MissingSummaryPath {
            var: SUMMARY_ENV_VAR,
        })?;

    // Opening read+append checks both permissions without modifying the file.
    OpenOptions::new()
        .read(true)
        .append(true)
        .open(&path)
        .await
        .map_err(|source| StepKitError::SummaryAccess {
            path: path.clone(),
            source,
        })?;

    debug!(path = %path.display(), "resolved job summary file");
    Ok(path)
}

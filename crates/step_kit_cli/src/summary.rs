//! `step-kit summary ...`: one fragment per invocation, flushed immediately.

use clap::{Args, Subcommand};
use step_kit::{StepContext, StepKitError, SummaryWriteOptions};

#[derive(Debug, Clone, Args)]
pub(crate) struct FlushArgs {
    /// Replace the summary file instead of appending.
    #[arg(long)]
    pub overwrite: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub(crate) enum SummaryCommand {
    /// Add an `<h1>`..`<h6>` heading.
    Heading {
        text: String,
        #[arg(long)]
        level: Option<u8>,
        #[command(flatten)]
        flush: FlushArgs,
    },
    /// Add raw text or markdown, followed by a newline.
    Raw {
        text: String,
        #[command(flatten)]
        flush: FlushArgs,
    },
    /// Add a `<pre><code>` block.
    Code {
        code: String,
        #[arg(long)]
        lang: Option<String>,
        #[command(flatten)]
        flush: FlushArgs,
    },
    /// Add a bulleted (or `--ordered`) list.
    List {
        #[arg(required = true)]
        items: Vec<String>,
        #[arg(long)]
        ordered: bool,
        #[command(flatten)]
        flush: FlushArgs,
    },
    /// Add a block quote.
    Quote {
        text: String,
        #[arg(long)]
        cite: Option<String>,
        #[command(flatten)]
        flush: FlushArgs,
    },
    /// Add a hyperlink.
    Link {
        text: String,
        href: String,
        #[command(flatten)]
        flush: FlushArgs,
    },
    /// Add a horizontal rule.
    Separator {
        #[command(flatten)]
        flush: FlushArgs,
    },
    /// Truncate the summary file.
    Clear,
}

pub(crate) async fn run(
    step: &StepContext,
    command: SummaryCommand,
) -> Result<(), StepKitError> {
    let mut summary = step.summary();
    let flush = match command {
        SummaryCommand::Clear => {
            summary.clear().await?;
            return Ok(());
        }
        SummaryCommand::Heading { text, level, flush } => {
            summary.add_heading(&text, level);
            flush
        }
        SummaryCommand::Raw { text, flush } => {
            summary.add_raw(&text, true);
            flush
        }
        SummaryCommand::Code { code, lang, flush } => {
            summary.add_code_block(&code, lang.as_deref());
            flush
        }
        SummaryCommand::List {
            items,
            ordered,
            flush,
        } => {
            summary.add_list(&items, ordered);
            flush
        }
        SummaryCommand::Quote { text, cite, flush } => {
            summary.add_quote(&text, cite.as_deref());
            flush
        }
        SummaryCommand::Link { text, href, flush } => {
            summary.add_link(&text, &href);
            flush
        }
        SummaryCommand::Separator { flush } => {
            summary.add_separator();
            flush
        }
    };

    summary
        .write(SummaryWriteOptions {
            overwrite: flush.overwrite,
        })
        .await?;
    Ok(())
}

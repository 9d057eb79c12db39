//! Input draft plus transcript view.

use std::io::{self, Write};

use crate::messages::{Role, Transcript};
use crate::render::{self, RenderOptions};

pub const TITLE: &str = "GraphMind";
pub const SUBTITLE: &str = "Verified MetaKGP Question Answering";
pub const PLACEHOLDER: &str = "Ask about MetaKGP...";
pub const THINKING: &str = "Thinking…";

/// Holds the question being typed. Submitting hands the trimmed text to the
/// caller; an all-whitespace draft is ignored.
#[derive(Debug, Clone, Default)]
pub struct ChatBox {
    draft: String,
}

impl ChatBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// `Some(question)` and a cleared draft, or `None` with nothing changed.
    pub fn submit(&mut self) -> Option<String> {
        let question = self.draft.trim();
        if question.is_empty() {
            return None;
        }
        let question = question.to_string();
        self.draft.clear();
        Some(question)
    }
}

/// Full view: every message, then the placeholder while a request is outstanding.
pub fn view<W: Write>(
    transcript: &Transcript,
    loading: bool,
    opts: &RenderOptions,
    out: &mut W,
) -> io::Result<()> {
    view_from(transcript, 0, loading, opts, out)
}

/// Like [`view`], starting at message `start`. Used for incremental redraws.
pub fn view_from<W: Write>(
    transcript: &Transcript,
    start: usize,
    loading: bool,
    opts: &RenderOptions,
    out: &mut W,
) -> io::Result<()> {
    for msg in transcript.as_slice().iter().skip(start) {
        render::message(msg, opts, out)?;
    }
    if loading {
        thinking(out)?;
    }
    Ok(())
}

pub fn banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", TITLE)?;
    writeln!(out, "{}", SUBTITLE)?;
    writeln!(out)
}

pub fn prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "{} ", PLACEHOLDER)?;
    out.flush()
}

pub fn thinking<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{} {}", render::role_tag(Role::Assistant), THINKING)
}

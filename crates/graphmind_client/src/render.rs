//! Terminal rendering of chat turns and their source links.

use std::io::{self, Write};

use crate::messages::{ChatMessage, Role};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Wrap source URLs in OSC 8 escapes so the terminal opens them in a browser.
    pub hyperlinks: bool,
}

impl RenderOptions {
    pub fn plain() -> Self {
        Self { hyperlinks: false }
    }

    pub fn with_hyperlinks() -> Self {
        Self { hyperlinks: true }
    }
}

pub fn role_tag(role: Role) -> &'static str {
    match role {
        Role::User => "You:",
        Role::Assistant => "GraphMind:",
    }
}

/// One chat turn: role tag, text, and a source block when there are sources.
pub fn message<W: Write>(msg: &ChatMessage, opts: &RenderOptions, out: &mut W) -> io::Result<()> {
    writeln!(out, "{} {}", role_tag(msg.role), msg.text)?;
    if !msg.sources.is_empty() {
        source_list(&msg.sources, opts, out)?;
    }
    Ok(())
}

/// Sources in input order. No deduplication, no URL validation.
pub fn source_list<W: Write>(
    sources: &[String],
    opts: &RenderOptions,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "Sources:")?;
    for src in sources {
        if opts.hyperlinks {
            writeln!(out, "  - {}", hyperlink(src))?;
        } else {
            writeln!(out, "  - {}", src)?;
        }
    }
    Ok(())
}

/// OSC 8 hyperlink whose label is the URL itself.
fn hyperlink(url: &str) -> String {
    format!("\x1b]8;;{url}\x1b\\{url}\x1b]8;;\x1b\\")
}

//! Option lists: detection and two-column man formatting.
//!
//! Detection ([`looks_like_options_block`]) and parsing
//! ([`scan_options_block`]) are pure and independent of each other; only
//! [`translate_options_block`] talks to a backend.
//!
//! Recognised flag headers:
//!
//! ```text
//! -q
//! -q, --quiet, --silent
//! -A NUM, --after-context=NUM
//! --color[=WHEN], --colour[=WHEN]
//! ```

use crate::layout::{DESCRIPTION_INDENT, FLAGS_INDENT, WRAP_WIDTH, fill};
use crate::locale_fix::fix_punctuation_spacing;
use crate::normalize::{normalize_for_translation, unhyphenate};
use crate::orchestrator::Orchestrator;
use regex::Regex;
use std::sync::LazyLock;

/// `-x`, optionally followed by an upper-case metavariable (`-A NUM`)
const FLAG_SHORT: &str = r"-[A-Za-z0-9]+(?: [A-Z][A-Z0-9_]*\b)?";

/// `--word`, `--word=ARG`, `--word[=ARG]`, `--word[[=ARG]]`
const FLAG_LONG: &str = r"--[A-Za-z0-9][A-Za-z0-9-]*(?:\[\[=[^\]]+\]\]|\[=[^\]]+\]|=\S+)?";

static FLAG_LIST: LazyLock<String> = LazyLock::new(|| {
    let flag = format!("(?:{}|{})", FLAG_SHORT, FLAG_LONG);
    format!(r"{flag}(?:\s*,\s*{flag})*")
});

static FLAGS_ONLY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\s*(?P<flags>{})\s*$", *FLAG_LIST)).expect("flags-only regex")
});

static FLAGS_WITH_DESC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\s*(?P<flags>{})\s+(?P<desc>\S.*)$", *FLAG_LIST))
        .expect("flags-with-description regex")
});

/// A flag header and its accumulated description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    /// Flags exactly as written, e.g. `-q, --quiet, --silent`
    pub flags: String,
    /// Description with continuation lines joined by single spaces
    pub description: String,
}

impl OptionEntry {
    fn new(flags: &str, description: &str) -> Self {
        Self {
            flags: flags.trim_end().to_string(),
            description: description.trim().to_string(),
        }
    }

    fn extend(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        if !self.description.is_empty() {
            self.description.push(' ');
        }
        self.description.push_str(line);
    }
}

/// One item of a scanned option block, in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionLine {
    Entry(OptionEntry),
    /// Line passed through untouched (blank lines, stray prose)
    Verbatim(String),
}

/// Split a header line into its flags and the description on the same line
pub fn split_option_line(line: &str) -> Option<(&str, &str)> {
    let caps = FLAGS_WITH_DESC_RE.captures(line)?;
    let flags = caps.name("flags")?.as_str();
    let desc = caps.name("desc")?.as_str();
    Some((flags, desc))
}

/// Flags of a line that holds nothing but flags
pub fn match_flags_only(line: &str) -> Option<&str> {
    FLAGS_ONLY_RE
        .captures(line)
        .and_then(|caps| caps.name("flags"))
        .map(|m| m.as_str())
}

fn is_indented(line: &str) -> bool {
    line.starts_with(' ') || line.starts_with('\t')
}

/// Whether a chunk tagged as prose is really an option list
///
/// Every line that is not blank and not an indented continuation of a header
/// must be a flags-only header, and at least one header must be directly
/// followed by an indented line.
pub fn looks_like_options_block(chunk: &str) -> bool {
    let lines: Vec<&str> = chunk.lines().collect();
    let mut saw_pair = false;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        if line.trim().is_empty() {
            i += 1;
            continue;
        }
        if match_flags_only(line).is_none() {
            return false;
        }

        i += 1;
        if lines.get(i).is_some_and(|next| is_indented(next)) {
            saw_pair = true;
        }
        while i < lines.len() && (lines[i].trim().is_empty() || is_indented(lines[i])) {
            i += 1;
        }
    }

    saw_pair
}

/// Parse an option block into entries and pass-through lines
///
/// At most one entry is pending at a time. A line indented deeper than the
/// pending header continues its description, even when it starts with a flag
/// (`--exclude options are given, ...`). Anything else closes the entry: a new
/// header, a blank line, prose at or left of the header's indent, or the end
/// of the block.
pub fn scan_options_block(block: &str) -> Vec<OptionLine> {
    let mut items = Vec::new();
    // Pending entry and the indent of its header line
    let mut carry: Option<(OptionEntry, usize)> = None;

    for line in block.lines() {
        if line.trim().is_empty() {
            if let Some((entry, _)) = carry.take() {
                items.push(OptionLine::Entry(entry));
            }
            items.push(OptionLine::Verbatim(line.to_string()));
            continue;
        }

        let indent = indent_width(line);
        if let Some((entry, header_indent)) = carry.as_mut() {
            if indent > *header_indent {
                entry.extend(line);
                continue;
            }
        }

        // Flags-only first: `-e PATTERNS` would otherwise split as flag + description.
        let header = match_flags_only(line)
            .map(|flags| OptionEntry::new(flags, ""))
            .or_else(|| split_option_line(line).map(|(flags, desc)| OptionEntry::new(flags, desc)));
        if let Some((done, _)) = carry.take() {
            items.push(OptionLine::Entry(done));
        }
        match header {
            Some(entry) => carry = Some((entry, indent)),
            None => items.push(OptionLine::Verbatim(line.to_string())),
        }
    }

    if let Some((entry, _)) = carry.take() {
        items.push(OptionLine::Entry(entry));
    }
    items
}

fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Render an entry whose description is already translated
///
/// Flags go on their own line at column 8, the description wraps at column 15.
pub fn format_option(flags: &str, description: &str) -> String {
    let mut out = format!("{}{}", " ".repeat(FLAGS_INDENT), flags);
    let body = fill(description, WRAP_WIDTH, DESCRIPTION_INDENT);
    if !body.is_empty() {
        out.push('\n');
        out.push_str(&body);
    }
    out
}

/// Translate and lay out a whole option block
///
/// Each description is translated on its own; flags are never sent to a
/// backend. The result ends with a newline.
pub async fn translate_options_block(block: &str, orchestrator: &Orchestrator) -> String {
    let block = unhyphenate(block);
    let mut out_lines = Vec::new();

    for item in scan_options_block(&block) {
        match item {
            OptionLine::Verbatim(line) => out_lines.push(line),
            OptionLine::Entry(entry) => {
                let description = normalize_for_translation(&entry.description);
                let translated = if description.is_empty() {
                    description
                } else {
                    fix_punctuation_spacing(&orchestrator.translate_with_fallback(&description).await)
                };
                out_lines.push(format_option(&entry.flags, &translated));
            }
        }
    }

    let mut out = out_lines.join("\n");
    out.push('\n');
    out
}

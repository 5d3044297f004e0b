//! Reader for the tagged input stream.
//!
//! The upstream extractor wraps every chunk of a manual page in marker lines:
//!
//! ```text
//! --- section ---
//! NAME
//! --- text ---
//! grep - print lines that match patterns
//! --- /text ---
//! ```
//!
//! Opening and closing markers both end the current segment. Anything that is
//! not a well-formed marker for one of the four known tags is content.

use std::fmt;

/// How a segment is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Text,
    Code,
    Options,
    Section,
    /// Content outside any open marker
    Unset,
}

impl SegmentKind {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "text" => Some(Self::Text),
            "code" => Some(Self::Code),
            "options" => Some(Self::Options),
            "section" => Some(Self::Section),
            _ => None,
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Code => "code",
            Self::Options => "options",
            Self::Section => "section",
            Self::Unset => "unset",
        };
        write!(f, "{}", name)
    }
}

/// A recognised marker line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub kind: SegmentKind,
    pub closing: bool,
}

/// One typed chunk of the input, content kept with its line terminators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub content: String,
}

impl Segment {
    pub fn new(kind: SegmentKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }
}

/// Recognise `--- tag ---` and `--- /tag ---`
///
/// Surrounding whitespace on the line is ignored; the tag must be one of
/// `text`, `code`, `options` or `section`.
pub fn parse_marker(line: &str) -> Option<Marker> {
    if !line.starts_with("--- ") {
        return None;
    }
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix("--- ")?.strip_suffix("---")?;
    let inner = inner.trim();
    let (closing, tag) = match inner.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, inner),
    };
    let kind = SegmentKind::from_tag(tag)?;
    Some(Marker { kind, closing })
}

/// Split a raw stream into segments, in input order
///
/// Segments with empty content are dropped.
pub fn parse_segments(raw: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut kind = SegmentKind::Unset;
    let mut buf = String::new();

    for line in raw.split_inclusive('\n') {
        match parse_marker(line) {
            Some(marker) => {
                if !buf.is_empty() {
                    segments.push(Segment::new(kind, std::mem::take(&mut buf)));
                }
                kind = if marker.closing {
                    SegmentKind::Unset
                } else {
                    marker.kind
                };
            }
            None => buf.push_str(line),
        }
    }
    if !buf.is_empty() {
        segments.push(Segment::new(kind, buf));
    }

    segments
}

//! Text clean-up applied before anything is handed to a translation backend.
//!
//! Manual pages arrive hard-wrapped, with typographic dashes and words split
//! across lines. Backends do much better with a single clean line, so every
//! prose chunk goes through [`unhyphenate`] (while the line breaks are still
//! there), then [`flatten_lines`] and [`normalize_for_translation`].

use regex::Regex;
use std::sync::LazyLock;

/// Code points folded to a plain `-`: soft hyphen and U+2010..U+2014.
const DASH_VARIANTS: [char; 6] = [
    '\u{00AD}', '\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}',
];

static HORIZONTAL_WS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("horizontal whitespace regex"));

static WS_BEFORE_NEWLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\n").expect("whitespace before newline regex"));

static WRAPPED_HYPHEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\p{L})[-\x{00AD}\x{2010}-\x{2014}]\s*\n\s*(\p{L})").expect("wrapped hyphen regex")
});

/// Clean a chunk of text for translation
///
/// Order matters: dashes are folded first, then runs of spaces and tabs are
/// collapsed, whitespace hanging before a newline is dropped (which also folds
/// runs of blank lines) and the result is trimmed. The function is idempotent.
///
/// # Example
///
/// ```ignore
/// assert_eq!(normalize_for_translation("  a \t b \n\n c\u{2013}d "), "a b\n c-d");
/// ```
pub fn normalize_for_translation(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let folded: String = text
        .chars()
        .map(|c| if DASH_VARIANTS.contains(&c) { '-' } else { c })
        .collect();
    let collapsed = HORIZONTAL_WS_RE.replace_all(&folded, " ");
    let tightened = WS_BEFORE_NEWLINE_RE.replace_all(&collapsed, "\n");
    tightened.trim().to_string()
}

/// Rejoin words split across a line break by a hyphen
///
/// `speci-\n   fied` becomes `specified`. Any dash variant counts as the
/// hyphen. Must run while the original line breaks are still present.
pub fn unhyphenate(text: &str) -> String {
    let mut current = text.to_string();
    // A match consumes the letter after the break, so `a-\nb-\nc` needs a second pass.
    loop {
        let next = WRAPPED_HYPHEN_RE.replace_all(&current, "${1}${2}");
        if next == current {
            return current;
        }
        current = next.into_owned();
    }
}

/// Trim every line, drop blank ones and join the rest with single spaces
pub fn flatten_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== Normalization Tests ==========

    #[test]
    fn test_normalize_collapses_horizontal_whitespace() {
        assert_eq!(normalize_for_translation("a  \t  b"), "a b");
    }

    #[test]
    fn test_normalize_removes_space_before_newline() {
        assert_eq!(normalize_for_translation("a   \nb"), "a\nb");
    }

    #[test]
    fn test_normalize_folds_blank_lines() {
        assert_eq!(normalize_for_translation("a\n\n\nb"), "a\nb");
    }

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize_for_translation("  \n hello \n "), "hello");
    }

    #[test]
    fn test_normalize_folds_dash_variants() {
        assert_eq!(
            normalize_for_translation("a\u{00AD}b\u{2010}c\u{2011}d\u{2012}e\u{2013}f\u{2014}g"),
            "a-b-c-d-e-f-g"
        );
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_for_translation(""), "");
        assert_eq!(normalize_for_translation(" \t\n "), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "",
            "plain",
            "  a \t b \n\n c\u{2013}d ",
            "line one   \n\t line two\n\n\n   line three  ",
            "\u{00A0}x \u{00A0}\n y",
            "tabs\t\tand  spaces \t\n\t\n",
            "Print   NUM lines of trailing\u{2014}context.",
        ];
        for s in samples {
            let once = normalize_for_translation(s);
            assert_eq!(normalize_for_translation(&once), once, "input: {:?}", s);
        }
    }

    // ========== Unhyphenation Tests ==========

    #[test]
    fn test_unhyphenate_ascii_hyphen() {
        assert_eq!(unhyphenate("speci-\nfied"), "specified");
    }

    #[test]
    fn test_unhyphenate_with_surrounding_whitespace() {
        assert_eq!(unhyphenate("the speci-  \n       fied file"), "the specified file");
    }

    #[test]
    fn test_unhyphenate_every_variant() {
        for h in ["-", "\u{00AD}", "\u{2010}", "\u{2011}", "\u{2012}", "\u{2013}", "\u{2014}"] {
            let input = format!("match{}\ning", h);
            assert_eq!(unhyphenate(&input), "matching", "variant {:?}", h);
        }
    }

    #[test]
    fn test_unhyphenate_round_trip_words() {
        let pairs = [("con", "text"), ("direc", "tories"), ("a", "b"), ("año", "ñu")];
        for (w1, w2) in pairs {
            let input = format!("{}-\n{}", w1, w2);
            assert_eq!(unhyphenate(&input), format!("{}{}", w1, w2));
        }
    }

    #[test]
    fn test_unhyphenate_consecutive_breaks() {
        assert_eq!(unhyphenate("a-\nb-\nc"), "abc");
    }

    #[test]
    fn test_unhyphenate_leaves_other_hyphens() {
        assert_eq!(unhyphenate("grep - print lines"), "grep - print lines");
        assert_eq!(unhyphenate("command-line"), "command-line");
        assert_eq!(unhyphenate("see --\nhelp"), "see --\nhelp");
    }

    #[test]
    fn test_unhyphenate_before_normalize_keeps_anchor() {
        let raw = "the speci-   \n   fied   pattern";
        // Normalizing first would drop the newline the repair anchors on.
        assert_eq!(
            normalize_for_translation(&unhyphenate(raw)),
            "the specified pattern"
        );
    }

    // ========== Flattening Tests ==========

    #[test]
    fn test_flatten_lines() {
        assert_eq!(
            flatten_lines("  grep searches\n\n   for PATTERNS  \n in each FILE.\n"),
            "grep searches for PATTERNS in each FILE."
        );
    }

    #[test]
    fn test_flatten_blank() {
        assert_eq!(flatten_lines("\n  \n\t\n"), "");
    }
}

//! Man-style paragraph filling.

/// Width of a rendered manual page, in columns
pub const WRAP_WIDTH: usize = 80;

/// Indent of an option's flag line (flags start at column 8)
pub const FLAGS_INDENT: usize = 7;

/// Indent of an option's description lines (text starts at column 15)
pub const DESCRIPTION_INDENT: usize = 14;

/// Greedily fill `text` into lines of at most `width` columns
///
/// Every produced line starts with `indent` spaces, and the indent counts
/// toward the width. Words are split on whitespace and never broken at
/// hyphens (option names such as `--exclude-dir` must stay whole); a single
/// word longer than the available room is cut into pieces that fit.
///
/// Returns the lines joined with `\n`, without a trailing newline. Blank input
/// gives an empty string.
pub fn fill(text: &str, width: usize, indent: usize) -> String {
    let room = width.saturating_sub(indent).max(1);
    let prefix = " ".repeat(indent);

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > room {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            let mut pieces = chars.chunks(room).peekable();
            while let Some(piece) = pieces.next() {
                let piece: String = piece.iter().collect();
                if pieces.peek().is_some() {
                    lines.push(piece);
                } else {
                    current_len = piece.chars().count();
                    current = piece;
                }
            }
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= room {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
            current_len = word_len;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
        .iter()
        .map(|line| format!("{}{}", prefix, line))
        .collect::<Vec<_>>()
        .join("\n")
}

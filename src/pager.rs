//! Showing the rendered page.

use std::io::{self, Write};
use std::process::{Command, Stdio};
use tracing::debug;

/// Pager command and its arguments
const PAGER: (&str, &[&str]) = ("less", &["-R"]);

/// Pipe `text` through `less -R`
///
/// Returns an error when the pager cannot be started or fed; the caller then
/// writes the text itself.
pub fn page(text: &str) -> io::Result<()> {
    let (program, args) = PAGER;
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        // A user quitting less early closes the pipe; that is not a failure.
        if let Err(e) = stdin.write_all(text.as_bytes()) {
            if e.kind() != io::ErrorKind::BrokenPipe {
                return Err(e);
            }
        }
    }
    child.wait()?;
    Ok(())
}

/// Write `text` to `out` as is
pub fn print_to(out: &mut impl Write, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()
}

/// Page `text` when asked to, falling back to plain stdout
pub fn display(text: &str, use_pager: bool) -> io::Result<()> {
    if use_pager {
        match page(text) {
            Ok(()) => return Ok(()),
            Err(e) => debug!(error = %e, "pager unavailable, writing to stdout"),
        }
    }
    print_to(&mut io::stdout().lock(), text)
}

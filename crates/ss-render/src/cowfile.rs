//! Enveloppe « cowfile » : le rendu devient une vache pour cowsay.

/// Variable cowsay du trait de la bulle.
const THOUGHTS: &str = "$thoughts";
/// Lines that carry the bubble tail.
const TAIL_LINES: usize = 3;

/// Wrap a finished render into a cowfile.
///
/// The first three lines get the `$thoughts` tail marker, line *i* after *i*
/// spaces. The marker takes the place of leading padding when the line has
/// enough of it, otherwise it is prepended. ESC bytes become `\e` so Perl
/// re-expands them.
///
/// # Example
/// ```
/// use ss_render::cowfile::wrap_cowfile;
/// let cow = wrap_cowfile("  \x1b[91m▀\x1b[0m\n", "a red pixel");
/// assert_eq!(
///     cow,
///     "## a red pixel\n$the_cow = <<\"EOC\";\n$thoughts \\e[91m▀\\e[0m\nEOC\n"
/// );
/// ```
#[must_use]
pub fn wrap_cowfile(art: &str, comment: &str) -> String {
    let mut out = String::with_capacity(art.len() + comment.len() + 64);
    if comment.is_empty() {
        out.push_str("##\n");
    }
    for line in comment.lines() {
        out.push_str("## ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("$the_cow = <<\"EOC\";\n");

    for (i, line) in art.lines().enumerate() {
        let line = escape_line(line);
        if i < TAIL_LINES {
            out.push_str(&" ".repeat(i));
            out.push_str(THOUGHTS);
            // the marker prints as a single column: eat that much padding
            let width = i + 1;
            let leading = line.len() - line.trim_start_matches(' ').len();
            out.push_str(&line[leading.min(width)..]);
        } else {
            out.push_str(&line);
        }
        out.push('\n');
    }
    out.push_str("EOC\n");
    out
}

/// ESC → `\e`, and Perl sigils/backslashes escaped for the heredoc.
fn escape_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len() + 16);
    for ch in line.chars() {
        match ch {
            '\x1b' => out.push_str("\\e"),
            '\\' | '$' | '@' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

// src/sheets/csv/line_splitter.rs

const BOM: char = '\u{FEFF}';

fn is_blank(line: &str) -> bool {
    line.chars().all(|c| c.is_whitespace() || c == BOM)
}

/// Splits raw CSV text into logical lines.
///
/// Quote state is toggled on every `"`; escaped quotes are resolved later by the
/// field splitter, and a `""` pair toggles twice so the state is unchanged.
/// Terminators inside quotes are kept as content. `\r\n` outside quotes counts
/// as a single terminator. Blank lines are dropped, so the header is the first
/// non-blank line.
pub fn split_logical_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '"' {
            in_quotes = !in_quotes;
        }
        if (c == '\n' || c == '\r') && !in_quotes {
            push_line(&mut lines, &mut current);
            if c == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        push_line(&mut lines, &mut current);
    }
    lines
}

fn push_line(lines: &mut Vec<String>, current: &mut String) {
    let line = std::mem::take(current);
    if !is_blank(&line) {
        lines.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crlf_is_one_terminator() {
        let lines = split_logical_lines("a,b\r\n1,2\r\n");
        assert_eq!(lines, vec!["a,b", "1,2"]);
    }

    #[test]
    fn test_quoted_newline_stays_in_line() {
        let lines = split_logical_lines("h1,h2\n\"multi\nline\",x\nnext,y");
        assert_eq!(lines, vec!["h1,h2", "\"multi\nline\",x", "next,y"]);
    }

    #[test]
    fn test_quoted_crlf_is_content() {
        let lines = split_logical_lines("h\n\"a\r\nb\"\n");
        assert_eq!(lines, vec!["h", "\"a\r\nb\""]);
    }

    #[test]
    fn test_blank_lines_dropped() {
        let lines = split_logical_lines("h\n\n   \n1\n");
        assert_eq!(lines, vec!["h", "1"]);
    }

    #[test]
    fn test_leading_blank_lines_skipped() {
        let lines = split_logical_lines("\n \nh\n\n1");
        assert_eq!(lines, vec!["h", "1"]);
    }

    #[test]
    fn test_trailing_line_without_terminator_flushed() {
        assert_eq!(split_logical_lines("h\nlast"), vec!["h", "last"]);
        assert!(split_logical_lines("").is_empty());
    }

    #[test]
    fn test_escaped_quotes_do_not_break_quote_state() {
        let lines = split_logical_lines("\"say \"\"hi\"\"\nthere\",1\n2,3");
        assert_eq!(lines, vec!["\"say \"\"hi\"\"\nthere\",1", "2,3"]);
    }
}

// src/sheets/csv/field_splitter.rs

/// Splits one logical line on unquoted commas.
///
/// Inside quotes a `""` pair yields one literal quote. Each field is trimmed.
/// A trailing comma produces a trailing empty field. No padding happens here.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Removes one layer of matching straight double or single quotes wrapping the
/// whole value, then trims again.
pub fn strip_enclosing_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return value[1..value.len() - 1].trim();
        }
    }
    value
}

/// Field split followed by quote-decoration stripping, as used for data rows.
pub fn split_row(line: &str) -> Vec<String> {
    split_fields(line)
        .into_iter()
        .map(|f| strip_enclosing_quotes(&f).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_comma() {
        assert_eq!(split_fields("1,\"Doe, John\""), vec!["1", "Doe, John"]);
    }

    #[test]
    fn test_escaped_quote() {
        assert_eq!(
            split_fields("\"He said \"\"no\"\"\",x"),
            vec!["He said \"no\"", "x"]
        );
    }

    #[test]
    fn test_empty_fields_and_trailing_comma() {
        assert_eq!(split_fields("a,,b,"), vec!["a", "", "b", ""]);
        assert_eq!(split_fields(""), vec![""]);
    }

    #[test]
    fn test_fields_are_trimmed() {
        assert_eq!(split_fields("  a ,\" b \" "), vec!["a", "b"]);
    }

    #[test]
    fn test_strip_enclosing_quotes_requires_matching_pair() {
        assert_eq!(strip_enclosing_quotes("'Open'"), "Open");
        assert_eq!(strip_enclosing_quotes("\" padded \""), "padded");
        assert_eq!(strip_enclosing_quotes("'mixed\""), "'mixed\"");
        assert_eq!(strip_enclosing_quotes("\""), "\"");
        assert_eq!(strip_enclosing_quotes("plain"), "plain");
    }

    #[test]
    fn test_split_row_strips_decorated_cells() {
        assert_eq!(split_row("'WIP',\"\"\"x\"\"\""), vec!["WIP", "x"]);
    }
}

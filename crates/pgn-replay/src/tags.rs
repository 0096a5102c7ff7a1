//! PGN tag pairs (`[Event "F/S Return Match"]`).

/// Iterates over the `(name, value)` tag pairs of a PGN game, in order.
pub fn tags(pgn: &str) -> impl Iterator<Item = (&str, String)> {
    pgn.lines().filter_map(parse_tag)
}

/// Returns the value of the first tag pair named `name`.
pub fn tag_value(pgn: &str, name: &str) -> Option<String> {
    tags(pgn).find(|(tag, _)| *tag == name).map(|(_, value)| value)
}

fn parse_tag(line: &str) -> Option<(&str, String)> {
    let inner = line.trim().strip_prefix('[')?.strip_suffix(']')?;
    let (name, value) = inner.split_once(char::is_whitespace)?;
    let value = value.trim().strip_prefix('"')?.strip_suffix('"')?;
    Some((name, unescape(value)))
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAME: &str = r#"[Event "Paris Opera"]
[Site "Paris FRA"]
[Date "1858.??.??"]
[White "Paul Morphy"]
[Annotator "Someone \"quoted\""]

1. e4 e5 *
"#;

    #[test]
    fn finds_values() {
        assert_eq!(tag_value(GAME, "Event").as_deref(), Some("Paris Opera"));
        assert_eq!(tag_value(GAME, "Date").as_deref(), Some("1858.??.??"));
        assert_eq!(tag_value(GAME, "White").as_deref(), Some("Paul Morphy"));
    }

    #[test]
    fn missing_tag() {
        assert_eq!(tag_value(GAME, "Round"), None);
    }

    #[test]
    fn escaped_quotes() {
        assert_eq!(
            tag_value(GAME, "Annotator").as_deref(),
            Some("Someone \"quoted\"")
        );
    }

    #[test]
    fn all_tags_in_order() {
        let names: Vec<&str> = tags(GAME).map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Event", "Site", "Date", "White", "Annotator"]);
    }

    #[test]
    fn movetext_lines_are_not_tags() {
        assert_eq!(tags("1. e4 e5 2. Nf3 [x]").count(), 0);
    }
}

//! JSON escaping for the "Copy escaped" action.

/// `text` as the body of a JSON string literal, without the surrounding quotes.
pub fn json_escape(text: &str) -> String {
    let quoted = serde_json::Value::String(text.to_owned()).to_string();
    quoted
        .strip_prefix('"')
        .and_then(|body| body.strip_suffix('"'))
        .unwrap_or(&quoted)
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_quotes_backslashes_and_newlines() {
        assert_eq!(json_escape("a\"b\\c\nd"), r#"a\"b\\c\nd"#);
        assert_eq!(json_escape("\t\r"), r"\t\r");
    }

    #[test]
    fn escapes_control_characters() {
        assert_eq!(json_escape("\u{1}"), r"\u0001");
        assert_eq!(json_escape("\u{8}\u{c}"), r"\b\f");
    }

    #[test]
    fn leaves_slashes_and_unicode_alone() {
        assert_eq!(json_escape("/ é"), "/ é");
        assert_eq!(json_escape(""), "");
    }

    #[test]
    fn escapes_a_banner() {
        let banner = " _ \n|_|\n| |";
        assert_eq!(json_escape(banner), r" _ \n|_|\n| |");
    }
}

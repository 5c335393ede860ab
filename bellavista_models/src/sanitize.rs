use std::sync::LazyLock;

use regex::Regex;

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new("<[^>]*>").unwrap());

/// Sanitizes a single form field: trims surrounding whitespace, strips markup
/// tags and escapes the remaining special characters.
///
/// Applied uniformly to every incoming field before validation.
pub fn sanitize_field(input: &str) -> String {
    let trimmed = input.trim();
    let stripped = TAG_REGEX.replace_all(trimmed, "");
    escape_special(&stripped)
}

fn escape_special(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn trims_whitespace() {
        assert_eq!(sanitize_field("  hello \n"), "hello");
    }

    #[test]
    fn strips_tags() {
        assert_eq!(
            sanitize_field("<script>alert(1)</script>hi"),
            "alert(1)hi"
        );
        assert_eq!(sanitize_field("a <b>bold</b> claim"), "a bold claim");
    }

    #[test]
    fn escapes_special_characters() {
        assert_eq!(
            sanitize_field("Tom & \"Jerry\" <> 'quotes'"),
            "Tom &amp; &quot;Jerry&quot;  &#039;quotes&#039;"
        );
    }

    #[test]
    fn plain_input_unchanged() {
        assert_eq!(sanitize_field("Max Mustermann"), "Max Mustermann");
    }
}

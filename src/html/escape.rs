//! Escaping for HTML text, attribute values and JavaScript string literals

/// Escape a string for HTML text and attribute values.
///
/// Replaces `&`, `<`, `>`, `"` and `'` with entities.
///
/// ```
/// use formkit::html::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">O'Brien & Co</a>"#),
///     "&lt;a href=&quot;x&quot;&gt;O&#039;Brien &amp; Co&lt;/a&gt;");
/// ```
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#039;"),
            _ => output.push(ch),
        }
    }
    output
}

/// Escape a string for use inside a single or double quoted JavaScript
/// string literal.
///
/// ```
/// use formkit::html::escape_js;
///
/// assert_eq!(escape_js("it's \"x\"\n"), r#"it\'s \"x\"\n"#);
/// ```
#[must_use]
pub fn escape_js(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => output.push_str("\\\\"),
            '\r' => output.push_str("\\r"),
            '\n' => output.push_str("\\n"),
            '"' => output.push_str("\\\""),
            '\'' => output.push_str("\\'"),
            _ => output.push(ch),
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(escape_html("Main Street 1"), "Main Street 1");
        assert_eq!(escape_js("Main Street 1"), "Main Street 1");
    }

    #[test]
    fn backslashes_are_doubled_for_js() {
        assert_eq!(escape_js(r"^\d{5}$"), r"^\\d{5}$");
    }

    proptest! {
        #[test]
        fn prop_escaped_html_has_no_markup(input in ".*") {
            let escaped = escape_html(&input);
            prop_assert!(!escaped.contains('<'));
            prop_assert!(!escaped.contains('>'));
            prop_assert!(!escaped.contains('"'));
            prop_assert!(!escaped.contains('\''));
        }

        #[test]
        fn prop_escaped_js_has_no_raw_newlines(input in ".*") {
            let escaped = escape_js(&input);
            prop_assert!(!escaped.contains('\n'));
            prop_assert!(!escaped.contains('\r'));
        }
    }
}

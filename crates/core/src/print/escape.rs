use std::fmt;

use serde::Serialize;

/// Text that has been HTML-escaped and is safe to interpolate into markup.
///
/// The only constructor is [`escape_html`], so every `EscapedText` in a print
/// document went through the same escaping routine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EscapedText(String);

impl EscapedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for EscapedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escape HTML special characters to prevent XSS.
pub fn escape_html(s: &str) -> EscapedText {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    EscapedText(escaped)
}

/// Escapes an optional field, rendering a missing value as empty text.
pub fn escape_optional(s: Option<&str>) -> EscapedText {
    escape_html(s.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x" & 'y')</script>"#).as_str(),
            "&lt;script&gt;alert(&quot;x&quot; &amp; &#39;y&#39;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_escape_existing_entity_is_escaped_again() {
        assert_eq!(escape_html("&lt;").as_str(), "&amp;lt;");
    }

    #[test]
    fn test_escape_keeps_plain_text() {
        assert_eq!(escape_html("王小明 10:00").as_str(), "王小明 10:00");
        assert!(escape_html("").is_empty());
    }

    #[test]
    fn test_escape_optional() {
        assert!(escape_optional(None).is_empty());
        assert_eq!(escape_optional(Some("a<b")).to_string(), "a&lt;b");
    }
}

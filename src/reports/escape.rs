//! Escaping utilities for safe report generation.
//!
//! Practice names, addresses, review texts and scraped values all come from
//! outside and may contain markup. Everything user-controllable must pass
//! through these functions before it is embedded in an HTML report.

/// Escape a string for safe inclusion in HTML content.
///
/// Escapes the following characters:
/// - `&` -> `&amp;`
/// - `<` -> `&lt;`
/// - `>` -> `&gt;`
/// - `"` -> `&quot;`
/// - `'` -> `&#x27;`
///
/// # Examples
///
/// ```
/// use smile_audit::reports::escape::escape_html;
///
/// assert_eq!(escape_html("<script>alert('xss')</script>"),
///     "&lt;script&gt;alert(&#x27;xss&#x27;)&lt;/script&gt;");
///
/// assert_eq!(escape_html("Smith & Sons Dental"), "Smith &amp; Sons Dental");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a string for safe inclusion in HTML attributes.
///
/// Stricter than content escaping: also encodes whitespace that could
/// break attribute parsing.
///
/// # Examples
///
/// ```
/// use smile_audit::reports::escape::escape_html_attr;
///
/// assert_eq!(escape_html_attr("https://maps.example/?q=\"a\""),
///     "https://maps.example/?q=&quot;a&quot;");
/// ```
pub fn escape_html_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            '\n' => result.push_str("&#10;"),
            '\r' => result.push_str("&#13;"),
            '\t' => result.push_str("&#9;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape an optional value, rendering `None` as an em-dash placeholder.
pub fn escape_html_opt(s: Option<&str>) -> String {
    match s {
        Some(v) if !v.trim().is_empty() => escape_html(v),
        _ => "—".to_string(),
    }
}

/// Only `http(s)` links are rendered as links.
pub fn is_safe_href(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_basic() {
        assert_eq!(escape_html("hello"), "hello");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("a < b > c"), "a &lt; b &gt; c");
        assert_eq!(escape_html("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }

    #[test]
    fn test_escape_html_xss_vectors() {
        assert_eq!(
            escape_html("<img onerror=\"alert('xss')\">"),
            "&lt;img onerror=&quot;alert(&#x27;xss&#x27;)&quot;&gt;"
        );
        // Already-escaped input is escaped again
        assert_eq!(escape_html("&lt;script&gt;"), "&amp;lt;script&amp;gt;");
    }

    #[test]
    fn test_escape_html_attr() {
        assert_eq!(escape_html_attr("normal"), "normal");
        assert_eq!(escape_html_attr("line1\nline2"), "line1&#10;line2");
        assert_eq!(escape_html_attr("with\ttab"), "with&#9;tab");
    }

    #[test]
    fn test_escape_html_opt() {
        assert_eq!(escape_html_opt(Some("<b>")), "&lt;b&gt;");
        assert_eq!(escape_html_opt(Some("  ")), "—");
        assert_eq!(escape_html_opt(None), "—");
    }

    #[test]
    fn test_safe_href() {
        assert!(is_safe_href("https://www.google.com/maps/place/x"));
        assert!(!is_safe_href("javascript:alert(1)"));
        assert!(!is_safe_href(" data:text/html,hi"));
    }

    #[test]
    fn test_unicode_preservation() {
        assert_eq!(escape_html("HTTPS ✅ | Load speed ⚠️"), "HTTPS ✅ | Load speed ⚠️");
        assert_eq!(escape_html("Clínica Dental Ñandú"), "Clínica Dental Ñandú");
    }
}

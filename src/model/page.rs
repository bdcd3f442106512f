//! Fetched website pages and the narrow markup probes run over them.
//!
//! This is deliberately not an HTML parser. Every probe is a regex or
//! substring check over the raw markup, enough to find anchors, meta tags,
//! media tags and visible text on a typical practice homepage.

use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\b[^>]*?\bhref\s*=\s*["']([^"']*)["'][^>]*>(.*?)</a\s*>"#)
        .expect("static regex")
});
static HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\b[^>]*?\bhref\s*=\s*["']([^"']*)["']"#).expect("static regex")
});
static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)\bclass\s*=\s*["']([^"']*)["']"#).expect("static regex")
});
static VIEWPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta\b[^>]*\bname\s*=\s*["']?viewport\b"#).expect("static regex")
});
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").expect("static regex"));
static H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h1\b[^>]*>(.*?)</h1\s*>").expect("static regex"));
static META_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("static regex"));
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)([a-z][a-z0-9:_-]*)\s*=\s*["']([^"']*)["']"#).expect("static regex")
});
static SCRIPT_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>|<noscript\b.*?</noscript\s*>|<!--.*?-->")
        .expect("static regex")
});
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("static regex"));
static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));
static BLOCK_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(?:p|div|li|h[1-6]|address|tr|td|section|footer|header|span)\s*>")
        .expect("static regex")
});

/// An anchor tag: its `href` and visible text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
    pub text: String,
}

/// A fetched HTML page with precomputed text views.
#[derive(Debug, Clone)]
pub struct PageDocument {
    url: String,
    html: String,
    html_lower: String,
    text: String,
    text_lower: String,
}

impl PageDocument {
    /// Wrap raw markup fetched from `url`.
    pub fn parse(url: impl Into<String>, html: impl Into<String>) -> Self {
        let html = html.into();
        let text = visible_text(&html);
        Self {
            url: url.into(),
            html_lower: html.to_lowercase(),
            text_lower: text.to_lowercase(),
            text,
            html,
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Lowercased raw markup, for substring probes
    #[must_use]
    pub fn html_lower(&self) -> &str {
        &self.html_lower
    }

    /// Visible text with whitespace collapsed
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn text_lower(&self) -> &str {
        &self.text_lower
    }

    /// All `href` values of anchor tags, in document order.
    pub fn hrefs(&self) -> impl Iterator<Item = &str> {
        HREF_RE
            .captures_iter(&self.html)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().trim())
    }

    /// Anchors with their visible text.
    #[must_use]
    pub fn anchors(&self) -> Vec<Anchor> {
        ANCHOR_RE
            .captures_iter(&self.html)
            .filter_map(|c| {
                let href = c.get(1)?.as_str().trim().to_string();
                let inner = c.get(2).map_or("", |m| m.as_str());
                Some(Anchor {
                    href,
                    text: strip_tags(inner),
                })
            })
            .collect()
    }

    /// All `class` attribute values.
    pub fn class_attributes(&self) -> impl Iterator<Item = &str> {
        CLASS_RE
            .captures_iter(&self.html)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
    }

    /// Whether a `<meta name="viewport">` tag exists.
    #[must_use]
    pub fn has_viewport_meta(&self) -> bool {
        VIEWPORT_RE.is_match(&self.html)
    }

    /// Number of opening tags with the given name.
    #[must_use]
    pub fn count_tags(&self, name: &str) -> usize {
        let needle = format!("<{}", name.to_ascii_lowercase());
        self.html_lower
            .match_indices(&needle)
            .filter(|(idx, _)| {
                self.html_lower[idx + needle.len()..]
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_whitespace() || c == '>' || c == '/')
            })
            .count()
    }

    #[must_use]
    pub fn title(&self) -> Option<String> {
        first_capture_text(&TITLE_RE, &self.html)
    }

    #[must_use]
    pub fn first_h1(&self) -> Option<String> {
        first_capture_text(&H1_RE, &self.html)
    }

    /// `content` of the first `<meta>` whose `property` or `name` equals `key`.
    #[must_use]
    pub fn meta_content(&self, key: &str) -> Option<String> {
        META_RE.find_iter(&self.html).find_map(|tag| {
            let mut matched = false;
            let mut content = None;
            for attr in ATTR_RE.captures_iter(tag.as_str()) {
                let name = attr.get(1).map_or("", |m| m.as_str()).to_ascii_lowercase();
                let value = attr.get(2).map_or("", |m| m.as_str());
                match name.as_str() {
                    "property" | "name" if value.eq_ignore_ascii_case(key) => matched = true,
                    "content" => content = Some(collapse_ws(&decode_entities(value))),
                    _ => {}
                }
            }
            if matched {
                content.filter(|c| !c.is_empty())
            } else {
                None
            }
        })
    }

    /// Visible text split at line and block boundaries, blank lines dropped.
    #[must_use]
    pub fn text_lines(&self) -> Vec<String> {
        let without_code = SCRIPT_STYLE_RE.replace_all(&self.html, " ");
        let broken = BLOCK_BREAK_RE.replace_all(&without_code, "\n");
        broken
            .lines()
            .map(strip_tags)
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Whether the page carries schema.org `PostalAddress` microdata.
    #[must_use]
    pub fn has_postal_address(&self) -> bool {
        self.html_lower.contains("schema.org/postaladdress")
    }

    /// Text of the first element with the given `itemprop`.
    #[must_use]
    pub fn itemprop_text(&self, prop: &str) -> Option<String> {
        let pattern = format!(
            r#"(?is)<[^>]*\bitemprop\s*=\s*["']{}["'][^>]*>(.*?)</"#,
            regex::escape(prop)
        );
        let re = Regex::new(&pattern).ok()?;
        first_capture_text(&re, &self.html)
    }
}

fn first_capture_text(re: &Regex, haystack: &str) -> Option<String> {
    re.captures(haystack)
        .and_then(|c| c.get(1))
        .map(|m| strip_tags(m.as_str()))
        .filter(|s| !s.is_empty())
}

/// Remove tags, decode common entities and collapse whitespace.
fn strip_tags(fragment: &str) -> String {
    collapse_ws(&decode_entities(&TAG_RE.replace_all(fragment, " ")))
}

fn visible_text(html: &str) -> String {
    let without_code = SCRIPT_STYLE_RE.replace_all(html, " ");
    strip_tags(&without_code)
}

fn collapse_ws(s: &str) -> String {
    WS_RE.replace_all(s, " ").trim().to_string()
}

fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&nbsp;", " ")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Result of fetching the practice website.
#[derive(Debug, Clone, Default)]
pub struct FetchedPage {
    /// The page, if the fetch returned HTTP 200
    pub document: Option<PageDocument>,
    /// Time to fetch the page, if it was fetched
    pub elapsed: Option<Duration>,
}

impl FetchedPage {
    #[must_use]
    pub fn loaded(document: PageDocument, elapsed: Duration) -> Self {
        Self {
            document: Some(document),
            elapsed: Some(elapsed),
        }
    }

    /// Fetch failed or was never attempted
    #[must_use]
    pub fn unavailable() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn document(&self) -> Option<&PageDocument> {
        self.document.as_ref()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!doctype html>
<html><head>
  <title>Bright Smiles Dental | Springfield Dentist</title>
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta property="og:site_name" content="Bright Smiles">
  <script>var s = "<a href='https://hidden.example'>x</a>";</script>
  <style>.x { color: red }</style>
</head>
<body>
  <h1 class="hero-title">Bright <em>Smiles</em> Dental</h1>
  <p>We accept most PPO plans &amp; Delta Dental.</p>
  <a href="https://facebook.com/brightsmiles" class="social fa-facebook">Like us</a>
  <img src="a.jpg"><img src="b.jpg"/><IMG SRC="c.jpg">
  <video><source src="tour.mp4"></video>
</body></html>"#;

    fn doc() -> PageDocument {
        PageDocument::parse("https://brightsmiles.com", PAGE)
    }

    #[test]
    fn test_visible_text_skips_scripts_and_tags() {
        let doc = doc();
        assert!(doc.text().contains("Bright Smiles Dental"));
        assert!(doc.text().contains("PPO plans & Delta Dental."));
        assert!(!doc.text_lower().contains("hidden.example"));
        assert!(!doc.text_lower().contains("color: red"));
    }

    #[test]
    fn test_probes() {
        let doc = doc();
        assert!(doc.has_viewport_meta());
        assert_eq!(doc.count_tags("img"), 3);
        assert_eq!(doc.count_tags("video"), 1);
        assert_eq!(doc.count_tags("source"), 1);
        assert_eq!(
            doc.title().as_deref(),
            Some("Bright Smiles Dental | Springfield Dentist")
        );
        assert_eq!(doc.first_h1().as_deref(), Some("Bright Smiles Dental"));
        assert_eq!(doc.meta_content("og:site_name").as_deref(), Some("Bright Smiles"));
        assert!(doc.class_attributes().any(|c| c.contains("fa-facebook")));
    }

    #[test]
    fn test_anchors_carry_text() {
        let anchors = doc().anchors();
        let facebook = anchors
            .iter()
            .find(|a| a.href.contains("facebook.com"))
            .unwrap();
        assert_eq!(facebook.text, "Like us");
    }

    #[test]
    fn test_text_lines_break_at_blocks() {
        let doc = PageDocument::parse(
            "https://a.com",
            "<div>Visit us</div><p>12 Main Street<br>Springfield, IL</p>",
        );
        assert_eq!(
            doc.text_lines(),
            vec!["Visit us", "12 Main Street", "Springfield, IL"]
        );
    }

    #[test]
    fn test_no_viewport() {
        let doc = PageDocument::parse("http://a.com", "<html><body>hi</body></html>");
        assert!(!doc.has_viewport_meta());
        assert_eq!(doc.count_tags("img"), 0);
        assert_eq!(doc.title(), None);
    }
}

//! URL helpers over [`url::Url`]. Only `http` and `https` links count as
//! web addresses.

use url::{ParseError, Url};

/// Schemes without an authority that are never a bare host name.
const OPAQUE_SCHEMES: [&str; 4] = ["mailto", "tel", "javascript", "data"];

/// Prepend `https://` when the input has no scheme.
///
/// `host:port` parses as an opaque URL with the host as its scheme, so it
/// is treated as scheme-less too. Other schemes are left alone and fail
/// [`domain_of`] later.
#[must_use]
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let keep = trimmed.is_empty()
        || Url::parse(trimmed).is_ok_and(|url| {
            is_web(&url) || !url.cannot_be_a_base() || OPAQUE_SCHEMES.contains(&url.scheme())
        });
    if keep {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Parse an absolute `http`/`https` URL with a host.
#[must_use]
pub fn parse_web_url(raw: &str) -> Option<Url> {
    Url::parse(raw.trim()).ok().filter(is_web)
}

/// Resolve an anchor `href` against the page it appeared on.
///
/// Relative and protocol-relative links are joined onto `base`; `mailto:`,
/// `tel:` and other non-web schemes yield `None`.
#[must_use]
pub fn resolve_href(base: &str, href: &str) -> Option<Url> {
    let href = href.trim();
    let url = match Url::parse(href) {
        Ok(url) => url,
        Err(ParseError::RelativeUrlWithoutBase) => Url::parse(base.trim()).ok()?.join(href).ok()?,
        Err(_) => return None,
    };
    is_web(&url).then_some(url)
}

fn is_web(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https") && url.host_str().is_some()
}

/// Whether the URL uses the `https` scheme.
#[must_use]
pub fn is_https(url: &str) -> bool {
    parse_web_url(url).is_some_and(|u| u.scheme() == "https")
}

/// Lowercased host without a leading `www.`. Single-label hosts such as
/// `localhost` are rejected.
#[must_use]
pub fn site_domain(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    host.contains('.').then(|| host.to_string())
}

/// [`site_domain`] of an absolute web URL string.
#[must_use]
pub fn domain_of(url: &str) -> Option<String> {
    parse_web_url(url).as_ref().and_then(site_domain)
}

/// Whether `host` is `domain` or one of its subdomains.
#[must_use]
pub fn host_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

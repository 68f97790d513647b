//! Link Detection
//!
//! Turns URLs found in notification bodies into clickable links.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Absolute http/https/ftp/file URLs, or bare `www.` domains
const URL_PATTERN: &str = concat!(
    r"(?i)\b(?:https?|ftp|file)://[-A-Z0-9+&@#/%?=~_|!:,.;]*[-A-Z0-9+&@#/%=~_|]",
    r"|\bwww\.[-A-Z0-9+&@#/%?=~_|!:,.;]*[-A-Z0-9+&@#/%=~_|]",
);

fn url_regex() -> Option<&'static Regex> {
    static URL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    URL_REGEX
        .get_or_init(|| match Regex::new(URL_PATTERN) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::error!(error = %e, "URL pattern failed to compile, links disabled");
                None
            }
        })
        .as_ref()
}

/// Wrap every URL in `text` in an anchor that opens in a new tab
///
/// Bare `www.` matches link to `http://` + match; the visible text is
/// left as written. Text without URLs comes back unchanged.
pub fn linkify(text: &str) -> String {
    link_with(text, |s| Cow::Borrowed(s))
}

/// Escape markup, linkify, then turn newlines into `<br>`
///
/// URLs are matched on the raw text, so `<https://a.com>` links only the
/// address. The result is safe to insert as HTML.
pub fn render_content(text: &str) -> String {
    link_with(text, html_escape).replace('\n', "<br>")
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;"),
    )
}

fn link_with<'t>(text: &'t str, escape: impl Fn(&'t str) -> Cow<'t, str>) -> String {
    if text.is_empty() {
        return String::new();
    }

    let Some(re) = url_regex() else {
        return escape(text).into_owned();
    };

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in re.find_iter(text) {
        out.push_str(&escape(&text[last..m.start()]));
        let url = escape(m.as_str());
        let scheme = if has_www_prefix(m.as_str()) { "http://" } else { "" };
        out.push_str(&format!(
            r#"<a href="{}{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            scheme, url, url
        ));
        last = m.end();
    }
    out.push_str(&escape(&text[last..]));
    out
}

fn has_www_prefix(url: &str) -> bool {
    url.get(..4)
        .map(|prefix| prefix.eq_ignore_ascii_case("www."))
        .unwrap_or(false)
}

// Link detection - pulls URL-looking fragments out of free-form text and
// reduces them to the host name we compare against the blacklist.
//
// This is a heuristic, not a URL grammar. It happily accepts some invalid
// hosts and will miss IPv6 literals or dotless hosts.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Optional scheme, optional `www.`, dotted host labels, optional port, optional path.
static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:https?://)?(?:www\.)?[\w\-]+\.[\w\-.]+(?::\d+)?(?:/[\w\-.?%&=]*)?")
        .expect("link pattern is a valid regex")
});

/// Find every URL-like fragment in `text`, in order of appearance.
pub fn extract_links(text: &str) -> Vec<&str> {
    LINK_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Make sure a candidate carries a scheme so its authority can be located.
///
/// The scheme is only used to locate the host; it never takes part in matching.
pub fn qualify_link(candidate: &str) -> Cow<'_, str> {
    if has_http_scheme(candidate) {
        Cow::Borrowed(candidate)
    } else {
        Cow::Owned(format!("http://{}", candidate))
    }
}

/// Reduce a candidate to its lowercase host name, without port or `www.` prefix.
///
/// The host is taken as written, so internationalized names stay in Unicode
/// and compare directly against blacklist entries. Returns `None` when no
/// host can be derived.
pub fn normalize_domain(candidate: &str) -> Option<String> {
    let qualified = qualify_link(candidate.trim());
    let authority = raw_authority(&qualified)?;

    let host = authority.split(':').next().unwrap_or_default().to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

fn has_http_scheme(candidate: &str) -> bool {
    let lower = candidate.get(..8).unwrap_or(candidate).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Everything between `://` and the first path, query or fragment delimiter.
fn raw_authority(qualified: &str) -> Option<&str> {
    let (_, rest) = qualified.split_once("://")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_finds_links_in_order() {
        let links = extract_links("check this out http://x.com/foo and also y.com");
        assert_eq!(links, vec!["http://x.com/foo", "y.com"]);
    }

    #[test]
    fn test_extract_plain_text_has_no_links() {
        assert!(extract_links("hello there, how are you").is_empty());
        assert!(extract_links("").is_empty());
    }

    #[test]
    fn test_extract_keeps_port_and_path() {
        let links = extract_links("see https://www.example.org:8443/watch?v=1 now");
        assert_eq!(links, vec!["https://www.example.org:8443/watch?v=1"]);
    }

    #[test]
    fn test_qualify_adds_scheme_only_when_missing() {
        assert_eq!(qualify_link("x.com/a"), "http://x.com/a");
        assert_eq!(qualify_link("https://x.com"), "https://x.com");
    }

    #[test]
    fn test_normalize_variants_share_a_domain() {
        assert_eq!(normalize_domain("X.COM/path").as_deref(), Some("x.com"));
        assert_eq!(normalize_domain("http://X.com:8080").as_deref(), Some("x.com"));
        assert_eq!(normalize_domain("www.x.com").as_deref(), Some("x.com"));
    }

    #[test]
    fn test_normalize_keeps_subdomains() {
        assert_eq!(
            normalize_domain("https://mobile.twitter.com/status").as_deref(),
            Some("mobile.twitter.com")
        );
    }

    #[test]
    fn test_normalize_out_of_range_port_still_yields_host() {
        assert_eq!(normalize_domain("x.com:99999/foo").as_deref(), Some("x.com"));
    }

    #[test]
    fn test_normalize_keeps_unicode_hosts() {
        assert_eq!(normalize_domain("bücher.de/x").as_deref(), Some("bücher.de"));
        assert_eq!(normalize_domain("https://www.BÜCHER.de").as_deref(), Some("bücher.de"));
    }

    #[test]
    fn test_trailing_dot_stays_part_of_the_host() {
        assert_eq!(extract_links("see x.com."), vec!["x.com."]);
        assert_eq!(normalize_domain("x.com.").as_deref(), Some("x.com."));
    }

    #[test]
    fn test_normalize_without_host() {
        assert_eq!(normalize_domain("http://"), None);
        assert_eq!(normalize_domain(""), None);
    }
}

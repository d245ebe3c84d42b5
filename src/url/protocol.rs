/// Schemes the crawler is willing to fetch
pub const CRAWLABLE_SCHEMES: &[&str] = &["http", "https"];

/// Returns the explicit scheme of a URL, if it has one
///
/// A scheme is an RFC 3986 scheme token (a letter followed by letters,
/// digits, `+`, `-` or `.`) terminated by `:`. A `host:port` prefix such as
/// `localhost:8080/path` is not a scheme.
///
/// # Examples
///
/// ```
/// use site_crawler::url::scheme_of;
///
/// assert_eq!(scheme_of("https://example.com/"), Some("https"));
/// assert_eq!(scheme_of("mailto:someone@example.com"), Some("mailto"));
/// assert_eq!(scheme_of("/relative/path"), None);
/// assert_eq!(scheme_of("localhost:8080/page"), None);
/// ```
pub fn scheme_of(url: &str) -> Option<&str> {
    let (scheme, rest) = url.split_once(':')?;

    let mut chars = scheme.chars();
    if !chars.next()?.is_ascii_alphabetic() {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        return None;
    }

    let port = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(scheme)
}

/// Returns true if the URL may be fetched by the crawler
///
/// URLs with an explicit scheme are crawlable only for `http` and `https`
/// (compared case-insensitively). Schemeless URLs are crawlable only when
/// `allow_schemeless` is set: link extraction passes `true` because relative
/// hrefs get resolved against the page URL, while the frontier passes
/// `false` because a schemeless URL reaching it is a bug.
pub fn is_crawlable(url: &str, allow_schemeless: bool) -> bool {
    match scheme_of(url) {
        Some(scheme) => CRAWLABLE_SCHEMES
            .iter()
            .any(|crawlable| scheme.eq_ignore_ascii_case(crawlable)),
        None => allow_schemeless,
    }
}

/// Turns user input into a fetchable seed URL by defaulting the scheme to `http`
pub fn prepare_base_url(url: &str) -> String {
    let url = url.trim();
    if scheme_of(url).is_some() {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}

use crate::url::scheme_of;
use url::{Position, Url};

/// Computes the dedup key of a URL
///
/// The key ignores the scheme and the fragment and treats a single trailing
/// path slash as insignificant. It is built as
/// `authority + "/" + path + "/" + query` with the separators always present,
/// even when a component is empty. Query strings are kept verbatim, so
/// parameter order matters.
///
/// Well-formed URLs are parsed with [`Url`], which lowercases the host and
/// drops default ports. Anything the parser rejects is split lexically, so
/// every input yields some key.
///
/// # Examples
///
/// ```
/// use site_crawler::url::url_key;
///
/// assert_eq!(url_key("http://stam.com"), "stam.com//");
/// assert_eq!(url_key("https://stam.com/"), "stam.com//");
/// assert_eq!(
///     url_key("http://www.stam.com/page1/page2/?a=1&b=2#anc"),
///     "www.stam.com//page1/page2/a=1&b=2"
/// );
/// ```
pub fn url_key(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => compose_key(
            &parsed[Position::BeforeUsername..Position::AfterPort],
            parsed.path(),
            parsed.query().unwrap_or_default(),
        ),
        Err(_) => {
            let (authority, path, query) = split_lexically(url);
            compose_key(authority, path, query)
        }
    }
}

fn compose_key(authority: &str, path: &str, query: &str) -> String {
    let path = path.strip_suffix('/').unwrap_or(path);
    format!("{authority}/{path}/{query}")
}

/// Best-effort split into (authority, path, query) for URLs the parser rejects
fn split_lexically(url: &str) -> (&str, &str, &str) {
    let url = url.split_once('#').map_or(url, |(before, _)| before);

    let rest = match scheme_of(url) {
        Some(scheme) => &url[scheme.len() + 1..],
        None => url,
    };

    let (authority, rest) = match rest.strip_prefix("//") {
        Some(after) => {
            let end = after.find(['/', '?']).unwrap_or(after.len());
            after.split_at(end)
        }
        None => ("", rest),
    };

    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
    (authority, path, query)
}

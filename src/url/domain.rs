use url::Url;

/// Extracts the lowercase host of a URL
///
/// Returns `None` for URLs that do not parse or carry no host.
///
/// # Examples
///
/// ```
/// use site_crawler::url::extract_host;
///
/// assert_eq!(extract_host("https://Example.COM/path"), Some("example.com".to_string()));
/// assert_eq!(extract_host("https://example.com:8080/"), Some("example.com".to_string()));
/// assert_eq!(extract_host("/relative"), None);
/// ```
pub fn extract_host(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()?
        .host_str()
        .map(|host| host.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_host() {
        assert_eq!(extract_host("https://example.com/"), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_subdomain() {
        assert_eq!(
            extract_host("https://blog.example.com/post"),
            Some("blog.example.com".to_string())
        );
    }

    #[test]
    fn test_scheme_does_not_matter() {
        assert_eq!(extract_host("http://www.stam.com"), extract_host("https://www.stam.com/"));
    }

    #[test]
    fn test_extract_with_query_and_fragment() {
        assert_eq!(
            extract_host("https://example.com/page?query=value#section"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_no_host() {
        assert_eq!(extract_host("mailto:someone@example.com"), None);
        assert_eq!(extract_host("not a url"), None);
    }
}

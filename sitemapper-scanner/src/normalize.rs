use crate::link::HtmlLink;
use std::fmt;
use tracing::debug;
use url::Url;

/// Scheme and host (with any non-default port) of a site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    pub scheme: String,
    pub host: String,
}

impl Origin {
    pub fn from_url(url: &Url) -> Option<Self> {
        let host = url.host_str()?;
        let host = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        Some(Self {
            scheme: url.scheme().to_string(),
            host,
        })
    }

    pub fn parse(url: &str) -> Option<Self> {
        Url::parse(url).ok().as_ref().and_then(Self::from_url)
    }

    /// `scheme://host`, the prefix root-relative links are joined onto.
    pub fn prefix(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    /// Whether `url` is an absolute URL on this origin.
    pub fn contains(&self, url: &str) -> bool {
        Self::parse(url).is_some_and(|other| other == *self)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkKind {
    /// Starts with `/`; holds the href rewritten onto the page origin.
    RootRelative(String),
    /// An `http(s)` URL, or a protocol-relative one resolved to the page scheme.
    Absolute(String),
    /// Fragments, `mailto:`, `javascript:`, bare relative paths and the like.
    Ignored,
}

pub fn classify(href: &str, origin: &Origin) -> LinkKind {
    if let Some(rest) = href.strip_prefix("//") {
        return if rest.is_empty() {
            LinkKind::Ignored
        } else {
            LinkKind::Absolute(format!("{}://{}", origin.scheme, rest))
        };
    }

    if href.starts_with('/') {
        return LinkKind::RootRelative(format!("{}{}", origin.prefix(), href));
    }

    match Url::parse(href) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => LinkKind::Absolute(href.to_string()),
        _ => LinkKind::Ignored,
    }
}

/// Rewrite or drop a raw href found on a page served from `origin`.
///
/// Root-relative links are always kept. Absolute links are kept only when
/// `keep` accepts them.
pub fn normalize_link<K>(href: &str, origin: &Origin, keep: &K) -> Option<String>
where
    K: Fn(&str) -> bool + ?Sized,
{
    match classify(href, origin) {
        LinkKind::RootRelative(url) => Some(url),
        LinkKind::Absolute(url) if keep(&url) => Some(url),
        LinkKind::Absolute(url) => {
            debug!("  -> Outside crawl boundary, skipping {}", url);
            None
        }
        LinkKind::Ignored => None,
    }
}

pub fn filter_and_normalize<K>(links: &[HtmlLink], origin: &Origin, keep: &K) -> Vec<String>
where
    K: Fn(&str) -> bool + ?Sized,
{
    links
        .iter()
        .filter_map(|link| normalize_link(&link.href, origin, keep))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> Origin {
        Origin::parse("https://example.com/some/page").unwrap()
    }

    fn link(href: &str) -> HtmlLink {
        HtmlLink {
            href: href.to_string(),
            text: String::new(),
        }
    }

    #[test]
    fn test_origin_drops_path_query_and_fragment() {
        let origin = Origin::parse("https://example.com/path/to/page?q=1#top").unwrap();
        assert_eq!(origin.prefix(), "https://example.com");
    }

    #[test]
    fn test_origin_keeps_non_default_port() {
        let origin = Origin::parse("http://127.0.0.1:8080/index.html").unwrap();
        assert_eq!(origin.host, "127.0.0.1:8080");
        assert_eq!(origin.to_string(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_origin_omits_default_port() {
        let origin = Origin::parse("https://example.com:443/").unwrap();
        assert_eq!(origin.prefix(), "https://example.com");
    }

    #[test]
    fn test_origin_requires_host() {
        assert!(Origin::parse("mailto:a@b.com").is_none());
        assert!(Origin::parse("not a url").is_none());
    }

    #[test]
    fn test_origin_contains() {
        let origin = example();
        assert!(origin.contains("https://example.com"));
        assert!(origin.contains("https://example.com/deep/path?x=1"));
        assert!(!origin.contains("http://example.com/"));
        assert!(!origin.contains("https://sub.example.com/"));
        assert!(!origin.contains("https://example.com:8443/"));
        assert!(!origin.contains("/relative"));
    }

    #[test]
    fn test_root_relative_rewritten() {
        assert_eq!(
            normalize_link("/about", &example(), &|_: &str| false),
            Some("https://example.com/about".to_string())
        );
    }

    #[test]
    fn test_absolute_link_follows_predicate() {
        let origin = example();
        assert_eq!(
            normalize_link("https://external.com", &origin, &|_: &str| true),
            Some("https://external.com".to_string())
        );
        assert_eq!(normalize_link("https://external.com", &origin, &|_: &str| false), None);
    }

    #[test]
    fn test_ignored_links_dropped() {
        let origin = example();
        let keep_all = |_: &str| true;
        for href in ["#frag", "mailto:a@b.com", "", "about.html", "javascript:void(0)", "tel:+123", "ftp://example.com/f"] {
            assert_eq!(normalize_link(href, &origin, &keep_all), None, "href {:?} should be dropped", href);
        }
    }

    #[test]
    fn test_protocol_relative_uses_page_scheme() {
        let origin = example();
        assert_eq!(
            classify("//cdn.example.com/lib.js", &origin),
            LinkKind::Absolute("https://cdn.example.com/lib.js".to_string())
        );
        assert_eq!(classify("//", &origin), LinkKind::Ignored);
        assert_eq!(normalize_link("//cdn.example.com/x", &origin, &|u: &str| origin.contains(u)), None);
    }

    #[test]
    fn test_filter_and_normalize() {
        let base = example();
        let links = vec![link("/contact"), link("https://external.com"), link("https://example.com/faq")];

        let result = filter_and_normalize(&links, &base, &|u: &str| base.contains(u));

        assert_eq!(result, vec!["https://example.com/contact", "https://example.com/faq"]);
    }
}

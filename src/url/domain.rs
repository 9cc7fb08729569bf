use crate::UrlError;
use url::Url;

/// Extracts the host of a URL together with its explicit port, if any
///
/// The `url` crate lowercases hosts of special schemes and elides default
/// ports, so `https://EXAMPLE.com:443/` and `https://example.com/` both yield
/// `example.com`.
///
/// # Arguments
///
/// * `url` - The URL to extract the host from
///
/// # Returns
///
/// * `Some(String)` - The host, suffixed with `:port` when a non-default port is set
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use pagecrawl::url::host_key;
///
/// let url = Url::parse("https://example.com/path").unwrap();
/// assert_eq!(host_key(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(host_key(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn host_key(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// The crawl's scope boundary: the seed URL's host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    host: String,
}

impl Scope {
    /// Builds the scope from a seed URL
    pub fn from_seed(seed: &Url) -> Result<Self, UrlError> {
        let host = host_key(seed).ok_or_else(|| UrlError::MissingHost(seed.to_string()))?;
        Ok(Self { host })
    }

    /// Returns the host this scope admits
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns true if the URL lives on the scope's host
    pub fn contains(&self, url: &Url) -> bool {
        host_key(url).as_deref() == Some(self.host.as_str())
    }
}

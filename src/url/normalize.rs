use crate::url::domain::host_key;
use crate::UrlError;
use url::Url;

/// Computes the canonical dedup key for a raw URL string
///
/// # Canonicalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Take the host (with any non-default port)
/// 3. Normalize path:
///    - Root path (`/`) collapses to the empty string
///    - A single trailing slash is removed from any other path
/// 4. Drop scheme, query string and fragment
///
/// Two URLs that differ only by scheme, query or fragment share a key.
///
/// # Arguments
///
/// * `raw` - The URL string to canonicalize
///
/// # Returns
///
/// * `Ok(String)` - The canonical key (`host + path`)
/// * `Err(UrlError)` - The URL could not be parsed or has no host
///
/// # Examples
///
/// ```
/// use pagecrawl::url::canonical_key;
///
/// assert_eq!(canonical_key("https://a.com/x/").unwrap(), "a.com/x");
/// assert_eq!(canonical_key("https://a.com/").unwrap(), "a.com");
/// ```
pub fn canonical_key(raw: &str) -> Result<String, UrlError> {
    let url = Url::parse(raw).map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost(raw.to_string()));
    }

    Ok(canonical_key_of(&url))
}

/// Computes the canonical key of an already parsed URL
///
/// URLs without a host (`mailto:`, `data:` and friends) key on their path alone.
pub fn canonical_key_of(url: &Url) -> String {
    let host = host_key(url).unwrap_or_default();
    format!("{}{}", host, normalize_path(url.path()))
}

fn normalize_path(path: &str) -> &str {
    if path == "/" {
        return "";
    }

    match path.strip_suffix('/') {
        Some(trimmed) => trimmed,
        None => path,
    }
}

//! Per-page records collected during a crawl

/// Content fields extracted from one HTML document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    /// Text of the first `<h1>`, empty if none
    pub title: String,

    /// First paragraph, preferring one inside `<main>`, empty if none
    pub summary: String,

    /// Absolute `href` targets of every anchor, in document order
    pub outgoing_links: Vec<String>,

    /// Absolute `src` targets of every image, in document order
    pub image_urls: Vec<String>,
}

/// One record per canonical URL ever claimed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRecord {
    /// Canonical dedup key (`host + path`)
    pub canonical_url: String,

    /// URL exactly as it was fetched
    pub source_url: String,

    pub title: String,
    pub summary: String,
    pub outgoing_links: Vec<String>,
    pub image_urls: Vec<String>,
}

impl PageRecord {
    /// Key-only record stored at claim time
    pub fn placeholder(canonical_url: impl Into<String>) -> Self {
        Self {
            canonical_url: canonical_url.into(),
            ..Default::default()
        }
    }

    /// Builds a populated record from extracted content
    pub fn new(
        canonical_url: impl Into<String>,
        source_url: impl Into<String>,
        content: PageContent,
    ) -> Self {
        Self {
            canonical_url: canonical_url.into(),
            source_url: source_url.into(),
            title: content.title,
            summary: content.summary,
            outgoing_links: content.outgoing_links,
            image_urls: content.image_urls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_key_only() {
        let record = PageRecord::placeholder("ex.com/a");
        assert_eq!(record.canonical_url, "ex.com/a");
        assert!(record.source_url.is_empty());
        assert!(record.title.is_empty());
        assert!(record.outgoing_links.is_empty());
    }

    #[test]
    fn test_new_moves_content() {
        let content = PageContent {
            title: "Title".to_string(),
            summary: "Summary".to_string(),
            outgoing_links: vec!["https://ex.com/b".to_string()],
            image_urls: vec!["https://ex.com/logo.png".to_string()],
        };

        let record = PageRecord::new("ex.com/a", "https://ex.com/a/", content);

        assert_eq!(record.source_url, "https://ex.com/a/");
        assert_eq!(record.title, "Title");
        assert_eq!(record.summary, "Summary");
        assert_eq!(record.outgoing_links, vec!["https://ex.com/b"]);
        assert_eq!(record.image_urls, vec!["https://ex.com/logo.png"]);
    }
}

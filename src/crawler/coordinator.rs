//! Crawler coordinator - main crawl orchestration logic
//!
//! Every discovered URL becomes one spawned unit of work that moves through
//! `unseen -> claimed -> (recorded | failed)`, or is rejected before the claim:
//!
//! 1. Parse the URL and check it against the scope host (reject otherwise)
//! 2. Claim its canonical key in the visited registry (reject duplicates and
//!    claims past the page limit)
//! 3. Acquire a limiter slot, fetch the document, extract its content
//! 4. Store the record, then spawn one unit per outgoing link
//!
//! Units are registered with the work tracker before they are spawned, and
//! the run is complete once the tracker drains to zero.

use crate::config::Config;
use crate::crawler::fetcher::{Fetcher, HttpFetcher};
use crate::crawler::limiter::ConcurrencyLimiter;
use crate::crawler::parser::extract_page;
use crate::crawler::tracker::{WorkGuard, WorkTracker};
use crate::output::CrawlStatistics;
use crate::state::{ClaimOutcome, PageRecord, VisitedRegistry};
use crate::url::{canonical_key_of, Scope};
use crate::CrawlError;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Why a URL was dropped before it was fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The URL did not parse
    InvalidUrl,
    /// The URL's host differs from the seed's
    OutOfScope,
    /// Its canonical key was already claimed
    Duplicate,
    /// The registry already holds the maximum number of pages
    PageLimit,
}

/// Final result of one unit of work
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitOutcome {
    Rejected(Rejection),
    /// Claimed, but the fetch failed
    Failed,
    /// Fetched and stored; `children` units were spawned
    Recorded { children: usize },
}

/// Tallies of rejected URLs, one counter per [`Rejection`]
#[derive(Debug, Default)]
struct RejectionCounters {
    invalid: AtomicUsize,
    out_of_scope: AtomicUsize,
    duplicate: AtomicUsize,
    page_limit: AtomicUsize,
}

impl RejectionCounters {
    fn record(&self, rejection: Rejection) {
        let counter = match rejection {
            Rejection::InvalidUrl => &self.invalid,
            Rejection::OutOfScope => &self.out_of_scope,
            Rejection::Duplicate => &self.duplicate,
            Rejection::PageLimit => &self.page_limit,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// State shared by every unit of work of one run
struct CrawlShared {
    scope: Scope,
    registry: VisitedRegistry,
    limiter: ConcurrencyLimiter,
    tracker: WorkTracker,
    fetcher: Arc<dyn Fetcher>,
    rejections: RejectionCounters,
}

type UnitFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

impl CrawlShared {
    /// Registers a unit for `raw_url` and spawns it
    fn spawn_unit(self: &Arc<Self>, raw_url: String) {
        let guard = self.tracker.start();
        tokio::spawn(Arc::clone(self).run_unit(raw_url, guard));
    }

    // Boxed so the recursion through `spawn_unit` has a nameable future type.
    fn run_unit(self: Arc<Self>, raw_url: String, guard: WorkGuard) -> UnitFuture {
        Box::pin(async move {
            let _guard = guard;
            let outcome = self.visit(&raw_url).await;
            if let VisitOutcome::Rejected(rejection) = outcome {
                self.rejections.record(rejection);
            }
            tracing::trace!("{} -> {:?}", raw_url, outcome);
        })
    }

    /// Runs one URL through the crawl state machine
    async fn visit(self: &Arc<Self>, raw_url: &str) -> VisitOutcome {
        let url = match Url::parse(raw_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Skipping unparseable URL {:?}: {}", raw_url, e);
                return VisitOutcome::Rejected(Rejection::InvalidUrl);
            }
        };

        if !self.scope.contains(&url) {
            return VisitOutcome::Rejected(Rejection::OutOfScope);
        }

        let key = canonical_key_of(&url);
        match self.registry.try_claim(&key) {
            ClaimOutcome::Claimed => {}
            ClaimOutcome::Duplicate => return VisitOutcome::Rejected(Rejection::Duplicate),
            ClaimOutcome::LimitReached => {
                tracing::debug!("Page limit reached, not crawling {}", raw_url);
                return VisitOutcome::Rejected(Rejection::PageLimit);
            }
        }

        let content = {
            let _permit = match self.limiter.acquire().await {
                Ok(permit) => permit,
                Err(e) => {
                    tracing::error!("Cannot crawl {}: {}", raw_url, e);
                    self.registry.mark_failed(&key);
                    return VisitOutcome::Failed;
                }
            };

            tracing::info!("Crawling: {}", raw_url);

            let document = match self.fetcher.fetch(raw_url).await {
                Ok(document) => document,
                Err(e) => {
                    tracing::warn!("Fetch failed for {}: {}", raw_url, e);
                    self.registry.mark_failed(&key);
                    return VisitOutcome::Failed;
                }
            };

            extract_page(&document, raw_url)
        };

        let links = content.outgoing_links.clone();
        self.registry
            .store(&key, PageRecord::new(key.as_str(), raw_url, content));

        let mut children = 0;
        for link in links {
            if self.registry.is_full() {
                tracing::debug!("Page limit reached, not following links of {}", raw_url);
                break;
            }
            self.spawn_unit(link);
            children += 1;
        }

        VisitOutcome::Recorded { children }
    }
}

/// Main crawler structure for one run
///
/// # Example
///
/// ```no_run
/// use pagecrawl::crawler::{Crawler, HttpFetcher};
/// use pagecrawl::config::{CrawlerConfig, UserAgentConfig};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = HttpFetcher::from_config(&UserAgentConfig::default(), &CrawlerConfig::default())?;
/// let crawler = Crawler::new("https://example.com", 4, Some(100), Arc::new(fetcher))?;
/// crawler.run().await;
/// println!("{} pages", crawler.registry().snapshot().len());
/// # Ok(())
/// # }
/// ```
pub struct Crawler {
    seed: String,
    shared: Arc<CrawlShared>,
}

impl Crawler {
    /// Creates a crawler for `seed`
    ///
    /// # Arguments
    ///
    /// * `seed` - The URL the crawl starts from; its host bounds the crawl
    /// * `max_concurrency` - Maximum simultaneous fetches
    /// * `max_pages` - Maximum pages claimed, `None` for no limit
    /// * `fetcher` - Where documents come from
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to run
    /// * `Err(CrawlError)` - The seed is not an absolute URL with a host, or
    ///   `max_concurrency` is zero
    pub fn new(
        seed: &str,
        max_concurrency: usize,
        max_pages: Option<usize>,
        fetcher: Arc<dyn Fetcher>,
    ) -> Result<Self, CrawlError> {
        // A limiter without slots would park the seed unit forever
        if max_concurrency == 0 {
            return Err(crate::ConfigError::Validation(
                "max_concurrency must be at least 1".to_string(),
            )
            .into());
        }

        let seed_url =
            Url::parse(seed).map_err(|e| crate::UrlError::Parse(format!("{}: {}", seed, e)))?;
        let scope = Scope::from_seed(&seed_url)?;

        let registry = match max_pages {
            Some(limit) => VisitedRegistry::with_page_limit(limit),
            None => VisitedRegistry::new(),
        };

        Ok(Self {
            seed: seed.to_string(),
            shared: Arc::new(CrawlShared {
                scope,
                registry,
                limiter: ConcurrencyLimiter::new(max_concurrency),
                tracker: WorkTracker::new(),
                fetcher,
                rejections: RejectionCounters::default(),
            }),
        })
    }

    /// Creates an HTTP-backed crawler from a validated configuration
    pub fn from_config(config: &Config) -> Result<Self, CrawlError> {
        let fetcher = HttpFetcher::from_config(&config.user_agent, &config.crawler)?;
        Self::new(
            &config.crawler.seed_url,
            config.crawler.max_concurrency,
            Some(config.crawler.max_pages),
            Arc::new(fetcher),
        )
    }

    /// Crawls from the seed until no unit of work remains
    pub async fn run(&self) {
        let start_time = Instant::now();
        tracing::info!(
            "Starting crawl of {} (scope: {}, concurrency: {})",
            self.seed,
            self.shared.scope.host(),
            self.shared.limiter.capacity()
        );

        self.shared.spawn_unit(self.seed.clone());
        self.shared.tracker.wait_idle().await;

        let counts = self.shared.registry.counts();
        tracing::info!(
            "Crawl completed: {} pages recorded, {} failed in {:?}",
            counts.recorded,
            counts.failed,
            start_time.elapsed()
        );
    }

    /// The visited registry of this run
    pub fn registry(&self) -> &VisitedRegistry {
        &self.shared.registry
    }

    /// Units of work started but not finished
    pub fn outstanding(&self) -> usize {
        self.shared.tracker.outstanding()
    }

    /// Summarizes the run so far
    pub fn statistics(&self) -> CrawlStatistics {
        let rejections = &self.shared.rejections;
        CrawlStatistics::from_registry(&self.shared.registry)
            .with_rejections(
                rejections.invalid.load(Ordering::Relaxed),
                rejections.out_of_scope.load(Ordering::Relaxed),
                rejections.duplicate.load(Ordering::Relaxed),
                rejections.page_limit.load(Ordering::Relaxed),
            )
    }
}

/// Everything a finished run hands to the report writer
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub pages: HashMap<String, PageRecord>,
    pub statistics: CrawlStatistics,
}

/// Runs a complete crawl over HTTP
///
/// # Arguments
///
/// * `config` - A validated configuration
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Recorded pages and run statistics
/// * `Err(CrawlError)` - The crawler could not be set up
pub async fn run_crawl(config: &Config) -> Result<CrawlOutcome, CrawlError> {
    let crawler = Crawler::from_config(config)?;
    crawler.run().await;

    Ok(CrawlOutcome {
        pages: crawler.registry().snapshot(),
        statistics: crawler.statistics(),
    })
}

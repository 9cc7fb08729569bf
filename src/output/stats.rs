//! Statistics for a finished crawl
//!
//! This module summarizes the visited registry and the engine's rejection
//! counters, and prints the summary to stdout.

use crate::state::VisitedRegistry;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Pages fetched and stored
    pub pages_recorded: usize,

    /// Pages claimed whose fetch failed
    pub pages_failed: usize,

    /// URLs that did not parse
    pub rejected_invalid: usize,

    /// URLs on another host
    pub rejected_out_of_scope: usize,

    /// URLs whose canonical key was already claimed
    pub rejected_duplicate: usize,

    /// URLs refused because the page limit was reached
    pub rejected_page_limit: usize,

    /// Outgoing links across all recorded pages, duplicates included
    pub total_links: usize,

    /// Image references across all recorded pages
    pub total_images: usize,
}

impl CrawlStatistics {
    /// Computes page and link totals from a registry
    pub fn from_registry(registry: &VisitedRegistry) -> Self {
        let counts = registry.counts();
        let pages = registry.snapshot();

        Self {
            pages_recorded: counts.recorded,
            pages_failed: counts.failed,
            total_links: pages.values().map(|p| p.outgoing_links.len()).sum(),
            total_images: pages.values().map(|p| p.image_urls.len()).sum(),
            ..Default::default()
        }
    }

    /// Adds the engine's rejection tallies
    pub fn with_rejections(
        mut self,
        invalid: usize,
        out_of_scope: usize,
        duplicate: usize,
        page_limit: usize,
    ) -> Self {
        self.rejected_invalid = invalid;
        self.rejected_out_of_scope = out_of_scope;
        self.rejected_duplicate = duplicate;
        self.rejected_page_limit = page_limit;
        self
    }

    /// Pages that were claimed, whatever happened to them
    pub fn pages_claimed(&self) -> usize {
        self.pages_recorded + self.pages_failed
    }

    /// Share of claimed pages that were recorded, in percent
    pub fn success_rate(&self) -> f64 {
        let claimed = self.pages_claimed();
        if claimed == 0 {
            return 0.0;
        }
        (self.pages_recorded as f64 / claimed as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Pages:");
    println!("  Recorded: {}", stats.pages_recorded);
    println!("  Failed: {}", stats.pages_failed);
    println!("  Links found: {}", stats.total_links);
    println!("  Images found: {}", stats.total_images);
    println!();

    println!("Skipped URLs:");
    println!("  Already visited: {}", stats.rejected_duplicate);
    println!("  Out of scope: {}", stats.rejected_out_of_scope);
    println!("  Invalid: {}", stats.rejected_invalid);
    if stats.rejected_page_limit > 0 {
        println!("  Over page limit: {}", stats.rejected_page_limit);
    }
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} pages successfully fetched)",
        stats.success_rate(),
        stats.pages_recorded,
        stats.pages_claimed()
    );
}

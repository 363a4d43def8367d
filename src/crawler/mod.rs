//! Crawler module for listing page fetching and processing
//!
//! This module contains the scraping half of a run:
//! - HTTP fetching without retries
//! - HTML parsing into quote records and the next-page link
//! - The strictly linear pagination loop

mod fetcher;
mod paginator;
mod parser;

pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use paginator::{Paginator, ScrapeOutcome, StopReason};
pub use parser::{next_page_url, parse_page, parse_quotes, ParsedPage, QuoteSelectors};

use crate::config::Config;
use crate::HarvestError;

/// Scrapes every reachable listing page described by the configuration
///
/// # Returns
///
/// * `Ok(ScrapeOutcome)` - Pagination ran; check `stop_reason` for how it ended
/// * `Err(HarvestError)` - The HTTP client or selectors could not be built
pub async fn scrape(config: &Config) -> Result<ScrapeOutcome, HarvestError> {
    let paginator = Paginator::from_config(config)?;
    Ok(paginator.run().await)
}

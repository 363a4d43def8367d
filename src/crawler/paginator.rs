//! Pagination loop - follows the "next page" chain from the seed URL
//!
//! One page is in flight at a time. The loop stops on the first of:
//! - the page cap being reached
//! - a URL repeating (cycle guard)
//! - a fetch failure
//! - a page with no records
//! - a page with no next link
//!
//! Records are accumulated as seen, duplicates included. Deduplication is a
//! separate step.

use crate::config::{Config, SelectorConfig, SiteConfig};
use crate::crawler::parser::{parse_page, QuoteSelectors};
use crate::crawler::{build_http_client, fetch_url, FetchResult};
use crate::quote::QuoteRecord;
use crate::HarvestError;
use reqwest::Client;
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Why pagination ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The configured page cap was reached
    PageLimit,

    /// The next link pointed at a page already fetched this run
    CycleDetected { url: String },

    /// A page could not be fetched
    FetchFailed { url: String, error: String },

    /// A page contained no records
    EmptyPage { url: String },

    /// The last page had no next link
    NoNextPage,
}

impl StopReason {
    /// Whether this stop was logged as a warning rather than a normal end
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            StopReason::CycleDetected { .. } | StopReason::FetchFailed { .. }
        )
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::PageLimit => write!(f, "page limit reached"),
            StopReason::CycleDetected { url } => write!(f, "loop detected at {}", url),
            StopReason::FetchFailed { url, error } => {
                write!(f, "fetch failed for {} ({})", url, error)
            }
            StopReason::EmptyPage { url } => write!(f, "no records on {}", url),
            StopReason::NoNextPage => write!(f, "no next page"),
        }
    }
}

/// Everything a pagination run produced
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    /// All records in page order, duplicates included
    pub records: Vec<QuoteRecord>,

    /// Number of pages successfully fetched
    pub pages_fetched: u32,

    /// Why the loop ended
    pub stop_reason: StopReason,
}

/// Drives fetch, extract, and next-link resolution over a linear page chain
pub struct Paginator {
    client: Client,
    selectors: QuoteSelectors,
    seed_url: Url,
    max_pages: Option<u32>,
    delay: Duration,
}

impl Paginator {
    /// Creates a paginator for the given site
    ///
    /// # Arguments
    ///
    /// * `site` - Seed URL, user agent, and timeout
    /// * `selectors` - Where records and the next link live in the markup
    /// * `max_pages` - Page cap, `None` for no limit
    /// * `delay` - Pause between consecutive fetches
    pub fn new(
        site: &SiteConfig,
        selectors: &SelectorConfig,
        max_pages: Option<u32>,
        delay: Duration,
    ) -> Result<Self, HarvestError> {
        Ok(Self {
            client: build_http_client(site)?,
            selectors: QuoteSelectors::compile(selectors)?,
            seed_url: Url::parse(&site.base_url)?,
            max_pages,
            delay,
        })
    }

    /// Creates a paginator from a full configuration
    pub fn from_config(config: &Config) -> Result<Self, HarvestError> {
        Self::new(
            &config.site,
            &config.selectors,
            config.scrape.page_limit(),
            config.scrape.delay(),
        )
    }

    /// Runs the pagination loop to completion
    ///
    /// Failures never escape as errors; they end the loop and are reported
    /// through [`ScrapeOutcome::stop_reason`] with whatever was collected.
    pub async fn run(&self) -> ScrapeOutcome {
        let mut records = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut url = self.seed_url.clone();
        let mut page: u32 = 1;
        let mut pages_fetched: u32 = 0;

        let stop_reason = loop {
            if self.max_pages.is_some_and(|max| page > max) {
                tracing::info!("Reached page limit of {}", page - 1);
                break StopReason::PageLimit;
            }

            if !visited.insert(url.to_string()) {
                tracing::warn!("Detected loop at {}, stopping", url);
                break StopReason::CycleDetected {
                    url: url.to_string(),
                };
            }

            tracing::info!("Fetching page {}: {}", page, url);
            let body = match fetch_url(&self.client, url.as_str()).await {
                FetchResult::Success {
                    final_url,
                    status_code,
                    body,
                } => {
                    tracing::debug!(
                        "Page {} answered {} ({} bytes)",
                        page,
                        status_code,
                        body.len()
                    );
                    if final_url != url.as_str() {
                        tracing::debug!("Page {} was redirected to {}", page, final_url);
                    }
                    pages_fetched += 1;
                    body
                }
                failed => {
                    let error = failed.failure_reason().unwrap_or_default();
                    tracing::warn!("Fetch failed for {} ({}), stopping", url, error);
                    break StopReason::FetchFailed {
                        url: url.to_string(),
                        error,
                    };
                }
            };

            // Resolve against the requested URL so a redirect cannot shift the chain
            let parsed = parse_page(&body, &url, &self.selectors);

            if parsed.records.is_empty() {
                tracing::info!("No records on page {}, stopping", page);
                break StopReason::EmptyPage {
                    url: url.to_string(),
                };
            }

            tracing::debug!("Page {} yielded {} records", page, parsed.records.len());
            records.extend(parsed.records);

            let Some(next) = parsed.next_url else {
                tracing::info!("No next page after page {}", page);
                break StopReason::NoNextPage;
            };

            url = next;
            page += 1;
            tokio::time::sleep(self.delay).await;
        };

        ScrapeOutcome {
            records,
            pages_fetched,
            stop_reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_reason_display() {
        assert_eq!(StopReason::PageLimit.to_string(), "page limit reached");
        assert_eq!(
            StopReason::FetchFailed {
                url: "http://x/".to_string(),
                error: "HTTP 500".to_string()
            }
            .to_string(),
            "fetch failed for http://x/ (HTTP 500)"
        );
    }

    #[test]
    fn test_stop_reason_warning() {
        assert!(StopReason::CycleDetected {
            url: "http://x/".to_string()
        }
        .is_warning());
        assert!(!StopReason::NoNextPage.is_warning());
        assert!(!StopReason::EmptyPage {
            url: "http://x/".to_string()
        }
        .is_warning());
    }

    #[test]
    fn test_new_rejects_bad_seed() {
        let site = SiteConfig {
            base_url: "not a url".to_string(),
            ..SiteConfig::default()
        };
        let result = Paginator::new(&site, &SelectorConfig::default(), None, Duration::ZERO);
        assert!(matches!(result, Err(HarvestError::UrlParse(_))));
    }
}

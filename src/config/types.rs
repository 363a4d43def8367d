use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for Quotes-Harvest
///
/// Every section is optional in the TOML file; missing sections and keys
/// fall back to the defaults for quotes.toscrape.com.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub selectors: SelectorConfig,
    pub scrape: ScrapeConfig,
    pub output: OutputConfig,
}

/// The site being scraped and how requests identify themselves
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Seed URL, the first listing page
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Value sent in the User-Agent header
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://quotes.toscrape.com".to_string(),
            user_agent: "Mozilla/5.0 (portfolio-scraper; +https://github.com/yourname)"
                .to_string(),
            timeout_secs: 15,
        }
    }
}

impl SiteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// CSS selectors used to pull records and the next link out of a listing page
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// One element per quote
    pub quote: String,

    /// Quote text, relative to the quote element
    pub text: String,

    /// Author name, relative to the quote element
    pub author: String,

    /// Tag links, relative to the quote element
    pub tag: String,

    /// Anchor pointing at the next listing page
    pub next: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            quote: "div.quote".to_string(),
            text: "span.text".to_string(),
            author: "small.author".to_string(),
            tag: "div.tags a.tag".to_string(),
            next: "li.next a".to_string(),
        }
    }
}

/// Pagination behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Maximum number of pages to fetch (0 means no limit)
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Pause between page requests, in seconds
    #[serde(rename = "sleep-secs")]
    pub sleep_secs: f64,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            sleep_secs: 0.7,
        }
    }
}

impl ScrapeConfig {
    /// The page cap, with 0 mapped to "unlimited"
    pub fn page_limit(&self) -> Option<u32> {
        (self.max_pages > 0).then_some(self.max_pages)
    }

    /// The inter-page delay; an invalid `sleep_secs` means no delay
    pub fn delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.sleep_secs).unwrap_or(Duration::ZERO)
    }
}

/// Output file locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the CSV export
    #[serde(rename = "csv-path")]
    pub csv_path: PathBuf,

    /// Path of the spreadsheet report
    #[serde(rename = "report-path")]
    pub report_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("output/quotes.csv"),
            report_path: PathBuf::from("output/quotes_report.xlsx"),
        }
    }
}

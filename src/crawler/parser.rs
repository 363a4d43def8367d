//! HTML parser for extracting quote records and the next-page link
//!
//! Selectors come from configuration and are compiled once per run into
//! [`QuoteSelectors`].

use crate::config::SelectorConfig;
use crate::quote::QuoteRecord;
use crate::HarvestError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Characters stripped from both ends of quote text
const QUOTE_MARKS: [char; 4] = ['“', '”', '"', '\''];

/// Compiled selectors for one listing site
#[derive(Debug, Clone)]
pub struct QuoteSelectors {
    quote: Selector,
    text: Selector,
    author: Selector,
    tag: Selector,
    next: Selector,
}

impl QuoteSelectors {
    /// Compiles the configured selectors
    pub fn compile(config: &SelectorConfig) -> Result<Self, HarvestError> {
        Ok(Self {
            quote: create_selector(&config.quote)?,
            text: create_selector(&config.text)?,
            author: create_selector(&config.author)?,
            tag: create_selector(&config.tag)?,
            next: create_selector(&config.next)?,
        })
    }
}

fn create_selector(selector: &str) -> Result<Selector, HarvestError> {
    Selector::parse(selector).map_err(|_| HarvestError::Selector(selector.to_string()))
}

/// Extracted information from a listing page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Quote records in page order
    pub records: Vec<QuoteRecord>,

    /// Absolute URL of the next listing page, if the page links one
    pub next_url: Option<Url>,
}

/// Parses a listing page, extracting records and the next-page link
///
/// # Example
///
/// ```
/// use quotes_harvest::config::SelectorConfig;
/// use quotes_harvest::crawler::{parse_page, QuoteSelectors};
/// use url::Url;
///
/// let html = r#"<div class="quote"><span class="text">“Hi”</span>
///     <small class="author">Ann</small></div>
///     <li class="next"><a href="/page/2/">Next</a></li>"#;
/// let selectors = QuoteSelectors::compile(&SelectorConfig::default()).unwrap();
/// let page_url = Url::parse("https://quotes.toscrape.com/").unwrap();
/// let parsed = parse_page(html, &page_url, &selectors);
/// assert_eq!(parsed.records[0].text, "Hi");
/// assert_eq!(parsed.next_url.unwrap().as_str(), "https://quotes.toscrape.com/page/2/");
/// ```
pub fn parse_page(html: &str, page_url: &Url, selectors: &QuoteSelectors) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        records: extract_quotes(&document, selectors),
        next_url: extract_next_url(&document, page_url, selectors),
    }
}

/// Extracts quote records from markup
pub fn parse_quotes(html: &str, selectors: &QuoteSelectors) -> Vec<QuoteRecord> {
    extract_quotes(&Html::parse_document(html), selectors)
}

/// Resolves the next-page link in markup against the page's own URL
pub fn next_page_url(html: &str, page_url: &Url, selectors: &QuoteSelectors) -> Option<Url> {
    extract_next_url(&Html::parse_document(html), page_url, selectors)
}

fn extract_quotes(document: &Html, selectors: &QuoteSelectors) -> Vec<QuoteRecord> {
    document
        .select(&selectors.quote)
        .filter_map(|block| extract_quote(block, selectors))
        .collect()
}

/// Builds a record from one quote block; blocks without text or author are skipped
fn extract_quote(block: ElementRef<'_>, selectors: &QuoteSelectors) -> Option<QuoteRecord> {
    let text = block.select(&selectors.text).next().map(element_text)?;
    let author = block.select(&selectors.author).next().map(element_text)?;

    let tags: Vec<String> = block
        .select(&selectors.tag)
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect();

    // Outer whitespace is already gone; whitespace inside the marks is kept
    let text = text.trim_matches(&QUOTE_MARKS[..]).to_string();

    Some(QuoteRecord::with_tag_list(text, author, &tags))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn extract_next_url(document: &Html, page_url: &Url, selectors: &QuoteSelectors) -> Option<Url> {
    let href = document
        .select(&selectors.next)
        .find_map(|element| element.value().attr("href"))?
        .trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    match page_url.join(href) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Some(url),
        Ok(url) => {
            tracing::debug!("Ignoring next link with scheme {}: {}", url.scheme(), url);
            None
        }
        Err(e) => {
            tracing::debug!("Could not resolve next link '{}': {}", href, e);
            None
        }
    }
}

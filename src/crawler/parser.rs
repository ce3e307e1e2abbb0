//! Directory markup parser
//!
//! A Douyu directory page lists one "stream card" container per live room.
//! The container links to the room and wraps an intro element whose `title`
//! attribute carries the stream's display title.
//!
//! Two outcomes are kept apart:
//! - a page with no matching containers yields zero entries (an empty
//!   category, or a layout change upstream)
//! - a page with no markup at all is a `ParseError`

use crate::config::ExtractorConfig;
use crate::{ConfigError, ParseError};
use crate::crawler::fetcher::RawPage;
use scraper::{ElementRef, Html, Selector};

/// One stream card extracted from a directory page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    /// Human-readable stream title
    pub title: String,
    /// Raw link of the room as it appears in the page (e.g. `/9999`)
    pub identifier: String,
}

impl Entry {
    pub fn new(title: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            identifier: identifier.into(),
        }
    }
}

/// Capability to turn a fetched page into stream entries
pub trait Extractor: Send + Sync {
    fn extract(&self, page: &RawPage) -> Result<Vec<Entry>, ParseError>;

    /// Raw markup of every stream card container found on the page
    ///
    /// Logged when a page fails to extract. Extractors without a notion of
    /// containers return nothing.
    fn matched_fragments(&self, _page: &RawPage) -> Vec<String> {
        Vec::new()
    }
}

/// Selector-driven extractor for Douyu directory listings
#[derive(Debug, Clone)]
pub struct DirectoryExtractor {
    card: Selector,
    title: Selector,
    title_attribute: String,
    link_attribute: String,
}

impl DirectoryExtractor {
    /// Compiles the configured selectors
    ///
    /// # Returns
    ///
    /// * `Ok(DirectoryExtractor)` - All selectors compiled
    /// * `Err(ConfigError::InvalidSelector)` - A selector is not valid CSS
    pub fn new(config: &ExtractorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            card: compile(&config.card_selector)?,
            title: compile(&config.title_selector)?,
            title_attribute: config.title_attribute.clone(),
            link_attribute: config.link_attribute.clone(),
        })
    }

    fn extract_card(&self, card: ElementRef<'_>, url: &str) -> Result<Entry, ParseError> {
        let parse_error = |cause: String| ParseError {
            url: url.to_string(),
            cause,
        };

        let intro = card
            .select(&self.title)
            .next()
            .ok_or_else(|| parse_error("stream card has no title element".to_string()))?;

        let title = intro
            .value()
            .attr(&self.title_attribute)
            .ok_or_else(|| {
                parse_error(format!(
                    "title element has no '{}' attribute",
                    self.title_attribute
                ))
            })?;

        let identifier = card.value().attr(&self.link_attribute).ok_or_else(|| {
            parse_error(format!(
                "stream card has no '{}' attribute",
                self.link_attribute
            ))
        })?;

        Ok(Entry::new(title, identifier))
    }
}

impl Extractor for DirectoryExtractor {
    fn extract(&self, page: &RawPage) -> Result<Vec<Entry>, ParseError> {
        if page.body.trim().is_empty() {
            return Err(ParseError {
                url: page.url.clone(),
                cause: "empty document".to_string(),
            });
        }

        let document = Html::parse_document(&page.body);
        document
            .select(&self.card)
            .map(|card| self.extract_card(card, &page.url))
            .collect()
    }

    fn matched_fragments(&self, page: &RawPage) -> Vec<String> {
        let document = Html::parse_document(&page.body);
        document.select(&self.card).map(|card| card.html()).collect()
    }
}

fn compile(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector)
        .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {:?}", selector, e)))
}

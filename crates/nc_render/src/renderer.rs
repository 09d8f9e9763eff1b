use nc_core::{ArticleRecord, RenderItem, Result, SUPPORTED_TYPES};
use serde_json::Value;
use tracing::debug;

use crate::card::{Card, CardPart, ScoreIndicator};
use crate::date::format_date;
use crate::jsonld;
use crate::rss;
use crate::options::RenderOptions;
use crate::sanitize::{sanitize_url, strip_html, truncate_text, SAFE_URL};

const DEFAULT_IMAGE_ALT: &str = "Article image";

/// Renders schema.org `NewsArticle`/`Article` records into cards.
///
/// Options are fixed at construction, so one instance can serve any number of
/// render calls, from any thread.
#[derive(Debug, Clone, Default)]
pub struct NewsArticleRenderer {
    options: RenderOptions,
}

impl NewsArticleRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// The schema.org types this renderer handles.
    pub fn supported_types() -> &'static [&'static str] {
        &SUPPORTED_TYPES
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Builds the card for one item. Missing or malformed fields only drop
    /// their own part of the card.
    pub fn render(&self, item: &RenderItem) -> Card {
        let record = &item.record;
        debug!(headline = ?record.headline, score = ?item.score, "Rendering NewsArticle");

        let mut card = Card::new();

        if self.options.show_image {
            if let Some(image) = self.image_part(record) {
                card.push(image);
            }
        }

        if let Some(headline) = &record.headline {
            card.push(CardPart::Headline {
                text: headline.clone(),
                href: record.url.as_deref().map_or(SAFE_URL, sanitize_url).to_string(),
            });
        }

        if let Some(indicator) = item.score.and_then(ScoreIndicator::new) {
            card.push(CardPart::Score(indicator));
        }

        let publisher = record
            .publisher_name()
            .filter(|_| self.options.show_publisher)
            .map(str::to_string);
        let date = record
            .date_published
            .as_deref()
            .filter(|_| self.options.show_published_date)
            .map(format_date);
        if publisher.is_some() || date.is_some() {
            card.push(CardPart::Meta { publisher, date });
        }

        if self.options.show_author {
            if let Some(names) = record.author.as_ref().and_then(|a| a.display_names()) {
                card.push(CardPart::Author(names));
            }
        }

        if self.options.show_description {
            if let Some(description) = self.description(record) {
                card.push(CardPart::Description(description));
            }
        }

        if let Some(url) = &record.url {
            card.push(CardPart::ReadMore {
                href: sanitize_url(url).to_string(),
            });
        }

        card
    }

    pub fn render_record(&self, record: &ArticleRecord) -> Card {
        self.render(&RenderItem::from(record.clone()))
    }

    /// Renders a bare record or a `schema_object` envelope given as JSON.
    pub fn render_value(&self, value: &Value) -> Card {
        self.render(&RenderItem::from_value(value))
    }

    pub fn render_json(&self, json: &str) -> Result<Card> {
        let item: RenderItem = serde_json::from_str(json)?;
        Ok(self.render(&item))
    }

    pub fn render_html(&self, item: &RenderItem) -> String {
        self.render(item).to_html()
    }

    /// Renders every article published as JSON-LD in an HTML page.
    pub fn render_document(&self, html: &str) -> Vec<Card> {
        jsonld::extract_records(html)
            .iter()
            .map(|record| self.render_record(record))
            .collect()
    }

    /// Renders every item of an RSS 2.0 feed.
    pub fn render_feed(&self, xml: &str) -> Result<Vec<Card>> {
        Ok(rss::extract_records(xml)?
            .iter()
            .map(|record| self.render_record(record))
            .collect())
    }

    fn image_part(&self, record: &ArticleRecord) -> Option<CardPart> {
        let url = record.image.as_ref()?.primary_url()?;
        let src = sanitize_url(url);
        if src == SAFE_URL {
            debug!(url, "Dropping image with unsafe URL");
            return None;
        }
        Some(CardPart::Image {
            src: src.to_string(),
            alt: record
                .headline
                .clone()
                .unwrap_or_else(|| DEFAULT_IMAGE_ALT.to_string()),
            fallback: self.options.fallback_image.clone(),
        })
    }

    fn description(&self, record: &ArticleRecord) -> Option<String> {
        let text = strip_html(record.summary_text()?);
        if text.is_empty() {
            return None;
        }
        Some(truncate_text(&text, self.options.description_max_length).into_owned())
    }
}

use std::fmt;

use crate::sanitize::{escape_html, sanitize_url, SAFE_URL};

/// Relevance bands for the score indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    /// 80 and above
    Strong,
    /// 60 to 79
    Moderate,
    /// 40 to 59
    Weak,
    Low,
}

impl ScoreTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreTier::Strong
        } else if score >= 60.0 {
            ScoreTier::Moderate
        } else if score >= 40.0 {
            ScoreTier::Weak
        } else {
            ScoreTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreTier::Strong => "strong",
            ScoreTier::Moderate => "moderate",
            ScoreTier::Weak => "weak",
            ScoreTier::Low => "low",
        }
    }

    fn badge_class(&self) -> &'static str {
        match self {
            ScoreTier::Strong => "bg-green-100 dark:bg-green-900 text-green-800 dark:text-green-200",
            ScoreTier::Moderate => "bg-yellow-100 dark:bg-yellow-900 text-yellow-800 dark:text-yellow-200",
            ScoreTier::Weak => "bg-orange-100 dark:bg-orange-900 text-orange-800 dark:text-orange-200",
            ScoreTier::Low => "bg-red-100 dark:bg-red-900 text-red-800 dark:text-red-200",
        }
    }

    fn fill_class(&self) -> &'static str {
        match self {
            ScoreTier::Strong => "bg-green-500",
            ScoreTier::Moderate => "bg-yellow-500",
            ScoreTier::Weak => "bg-orange-500",
            ScoreTier::Low => "bg-red-500",
        }
    }
}

impl fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreIndicator {
    /// The score rounded to an integer for display.
    pub value: i64,
    pub tier: ScoreTier,
    /// Fill bar width in percent, always within 0..=100.
    pub fill_percent: f64,
}

impl ScoreIndicator {
    /// Returns `None` for scores that are not finite numbers.
    pub fn new(score: f64) -> Option<Self> {
        if !score.is_finite() {
            return None;
        }
        Some(Self {
            value: score.round() as i64,
            tier: ScoreTier::from_score(score),
            // `+ 0.0` turns a clamped -0.0 into 0.0
            fill_percent: score.clamp(0.0, 100.0) + 0.0,
        })
    }
}

/// One piece of a rendered card. Text is stored unescaped; escaping happens
/// when a [`CardBuilder`] turns the parts into markup.
#[derive(Debug, Clone, PartialEq)]
pub enum CardPart {
    Image {
        src: String,
        alt: String,
        fallback: Option<String>,
    },
    Headline {
        text: String,
        href: String,
    },
    Score(ScoreIndicator),
    Meta {
        publisher: Option<String>,
        date: Option<String>,
    },
    Author(String),
    Description(String),
    ReadMore {
        href: String,
    },
}

/// The assembled parts for one record, in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Card {
    parts: Vec<CardPart>,
}

impl Card {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, part: CardPart) {
        self.parts.push(part);
    }

    pub fn parts(&self) -> &[CardPart] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn headline(&self) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            CardPart::Headline { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn score(&self) -> Option<&ScoreIndicator> {
        self.parts.iter().find_map(|part| match part {
            CardPart::Score(indicator) => Some(indicator),
            _ => None,
        })
    }

    pub fn build<B: CardBuilder>(&self, builder: &B) -> B::Output {
        builder.build(self)
    }

    pub fn to_html(&self) -> String {
        self.build(&HtmlCardBuilder)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

/// Turns assembled card parts into whatever the host displays.
pub trait CardBuilder {
    type Output;

    fn build(&self, card: &Card) -> Self::Output;
}

/// Builds an `<article>` element styled with Tailwind utility classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlCardBuilder;

impl HtmlCardBuilder {
    fn write_part(&self, html: &mut String, part: &CardPart) {
        match part {
            CardPart::Image { .. } => {}
            CardPart::Headline { text, href } => {
                html.push_str(&format!(
                    r#"<a class="news-article-headline block text-xl sm:text-2xl font-bold text-gray-900 dark:text-white hover:text-blue-600 mb-1" href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
                    escape_html(href),
                    escape_html(text)
                ));
            }
            CardPart::Score(indicator) => {
                html.push_str(&format!(
                    r#"<div class="news-article-score flex items-center gap-2 mt-1 mb-2" data-tier="{tier}"><span class="text-xs font-medium text-gray-500 dark:text-gray-400">Relevance:</span><span class="news-article-score-value text-xs font-mono px-2 py-1 rounded {badge}">{value}</span><div class="flex-grow h-2 bg-gray-200 dark:bg-gray-700 rounded-full overflow-hidden max-w-[60px]"><div class="h-full {fill}" style="width: {width}%"></div></div></div>"#,
                    tier = indicator.tier,
                    badge = indicator.tier.badge_class(),
                    value = indicator.value,
                    fill = indicator.tier.fill_class(),
                    width = indicator.fill_percent,
                ));
            }
            CardPart::Meta { publisher, date } => {
                html.push_str(r#"<div class="news-article-meta text-xs sm:text-sm text-gray-500 dark:text-gray-400 mt-1 mb-3 flex flex-wrap items-center gap-x-3 gap-y-1">"#);
                if let Some(publisher) = publisher {
                    html.push_str(&format!(
                        r#"<span class="news-article-publisher font-medium text-gray-700 dark:text-gray-300">{}</span>"#,
                        escape_html(publisher)
                    ));
                }
                if publisher.is_some() && date.is_some() {
                    html.push_str("<span>•</span>");
                }
                if let Some(date) = date {
                    html.push_str(&format!(
                        r#"<span class="news-article-date">{}</span>"#,
                        escape_html(date)
                    ));
                }
                html.push_str("</div>");
            }
            CardPart::Author(names) => {
                html.push_str(&format!(
                    r#"<p class="news-article-author text-sm text-gray-600 dark:text-gray-400 mt-1">By <span class="font-medium">{}</span></p>"#,
                    escape_html(names)
                ));
            }
            CardPart::Description(text) => {
                html.push_str(&format!(
                    r#"<p class="news-article-description text-sm sm:text-base text-gray-700 dark:text-gray-300 mt-3 leading-relaxed">{}</p>"#,
                    escape_html(text)
                ));
            }
            CardPart::ReadMore { href } => {
                html.push_str(&format!(
                    r#"<a class="news-article-readmore inline-block mt-4 text-sm font-semibold text-blue-600 dark:text-blue-400 self-start" href="{}" target="_blank" rel="noopener noreferrer">Read more</a>"#,
                    escape_html(href)
                ));
            }
        }
    }

    fn write_image(&self, html: &mut String, src: &str, alt: &str, fallback: Option<&str>) {
        html.push_str(r#"<div class="news-article-image w-full h-48 sm:h-56 md:h-64 bg-gray-200 dark:bg-gray-700">"#);
        html.push_str(&format!(
            r#"<img src="{}" alt="{}" class="w-full h-full object-cover""#,
            escape_html(src),
            escape_html(alt)
        ));
        if let Some(fallback) = fallback.and_then(script_safe_url) {
            html.push_str(&format!(
                r#" onerror="this.onerror=null; this.src='{}';""#,
                escape_html(fallback)
            ));
        }
        html.push_str("></div>");
    }
}

impl CardBuilder for HtmlCardBuilder {
    type Output = String;

    fn build(&self, card: &Card) -> String {
        let mut html = String::from(
            r#"<article class="news-article-card bg-white dark:bg-gray-800 shadow-lg rounded-lg overflow-hidden w-full flex flex-col">"#,
        );

        let mut body: Vec<&CardPart> = Vec::with_capacity(card.parts.len());
        for part in &card.parts {
            match part {
                CardPart::Image { src, alt, fallback } => {
                    self.write_image(&mut html, src, alt, fallback.as_deref())
                }
                _ => body.push(part),
            }
        }

        html.push_str(r#"<div class="news-article-content p-4 sm:p-6 flex-grow flex flex-col">"#);
        let mut wrapped_description = false;
        for part in body {
            if matches!(part, CardPart::ReadMore { .. }) && !wrapped_description {
                html.push_str(r#"<div class="flex-grow"></div>"#);
                wrapped_description = true;
            }
            if let CardPart::Description(_) = part {
                html.push_str(r#"<div class="flex-grow">"#);
                self.write_part(&mut html, part);
                html.push_str("</div>");
                wrapped_description = true;
            } else {
                self.write_part(&mut html, part);
            }
        }
        if !wrapped_description {
            html.push_str(r#"<div class="flex-grow"></div>"#);
        }
        html.push_str("</div></article>");
        html
    }
}

/// The fallback URL ends up inside a single-quoted script string, so it must
/// pass the URL allowlist and carry no quote or backslash.
fn script_safe_url(url: &str) -> Option<&str> {
    let url = sanitize_url(url);
    if url == SAFE_URL || url.contains(['\'', '"', '\\']) {
        None
    } else {
        Some(url)
    }
}

use nc_core::{ArticleRecord, AuthorField, Error, ImageField, Publisher, Result};
use roxmltree::{Document, Node};
use tracing::{debug, warn};

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
const CONTENT_NS: &str = "http://purl.org/rss/1.0/modules/content/";
const DC_NS: &str = "http://purl.org/dc/elements/1.1/";
const MEDIA_NS: &str = "http://search.yahoo.com/mrss/";

/// Reads an RSS 2.0 feed as `NewsArticle` records, one per `<item>`.
///
/// The channel becomes every record's publisher. Items with neither a title
/// nor a link are skipped. A document without a `<channel>` yields no records.
pub fn extract_records(xml: &str) -> Result<Vec<ArticleRecord>> {
    let document =
        Document::parse(xml).map_err(|e| Error::Feed(format!("Invalid feed XML: {}", e)))?;

    let Some(channel) = child(document.root_element(), "channel") else {
        warn!("No channel element found in RSS feed");
        return Ok(Vec::new());
    };

    let publisher = child_text(channel, "title").map(|name| Publisher { name: Some(name) });

    let records: Vec<ArticleRecord> = channel
        .children()
        .filter(|n| is_plain(n, "item"))
        .filter_map(|item| item_record(item, publisher.clone()))
        .collect();

    debug!("Extracted {} records from RSS feed", records.len());
    Ok(records)
}

fn item_record(item: Node<'_, '_>, publisher: Option<Publisher>) -> Option<ArticleRecord> {
    let headline = child_text(item, "title");
    let url = item_url(item);
    if headline.is_none() && url.is_none() {
        return None;
    }

    let author = child_text(item, "author")
        .or_else(|| ns_child(item, DC_NS, "creator").and_then(node_text))
        .map(|name| AuthorField::Person { name: Some(name) });

    Some(ArticleRecord {
        types: vec!["NewsArticle".to_string()],
        headline,
        url,
        image: item_image(item).map(|url| ImageField::Object {
            url: Some(url),
            content_url: None,
        }),
        publisher,
        date_published: child_text(item, "pubDate")
            .or_else(|| ns_child(item, DC_NS, "date").and_then(node_text)),
        author,
        description: child_text(item, "description"),
        article_body: ns_child(item, CONTENT_NS, "encoded").and_then(node_text),
    })
}

/// An `atom:link rel="alternate"` wins over `<link>`, which wins over a permalink `<guid>`.
fn item_url(item: Node<'_, '_>) -> Option<String> {
    let atom_links: Vec<(&str, &str)> = item
        .children()
        .filter(|n| n.has_tag_name((ATOM_NS, "link")))
        .filter_map(|n| Some((n.attribute("href")?, n.attribute("rel").unwrap_or("alternate"))))
        .collect();

    let alternate = atom_links
        .iter()
        .find(|(_, rel)| *rel == "alternate")
        .map(|(href, _)| href.to_string());
    let guid = child(item, "guid")
        .filter(|g| g.attribute("isPermaLink") != Some("false"))
        .and_then(node_text);

    alternate
        .or_else(|| child_text(item, "link"))
        .or(guid)
        .or_else(|| atom_links.first().map(|(href, _)| href.to_string()))
        .map(|url| fix_url(&url))
        .filter(|url| url != "https://")
}

/// Media RSS images take precedence over image enclosures; thumbnails are the last resort.
fn item_image(item: Node<'_, '_>) -> Option<String> {
    let is_image = |n: &Node<'_, '_>| {
        n.attribute("type").is_some_and(|t| t.starts_with("image/"))
            || n.attribute("medium") == Some("image")
    };

    let media = item
        .descendants()
        .filter(|n| n.has_tag_name((MEDIA_NS, "content")) && is_image(n))
        .find_map(|n| n.attribute("url"));
    let enclosure = item
        .children()
        .filter(|n| is_plain(n, "enclosure") && is_image(n))
        .find_map(|n| n.attribute("url"));
    let thumbnail = item
        .descendants()
        .filter(|n| n.has_tag_name((MEDIA_NS, "thumbnail")))
        .find_map(|n| n.attribute("url"));

    media
        .or(enclosure)
        .or(thumbnail)
        .map(fix_url)
        .filter(|url| url != "https://")
}

/// Feeds often omit the scheme; absolute links are assumed to be https.
fn fix_url(url: &str) -> String {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else if let Some(rest) = url.strip_prefix("//") {
        format!("https://{}", rest)
    } else {
        format!("https://{}", url)
    }
}

fn is_plain(node: &Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().namespace().is_none() && node.tag_name().name() == name
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| is_plain(n, name))
}

fn ns_child<'a, 'input>(node: Node<'a, 'input>, ns: &str, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name((ns, name)))
}

fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    child(node, name).and_then(node_text)
}

/// Concatenated text and CDATA content, trimmed. Empty text counts as absent.
fn node_text(node: Node<'_, '_>) -> Option<String> {
    let text: String = node
        .children()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

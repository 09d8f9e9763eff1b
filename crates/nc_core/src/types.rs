use serde::Deserialize;
use serde_json::{Map, Value};

/// The `image` property of a record: a bare URL, an `ImageObject`, or a list of either.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageField {
    Url(String),
    Object {
        url: Option<String>,
        content_url: Option<String>,
    },
    List(Vec<ImageField>),
    /// Any JSON shape that cannot carry an image.
    Other,
}

impl ImageField {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(url) => ImageField::Url(url.clone()),
            Value::Array(items) => ImageField::List(items.iter().map(Self::from_value).collect()),
            Value::Object(obj) => ImageField::Object {
                url: string_field(obj, "url"),
                content_url: string_field(obj, "contentUrl"),
            },
            _ => ImageField::Other,
        }
    }

    /// Resolves the URL of the primary image.
    ///
    /// Lists only ever descend into their first entry, so arbitrarily nested
    /// single-element lists terminate without searching the rest of the tree.
    pub fn primary_url(&self) -> Option<&str> {
        let mut current = self;
        let url = loop {
            match current {
                ImageField::Url(url) => break Some(url.as_str()),
                ImageField::List(items) => current = items.first()?,
                ImageField::Object { url, content_url } => {
                    break url.as_deref().or(content_url.as_deref())
                }
                ImageField::Other => break None,
            }
        };
        url.filter(|u| !u.is_empty())
    }
}

/// The `author` property of a record: a name, a `Person`-like object, or a list of either.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthorField {
    Name(String),
    Person { name: Option<String> },
    List(Vec<AuthorField>),
    Other,
}

impl AuthorField {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(name) => AuthorField::Name(name.clone()),
            Value::Array(items) => AuthorField::List(items.iter().map(Self::from_value).collect()),
            Value::Object(obj) => AuthorField::Person {
                name: string_field(obj, "name"),
            },
            _ => AuthorField::Other,
        }
    }

    /// Joins every usable author name with ", ". Returns `None` when nothing usable remains.
    pub fn display_names(&self) -> Option<String> {
        let names = match self {
            AuthorField::Name(name) => name.trim().to_string(),
            AuthorField::Person { name } => name.as_deref()?.trim().to_string(),
            AuthorField::List(entries) => entries
                .iter()
                .filter_map(|entry| match entry {
                    AuthorField::Name(name) => Some(name.trim()),
                    AuthorField::Person { name } => name.as_deref().map(str::trim),
                    _ => None,
                })
                .filter(|name| !name.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
            AuthorField::Other => return None,
        };

        if names.is_empty() {
            None
        } else {
            Some(names)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Publisher {
    pub name: Option<String>,
}

/// Read-only view over a schema.org `NewsArticle`/`Article` node.
///
/// Decoding never fails: a property with an unexpected JSON type is treated as
/// missing, and a non-object value decodes to an empty record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct ArticleRecord {
    /// The `@type` tags of the node.
    pub types: Vec<String>,
    pub headline: Option<String>,
    pub url: Option<String>,
    pub image: Option<ImageField>,
    pub publisher: Option<Publisher>,
    pub date_published: Option<String>,
    pub author: Option<AuthorField>,
    pub description: Option<String>,
    pub article_body: Option<String>,
}

impl ArticleRecord {
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        let types = match obj.get("@type") {
            Some(Value::String(tag)) => vec![tag.clone()],
            Some(Value::Array(tags)) => tags
                .iter()
                .filter_map(|t| t.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        };

        Self {
            types,
            headline: string_field(obj, "headline"),
            url: string_field(obj, "url"),
            image: present(obj, "image").map(ImageField::from_value),
            publisher: present(obj, "publisher")
                .and_then(Value::as_object)
                .map(|p| Publisher {
                    name: string_field(p, "name"),
                }),
            date_published: string_field(obj, "datePublished"),
            author: present(obj, "author").map(AuthorField::from_value),
            description: string_field(obj, "description"),
            article_body: string_field(obj, "articleBody"),
        }
    }

    pub fn is_a(&self, type_tag: &str) -> bool {
        self.types.iter().any(|t| t == type_tag)
    }

    /// Text for the card body: the description, falling back to the article body.
    pub fn summary_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .or(self.article_body.as_deref())
    }

    pub fn publisher_name(&self) -> Option<&str> {
        self.publisher.as_ref().and_then(|p| p.name.as_deref())
    }
}

impl From<Value> for ArticleRecord {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

/// What a host hands to the renderer: a record, either bare or wrapped in a
/// search-result envelope carrying `schema_object` and a relevance `score`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct RenderItem {
    pub record: ArticleRecord,
    pub score: Option<f64>,
}

impl RenderItem {
    pub fn from_value(value: &Value) -> Self {
        let record = match value.get("schema_object") {
            Some(inner @ Value::Object(_)) => ArticleRecord::from_value(inner),
            Some(Value::Array(nodes)) => nodes
                .iter()
                .find(|node| node.is_object())
                .map(ArticleRecord::from_value)
                .unwrap_or_else(|| ArticleRecord::from_value(value)),
            _ => ArticleRecord::from_value(value),
        };

        Self {
            record,
            score: value.get("score").and_then(Value::as_f64),
        }
    }
}

impl From<Value> for RenderItem {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

impl From<ArticleRecord> for RenderItem {
    fn from(record: ArticleRecord) -> Self {
        Self {
            record,
            score: None,
        }
    }
}

fn present<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_image_list_uses_first_entry() {
        let image = ImageField::from_value(&json!(["https://x/1.png", "https://x/2.png"]));
        assert_eq!(image.primary_url(), Some("https://x/1.png"));
    }

    #[test]
    fn test_image_object_prefers_url_then_content_url() {
        let both = ImageField::from_value(&json!({"url": "https://a/u.jpg", "contentUrl": "https://a/c.jpg"}));
        assert_eq!(both.primary_url(), Some("https://a/u.jpg"));

        let content = ImageField::from_value(&json!({"contentUrl": "https://y/p.jpg"}));
        assert_eq!(content.primary_url(), Some("https://y/p.jpg"));

        let non_string = ImageField::from_value(&json!({"url": 42, "contentUrl": "https://y/p.jpg"}));
        assert_eq!(non_string.primary_url(), Some("https://y/p.jpg"));
    }

    #[test]
    fn test_image_without_url() {
        assert_eq!(ImageField::from_value(&json!({})).primary_url(), None);
        assert_eq!(ImageField::from_value(&json!([])).primary_url(), None);
        assert_eq!(ImageField::from_value(&json!(7)).primary_url(), None);
        assert_eq!(ImageField::from_value(&json!("")).primary_url(), None);
    }

    #[test]
    fn test_image_nested_lists_follow_first_element() {
        let image = ImageField::from_value(&json!([[[{"url": "https://deep/img.png"}], "https://other"]]));
        assert_eq!(image.primary_url(), Some("https://deep/img.png"));

        // Only the first element is considered, even when later ones carry a URL.
        let image = ImageField::from_value(&json!([{}, "https://second/img.png"]));
        assert_eq!(image.primary_url(), None);
    }

    #[test]
    fn test_author_names() {
        let mixed = AuthorField::from_value(&json!([{"name": "Ann"}, "Bob"]));
        assert_eq!(mixed.display_names().as_deref(), Some("Ann, Bob"));

        let single = AuthorField::from_value(&json!({"@type": "Person", "name": "Carla"}));
        assert_eq!(single.display_names().as_deref(), Some("Carla"));

        let plain = AuthorField::from_value(&json!("Dana"));
        assert_eq!(plain.display_names().as_deref(), Some("Dana"));
    }

    #[test]
    fn test_author_skips_unusable_entries() {
        let author = AuthorField::from_value(&json!([{"name": ""}, {}, 3, null, " Eve "]));
        assert_eq!(author.display_names().as_deref(), Some("Eve"));

        assert_eq!(AuthorField::from_value(&json!([{}])).display_names(), None);
        assert_eq!(AuthorField::from_value(&json!({"url": "x"})).display_names(), None);
        assert_eq!(AuthorField::from_value(&json!(false)).display_names(), None);
    }

    #[test]
    fn test_record_from_value() {
        let record = ArticleRecord::from_value(&json!({
            "@type": ["NewsArticle", "Thing"],
            "headline": "Title",
            "url": "https://news.example/a",
            "publisher": {"name": "Daily"},
            "datePublished": "2025-05-26",
            "description": "Short",
            "articleBody": "Long body"
        }));

        assert!(record.is_a("NewsArticle"));
        assert!(!record.is_a("Article"));
        assert_eq!(record.headline.as_deref(), Some("Title"));
        assert_eq!(record.publisher_name(), Some("Daily"));
        assert_eq!(record.summary_text(), Some("Short"));
    }

    #[test]
    fn test_record_ignores_wrong_types() {
        let record = ArticleRecord::from_value(&json!({
            "headline": 12,
            "url": ["https://a"],
            "publisher": "Daily",
            "datePublished": {},
            "image": null
        }));
        assert_eq!(record, ArticleRecord::default());

        assert_eq!(ArticleRecord::from_value(&json!("text")), ArticleRecord::default());
    }

    #[test]
    fn test_summary_falls_back_to_body() {
        let record = ArticleRecord::from_value(&json!({"articleBody": "Body"}));
        assert_eq!(record.summary_text(), Some("Body"));
    }

    #[test]
    fn test_render_item_envelope() {
        let item = RenderItem::from_value(&json!({
            "schema_object": {"headline": "Wrapped"},
            "score": 85
        }));
        assert_eq!(item.record.headline.as_deref(), Some("Wrapped"));
        assert_eq!(item.score, Some(85.0));

        let bare = RenderItem::from_value(&json!({"headline": "Bare"}));
        assert_eq!(bare.record.headline.as_deref(), Some("Bare"));
        assert_eq!(bare.score, None);
    }

    #[test]
    fn test_render_item_schema_object_list() {
        let item = RenderItem::from_value(&json!({
            "schema_object": [1, {"headline": "First object"}, {"headline": "Second"}],
            "score": "high"
        }));
        assert_eq!(item.record.headline.as_deref(), Some("First object"));
        assert_eq!(item.score, None);
    }

    #[test]
    fn test_deserialize_never_fails_for_json() {
        let item: RenderItem = serde_json::from_str(r#"{"headline": {"nested": true}}"#).unwrap();
        assert_eq!(item, RenderItem::default());

        let record: ArticleRecord = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(record, ArticleRecord::default());
    }
}

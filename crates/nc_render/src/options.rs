use nc_core::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Descriptions longer than this many characters are cut and end in "...".
pub const DEFAULT_DESCRIPTION_MAX_LENGTH: usize = 200;

/// Shown by the browser when the article image fails to load.
pub const DEFAULT_FALLBACK_IMAGE: &str =
    "https://placehold.co/600x400/e2e8f0/94a3b8?text=Image+Not+Found";

/// Display switches for a [`NewsArticleRenderer`](crate::NewsArticleRenderer).
///
/// Deserializes from the camelCase keys hosts already use (`showImage`,
/// `showAuthor`, ...). Missing keys take their default and unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    pub show_image: bool,
    pub show_description: bool,
    pub show_publisher: bool,
    pub show_published_date: bool,
    pub show_author: bool,
    pub description_max_length: usize,
    /// `None` disables the image error handler.
    pub fallback_image: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_image: true,
            show_description: true,
            show_publisher: true,
            show_published_date: true,
            show_author: false,
            description_max_length: DEFAULT_DESCRIPTION_MAX_LENGTH,
            fallback_image: Some(DEFAULT_FALLBACK_IMAGE.to_string()),
        }
    }
}

impl RenderOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Invalid render options: {}", e)))?;
        options.validate()
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let options: Self = serde_json::from_value(value)
            .map_err(|e| Error::Config(format!("Invalid render options: {}", e)))?;
        options.validate()
    }

    fn validate(self) -> Result<Self> {
        if self.description_max_length == 0 {
            return Err(Error::Config(
                "descriptionMaxLength must be greater than zero".to_string(),
            ));
        }
        Ok(self)
    }

    pub fn with_image(mut self, show: bool) -> Self {
        self.show_image = show;
        self
    }

    pub fn with_description(mut self, show: bool) -> Self {
        self.show_description = show;
        self
    }

    pub fn with_publisher(mut self, show: bool) -> Self {
        self.show_publisher = show;
        self
    }

    pub fn with_published_date(mut self, show: bool) -> Self {
        self.show_published_date = show;
        self
    }

    pub fn with_author(mut self, show: bool) -> Self {
        self.show_author = show;
        self
    }

    pub fn with_description_max_length(mut self, max_chars: usize) -> Self {
        self.description_max_length = max_chars.max(1);
        self
    }

    pub fn with_fallback_image(mut self, url: Option<String>) -> Self {
        self.fallback_image = url;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert!(options.show_image);
        assert!(options.show_description);
        assert!(options.show_publisher);
        assert!(options.show_published_date);
        assert!(!options.show_author);
        assert_eq!(options.description_max_length, 200);
    }

    #[test]
    fn test_partial_json_keeps_defaults_and_ignores_unknown_keys() {
        let options =
            RenderOptions::from_json(r#"{"showAuthor": true, "showImage": false, "theme": "dark"}"#)
                .unwrap();
        assert!(options.show_author);
        assert!(!options.show_image);
        assert!(options.show_publisher);
        assert_eq!(options.fallback_image.as_deref(), Some(DEFAULT_FALLBACK_IMAGE));
    }

    #[test]
    fn test_null_fallback_disables_it() {
        let options = RenderOptions::from_json(r#"{"fallbackImage": null}"#).unwrap();
        assert_eq!(options.fallback_image, None);
    }

    #[test]
    fn test_from_value() {
        let options =
            RenderOptions::from_value(serde_json::json!({"showAuthor": true, "descriptionMaxLength": 80}))
                .unwrap();
        assert!(options.show_author);
        assert_eq!(options.description_max_length, 80);
        assert!(options.show_image);

        assert!(matches!(
            RenderOptions::from_value(serde_json::json!({"descriptionMaxLength": 0})),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            RenderOptions::from_value(serde_json::json!([1, 2])),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_invalid_options() {
        assert!(matches!(
            RenderOptions::from_json(r#"{"showImage": "yes"}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            RenderOptions::from_json(r#"{"descriptionMaxLength": 0}"#),
            Err(Error::Config(_))
        ));
        assert!(RenderOptions::from_json("not json").is_err());
    }

    #[test]
    fn test_builder_methods() {
        let options = RenderOptions::default()
            .with_author(true)
            .with_publisher(false)
            .with_description_max_length(0);
        assert!(options.show_author);
        assert!(!options.show_publisher);
        assert_eq!(options.description_max_length, 1);
    }
}

pub mod error;
pub mod types;

pub use error::Error;
pub use types::{ArticleRecord, AuthorField, ImageField, Publisher, RenderItem};

pub type Result<T> = std::result::Result<T, Error>;

/// schema.org types an article card can be rendered for.
pub const SUPPORTED_TYPES: [&str; 2] = ["NewsArticle", "Article"];

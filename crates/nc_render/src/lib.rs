pub mod card;
pub mod date;
pub mod jsonld;
pub mod logging;
pub mod options;
pub mod registry;
pub mod renderer;
pub mod rss;
pub mod sanitize;

pub use card::{Card, CardBuilder, CardPart, HtmlCardBuilder, ScoreIndicator, ScoreTier};
pub use logging::init_logging;
pub use options::RenderOptions;
pub use registry::{
    register_news_article_renderer, RendererHost, TypeRegistry, TypeRenderer, TypeRendererMap,
};
pub use renderer::NewsArticleRenderer;

pub mod prelude {
    pub use super::{Card, CardPart, NewsArticleRenderer, RenderOptions};
    pub use super::registry::{register_news_article_renderer, RendererHost, TypeRegistry};
    pub use nc_core::{ArticleRecord, Error, RenderItem, Result};
}

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use nc_core::{Error, RenderItem, Result};
use serde_json::Value;

use crate::card::Card;
use crate::logging::Logger;
use crate::renderer::NewsArticleRenderer;

/// Handler invoked for a data object whose type tag it was registered under.
pub type TypeRenderer = Box<dyn Fn(&Value) -> Card + Send + Sync>;

/// The capability of mapping a type tag to a rendering handler.
pub trait TypeRegistry {
    fn register_type_renderer(&mut self, type_tag: &str, renderer: TypeRenderer) -> Result<()>;
}

/// A host application that renders JSON data objects. Hosts without
/// type-tag dispatch keep the default and expose no registry.
pub trait RendererHost {
    fn type_registry(&mut self) -> Option<&mut dyn TypeRegistry> {
        None
    }
}

/// Registers a default [`NewsArticleRenderer`] under every supported type tag.
///
/// Returns how many tags were registered. A host without a registry gets a
/// warning and nothing is registered.
pub fn register_news_article_renderer(host: &mut dyn RendererHost) -> usize {
    let logger = Logger::new().with_prefix("[NewsArticleRenderer]".to_string());

    let Some(registry) = host.type_registry() else {
        logger.warn("host exposes no type registry, renderer not registered");
        return 0;
    };

    let renderer = Arc::new(NewsArticleRenderer::default());
    let mut registered = 0;
    for type_tag in NewsArticleRenderer::supported_types() {
        let renderer = Arc::clone(&renderer);
        let handler: TypeRenderer = Box::new(move |item: &Value| renderer.render_value(item));
        match registry.register_type_renderer(type_tag, handler) {
            Ok(()) => registered += 1,
            Err(e) => logger.warn(&format!("could not register {}: {}", type_tag, e)),
        }
    }

    logger.info(&format!("registered for {} type(s) (0-100 score scale)", registered));
    registered
}

/// In-process type-tag dispatch table.
#[derive(Default)]
pub struct TypeRendererMap {
    renderers: HashMap<String, TypeRenderer>,
}

impl TypeRendererMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_renderer(&self, type_tag: &str) -> bool {
        self.renderers.contains_key(type_tag)
    }

    pub fn type_tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.renderers.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Dispatches to the handler of the first `@type` tag, in the record's own
    /// order, that has one registered.
    pub fn render(&self, item: &Value) -> Option<Card> {
        let record = RenderItem::from_value(item).record;
        record
            .types
            .iter()
            .find_map(|tag| self.renderers.get(tag))
            .map(|renderer| renderer(item))
    }
}

impl TypeRegistry for TypeRendererMap {
    fn register_type_renderer(&mut self, type_tag: &str, renderer: TypeRenderer) -> Result<()> {
        let type_tag = type_tag.trim();
        if type_tag.is_empty() {
            return Err(Error::Registration("type tag must not be empty".to_string()));
        }
        self.renderers.insert(type_tag.to_string(), renderer);
        Ok(())
    }
}

impl RendererHost for TypeRendererMap {
    fn type_registry(&mut self) -> Option<&mut dyn TypeRegistry> {
        Some(self)
    }
}

impl fmt::Debug for TypeRendererMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRendererMap")
            .field("type_tags", &self.type_tags())
            .finish()
    }
}

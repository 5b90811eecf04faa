//! Page-level JSON-LD building.
//!
//! A build gathers the documents extensions contribute for the route, maps
//! the route's entity, lets extensions alter the merged result, then
//! flattens it into the typed nodes that end up in the page's
//! `<script type="application/ld+json">`.

use crate::document::{flatten, sort_properties};
use crate::extension::{ExtensionRegistry, JsonLdExtension};
use crate::links::{PublicFilesUrlGenerator, UrlGenerator};
use crate::mapper::{BuildState, EntityMapper, MapOptions};
use crate::{Document, JsonLdConfig, Result, SharedConfig};
use schemadot_model::{EntityRecord, EntityStore, MappingProvider, RouteEntityResolver, RouteMatch};
use schemadot_vocab::SchemaTypeManager;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Key the route entity's document is merged under before flattening.
pub const ENTITY_DOCUMENT_KEY: &str = "schemadot_entity";

/// Builds JSON-LD for routes and entities.
///
/// Shareable across threads; each call works from its own config snapshot.
pub struct JsonLdBuilder {
    mappings: Arc<dyn MappingProvider>,
    entities: Arc<dyn EntityStore>,
    vocabulary: Arc<dyn SchemaTypeManager>,
    routes: Option<Arc<dyn RouteEntityResolver>>,
    urls: Arc<dyn UrlGenerator>,
    extensions: ExtensionRegistry,
    config: SharedConfig,
}

impl JsonLdBuilder {
    pub fn new(
        mappings: Arc<dyn MappingProvider>,
        entities: Arc<dyn EntityStore>,
        vocabulary: Arc<dyn SchemaTypeManager>,
        config: impl Into<SharedConfig>,
    ) -> Self {
        Self {
            mappings,
            entities,
            vocabulary,
            routes: None,
            urls: Arc::new(PublicFilesUrlGenerator::default()),
            extensions: ExtensionRegistry::new(),
            config: config.into(),
        }
    }

    pub fn with_route_resolver(mut self, routes: Arc<dyn RouteEntityResolver>) -> Self {
        self.routes = Some(routes);
        self
    }

    pub fn with_url_generator(mut self, urls: Arc<dyn UrlGenerator>) -> Self {
        self.urls = urls;
        self
    }

    /// Registers an extension after the ones already registered.
    pub fn register_extension(&mut self, extension: Arc<dyn JsonLdExtension>) -> Result<()> {
        self.extensions.register(extension)
    }

    pub fn with_extension(mut self, extension: Arc<dyn JsonLdExtension>) -> Result<Self> {
        self.register_extension(extension)?;
        Ok(self)
    }

    /// The settings handle; replacing its value affects later builds only.
    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    fn mapper<'a>(&'a self, config: &'a JsonLdConfig) -> EntityMapper<'a> {
        EntityMapper::new(
            config,
            self.mappings.as_ref(),
            self.entities.as_ref(),
            self.vocabulary.as_ref(),
            self.urls.as_ref(),
            &self.extensions,
        )
    }

    /// Maps a single entity to a JSON-LD node. Empty when the entity has
    /// nothing to publish.
    pub fn map_entity(&self, entity: &dyn EntityRecord, options: MapOptions) -> Document {
        let config = self.config.snapshot();
        self.mapper(&config).map_entity(entity, options)
    }

    /// Builds the JSON-LD for a route.
    ///
    /// Returns `None` when there is nothing to publish; otherwise a single
    /// node, or a list of nodes when several typed documents were produced.
    pub fn build(&self, route: &RouteMatch) -> Option<Value> {
        let config = self.config.snapshot();
        let mut data = Document::new();

        for extension in self.extensions.iter() {
            match extension.contribute(route) {
                Some(Value::Null) | None => {}
                Some(document) => {
                    data.insert(extension.name().to_string(), document);
                }
            }
        }

        if let Some(entity) = self.routes.as_ref().and_then(|r| r.entity_for_route(route)) {
            let options = MapOptions {
                include_identifiers: config.include_identifiers,
                embed_references: config.embed_references,
            };
            let document =
                self.mapper(&config)
                    .map_entity_with_state(entity.as_ref(), options, &mut BuildState::new());
            if !document.is_empty() {
                data.insert(ENTITY_DOCUMENT_KEY.to_string(), Value::Object(document));
            }
        }

        for extension in self.extensions.iter() {
            extension.document_alter(&mut data, route);
        }

        if data.is_empty() {
            debug!(route = %route.route_name, "No JSON-LD for route");
            return None;
        }

        let mut nodes: Vec<Value> = flatten(Value::Object(data), &config.context)
            .into_iter()
            .map(|node| Value::Object(sort_properties(node, &config.property_order)))
            .collect();
        match nodes.len() {
            0 => None,
            1 => nodes.pop(),
            _ => Some(Value::Array(nodes)),
        }
    }
}

//! Shared fixtures for the JSON-LD integration tests.

#![allow(dead_code)]

use schemadot_jsonld::{
    Document, EntityMapper, ExtensionRegistry, JsonLdBuilder, JsonLdConfig, JsonLdExtension,
    PublicFilesUrlGenerator,
};
use schemadot_model::{
    Entity, EntityUuid, FieldDefinition, FieldValue, Mapping, MappingRegistry, MemoryEntityStore,
    StorageKind,
};
use schemadot_vocab::SchemaVocabulary;
use std::sync::{Arc, Once};
use tracing_subscriber::EnvFilter;

pub const PAGE_UUID: &str = "6f1c2a9e-3b4d-4e5f-8a7b-9c0d1e2f3a4b";

/// Routes engine diagnostics to the test output; filter with `RUST_LOG`.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Everything a mapper or builder needs, held by value so tests can tweak
/// any part before mapping.
pub struct Fixture {
    pub config: JsonLdConfig,
    pub mappings: MappingRegistry,
    pub entities: MemoryEntityStore,
    pub vocabulary: SchemaVocabulary,
    pub urls: PublicFilesUrlGenerator,
    pub extensions: ExtensionRegistry,
}

impl Fixture {
    pub fn new() -> Self {
        init_tracing();
        Self {
            config: JsonLdConfig::default(),
            mappings: MappingRegistry::new(),
            entities: MemoryEntityStore::new(),
            vocabulary: SchemaVocabulary::bootstrap(),
            urls: PublicFilesUrlGenerator::default(),
            extensions: ExtensionRegistry::new(),
        }
    }

    /// The `node.page → CreativeWork` fixture with a related page.
    pub fn creative_work() -> Self {
        let mut fixture = Self::new();
        fixture.map(page_mapping());
        fixture.add(
            page("1", "Hello world")
                .with_uuid(EntityUuid::parse(PAGE_UUID).unwrap())
                .with_field("summary", single(StorageKind::String), vec![FieldValue::string("A greeting")])
                .with_field("related", single(StorageKind::EntityReference), vec![FieldValue::reference("node", "2")]),
        );
        fixture.add(page("2", "Related page"));
        fixture
    }

    pub fn map(&mut self, mapping: Mapping) {
        self.mappings.insert(mapping).unwrap();
    }

    pub fn add(&mut self, entity: Entity) {
        self.entities.insert(entity);
    }

    pub fn extend(&mut self, extension: Arc<dyn JsonLdExtension>) {
        self.extensions.register(extension).unwrap();
    }

    pub fn entity(&self, entity_type: &str, id: &str) -> &Entity {
        self.entities
            .get(&schemadot_model::EntityKey::new(entity_type, id))
            .unwrap()
    }

    pub fn mapper(&self) -> EntityMapper<'_> {
        EntityMapper::new(
            &self.config,
            &self.mappings,
            &self.entities,
            &self.vocabulary,
            &self.urls,
            &self.extensions,
        )
    }

    /// A builder over this fixture, resolving routes from the entity store.
    /// Extensions are registered on the builder itself.
    pub fn builder(self) -> JsonLdBuilder {
        let entities = Arc::new(self.entities);
        JsonLdBuilder::new(
            Arc::new(self.mappings),
            entities.clone(),
            Arc::new(self.vocabulary),
            self.config,
        )
        .with_route_resolver(entities)
    }
}

/// Builds a mapping from `(field, property)` pairs.
pub fn mapping(entity_type: &str, bundle: &str, schema_type: &str, properties: &[(&str, &str)]) -> Mapping {
    let mut mapping = Mapping::new(entity_type, bundle, schema_type);
    for (field, property) in properties {
        mapping.map_field(field, property).unwrap();
    }
    mapping
}

pub fn page_mapping() -> Mapping {
    mapping(
        "node",
        "page",
        "CreativeWork",
        &[("title", "name"), ("summary", "description"), ("related", "subjectOf")],
    )
}

/// A `node.page` with a title.
pub fn page(id: &str, title: &str) -> Entity {
    Entity::new("node", "page", id).with_field(
        "title",
        single(StorageKind::String),
        vec![FieldValue::string(title)],
    )
}

pub fn single(storage: StorageKind) -> FieldDefinition {
    FieldDefinition::single(storage)
}

pub fn unlimited(storage: StorageKind) -> FieldDefinition {
    FieldDefinition::unlimited(storage)
}

pub fn strings(values: &[&str]) -> Vec<FieldValue> {
    values.iter().map(|v| FieldValue::string(*v)).collect()
}

/// Key order of a document. `Value` equality ignores it.
pub fn keys(document: &Document) -> Vec<&str> {
    document.keys().map(String::as_str).collect()
}

//! Entity mapping: one entity and its mapping → one JSON-LD node.

use crate::coercion::DefaultTypeCoercion;
use crate::document::{is_typed, merge_property, sort_properties, type_name};
use crate::extension::{ExtensionRegistry, FieldContext};
use crate::links::UrlGenerator;
use crate::resolver::ValueContext;
use crate::{Document, JsonLdConfig};
use schemadot_model::{Cardinality, EntityKey, EntityRecord, EntityStore, FieldValue, MappingProvider};
use schemadot_vocab::SchemaTypeManager;
use serde_json::{Value, json};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Property receiving `PropertyValue` identifiers.
pub const IDENTIFIER_PROPERTY: &str = "identifier";

/// Property used to number the items of ordered lists.
pub const POSITION_PROPERTY: &str = "position";

/// How an entity is mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapOptions {
    /// Append `PropertyValue` identifiers.
    pub include_identifiers: bool,
    /// Embed referenced entities that have their own canonical URL. When
    /// false those references are omitted.
    pub embed_references: bool,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            include_identifiers: true,
            embed_references: true,
        }
    }
}

/// Per-build traversal state.
///
/// Each (entity, embed mode) pair is mapped at most once per build, which
/// bounds recursion even when mappings reference each other in a cycle.
#[derive(Debug, Default)]
pub struct BuildState {
    visited: HashSet<(EntityKey, bool)>,
}

impl BuildState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the pair visited. False when it already was.
    fn enter(&mut self, key: &EntityKey, embed_references: bool) -> bool {
        self.visited.insert((key.clone(), embed_references))
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

/// Maps entities to JSON-LD nodes using one config snapshot.
pub struct EntityMapper<'a> {
    pub(crate) config: &'a JsonLdConfig,
    pub(crate) mappings: &'a dyn MappingProvider,
    pub(crate) entities: &'a dyn EntityStore,
    pub(crate) vocabulary: &'a dyn SchemaTypeManager,
    pub(crate) urls: &'a dyn UrlGenerator,
    pub(crate) extensions: &'a ExtensionRegistry,
}

impl<'a> EntityMapper<'a> {
    pub fn new(
        config: &'a JsonLdConfig,
        mappings: &'a dyn MappingProvider,
        entities: &'a dyn EntityStore,
        vocabulary: &'a dyn SchemaTypeManager,
        urls: &'a dyn UrlGenerator,
        extensions: &'a ExtensionRegistry,
    ) -> Self {
        Self {
            config,
            mappings,
            entities,
            vocabulary,
            urls,
            extensions,
        }
    }

    pub fn coercion(&self) -> DefaultTypeCoercion<'a> {
        DefaultTypeCoercion::new(self.config, self.vocabulary)
    }

    /// Maps an entity with a fresh traversal state. An empty document means
    /// the entity has nothing to publish.
    pub fn map_entity(&self, entity: &dyn EntityRecord, options: MapOptions) -> Document {
        self.map_entity_with_state(entity, options, &mut BuildState::new())
    }

    /// Maps an entity as part of a larger build.
    pub fn map_entity_with_state(
        &self,
        entity: &dyn EntityRecord,
        options: MapOptions,
        state: &mut BuildState,
    ) -> Document {
        let key = entity.key();
        if !state.enter(key, options.embed_references) {
            trace!(entity = %key, "Entity already mapped in this build");
            return Document::new();
        }
        let Some(mapping) = self.mappings.mapping(&key.entity_type, entity.bundle()) else {
            debug!(entity = %key, bundle = entity.bundle(), "No Schema.org mapping");
            return Document::new();
        };
        if mapping.schema_type.is_empty() {
            debug!(entity = %key, "Mapping declares no Schema.org type");
            return Document::new();
        }
        let schema_type = mapping.schema_type.as_str();
        let coercion = self.coercion();

        let mut data = Document::new();
        data.insert("@type".to_string(), Value::String(schema_type.to_string()));
        if entity.is_readable() {
            if let Some(url) = entity.canonical_url() {
                data.insert("@url".to_string(), Value::String(url.to_string()));
            }
        }

        for extension in self.extensions.iter() {
            extension.entity_load(&mut data, entity);
        }

        for property_mapping in &mapping.schema_properties {
            let field_name = property_mapping.field_name.as_str();
            let property = property_mapping.property.as_str();
            let Some(definition) = entity.field_definition(field_name) else {
                trace!(entity = %key, field = field_name, "Mapped field missing");
                continue;
            };
            if !entity.is_field_visible(field_name) {
                trace!(entity = %key, field = field_name, "Mapped field not visible");
                continue;
            }

            let mut items: Vec<FieldValue> = entity.values(field_name).to_vec();
            let field = FieldContext {
                entity,
                schema_type,
                field_name,
                property,
                definition,
            };
            for extension in self.extensions.iter() {
                extension.field_alter(&mut data, &mut items, &field);
            }

            let context = ValueContext {
                schema_type,
                field_name,
                property,
                definition,
            };
            let mut values: Vec<Value> = items
                .iter()
                .filter_map(|item| self.resolve_value(item, &context, options, state))
                .map(|value| coercion.apply(schema_type, property, value))
                .collect();

            if definition.cardinality.is_multiple() && values.len() > 1 {
                self.number_positions(&mut values);
            }
            if let Some(value) = self.collapse(property, definition.cardinality, values) {
                merge_property(&mut data, property, value);
            }
        }

        // Appended identifiers don't count as content; a mapped one does.
        let has_own_identifier = data.contains_key(IDENTIFIER_PROPERTY);
        if options.include_identifiers {
            let identifiers = self.identifiers(entity);
            if !identifiers.is_empty() {
                match data.get_mut(IDENTIFIER_PROPERTY) {
                    Some(Value::Array(existing)) => existing.extend(identifiers),
                    Some(existing) => {
                        let mut all = vec![existing.take()];
                        all.extend(identifiers);
                        *existing = Value::Array(all);
                    }
                    None => {
                        data.insert(IDENTIFIER_PROPERTY.to_string(), Value::Array(identifiers));
                    }
                }
            }
        }

        for extension in self.extensions.iter() {
            extension.entity_alter(&mut data, entity);
        }

        if !is_typed(&data) || !has_content(&data, has_own_identifier) {
            debug!(entity = %key, "Entity produced no properties");
            return Document::new();
        }
        sort_properties(data, &self.config.property_order)
    }

    /// Gives typed list items a 1-based `position` unless they have one.
    fn number_positions(&self, values: &mut [Value]) {
        for (index, value) in values.iter_mut().enumerate() {
            let Some(type_name) = type_name(value).map(str::to_string) else {
                continue;
            };
            if !self.vocabulary.has_property(&type_name, POSITION_PROPERTY) {
                continue;
            }
            if let Value::Object(node) = value {
                if node.contains_key(POSITION_PROPERTY) {
                    continue;
                }
                node.insert(POSITION_PROPERTY.to_string(), json!(index + 1));
                *node = sort_properties(std::mem::take(node), &self.config.property_order);
            }
        }
    }

    /// Single-valued fields yield a bare value; unlimited fields yield a list
    /// unless the policy collapses a lone value.
    fn collapse(&self, property: &str, cardinality: Cardinality, mut values: Vec<Value>) -> Option<Value> {
        if values.is_empty() {
            return None;
        }
        if cardinality.is_single() {
            return Some(values.swap_remove(0));
        }
        if values.len() == 1 && !self.config.keeps_list(property) {
            return values.pop();
        }
        Some(Value::Array(values))
    }

    fn identifiers(&self, entity: &dyn EntityRecord) -> Vec<Value> {
        let mut identifiers = Vec::new();
        for identifier in self.config.identifier_fields() {
            if identifier.field_name == "uuid" {
                identifiers.push(property_value(&identifier.property_id, json!(entity.uuid().to_string())));
                continue;
            }
            if !entity.has_field(&identifier.field_name) || !entity.is_field_visible(&identifier.field_name) {
                continue;
            }
            for value in entity.values(&identifier.field_name) {
                identifiers.push(property_value(&identifier.property_id, value.raw()));
            }
        }
        identifiers
    }
}

fn property_value(property_id: &str, value: Value) -> Value {
    json!({
        "@type": "PropertyValue",
        "propertyID": property_id,
        "value": value,
    })
}

/// `@` keys and appended identifiers alone don't make a node worth
/// publishing.
fn has_content(data: &Document, has_own_identifier: bool) -> bool {
    data.keys()
        .any(|k| !k.starts_with('@') && (has_own_identifier || k != IDENTIFIER_PROPERTY))
}

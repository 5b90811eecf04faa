use crate::{EntityKey, EntityUuid, FieldDefinition, FieldValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Read-only view of a content entity.
///
/// This is the only surface the structured-data engine sees. Storage-backed
/// entities and the in-memory [`Entity`] both implement it; callers never
/// branch on the concrete entity type.
pub trait EntityRecord: Send + Sync {
    fn key(&self) -> &EntityKey;

    /// Sub-type of the entity (content type, vocabulary, media type...).
    fn bundle(&self) -> &str;

    fn uuid(&self) -> EntityUuid;

    fn field_names(&self) -> Vec<&str>;

    fn has_field(&self, field_name: &str) -> bool {
        self.field_definition(field_name).is_some()
    }

    fn field_definition(&self, field_name: &str) -> Option<&FieldDefinition>;

    /// Whether the current viewer may see the field.
    fn is_field_visible(&self, field_name: &str) -> bool;

    /// The field's values in delta order. Empty when the field is absent.
    fn values(&self, field_name: &str) -> &[FieldValue];

    /// Absolute canonical URL, when the entity is addressable on its own.
    fn canonical_url(&self) -> Option<&str>;

    /// Whether the current viewer may view the entity.
    fn is_readable(&self) -> bool {
        true
    }
}

/// A field on an in-memory entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub definition: FieldDefinition,
    #[serde(default)]
    pub values: Vec<FieldValue>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

/// An in-memory entity, used for fixtures and for content assembled by
/// callers outside a storage backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub key: EntityKey,
    pub bundle: String,
    pub uuid: EntityUuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
    #[serde(default = "default_visible")]
    pub readable: bool,
    #[serde(default)]
    pub fields: BTreeMap<String, Field>,
}

impl Entity {
    pub fn new(entity_type: &str, bundle: &str, id: &str) -> Self {
        Self {
            key: EntityKey::new(entity_type, id),
            bundle: bundle.to_string(),
            uuid: EntityUuid::new(),
            canonical_url: None,
            readable: true,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_uuid(mut self, uuid: EntityUuid) -> Self {
        self.uuid = uuid;
        self
    }

    pub fn with_canonical_url(mut self, url: impl Into<String>) -> Self {
        self.canonical_url = Some(url.into());
        self
    }

    /// Adds (or replaces) a visible field.
    pub fn with_field(
        mut self,
        name: &str,
        definition: FieldDefinition,
        values: Vec<FieldValue>,
    ) -> Self {
        self.set_field(name, definition, values);
        self
    }

    pub fn set_field(&mut self, name: &str, definition: FieldDefinition, values: Vec<FieldValue>) {
        self.fields.insert(
            name.to_string(),
            Field {
                definition,
                values,
                visible: true,
            },
        );
    }

    /// Hides a field from the current viewer. Unknown fields are ignored.
    pub fn hide_field(&mut self, name: &str) {
        if let Some(field) = self.fields.get_mut(name) {
            field.visible = false;
        }
    }
}

impl EntityRecord for Entity {
    fn key(&self) -> &EntityKey {
        &self.key
    }

    fn bundle(&self) -> &str {
        &self.bundle
    }

    fn uuid(&self) -> EntityUuid {
        self.uuid
    }

    fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    fn field_definition(&self, field_name: &str) -> Option<&FieldDefinition> {
        self.fields.get(field_name).map(|f| &f.definition)
    }

    fn is_field_visible(&self, field_name: &str) -> bool {
        self.fields.get(field_name).is_some_and(|f| f.visible)
    }

    fn values(&self, field_name: &str) -> &[FieldValue] {
        self.fields
            .get(field_name)
            .map(|f| f.values.as_slice())
            .unwrap_or_default()
    }

    fn canonical_url(&self) -> Option<&str> {
        self.canonical_url.as_deref()
    }

    fn is_readable(&self) -> bool {
        self.readable
    }
}

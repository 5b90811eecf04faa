use crate::{Document, JsonLdError, Result};
use schemadot_model::{EntityRecord, FieldDefinition, FieldValue, RouteMatch};
use serde_json::Value;
use std::sync::Arc;

/// What a field-alter callback is told about the field being mapped.
#[derive(Clone, Copy)]
pub struct FieldContext<'a> {
    pub entity: &'a dyn EntityRecord,
    pub schema_type: &'a str,
    pub field_name: &'a str,
    pub property: &'a str,
    pub definition: &'a FieldDefinition,
}

/// Optional hooks into JSON-LD building.
///
/// Every method has a no-op default; implement only what you need. Points
/// run in this order during a build: [`contribute`](Self::contribute),
/// [`entity_load`](Self::entity_load), [`field_alter`](Self::field_alter)
/// (once per mapped field), [`entity_alter`](Self::entity_alter),
/// [`document_alter`](Self::document_alter). Within one point, extensions
/// run in registration order.
pub trait JsonLdExtension: Send + Sync {
    /// Unique name. Contributed documents are merged under it.
    fn name(&self) -> &str;

    /// Contributes an independent document for the route, e.g. site-wide
    /// `Organization` data.
    fn contribute(&self, route: &RouteMatch) -> Option<Value> {
        let _ = route;
        None
    }

    /// Called when an entity's document has been started (`@type` and
    /// `@url` only), before any field is mapped.
    fn entity_load(&self, data: &mut Document, entity: &dyn EntityRecord) {
        let _ = (data, entity);
    }

    /// Called for each mapped, visible field before its values are resolved.
    /// May rewrite the raw values or the document built so far.
    fn field_alter(&self, data: &mut Document, items: &mut Vec<FieldValue>, field: &FieldContext<'_>) {
        let _ = (data, items, field);
    }

    /// Called once all fields and identifiers have been added.
    fn entity_alter(&self, data: &mut Document, entity: &dyn EntityRecord) {
        let _ = (data, entity);
    }

    /// Called on the merged page document before it is flattened.
    fn document_alter(&self, data: &mut Document, route: &RouteMatch) {
        let _ = (data, route);
    }
}

/// Extensions in registration order.
#[derive(Clone, Default)]
pub struct ExtensionRegistry {
    extensions: Vec<Arc<dyn JsonLdExtension>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, extension: Arc<dyn JsonLdExtension>) -> Result<()> {
        if self.extensions.iter().any(|e| e.name() == extension.name()) {
            return Err(JsonLdError::DuplicateExtension(extension.name().to_string()));
        }
        self.extensions.push(extension);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn JsonLdExtension> {
        self.extensions.iter().map(|e| e.as_ref())
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

//! Default-type coercion: wraps bare values in their implicit Schema.org type.
//!
//! A bare `100.00` mapped to `Product.offers` becomes
//! `{"@type": "Offer", "price": 100.00, "priceCurrency": "USD"}`: the
//! property's range decides the type, the type's main property receives the
//! value, and the type defaults fill in the rest.

use crate::{Document, JsonLdConfig};
use schemadot_vocab::SchemaTypeManager;
use serde_json::Value;
use tracing::trace;

/// Property a bare value collapses into when no ancestor overrides it.
pub const DEFAULT_MAIN_PROPERTY: &str = "name";

const URL_TYPE: &str = "URL";

/// Coerces resolved values using the config tables and the vocabulary.
pub struct DefaultTypeCoercion<'a> {
    config: &'a JsonLdConfig,
    vocabulary: &'a dyn SchemaTypeManager,
}

impl<'a> DefaultTypeCoercion<'a> {
    pub fn new(config: &'a JsonLdConfig, vocabulary: &'a dyn SchemaTypeManager) -> Self {
        Self { config, vocabulary }
    }

    /// Applies the default type for `schema_type.property` to `value`.
    pub fn apply(&self, schema_type: &str, property: &str, value: Value) -> Value {
        match value {
            Value::Object(mut node) => {
                if let Some(type_name) = node.get("@type").and_then(Value::as_str).map(str::to_string) {
                    for (key, default) in self.type_defaults(&type_name) {
                        node.entry(key).or_insert(default);
                    }
                }
                Value::Object(node)
            }
            Value::Array(_) | Value::Null => value,
            scalar => self.wrap_scalar(schema_type, property, scalar),
        }
    }

    fn wrap_scalar(&self, schema_type: &str, property: &str, value: Value) -> Value {
        let Some(range) = self.range_type(schema_type, property) else {
            return value;
        };
        if self.vocabulary.is_data_type(&range) || self.vocabulary.is_enumeration(&range) {
            return value;
        }
        if is_absolute_url(&value) && self.accepts_url(schema_type, property) {
            return value;
        }
        let Some(main_property) = self.main_property(&range) else {
            trace!(range = %range, property, "Range type has no main property, value kept bare");
            return value;
        };

        let mut node = Document::new();
        node.insert("@type".to_string(), Value::String(range.clone()));
        node.insert(main_property, value);
        for (key, default) in self.type_defaults(&range) {
            node.entry(key).or_insert(default);
        }
        Value::Object(node)
    }

    /// The type a bare value of `schema_type.property` is assumed to have:
    /// a `Type--property` override, then a property override, then the
    /// vocabulary's default range.
    pub fn range_type(&self, schema_type: &str, property: &str) -> Option<String> {
        self.range_override(schema_type, property)
            .map(str::to_string)
            .or_else(|| self.vocabulary.property_default_range(property))
    }

    fn range_override(&self, schema_type: &str, property: &str) -> Option<&str> {
        self.config
            .type_property_ranges
            .get(&format!("{schema_type}--{property}"))
            .or_else(|| self.config.property_ranges.get(property))
            .map(String::as_str)
    }

    /// Whether a bare URL is a valid value as is. A configured override
    /// replaces the vocabulary's ranges for this decision too.
    fn accepts_url(&self, schema_type: &str, property: &str) -> bool {
        match self.range_override(schema_type, property) {
            Some(range) => range == URL_TYPE,
            None => self
                .vocabulary
                .property_ranges(property)
                .iter()
                .any(|r| r == URL_TYPE),
        }
    }

    /// The main property of `type_name`, nearest ancestor first. `None` when
    /// an ancestor declares that there is no main property.
    pub fn main_property(&self, type_name: &str) -> Option<String> {
        for ancestor in self.vocabulary.ancestors(type_name) {
            if let Some(declared) = self.config.main_property_of(&ancestor) {
                return declared.map(str::to_string);
            }
        }
        Some(DEFAULT_MAIN_PROPERTY.to_string())
    }

    /// Defaults for `type_name` merged along its ancestry; nearer types win.
    pub fn type_defaults(&self, type_name: &str) -> Document {
        let mut defaults = Document::new();
        for ancestor in self.vocabulary.ancestors(type_name) {
            if let Some(table) = self.config.type_defaults.get(&ancestor) {
                for (key, value) in table {
                    defaults.entry(key.clone()).or_insert_with(|| value.clone());
                }
            }
        }
        defaults
    }
}

fn is_absolute_url(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| s.starts_with("http://") || s.starts_with("https://"))
}

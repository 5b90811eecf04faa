use crate::{EntityRecord, ModelError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// One field → Schema.org property assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMapping {
    pub field_name: String,
    pub property: String,
}

/// Declares how an (entity type, bundle) pair maps to Schema.org.
///
/// Property mappings keep their declared order. A field maps to at most one
/// property and a property is fed by at most one field; [`Mapping::map_field`]
/// enforces both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub target_entity_type: String,
    pub target_bundle: String,
    /// Schema.org type of the mapped entities, e.g. `CreativeWork`.
    pub schema_type: String,
    #[serde(default)]
    pub schema_properties: Vec<PropertyMapping>,
}

impl Mapping {
    pub fn new(entity_type: &str, bundle: &str, schema_type: &str) -> Self {
        Self {
            target_entity_type: entity_type.to_string(),
            target_bundle: bundle.to_string(),
            schema_type: schema_type.to_string(),
            schema_properties: Vec::new(),
        }
    }

    /// Appends a field → property assignment.
    pub fn map_field(&mut self, field_name: &str, property: &str) -> Result<()> {
        if self.property_for(field_name).is_some() {
            return Err(ModelError::DuplicateField {
                schema_type: self.schema_type.clone(),
                field_name: field_name.to_string(),
            });
        }
        if self.field_for(property).is_some() {
            return Err(ModelError::DuplicateProperty {
                schema_type: self.schema_type.clone(),
                property: property.to_string(),
            });
        }
        self.schema_properties.push(PropertyMapping {
            field_name: field_name.to_string(),
            property: property.to_string(),
        });
        Ok(())
    }

    /// Builder form of [`Mapping::map_field`].
    pub fn with_property(mut self, field_name: &str, property: &str) -> Result<Self> {
        self.map_field(field_name, property)?;
        Ok(self)
    }

    pub fn property_for(&self, field_name: &str) -> Option<&str> {
        self.schema_properties
            .iter()
            .find(|m| m.field_name == field_name)
            .map(|m| m.property.as_str())
    }

    pub fn field_for(&self, property: &str) -> Option<&str> {
        self.schema_properties
            .iter()
            .find(|m| m.property == property)
            .map(|m| m.field_name.as_str())
    }

    /// Checks the uniqueness rules on a mapping that was deserialized rather
    /// than assembled through [`Mapping::map_field`].
    pub fn validate(&self) -> Result<()> {
        let mut check = Mapping::new(&self.target_entity_type, &self.target_bundle, &self.schema_type);
        for m in &self.schema_properties {
            check.map_field(&m.field_name, &m.property)?;
        }
        Ok(())
    }
}

/// Looks up mappings by entity type and bundle.
pub trait MappingProvider: Send + Sync {
    fn mapping(&self, entity_type: &str, bundle: &str) -> Option<Arc<Mapping>>;

    fn is_mapped(&self, entity: &dyn EntityRecord) -> bool {
        self.mapping(&entity.key().entity_type, entity.bundle()).is_some()
    }
}

/// In-memory mapping table.
#[derive(Debug, Default, Clone)]
pub struct MappingRegistry {
    mappings: HashMap<(String, String), Arc<Mapping>>,
}

impl MappingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mapping, replacing any previous one for the same bundle.
    pub fn insert(&mut self, mapping: Mapping) -> Result<()> {
        mapping.validate()?;
        let key = (mapping.target_entity_type.clone(), mapping.target_bundle.clone());
        self.mappings.insert(key, Arc::new(mapping));
        Ok(())
    }

    /// Loads a JSON array of mappings.
    pub fn from_json(json: &str) -> Result<Self> {
        let mappings: Vec<Mapping> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for mapping in mappings {
            registry.insert(mapping)?;
        }
        Ok(registry)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

impl MappingProvider for MappingRegistry {
    fn mapping(&self, entity_type: &str, bundle: &str) -> Option<Arc<Mapping>> {
        self.mappings
            .get(&(entity_type.to_string(), bundle.to_string()))
            .cloned()
    }
}

use crate::{Result, SchemaTypeManager, VocabError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;
use tracing::info;

/// A Schema.org type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaType {
    pub name: String,
    /// Direct supertypes, in declared order.
    #[serde(default)]
    pub parents: Vec<String>,
    /// Properties declared directly on this type.
    #[serde(default)]
    pub properties: Vec<String>,
}

/// A Schema.org property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaProperty {
    pub name: String,
    #[serde(default)]
    pub range_includes: Vec<String>,
    /// Overrides the range used for bare values. When absent the first
    /// non-data-type range wins, falling back to the first range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_range: Option<String>,
}

/// On-disk layout of a vocabulary file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct VocabularyFile {
    #[serde(default)]
    types: Vec<SchemaType>,
    #[serde(default)]
    properties: Vec<SchemaProperty>,
}

/// In-memory Schema.org vocabulary.
#[derive(Debug, Clone, Default)]
pub struct SchemaVocabulary {
    types: HashMap<String, SchemaType>,
    properties: HashMap<String, SchemaProperty>,
}

impl SchemaVocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled subset of Schema.org covering common content types.
    pub fn bootstrap() -> Self {
        let mut vocabulary = Self::new();
        for t in crate::bootstrap::types() {
            vocabulary.insert_type(t);
        }
        for p in crate::bootstrap::properties() {
            vocabulary.insert_property(p);
        }
        vocabulary
    }

    /// Parses a TOML vocabulary (`[[types]]` and `[[properties]]` tables).
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: VocabularyFile = toml::from_str(contents)?;
        Self::from_file(file)
    }

    /// Parses a JSON vocabulary with the same layout as the TOML form.
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let file: VocabularyFile = serde_json::from_str(contents)?;
        Self::from_file(file)
    }

    /// Loads a vocabulary file; `.json` files are read as JSON, anything else as TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let vocabulary = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&contents)?,
            _ => Self::from_toml_str(&contents)?,
        };
        info!(
            path = %path.display(),
            types = vocabulary.types.len(),
            properties = vocabulary.properties.len(),
            "Loaded Schema.org vocabulary"
        );
        Ok(vocabulary)
    }

    fn from_file(file: VocabularyFile) -> Result<Self> {
        let mut vocabulary = Self::new();
        for t in file.types {
            vocabulary.insert_type(t);
        }
        for p in file.properties {
            vocabulary.insert_property(p);
        }
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    /// Adds every type and property of `other`, replacing duplicates.
    pub fn extend(&mut self, other: SchemaVocabulary) {
        self.types.extend(other.types);
        self.properties.extend(other.properties);
    }

    pub fn insert_type(&mut self, schema_type: SchemaType) {
        self.types.insert(schema_type.name.clone(), schema_type);
    }

    pub fn insert_property(&mut self, property: SchemaProperty) {
        self.properties.insert(property.name.clone(), property);
    }

    pub fn get_type(&self, name: &str) -> Option<&SchemaType> {
        self.types.get(name)
    }

    pub fn get_property(&self, name: &str) -> Option<&SchemaProperty> {
        self.properties.get(name)
    }

    /// Every declared parent must itself be a known type.
    pub fn validate(&self) -> Result<()> {
        for t in self.types.values() {
            if let Some(parent) = t.parents.iter().find(|p| !self.types.contains_key(*p)) {
                return Err(VocabError::UnknownParent {
                    child: t.name.clone(),
                    parent: parent.clone(),
                });
            }
        }
        Ok(())
    }
}

impl SchemaTypeManager for SchemaVocabulary {
    fn ancestors(&self, type_name: &str) -> Vec<String> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([type_name.to_string()]);
        // Breadth-first so nearer ancestors always come before farther ones.
        while let Some(name) = queue.pop_front() {
            if !seen.insert(name.clone()) {
                continue;
            }
            if let Some(t) = self.types.get(&name) {
                queue.extend(t.parents.iter().cloned());
            }
            chain.push(name);
        }
        chain
    }

    fn property_ranges(&self, property: &str) -> Vec<String> {
        self.properties
            .get(property)
            .map(|p| p.range_includes.clone())
            .unwrap_or_default()
    }

    fn property_default_range(&self, property: &str) -> Option<String> {
        let p = self.properties.get(property)?;
        if let Some(default) = &p.default_range {
            return Some(default.clone());
        }
        p.range_includes
            .iter()
            .find(|r| !self.is_data_type(r))
            .or_else(|| p.range_includes.first())
            .cloned()
    }

    fn has_property(&self, type_name: &str, property: &str) -> bool {
        self.ancestors(type_name).iter().any(|t| {
            self.types
                .get(t)
                .is_some_and(|t| t.properties.iter().any(|p| p == property))
        })
    }
}

//! JSON-LD settings — the static tables the builder reads.
//!
//! Settings are loaded from `jsonld.toml` (or JSON) and handed to the
//! builder as an immutable [`Arc<JsonLdConfig>`] snapshot. A build takes one
//! snapshot when it starts and never looks at [`SharedConfig`] again, so a
//! concurrent reload cannot change the tables mid-traversal.

use crate::{Document, JsonLdError, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};
use url::Url;

/// Single-value collapsing for unlimited-cardinality fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardinalityPolicy {
    /// An unlimited field holding exactly one value is emitted as a bare value.
    #[default]
    Collapse,
    /// Unlimited fields are always emitted as lists.
    Preserve,
}

/// An entity field whose values are published as `PropertyValue` identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierConfig {
    /// Field name, or `uuid` for the entity UUID.
    pub field_name: String,
    /// The `propertyID` emitted for the field's values.
    pub property_id: String,
}

impl IdentifierConfig {
    pub fn uuid() -> Self {
        Self {
            field_name: "uuid".to_string(),
            property_id: "uuid".to_string(),
        }
    }
}

/// How text in a given text format is sanitized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFormatRule {
    /// Tags that survive sanitizing. Everything else is stripped.
    #[serde(default)]
    pub allowed_tags: Vec<String>,
    /// Attributes kept on allowed tags. Event handlers and unsafe URLs are
    /// dropped regardless.
    #[serde(default = "default_allowed_attributes")]
    pub allowed_attributes: Vec<String>,
    /// Keep all markup except executable elements, event handlers and
    /// unsafe URLs.
    #[serde(default)]
    pub keep_markup: bool,
}

impl Default for TextFormatRule {
    fn default() -> Self {
        Self {
            allowed_tags: Vec::new(),
            allowed_attributes: default_allowed_attributes(),
            keep_markup: false,
        }
    }
}

impl TextFormatRule {
    fn allow(tags: &[&str]) -> Self {
        Self {
            allowed_tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Self::default()
        }
    }
}

fn default_allowed_attributes() -> Vec<String> {
    ["href", "title", "cite", "lang", "dir"]
        .iter()
        .map(|a| a.to_string())
        .collect()
}

/// JSON-LD settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonLdConfig {
    /// `@context` given to every emitted document.
    pub context: String,
    /// Site base URL used to make links and file URLs absolute.
    pub base_url: String,
    /// Content properties that sort ahead of the alphabetical rest.
    pub property_order: Vec<String>,
    /// Implicit values per Schema.org type, e.g. `Offer.priceCurrency`.
    pub type_defaults: BTreeMap<String, Document>,
    /// Property a bare value is projected onto, per type. An empty string
    /// declares that the type has no main property.
    pub main_properties: BTreeMap<String, String>,
    /// Range overrides keyed by `Type--property`.
    pub type_property_ranges: BTreeMap<String, String>,
    /// Range overrides keyed by property.
    pub property_ranges: BTreeMap<String, String>,
    /// Fields published as identifiers. Empty means the entity UUID.
    pub identifiers: Vec<IdentifierConfig>,
    /// Whether the page entity carries its identifiers.
    pub include_identifiers: bool,
    /// Whether the page entity embeds references to addressable entities.
    pub embed_references: bool,
    /// Image style used for image derivatives.
    pub image_style: Option<String>,
    /// Sanitizing rules per text format id.
    pub text_formats: BTreeMap<String, TextFormatRule>,
    pub cardinality: CardinalityPolicy,
    /// Properties always emitted as lists, whatever the policy.
    pub list_properties: Vec<String>,
}

fn strings<const N: usize>(pairs: [(&str, &str); N]) -> BTreeMap<String, String> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Default for JsonLdConfig {
    fn default() -> Self {
        let mut type_defaults = BTreeMap::new();
        for (type_name, defaults) in [
            ("Offer", json!({"priceCurrency": "USD"})),
            ("MonetaryAmount", json!({"currency": "USD"})),
        ] {
            if let serde_json::Value::Object(map) = defaults {
                type_defaults.insert(type_name.to_string(), map);
            }
        }

        let mut text_formats = BTreeMap::new();
        text_formats.insert("plain_text".to_string(), TextFormatRule::default());
        text_formats.insert(
            "basic_html".to_string(),
            TextFormatRule::allow(&[
                "a", "p", "br", "em", "strong", "cite", "blockquote", "code", "ul", "ol", "li",
                "h2", "h3", "h4", "h5", "h6",
            ]),
        );
        text_formats.insert(
            "restricted_html".to_string(),
            TextFormatRule::allow(&["a", "p", "br", "em", "strong", "ul", "ol", "li"]),
        );
        text_formats.insert(
            "full_html".to_string(),
            TextFormatRule {
                keep_markup: true,
                ..TextFormatRule::default()
            },
        );

        Self {
            context: "https://schema.org".to_string(),
            base_url: "http://localhost".to_string(),
            property_order: ["name", "alternateName", "headline", "description", "url", "image"]
                .into_iter()
                .map(String::from)
                .collect(),
            type_defaults,
            main_properties: strings([
                ("Answer", "text"),
                ("Comment", "text"),
                ("HowToStep", "text"),
                ("HowToDirection", "text"),
                ("MediaObject", "contentUrl"),
                ("Offer", "price"),
                ("PropertyValue", "value"),
                ("QuantitativeValue", "value"),
                ("MonetaryAmount", "value"),
                ("Rating", "ratingValue"),
                ("StructuredValue", ""),
                ("Language", ""),
                ("Quantity", ""),
            ]),
            type_property_ranges: BTreeMap::new(),
            property_ranges: strings([
                ("author", "Person"),
                ("caption", "Text"),
                ("itemListElement", "ListItem"),
                ("recipeInstructions", "HowToStep"),
                ("step", "HowToStep"),
            ]),
            identifiers: Vec::new(),
            include_identifiers: true,
            embed_references: true,
            image_style: None,
            text_formats,
            cardinality: CardinalityPolicy::Collapse,
            list_properties: Vec::new(),
        }
    }
}

impl JsonLdConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads settings from a file; `.json` is read as JSON, anything else as TOML.
    pub fn try_load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            _ => Self::from_toml_str(&contents),
        }
    }

    /// Loads settings from a file, falling back to the defaults when the file
    /// is missing or unreadable.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No JSON-LD settings at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::try_load_from(path) {
            Ok(config) => {
                info!("Loaded JSON-LD settings from {:?}", path);
                config
            }
            Err(e) => {
                warn!(
                    "Failed to load JSON-LD settings {:?}: {}. Falling back to defaults.",
                    path, e
                );
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let base = Url::parse(&self.base_url)?;
        if base.cannot_be_a_base() {
            return Err(JsonLdError::InvalidConfig(format!(
                "base_url '{}' cannot be used as a base",
                self.base_url
            )));
        }
        if self.context.is_empty() {
            return Err(JsonLdError::InvalidConfig("context is required".into()));
        }
        if let Some(key) = self.type_property_ranges.keys().find(|k| !k.contains("--")) {
            return Err(JsonLdError::InvalidConfig(format!(
                "type_property_ranges key '{key}' must look like 'Type--property'"
            )));
        }
        Ok(())
    }

    /// The identifier fields to publish.
    pub fn identifier_fields(&self) -> Vec<IdentifierConfig> {
        if self.identifiers.is_empty() {
            vec![IdentifierConfig::uuid()]
        } else {
            self.identifiers.clone()
        }
    }

    /// Explicit main property of a single type: `Some(None)` means "none".
    pub(crate) fn main_property_of(&self, type_name: &str) -> Option<Option<&str>> {
        self.main_properties
            .get(type_name)
            .map(|p| if p.is_empty() { None } else { Some(p.as_str()) })
    }

    pub(crate) fn keeps_list(&self, property: &str) -> bool {
        self.cardinality == CardinalityPolicy::Preserve
            || self.list_properties.iter().any(|p| p == property)
    }
}

/// A reloadable handle on the current settings.
#[derive(Debug, Clone, Default)]
pub struct SharedConfig {
    current: Arc<RwLock<Arc<JsonLdConfig>>>,
}

impl SharedConfig {
    pub fn new(config: JsonLdConfig) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(config))),
        }
    }

    /// The settings in effect right now. Holders keep this snapshot even if
    /// the settings are replaced afterwards.
    pub fn snapshot(&self) -> Arc<JsonLdConfig> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    pub fn replace(&self, config: JsonLdConfig) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(config);
        info!("JSON-LD settings replaced");
    }
}

impl From<JsonLdConfig> for SharedConfig {
    fn from(config: JsonLdConfig) -> Self {
        Self::new(config)
    }
}

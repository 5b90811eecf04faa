use crate::EntityKey;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value, json};

/// The storage kind of a field. Every [`FieldValue`] belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    String,
    Text,
    Link,
    Integer,
    Decimal,
    Float,
    Boolean,
    Datetime,
    DateRange,
    File,
    Image,
    EntityReference,
    Language,
    Email,
    Telephone,
}

impl StorageKind {
    /// Numeric kinds are rendered through the field's display format when one is set.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Decimal | Self::Float)
    }
}

/// A single typed value held by a field.
///
/// Serialized with a `kind` tag so fixtures read naturally:
/// `{"kind": "link", "uri": "https://example.com"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldValue {
    String {
        value: String,
    },
    Text {
        value: String,
        /// Text format id (e.g. `basic_html`). `None` means unformatted.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },
    Link {
        uri: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    Integer {
        value: i64,
    },
    /// Decimals keep their storage representation (e.g. `"100.00"`).
    Decimal {
        value: String,
    },
    Float {
        value: f64,
    },
    Boolean {
        value: bool,
    },
    Datetime {
        value: String,
    },
    DateRange {
        start: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end: Option<String>,
    },
    File {
        uri: String,
    },
    Image {
        uri: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
    },
    EntityReference {
        target: EntityKey,
    },
    Language {
        langcode: String,
    },
    Email {
        value: String,
    },
    Telephone {
        value: String,
    },
}

impl FieldValue {
    /// Shorthand for a plain string value.
    pub fn string(value: impl Into<String>) -> Self {
        Self::String { value: value.into() }
    }

    /// Shorthand for formatted text.
    pub fn text(value: impl Into<String>, format: Option<&str>) -> Self {
        Self::Text {
            value: value.into(),
            format: format.map(Into::into),
        }
    }

    /// Shorthand for a link without a title.
    pub fn link(uri: impl Into<String>) -> Self {
        Self::Link {
            uri: uri.into(),
            title: None,
        }
    }

    /// Shorthand for a decimal stored as its string representation.
    pub fn decimal(value: impl Into<String>) -> Self {
        Self::Decimal { value: value.into() }
    }

    /// Shorthand for a reference to another entity.
    pub fn reference(entity_type: &str, id: &str) -> Self {
        Self::EntityReference {
            target: EntityKey::new(entity_type, id),
        }
    }

    /// Shorthand for an image file.
    pub fn image(uri: impl Into<String>) -> Self {
        Self::Image {
            uri: uri.into(),
            alt: None,
        }
    }

    /// Shorthand for a date range.
    pub fn date_range(start: impl Into<String>, end: Option<&str>) -> Self {
        Self::DateRange {
            start: start.into(),
            end: end.map(Into::into),
        }
    }

    /// Shorthand for a language code.
    pub fn language(langcode: impl Into<String>) -> Self {
        Self::Language {
            langcode: langcode.into(),
        }
    }

    pub fn kind(&self) -> StorageKind {
        match self {
            Self::String { .. } => StorageKind::String,
            Self::Text { .. } => StorageKind::Text,
            Self::Link { .. } => StorageKind::Link,
            Self::Integer { .. } => StorageKind::Integer,
            Self::Decimal { .. } => StorageKind::Decimal,
            Self::Float { .. } => StorageKind::Float,
            Self::Boolean { .. } => StorageKind::Boolean,
            Self::Datetime { .. } => StorageKind::Datetime,
            Self::DateRange { .. } => StorageKind::DateRange,
            Self::File { .. } => StorageKind::File,
            Self::Image { .. } => StorageKind::Image,
            Self::EntityReference { .. } => StorageKind::EntityReference,
            Self::Language { .. } => StorageKind::Language,
            Self::Email { .. } => StorageKind::Email,
            Self::Telephone { .. } => StorageKind::Telephone,
        }
    }

    /// Numeric view of integer, decimal and float values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer { value } => Some(*value as f64),
            Self::Decimal { value } => value.trim().parse().ok(),
            Self::Float { value } => Some(*value),
            _ => None,
        }
    }

    /// The value's main property as JSON, with no conversion applied.
    pub fn raw(&self) -> Value {
        match self {
            Self::String { value }
            | Self::Text { value, .. }
            | Self::Datetime { value }
            | Self::Email { value }
            | Self::Telephone { value } => Value::String(value.clone()),
            Self::Link { uri, .. } | Self::File { uri } | Self::Image { uri, .. } => {
                Value::String(uri.clone())
            }
            Self::Integer { value } => Value::from(*value),
            Self::Decimal { value } => match value.trim().parse::<f64>().ok().and_then(Number::from_f64) {
                Some(number) => Value::Number(number),
                None => Value::String(value.clone()),
            },
            Self::Float { value } => Number::from_f64(*value).map_or(Value::Null, Value::Number),
            Self::Boolean { value } => Value::Bool(*value),
            Self::DateRange { start, .. } => Value::String(start.clone()),
            Self::EntityReference { target } => json!({
                "target_type": target.entity_type,
                "target_id": target.id,
            }),
            Self::Language { langcode } => Value::String(langcode.clone()),
        }
    }
}

/// How many values a field may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    Limited(u32),
    Unlimited,
}

impl Cardinality {
    pub fn is_single(self) -> bool {
        self == Self::Limited(1)
    }

    pub fn is_multiple(self) -> bool {
        !self.is_single()
    }
}

impl Default for Cardinality {
    fn default() -> Self {
        Self::Limited(1)
    }
}

/// Display settings of a numeric field, mirrored from its default formatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    /// Digits after the decimal separator.
    #[serde(default)]
    pub scale: u32,
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: String,
    #[serde(default)]
    pub thousand_separator: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
}

fn default_decimal_separator() -> String {
    ".".to_string()
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            scale: 0,
            decimal_separator: default_decimal_separator(),
            thousand_separator: String::new(),
            prefix: String::new(),
            suffix: String::new(),
        }
    }
}

impl NumberFormat {
    /// Renders `value` the way the field's display would.
    pub fn format(&self, value: f64) -> String {
        let fixed = format!("{:.*}", self.scale as usize, value.abs());
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (fixed.as_str(), None),
        };

        let mut grouped = String::new();
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push_str(&self.thousand_separator);
            }
            grouped.push(ch);
        }

        let mut out = String::new();
        out.push_str(&self.prefix);
        if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
            out.push('-');
        }
        out.push_str(&grouped);
        if let Some(frac) = frac_part {
            out.push_str(&self.decimal_separator);
            out.push_str(frac);
        }
        out.push_str(&self.suffix);
        out
    }
}

/// Storage definition of a field on an entity bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub storage: StorageKind,
    #[serde(default)]
    pub cardinality: Cardinality,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_format: Option<NumberFormat>,
}

impl FieldDefinition {
    /// A single-valued field of the given kind.
    pub fn single(storage: StorageKind) -> Self {
        Self {
            storage,
            cardinality: Cardinality::Limited(1),
            number_format: None,
        }
    }

    /// An unlimited-cardinality field of the given kind.
    pub fn unlimited(storage: StorageKind) -> Self {
        Self {
            storage,
            cardinality: Cardinality::Unlimited,
            number_format: None,
        }
    }

    /// Attaches a display format (numeric fields only).
    pub fn with_number_format(mut self, format: NumberFormat) -> Self {
        self.number_format = Some(format);
        self
    }
}

//! Property value resolution: one stored field value → one JSON-LD value.

use crate::TextFormatRule;
use crate::links::absolute_url;
use crate::mapper::{BuildState, EntityMapper, MapOptions};
use crate::text::sanitize;
use schemadot_model::{EntityKey, FieldDefinition, FieldValue};
use serde_json::{Value, json};
use tracing::trace;

/// Language code meaning "not specified".
pub const LANGCODE_NOT_SPECIFIED: &str = "und";

/// Schema.org type emitted for date ranges on schedule properties.
pub const SCHEDULE_TYPE: &str = "Schedule";

/// Where a value being resolved comes from.
#[derive(Debug, Clone, Copy)]
pub struct ValueContext<'a> {
    pub schema_type: &'a str,
    pub field_name: &'a str,
    pub property: &'a str,
    pub definition: &'a FieldDefinition,
}

impl EntityMapper<'_> {
    /// Converts a single field value. `None` means the value is omitted.
    ///
    /// Never fails: kinds without a dedicated rule pass their raw value
    /// through. A value with no JSON representation (a non-finite float)
    /// is omitted, never emitted as `null`.
    pub fn resolve_value(
        &self,
        value: &FieldValue,
        context: &ValueContext<'_>,
        options: MapOptions,
        state: &mut BuildState,
    ) -> Option<Value> {
        self.resolve_kind(value, context, options, state)
            .filter(|resolved| !resolved.is_null())
    }

    fn resolve_kind(
        &self,
        value: &FieldValue,
        context: &ValueContext<'_>,
        options: MapOptions,
        state: &mut BuildState,
    ) -> Option<Value> {
        match value {
            FieldValue::EntityReference { target } => self.resolve_reference(target, options, state),
            FieldValue::Text { value, format } => Some(Value::String(self.resolve_text(value, format.as_deref()))),
            FieldValue::Link { uri, .. } => Some(Value::String(absolute_url(&self.config.base_url, uri))),
            FieldValue::Image { uri, .. } => {
                let url = self
                    .config
                    .image_style
                    .as_deref()
                    .and_then(|style| self.urls.image_style_url(uri, style))
                    .unwrap_or_else(|| self.urls.file_url(uri));
                Some(Value::String(absolute_url(&self.config.base_url, &url)))
            }
            FieldValue::File { uri } => Some(Value::String(absolute_url(
                &self.config.base_url,
                &self.urls.file_url(uri),
            ))),
            FieldValue::DateRange { start, end } => Some(self.resolve_date_range(start, end.as_deref(), context)),
            FieldValue::Language { langcode } if langcode == LANGCODE_NOT_SPECIFIED => None,
            v if v.kind().is_numeric() => Some(resolve_number(v, context.definition)),
            v => Some(v.raw()),
        }
    }

    fn resolve_reference(&self, target: &EntityKey, options: MapOptions, state: &mut BuildState) -> Option<Value> {
        let Some(entity) = self.entities.load(target) else {
            trace!(target = %target, "Referenced entity not found");
            return None;
        };
        if !entity.is_readable() {
            return None;
        }

        let addressable = entity.canonical_url().is_some();
        if addressable && !options.embed_references {
            trace!(target = %target, "Addressable reference omitted");
            return None;
        }

        // Embedding an addressable entity must not embed its own addressable
        // references in turn.
        let nested = MapOptions {
            include_identifiers: false,
            embed_references: options.embed_references && !addressable,
        };
        let data = self.map_entity_with_state(entity.as_ref(), nested, state);
        if data.is_empty() { None } else { Some(Value::Object(data)) }
    }

    fn resolve_text(&self, value: &str, format: Option<&str>) -> String {
        let Some(format) = format else {
            return value.to_string();
        };
        match self.config.text_formats.get(format) {
            Some(rule) => sanitize(value, rule),
            // Unknown formats are treated as plain text.
            None => sanitize(value, &TextFormatRule::default()),
        }
    }

    fn resolve_date_range(&self, start: &str, end: Option<&str>, context: &ValueContext<'_>) -> Value {
        let is_schedule = self
            .vocabulary
            .property_ranges(context.property)
            .iter()
            .any(|r| r == SCHEDULE_TYPE);
        if !is_schedule {
            return Value::String(start.to_string());
        }
        let mut schedule = json!({
            "@type": SCHEDULE_TYPE,
            "startDate": start,
        });
        if let Some(end) = end {
            schedule["endDate"] = Value::String(end.to_string());
        }
        schedule
    }
}

/// Numbers go through the field's display format when it has one.
fn resolve_number(value: &FieldValue, definition: &FieldDefinition) -> Value {
    match (definition.number_format.as_ref(), value.as_f64().filter(|n| n.is_finite())) {
        (Some(format), Some(number)) => Value::String(format.format(number)),
        _ => value.raw(),
    }
}

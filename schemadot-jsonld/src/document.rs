//! Structured documents and their normalization.

use serde_json::{Map, Value};

/// A JSON-LD node: an insertion-ordered map of properties.
pub type Document = Map<String, Value>;

/// Whether the document carries a `@type`. Untyped documents are empty.
pub fn is_typed(document: &Document) -> bool {
    document.get("@type").is_some_and(|t| !t.is_null())
}

/// The `@type` of a value, when it is a typed node with a single type name.
pub fn type_name(value: &Value) -> Option<&str> {
    value.as_object()?.get("@type")?.as_str()
}

/// Orders properties: `@` keys first (relative order kept), then the keys
/// listed in `order` (list order), then everything else alphabetically.
pub fn sort_properties(document: Document, order: &[String]) -> Document {
    let mut definitions = Vec::new();
    let mut ordered: Vec<Option<(String, Value)>> = vec![None; order.len()];
    let mut rest = Vec::new();

    for (key, value) in document {
        if key.starts_with('@') {
            definitions.push((key, value));
        } else if let Some(index) = order.iter().position(|o| *o == key) {
            ordered[index] = Some((key, value));
        } else {
            rest.push((key, value));
        }
    }
    rest.sort_by(|a, b| a.0.cmp(&b.0));

    definitions
        .into_iter()
        .chain(ordered.into_iter().flatten())
        .chain(rest)
        .collect()
}

/// Adds `value` under `property`. An existing value is combined with the new
/// one into a list rather than overwritten.
pub fn merge_property(document: &mut Document, property: &str, value: Value) {
    match document.get_mut(property) {
        None => {
            document.insert(property.to_string(), value);
        }
        Some(Value::Array(existing)) => match value {
            Value::Array(items) => existing.extend(items),
            item => existing.push(item),
        },
        Some(existing) => {
            let first = existing.take();
            let mut items = vec![first];
            match value {
                Value::Array(more) => items.extend(more),
                item => items.push(item),
            }
            *existing = Value::Array(items);
        }
    }
}

/// Hoists every typed node out of `value` into a flat list.
///
/// Typed nodes are taken whole (their own nested nodes stay inside them);
/// untyped objects and arrays are searched for typed nodes. Each hoisted
/// node gets `@context` as its first key.
pub fn flatten(value: Value, context: &str) -> Vec<Document> {
    let mut out = Vec::new();
    collect_typed(value, context, &mut out);
    out
}

fn collect_typed(value: Value, context: &str, out: &mut Vec<Document>) {
    match value {
        Value::Object(mut map) if is_typed(&map) => {
            let context_value = map
                .shift_remove("@context")
                .unwrap_or_else(|| Value::String(context.to_string()));
            let mut node = Document::with_capacity(map.len() + 1);
            node.insert("@context".to_string(), context_value);
            node.extend(map);
            out.push(node);
        }
        Value::Object(map) => {
            for (_, child) in map {
                collect_typed(child, context, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_typed(item, context, out);
            }
        }
        _ => {}
    }
}

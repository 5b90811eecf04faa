/// Schema.org data types. Values whose range is one of these are literals,
/// never typed nodes.
pub const DATA_TYPES: &[&str] = &[
    "DataType", "Text", "URL", "CssSelectorType", "XPathType", "PronounceableText",
    "Number", "Integer", "Float", "Boolean", "Date", "DateTime", "Time",
];

/// Answers questions about the Schema.org type hierarchy.
pub trait SchemaTypeManager: Send + Sync {
    /// The type followed by its ancestors, most specific first, without
    /// duplicates. Unknown types yield just themselves.
    fn ancestors(&self, type_name: &str) -> Vec<String>;

    /// Types a property's values may take, in declared order.
    fn property_ranges(&self, property: &str) -> Vec<String>;

    /// The type a bare value of this property is assumed to be.
    fn property_default_range(&self, property: &str) -> Option<String>;

    /// Whether the type, or one of its ancestors, declares the property.
    fn has_property(&self, type_name: &str, property: &str) -> bool;

    fn is_data_type(&self, type_name: &str) -> bool {
        DATA_TYPES.contains(&type_name)
            || self.ancestors(type_name).iter().any(|t| t == "DataType")
    }

    /// Enumerations (e.g. `ItemAvailability`) take member URLs, not nodes.
    fn is_enumeration(&self, type_name: &str) -> bool {
        self.ancestors(type_name).iter().any(|t| t == "Enumeration")
    }

    /// Whether `type_name` is `ancestor` or descends from it.
    fn is_subtype_of(&self, type_name: &str, ancestor: &str) -> bool {
        self.ancestors(type_name).iter().any(|t| t == ancestor)
    }
}

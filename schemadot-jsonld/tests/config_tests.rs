use pretty_assertions::assert_eq;
use schemadot_jsonld::{CardinalityPolicy, IdentifierConfig, JsonLdConfig, JsonLdError, SharedConfig};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// ── Defaults ─────────────────────────────────────────────────────

#[test]
fn default_settings() {
    let config = JsonLdConfig::default();
    assert_eq!(config.context, "https://schema.org");
    assert!(config.include_identifiers);
    assert!(config.embed_references);
    assert_eq!(config.cardinality, CardinalityPolicy::Collapse);
    assert_eq!(config.type_defaults["Offer"]["priceCurrency"], "USD");
    assert_eq!(config.main_properties["Answer"], "text");
    assert_eq!(config.main_properties["StructuredValue"], "");
    assert!(config.text_formats["full_html"].keep_markup);
    assert!(config.validate().is_ok());
}

#[test]
fn uuid_is_the_default_identifier() {
    let config = JsonLdConfig::default();
    assert_eq!(config.identifier_fields(), vec![IdentifierConfig::uuid()]);
}

// ── Parsing ──────────────────────────────────────────────────────

#[test]
fn toml_overrides_only_what_it_names() {
    let config = JsonLdConfig::from_toml_str(
        r#"
        base_url = "https://example.com"
        include_identifiers = false
        cardinality = "preserve"
        list_properties = ["keywords"]
        image_style = "large"

        [[identifiers]]
        field_name = "isbn"
        property_id = "isbn"

        [type_defaults.Offer]
        priceCurrency = "EUR"

        [type_property_ranges]
        "Book--author" = "Organization"
        "#,
    )
    .unwrap();

    assert_eq!(config.base_url, "https://example.com");
    assert!(!config.include_identifiers);
    assert_eq!(config.cardinality, CardinalityPolicy::Preserve);
    assert_eq!(config.list_properties, vec!["keywords"]);
    assert_eq!(config.image_style.as_deref(), Some("large"));
    assert_eq!(config.identifier_fields()[0].property_id, "isbn");
    assert_eq!(config.type_defaults["Offer"]["priceCurrency"], "EUR");
    assert_eq!(config.type_property_ranges["Book--author"], "Organization");
    // Untouched tables keep their defaults.
    assert_eq!(config.context, "https://schema.org");
    assert_eq!(config.main_properties["Offer"], "price");
}

#[test]
fn json_settings_parse() {
    let config = JsonLdConfig::from_json_str(
        r#"{"context": "https://schema.org/", "property_order": ["headline", "name"]}"#,
    )
    .unwrap();
    assert_eq!(config.context, "https://schema.org/");
    assert_eq!(config.property_order, vec!["headline", "name"]);
}

#[test]
fn text_format_rules_parse() {
    let config = JsonLdConfig::from_toml_str(
        r#"
        [text_formats.minimal]
        allowed_tags = ["p"]
        "#,
    )
    .unwrap();
    let rule = &config.text_formats["minimal"];
    assert_eq!(rule.allowed_tags, vec!["p"]);
    assert!(!rule.keep_markup);
    assert_eq!(rule.allowed_attributes, vec!["href", "title", "cite", "lang", "dir"]);
}

// ── Validation ───────────────────────────────────────────────────

#[test]
fn invalid_base_url_is_rejected() {
    let err = JsonLdConfig::from_toml_str(r#"base_url = "not a url""#).unwrap_err();
    assert!(matches!(err, JsonLdError::InvalidBaseUrl(_)));
}

#[test]
fn non_base_url_is_rejected() {
    let err = JsonLdConfig::from_toml_str(r#"base_url = "mailto:web@example.com""#).unwrap_err();
    assert!(matches!(err, JsonLdError::InvalidConfig(_)));
}

#[test]
fn empty_context_is_rejected() {
    let err = JsonLdConfig::from_json_str(r#"{"context": ""}"#).unwrap_err();
    assert!(matches!(err, JsonLdError::InvalidConfig(_)));
}

#[test]
fn malformed_type_property_key_is_rejected() {
    let err = JsonLdConfig::from_toml_str(
        r#"
        [type_property_ranges]
        author = "Person"
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, JsonLdError::InvalidConfig(msg) if msg.contains("author")));
}

#[test]
fn wrongly_typed_value_is_a_parse_error() {
    let err = JsonLdConfig::from_toml_str("include_identifiers = \"yes\"").unwrap_err();
    assert!(matches!(err, JsonLdError::TomlDeserialize(_)));
}

// ── Loading from disk ────────────────────────────────────────────

#[test]
fn load_toml_file() {
    let file = temp_file(".toml", "embed_references = false\n");
    let config = JsonLdConfig::try_load_from(file.path()).unwrap();
    assert!(!config.embed_references);
}

#[test]
fn load_json_file() {
    let file = temp_file(".json", r#"{"embed_references": false}"#);
    let config = JsonLdConfig::try_load_from(file.path()).unwrap();
    assert!(!config.embed_references);
}

#[test]
fn missing_file_is_an_error_for_try_load() {
    let dir = tempfile::tempdir().unwrap();
    let err = JsonLdConfig::try_load_from(&dir.path().join("jsonld.toml")).unwrap_err();
    assert!(matches!(err, JsonLdError::Io(_)));
}

#[test]
fn load_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        JsonLdConfig::load_from(&dir.path().join("jsonld.toml")),
        JsonLdConfig::default()
    );

    let broken = temp_file(".toml", "base_url = [");
    assert_eq!(JsonLdConfig::load_from(broken.path()), JsonLdConfig::default());
}

// ── Shared settings ──────────────────────────────────────────────

#[test]
fn snapshots_survive_replacement() {
    let shared = SharedConfig::new(JsonLdConfig::default());
    let before = shared.snapshot();

    shared.replace(JsonLdConfig {
        include_identifiers: false,
        ..JsonLdConfig::default()
    });

    assert!(before.include_identifiers);
    assert!(!shared.snapshot().include_identifiers);
}

#[test]
fn clones_share_the_same_settings() {
    let shared = SharedConfig::from(JsonLdConfig::default());
    let other = shared.clone();
    other.replace(JsonLdConfig {
        embed_references: false,
        ..JsonLdConfig::default()
    });
    assert!(!shared.snapshot().embed_references);
}

#[test]
fn snapshots_are_shared_not_copied() {
    let shared = SharedConfig::default();
    assert!(Arc::ptr_eq(&shared.snapshot(), &shared.snapshot()));
}

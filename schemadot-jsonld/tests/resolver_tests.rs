mod common;

use common::*;
use pretty_assertions::assert_eq;
use schemadot_jsonld::{BuildState, MapOptions, ValueContext};
use schemadot_model::{Entity, FieldDefinition, FieldValue, NumberFormat, StorageKind};
use serde_json::{Value, json};

fn resolve(fixture: &Fixture, value: FieldValue, definition: &FieldDefinition, property: &str) -> Option<Value> {
    let context = ValueContext {
        schema_type: "Thing",
        field_name: "field",
        property,
        definition,
    };
    fixture
        .mapper()
        .resolve_value(&value, &context, MapOptions::default(), &mut BuildState::new())
}

// ── Links and files ──────────────────────────────────────────────

#[test]
fn internal_link_becomes_absolute() {
    let fixture = Fixture::new();
    let result = resolve(&fixture, FieldValue::link("internal:/about"), &single(StorageKind::Link), "url");
    assert_eq!(result, Some(json!("http://localhost/about")));
}

#[test]
fn entity_link_becomes_absolute() {
    let fixture = Fixture::new();
    let result = resolve(&fixture, FieldValue::link("entity:node/7"), &single(StorageKind::Link), "url");
    assert_eq!(result, Some(json!("http://localhost/node/7")));
}

#[test]
fn external_link_is_unchanged() {
    let fixture = Fixture::new();
    let result = resolve(
        &fixture,
        FieldValue::link("https://rust-lang.org/learn"),
        &single(StorageKind::Link),
        "sameAs",
    );
    assert_eq!(result, Some(json!("https://rust-lang.org/learn")));
}

#[test]
fn relative_link_uses_configured_base_url() {
    let mut fixture = Fixture::new();
    fixture.config.base_url = "https://example.com/site/".to_string();
    let result = resolve(&fixture, FieldValue::link("contact"), &single(StorageKind::Link), "url");
    assert_eq!(result, Some(json!("https://example.com/site/contact")));
}

#[test]
fn image_resolves_to_public_file_url() {
    let fixture = Fixture::new();
    let result = resolve(&fixture, FieldValue::image("public://photo.jpg"), &single(StorageKind::Image), "image");
    assert_eq!(result, Some(json!("http://localhost/sites/default/files/photo.jpg")));
}

#[test]
fn image_uses_configured_style() {
    let mut fixture = Fixture::new();
    fixture.config.image_style = Some("large".to_string());
    let result = resolve(&fixture, FieldValue::image("public://photo.jpg"), &single(StorageKind::Image), "image");
    assert_eq!(
        result,
        Some(json!("http://localhost/sites/default/files/styles/large/public/photo.jpg"))
    );
}

#[test]
fn image_style_falls_back_to_original_for_remote_files() {
    let mut fixture = Fixture::new();
    fixture.config.image_style = Some("large".to_string());
    let result = resolve(
        &fixture,
        FieldValue::image("https://cdn.example.com/photo.jpg"),
        &single(StorageKind::Image),
        "image",
    );
    assert_eq!(result, Some(json!("https://cdn.example.com/photo.jpg")));
}

#[test]
fn file_resolves_to_public_file_url() {
    let fixture = Fixture::new();
    let result = resolve(
        &fixture,
        FieldValue::File {
            uri: "public://docs/manual.pdf".to_string(),
        },
        &single(StorageKind::File),
        "contentUrl",
    );
    assert_eq!(result, Some(json!("http://localhost/sites/default/files/docs/manual.pdf")));
}

// ── Dates and languages ──────────────────────────────────────────

#[test]
fn date_range_on_schedule_property_becomes_schedule() {
    let fixture = Fixture::new();
    let result = resolve(
        &fixture,
        FieldValue::date_range("2025-03-01", Some("2025-03-31")),
        &single(StorageKind::DateRange),
        "eventSchedule",
    );
    assert_eq!(
        result,
        Some(json!({"@type": "Schedule", "startDate": "2025-03-01", "endDate": "2025-03-31"}))
    );
}

#[test]
fn open_date_range_schedule_has_no_end() {
    let fixture = Fixture::new();
    let result = resolve(
        &fixture,
        FieldValue::date_range("2025-03-01", None),
        &single(StorageKind::DateRange),
        "eventSchedule",
    );
    assert_eq!(result, Some(json!({"@type": "Schedule", "startDate": "2025-03-01"})));
}

#[test]
fn date_range_elsewhere_yields_start_date() {
    let fixture = Fixture::new();
    let result = resolve(
        &fixture,
        FieldValue::date_range("2025-03-01", Some("2025-03-31")),
        &single(StorageKind::DateRange),
        "startDate",
    );
    assert_eq!(result, Some(json!("2025-03-01")));
}

#[test]
fn unspecified_language_is_omitted() {
    let fixture = Fixture::new();
    let definition = single(StorageKind::Language);
    assert_eq!(resolve(&fixture, FieldValue::language("und"), &definition, "inLanguage"), None);
    assert_eq!(
        resolve(&fixture, FieldValue::language("en"), &definition, "inLanguage"),
        Some(json!("en"))
    );
}

// ── Numbers ──────────────────────────────────────────────────────

#[test]
fn decimal_without_format_is_a_number() {
    let fixture = Fixture::new();
    let result = resolve(&fixture, FieldValue::decimal("100.00"), &single(StorageKind::Decimal), "price");
    assert_eq!(result, Some(json!(100.0)));
}

#[test]
fn decimal_with_format_is_rendered_like_the_display() {
    let fixture = Fixture::new();
    let definition = single(StorageKind::Decimal).with_number_format(NumberFormat {
        scale: 2,
        thousand_separator: ",".to_string(),
        ..NumberFormat::default()
    });
    let result = resolve(&fixture, FieldValue::decimal("1234.5"), &definition, "price");
    assert_eq!(result, Some(json!("1,234.50")));
}

#[test]
fn integer_with_prefix_and_suffix() {
    let fixture = Fixture::new();
    let definition = single(StorageKind::Integer).with_number_format(NumberFormat {
        prefix: "~".to_string(),
        suffix: " min".to_string(),
        ..NumberFormat::default()
    });
    let result = resolve(&fixture, FieldValue::Integer { value: 45 }, &definition, "totalTime");
    assert_eq!(result, Some(json!("~45 min")));
}

#[test]
fn non_finite_float_is_omitted() {
    let fixture = Fixture::new();
    let nan = FieldValue::Float { value: f64::NAN };
    assert_eq!(resolve(&fixture, nan, &single(StorageKind::Float), "value"), None);

    let definition = single(StorageKind::Float).with_number_format(NumberFormat::default());
    let infinite = FieldValue::Float { value: f64::INFINITY };
    assert_eq!(resolve(&fixture, infinite, &definition, "value"), None);
}

#[test]
fn other_kinds_pass_raw_values_through() {
    let fixture = Fixture::new();
    assert_eq!(
        resolve(&fixture, FieldValue::Boolean { value: true }, &single(StorageKind::Boolean), "value"),
        Some(json!(true))
    );
    assert_eq!(
        resolve(
            &fixture,
            FieldValue::Email {
                value: "ada@example.com".to_string()
            },
            &single(StorageKind::Email),
            "email"
        ),
        Some(json!("ada@example.com"))
    );
    assert_eq!(
        resolve(
            &fixture,
            FieldValue::Datetime {
                value: "2025-01-01T10:00:00Z".to_string()
            },
            &single(StorageKind::Datetime),
            "dateCreated"
        ),
        Some(json!("2025-01-01T10:00:00Z"))
    );
}

// ── Text ─────────────────────────────────────────────────────────

#[test]
fn unformatted_text_is_unchanged() {
    let fixture = Fixture::new();
    let result = resolve(&fixture, FieldValue::text("a <b>c</b>", None), &single(StorageKind::Text), "text");
    assert_eq!(result, Some(json!("a <b>c</b>")));
}

#[test]
fn basic_html_keeps_allowed_tags() {
    let fixture = Fixture::new();
    let result = resolve(
        &fixture,
        FieldValue::text("<p>Hi <span>there</span></p><script>x()</script>", Some("basic_html")),
        &single(StorageKind::Text),
        "text",
    );
    assert_eq!(result, Some(json!("<p>Hi there</p>")));
}

#[test]
fn basic_html_drops_handlers_and_script_urls() {
    let fixture = Fixture::new();
    let result = resolve(
        &fixture,
        FieldValue::text(
            r#"<strong onmouseover="steal()">x</strong><a href="javascript:evil()">y</a>"#,
            Some("basic_html"),
        ),
        &single(StorageKind::Text),
        "text",
    );
    assert_eq!(result, Some(json!("<strong>x</strong><a>y</a>")));
}

#[test]
fn full_html_never_reassembles_split_scripts() {
    let fixture = Fixture::new();
    let result = resolve(
        &fixture,
        FieldValue::text("<p>Hi</p><scr<script></script>ipt>alert(1)</script>", Some("full_html")),
        &single(StorageKind::Text),
        "text",
    );
    let text = result.unwrap();
    let text = text.as_str().unwrap();
    assert!(text.starts_with("<p>Hi</p>"), "{text}");
    assert!(!text.contains("<script"), "{text}");
}

#[test]
fn plain_text_format_decodes_entities() {
    let fixture = Fixture::new();
    let result = resolve(
        &fixture,
        FieldValue::text("<p>Fish &amp; chips</p>", Some("plain_text")),
        &single(StorageKind::Text),
        "text",
    );
    assert_eq!(result, Some(json!("Fish & chips")));
}

#[test]
fn unknown_text_format_is_treated_as_plain_text() {
    let fixture = Fixture::new();
    let result = resolve(
        &fixture,
        FieldValue::text("<p>Hi <em>there</em></p>", Some("mystery_format")),
        &single(StorageKind::Text),
        "text",
    );
    assert_eq!(result, Some(json!("Hi there")));
}

// ── References ───────────────────────────────────────────────────

#[test]
fn missing_reference_is_omitted() {
    let mut fixture = Fixture::new();
    fixture.map(page_mapping());
    let result = resolve(
        &fixture,
        FieldValue::reference("node", "404"),
        &single(StorageKind::EntityReference),
        "subjectOf",
    );
    assert_eq!(result, None);
}

#[test]
fn reference_to_unmapped_entity_is_omitted() {
    let mut fixture = Fixture::new();
    fixture.add(Entity::new("taxonomy_term", "tags", "5"));
    let result = resolve(
        &fixture,
        FieldValue::reference("taxonomy_term", "5"),
        &single(StorageKind::EntityReference),
        "about",
    );
    assert_eq!(result, None);
}

#[test]
fn reference_resolves_to_nested_node() {
    let mut fixture = Fixture::new();
    fixture.map(page_mapping());
    fixture.add(page("2", "Two"));
    let result = resolve(
        &fixture,
        FieldValue::reference("node", "2"),
        &single(StorageKind::EntityReference),
        "subjectOf",
    );
    assert_eq!(result, Some(json!({"@type": "CreativeWork", "name": "Two"})));
}

//! Formatting templates loaded from a TOML resource bundle

use std::path::Path;

use pretty_assertions::assert_eq;
use stylable_string::{
    args, format_resource, format_resource_default, AnnotatedText, ErrorKind, FormatConfig,
    FormatError, ResourceBundle, ResourceSource, StyleResolver, NO_STYLE_TABLE,
};

fn bundle() -> ResourceBundle {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/messages.toml");
    ResourceBundle::from_file(&path).expect("fixture bundle should load")
}

/// The text followed by one line per annotation
fn listing(text: &AnnotatedText) -> String {
    let mut out = text.to_string();
    for annotation in text.annotations() {
        out.push('\n');
        out.push_str(&annotation.to_string());
    }
    out
}

#[test]
fn test_bundle_metadata() {
    let bundle = bundle();
    assert_eq!(bundle.name.as_deref(), Some("messages"));
    assert_eq!(bundle.namespace.as_deref(), Some("stylable_string"));
    assert_eq!(
        bundle.resolve_style_table("price"),
        Some(vec!["2|Amount".to_string()])
    );
}

#[test]
fn test_inbox_message() {
    let bundle = bundle();
    let text = format_resource_default(&bundle, &bundle, "inbox", Some("inbox"), &args!["Alice", 3])
        .unwrap();

    insta::assert_snapshot!(listing(&text), @r"
    Hello Alice, you have 3 new messages
    6..11 size 18px (exclusive-inclusive)
    6..11 color #ff2196f3 (exclusive-inclusive)
    22..23 size 24px (exclusive-inclusive)
    22..23 color #ffff0000 (exclusive-inclusive)
    ");
}

#[test]
fn test_grouped_price() {
    let bundle = bundle();
    let text = format_resource_default(
        &bundle,
        &bundle,
        "price",
        Some("price"),
        &args!["Coffee", 1234.5],
    )
    .unwrap();

    insta::assert_snapshot!(listing(&text), @r"
    Coffee costs 1,234.50 EUR
    13..21 color #ff4caf50 (exclusive-inclusive)
    ");
}

#[test]
fn test_percent_takes_an_argument_position_by_default() {
    let bundle = bundle();
    let text = format_resource_default(
        &bundle,
        &bundle,
        "share",
        Some("share"),
        &args!["50", "skipped", "total"],
    )
    .unwrap();

    insta::assert_snapshot!(listing(&text), @r"
    50% of total
    0..2 color #ff4caf50 (exclusive-inclusive)
    2..3 size 24px (exclusive-inclusive)
    ");
}

#[test]
fn test_percent_without_argument_position() {
    let bundle = bundle();
    let config = FormatConfig::default().with_percent_consumes_argument(false);
    let text = format_resource(
        &bundle,
        &bundle,
        "share",
        Some("share"),
        &args!["50", "total"],
        &config,
    )
    .unwrap();

    insta::assert_snapshot!(listing(&text), @r"
    50% of total
    0..2 color #ff4caf50 (exclusive-inclusive)
    7..12 size 24px (exclusive-inclusive)
    ");
}

#[test]
fn test_unknown_style_leaves_text_unstyled() {
    let bundle = bundle();
    let text = format_resource_default(&bundle, &bundle, "inbox", Some("unknown"), &args!["Bob", 1])
        .unwrap();
    assert_eq!(text.as_str(), "Hello Bob, you have 1 new messages");
    assert!(text.annotations().is_empty());
}

#[test]
fn test_styles_are_scoped_to_bundle_namespace() {
    let bundle = bundle();
    assert!(bundle.resolve_style("Name", "style", "stylable_string").is_some());
    assert!(bundle.resolve_style("Name", "style", "elsewhere").is_none());

    let config = FormatConfig::default().with_style_namespace("elsewhere");
    let text = format_resource(&bundle, &bundle, "inbox", Some("inbox"), &args!["Bob", 1], &config)
        .unwrap();
    assert!(text.annotations().is_empty());
}

#[test]
fn test_missing_resources() {
    let bundle = bundle();

    let err = format_resource_default(&bundle, &bundle, "inbx", NO_STYLE_TABLE, &args!["x"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(bundle.similar_templates("inbx"), vec!["inbox".to_string()]);

    let err = format_resource_default(&bundle, &bundle, "inbox", Some("inboxx"), &args!["x", 1])
        .unwrap_err();
    assert!(matches!(err, FormatError::StyleTableNotFound { ref id } if id == "inboxx"));
}

#[test]
fn test_malformed_table() {
    let bundle = bundle();
    let err = format_resource_default(&bundle, &bundle, "inbox", Some("malformed"), &args!["x", 1])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedStyleRow);
}

#[test]
fn test_out_of_range_report_points_at_template() {
    let bundle = bundle();
    let err = format_resource_default(&bundle, &bundle, "broken_index", NO_STYLE_TABLE, &args!["a", "b"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentIndexOutOfRange);
    assert_eq!(err.span(), Some(&(9..13)));

    let template = bundle.resolve_template("broken_index").unwrap();
    let report = err.report(&template, "broken_index");
    assert!(report.contains("broken_index"));
    assert!(report.contains("argument 3 requested but only 2 supplied"));
}

#[test]
fn test_missing_file() {
    let err = ResourceBundle::from_file(Path::new("does/not/exist.toml")).unwrap_err();
    assert!(err.to_string().starts_with("Failed to read resource file"));
}

//! Golden Tests for the Generation Pipeline
//!
//! Runs the fixture schema through the fixture templates and checks the
//! generated C++ and the failure ordering of the pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use cppgen::render::render_to_string;
use cppgen::{run, GenError, Options, SchemaDocument, TemplateSet};
use tempfile::TempDir;

fn fixtures_path() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").leak()
}

fn fixture_options(output: PathBuf) -> Options {
    let mut options = Options::new(fixtures_path().join("itch.json"));
    options.template_dir = fixtures_path().join("template");
    options.output = Some(output);
    options
}

// =============================================================================
// Rendering Tests
// =============================================================================

#[test]
fn test_itch_fixture_renders() {
    let templates = TemplateSet::load(fixtures_path().join("template")).unwrap();
    let document = SchemaDocument::from_path(fixtures_path().join("itch.json")).unwrap();
    let template = templates.lookup("cpp_file").unwrap();

    let out = render_to_string(&template, &document).unwrap();

    assert!(out.starts_with("// Generated by cppgen - DO NOT EDIT\n"));
    assert!(out.contains("namespace itch {"));
    assert!(out.contains("inline namespace v50 {"));
    assert!(out.contains("constexpr std::uint32_t price_scale = 10000;"));
    assert!(out.contains("constexpr std::size_t max_stock_len = 8;"));
    assert!(out.contains("enum class system_event_code : char"));
    assert!(out.contains("    start_of_messages = 'O',"));
    assert!(out.contains("struct __attribute__((packed)) add_order"));
    assert!(out.contains("    std::uint64_t order_reference_number;"));
    assert!(out.contains("static_assert(sizeof(add_order) == 2 + 8 + 4);"));
    assert!(out.contains("struct order_delete"));
    assert!(!out.contains("sizeof(order_delete)"));
    assert!(out.contains("} // namespace itch"));
}

#[test]
fn test_shipped_template_matches_fixture() {
    // The default template directory must stay loadable
    let shipped = Path::new(env!("CARGO_MANIFEST_DIR")).join("template");
    let templates = TemplateSet::load(&shipped).unwrap();
    assert_eq!(templates.names(), vec!["banner", "cpp_file"]);

    let document = SchemaDocument::from_path(fixtures_path().join("itch.json")).unwrap();
    let out = render_to_string(&templates.lookup("cpp_file").unwrap(), &document).unwrap();
    assert!(out.contains("namespace itch {"));
}

#[test]
fn test_minimal_document_end_to_end() {
    let dir = TempDir::new().unwrap();
    let templates = dir.path().join("template");
    fs::create_dir(&templates).unwrap();
    fs::write(
        templates.join("cpp_file.tmpl"),
        "namespace {{ namespace }} { const {{ constants.0.definitions.0.datatype }} \
         {{ constants.0.definitions.0.name }} = {{ constants.0.definitions.0.value }}; }",
    )
    .unwrap();
    let input = dir.path().join("in.json");
    fs::write(
        &input,
        r#"{"namespace":"ns","constants":[{"definitions":[{"name":"X","datatype":"int","value":"1"}]}],"enums":[],"structs":[]}"#,
    )
    .unwrap();
    let output = dir.path().join("out.cpp");

    let mut options = Options::new(&input);
    options.template_dir = templates;
    options.output = Some(output.clone());
    run(&options).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written, "namespace ns { const int X = 1; }");
    assert!(written.contains("namespace ns"));
    assert!(written.contains("X = 1"));
}

// =============================================================================
// Pipeline Tests
// =============================================================================

#[test]
fn test_output_file_holds_exact_render() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("itch.hpp");

    run(&fixture_options(output.clone())).unwrap();

    let templates = TemplateSet::load(fixtures_path().join("template")).unwrap();
    let document = SchemaDocument::from_path(fixtures_path().join("itch.json")).unwrap();
    let expected = render_to_string(&templates.lookup("cpp_file").unwrap(), &document).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), expected);
}

#[test]
fn test_existing_output_is_truncated() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("itch.hpp");
    fs::write(&output, "x".repeat(100_000)).unwrap();

    run(&fixture_options(output.clone())).unwrap();

    assert!(!fs::read_to_string(&output).unwrap().contains("xxxx"));
}

#[test]
fn test_malformed_input_creates_no_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.json");
    fs::write(&input, r#"{"namespace": "ns", "structs": [{"packed": 1}]}"#).unwrap();
    let output = dir.path().join("out.hpp");

    let mut options = fixture_options(output.clone());
    options.input = input;

    let err = run(&options).unwrap_err();
    assert!(matches!(err, GenError::Decode(_)));
    assert_eq!(err.exit_code(), 1);
    assert!(!output.exists());
}

#[test]
fn test_missing_cpp_file_template_creates_no_output() {
    let dir = TempDir::new().unwrap();
    let templates = dir.path().join("template");
    fs::create_dir(&templates).unwrap();
    fs::write(templates.join("other.tmpl"), "{{ namespace }}").unwrap();
    let output = dir.path().join("out.hpp");

    let mut options = fixture_options(output.clone());
    options.template_dir = templates;

    let err = run(&options).unwrap_err();
    assert!(matches!(err, GenError::TemplateNotFound(ref name) if name == "cpp_file"));
    assert!(!output.exists());
}

#[test]
fn test_malformed_template_fails_before_decode() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.hpp");

    let mut options = fixture_options(output.clone());
    options.template_dir = fixtures_path().join("bad_template");
    options.input = dir.path().join("missing.json");

    let err = run(&options).unwrap_err();
    assert!(matches!(err, GenError::TemplateLoad { .. }));
    assert!(!output.exists());
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let mut options = fixture_options(dir.path().join("out.hpp"));
    options.input = dir.path().join("missing.json");

    let err = run(&options).unwrap_err();
    assert!(matches!(err, GenError::InputOpen { .. }));
}

#[test]
fn test_uncreatable_output() {
    let dir = TempDir::new().unwrap();
    let options = fixture_options(dir.path().join("no/such/dir/out.hpp"));

    let err = run(&options).unwrap_err();
    assert!(matches!(err, GenError::OutputCreate { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_render_failure_reports_render_error() {
    let dir = TempDir::new().unwrap();
    let templates = dir.path().join("template");
    fs::create_dir(&templates).unwrap();
    fs::write(templates.join("cpp_file.tmpl"), "{{ structs.0.nonexistent_field }}").unwrap();

    let mut options = fixture_options(dir.path().join("out.hpp"));
    options.template_dir = templates;

    let err = run(&options).unwrap_err();
    assert!(matches!(err, GenError::Render(_)));
    assert!(!err.to_string().contains('\n'));
}

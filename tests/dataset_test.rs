//! End-to-end build tests over temp-dir fixtures

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use abshape::application::{ApplicationError, DatasetBuilder};
use abshape::infrastructure::{render_dataset, write_dataset, SourceReader};
use abshape::Dataset;

fn write_source(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write source file");
    path
}

fn build_from(dir: &TempDir) -> Result<Dataset, ApplicationError> {
    abshape::util::testing::init_test_setup();
    let reader = SourceReader::new();
    let paths = reader.source_paths(dir.path(), &[]);
    let rows = reader.read_rows(&paths).unwrap();
    let geta = reader.read_geta(&dir.path().join("geta.txt")).unwrap();
    let extra = reader.read_extra(&dir.path().join("extra.txt")).unwrap();
    let oracle = reader.read_oracle(&dir.path().join("ob.txt")).unwrap();
    DatasetBuilder::new().build(&rows, &geta, &extra, &oracle)
}

// ============================================================
// Core pipeline
// ============================================================

#[test]
fn given_simple_rows_when_building_then_each_char_is_its_own_group() {
    let dir = TempDir::new().unwrap();
    write_source(&dir, "abstract_main.txt", "江\t⿰氵工\n河\t⿰氵可\n");

    let dataset = build_from(&dir).unwrap();

    assert_eq!(dataset.entries.len(), 2);
    assert_eq!(dataset.entries[0].ids.as_deref(), Some("⿰[氵][工]"));
    assert_eq!(dataset.entries[1].ids.as_deref(), Some("⿰[氵][可]"));
    assert_eq!(dataset.variants.len(), 2);
    assert_eq!(dataset.variants["⿰[氵][工]"], "江@");
    assert_eq!(dataset.variants["⿰[氵][可]"], "河@");
}

#[test]
fn given_component_chain_when_building_then_new_ids_fully_resolved() {
    let dir = TempDir::new().unwrap();
    write_source(
        &dir,
        "abstract_main.txt",
        "木\t⿰十八\n林\t⿰木木\n森\t⿱木林\n",
    );

    let dataset = build_from(&dir).unwrap();

    let lin = &dataset.entries[1];
    assert_eq!(lin.new_ids.as_deref(), Some("⿰⿰[十][八]⿰[十][八]"));
    let sen = &dataset.entries[2];
    assert_eq!(
        sen.new_ids.as_deref(),
        Some("⿱⿰[十][八]⿰⿰[十][八]⿰[十][八]")
    );
    // The root component needs no resolution.
    assert!(dataset.entries[0].new_ids.is_none());
}

#[test]
fn given_alias_and_exclusion_rows_when_building_then_classified() {
    let dir = TempDir::new().unwrap();
    write_source(
        &dir,
        "abstract_main.txt",
        "湧\t⿰氵勇\n涌\t=湧\n久\tX\t\tobsolete\n",
    );

    let dataset = build_from(&dir).unwrap();

    assert_eq!(dataset.entries[1].alias, Some('湧'));
    assert!(dataset.entries[1].ids.is_none());
    assert_eq!(dataset.entries[2].excluded, Some(true));
    assert_eq!(dataset.entries[2].note.as_deref(), Some("obsolete"));
    assert_eq!(dataset.variants["⿰[氵][勇]"], "湧@涌");
}

#[test]
fn given_multiple_source_files_when_building_then_rows_concatenated() {
    let dir = TempDir::new().unwrap();
    write_source(&dir, "abstract_a.txt", "江\t⿰氵工\n");
    write_source(&dir, "abstract_b.txt", "河\t⿰氵可\n");

    let dataset = build_from(&dir).unwrap();
    assert_eq!(dataset.entries.len(), 2);
    // Discovery is sorted, so abstract_a rows come first.
    assert_eq!(dataset.entries[0].character, Some('江'));
}

// ============================================================
// Determinism
// ============================================================

#[test]
fn given_identical_input_when_building_twice_then_identical_bytes() {
    let dir = TempDir::new().unwrap();
    write_source(
        &dir,
        "abstract_main.txt",
        "木\t⿰十八\n林\t⿰木木\n涌\t=湧\n湧\t⿰氵勇\n",
    );

    let first = render_dataset(&build_from(&dir).unwrap()).unwrap();
    let second = render_dataset(&build_from(&dir).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn given_permuted_rows_when_building_then_same_variant_groups() {
    let forward = TempDir::new().unwrap();
    write_source(&forward, "abstract_main.txt", "江\t⿰氵工\n河\t⿰氵可\n");
    let backward = TempDir::new().unwrap();
    write_source(&backward, "abstract_main.txt", "河\t⿰氵可\n江\t⿰氵工\n");

    let forward = build_from(&forward).unwrap();
    let backward = build_from(&backward).unwrap();

    assert_eq!(forward.variants, backward.variants);
    let forward_keys: Vec<_> = forward.variants.keys().collect();
    let backward_keys: Vec<_> = backward.variants.keys().collect();
    assert_eq!(forward_keys, backward_keys);
}

// ============================================================
// Supplementary inputs
// ============================================================

#[test]
fn given_supplementary_files_when_building_then_included() {
    let dir = TempDir::new().unwrap();
    write_source(&dir, "abstract_main.txt", "木\t⿰十八\n");
    write_source(&dir, "geta.txt", "〓一\tsee GY\n");
    write_source(&dir, "extra.txt", "⿱木木\t\tstacked\n");
    write_source(&dir, "ob.txt", "001\t𠂤\t⿱厂一\t\t\n002\t𠂥\t⿱厂一\t\t\n");

    let dataset = build_from(&dir).unwrap();

    assert_eq!(dataset.geta["〓一"], "see 《广韵》");
    let extra = dataset.entries.last().unwrap();
    assert!(extra.character.is_none());
    assert_eq!(extra.ids.as_deref(), Some("⿱⿰[十][八]⿰[十][八]"));
    assert_eq!(dataset.oracle["⿱[厂][一]"], "𠂤001@𠂥002");
}

#[test]
fn given_absent_supplementary_files_when_building_then_empty_maps() {
    let dir = TempDir::new().unwrap();
    write_source(&dir, "abstract_main.txt", "江\t⿰氵工\n");

    let dataset = build_from(&dir).unwrap();
    assert!(dataset.geta.is_empty());
    assert!(dataset.oracle.is_empty());
}

// ============================================================
// Failure modes
// ============================================================

#[test]
fn given_inconsistent_reference_when_building_then_integrity_error() {
    let dir = TempDir::new().unwrap();
    // 涌 declares two targets, stays unsubstitutable, and survives into the
    // resolved reference of 勇.
    write_source(
        &dir,
        "abstract_main.txt",
        "涌\t=湧\n涌\t=甬\n勇\t⿱甬力\t⿻涌\n",
    );

    let err = build_from(&dir).unwrap_err();
    assert!(matches!(err, ApplicationError::ReferenceIntegrity { .. }));
}

#[test]
fn given_malformed_ids_when_building_then_parse_error() {
    let dir = TempDir::new().unwrap();
    write_source(&dir, "abstract_main.txt", "江\t⿰氵\n");

    let err = build_from(&dir).unwrap_err();
    assert!(err.to_string().contains("unexpected end"));
}

// ============================================================
// Artifact output
// ============================================================

#[test]
fn given_dataset_when_writing_then_valid_json_with_expected_keys() {
    let dir = TempDir::new().unwrap();
    write_source(&dir, "abstract_main.txt", "江\t⿰氵工\t\tsee SW\n");
    let dataset = build_from(&dir).unwrap();

    let out = dir.path().join("result").join("abstract.json");
    write_dataset(&out, &dataset).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert!(value.get("entries").is_some());
    assert!(value.get("variants").is_some());
    assert!(value.get("geta").is_some());
    assert!(value.get("ob").is_some());
    assert_eq!(value["entries"][0]["char"], "江");
    assert_eq!(value["entries"][0]["note"], "see 《说文解字》");
    // Absent optional fields are omitted entirely.
    assert!(value["entries"][0].get("x").is_none());
}

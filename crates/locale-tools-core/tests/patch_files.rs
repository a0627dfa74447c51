// crates/locale-tools-core/tests/patch_files.rs
// ============================================================================
// Module: Patch Integration Tests
// Description: Plans and writes patches against temporary message directories.
// Purpose: Validate on-disk format, drift detection, and abort-before-write.
// Dependencies: locale-tools-core, tempfile
// ============================================================================

//! ## Overview
//! Covers the patcher end to end: rendered bytes, idempotence across runs,
//! skipped keys, and the guarantee that a bad file aborts before any write.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use locale_tools_core::CatalogError;
use locale_tools_core::LocaleUpdates;
use locale_tools_core::PatchError;
use locale_tools_core::TargetLocale;
use locale_tools_core::UpdateTable;
use locale_tools_core::plan_patch;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

const REFERENCE: &str = r#"{
  "rd5F5r": "Custom Plan",
  "5/hIKX": "Plan limits",
  "BdV5Om": "Websites",
  "u9xEkD": "© {year} Rybbit. All rights reserved."
}
"#;

fn fixture(locales: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("en.json"), REFERENCE).expect("write reference");
    for (name, contents) in locales {
        fs::write(dir.path().join(name), contents).expect("write locale");
    }
    dir
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).expect("read locale")
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn builtin_table_patches_and_reorders_korean() {
    let dir = fixture(&[(
        "ko.json",
        r#"{"extra":"추가","u9xEkD":"© {year} Rybbit. All rights reserved.","BdV5Om":"","rd5F5r":""}"#,
    )]);
    let plan = plan_patch(dir.path(), "en.json", &["ko.json"], &UpdateTable::builtin()).unwrap();
    plan.write_all().unwrap();

    let expected = "{\n  \"rd5F5r\": \"맞춤 플랜\",\n  \"BdV5Om\": \"웹사이트\",\n  \"u9xEkD\": \
                    \"© {year} Rybbit. 모든 권리 보유.\",\n  \"extra\": \"추가\"\n}\n";
    assert_eq!(read(dir.path(), "ko.json"), expected);

    let outcome = &plan.files()[0].outcome;
    assert_eq!(outcome.applied, vec!["rd5F5r", "BdV5Om", "u9xEkD"]);
    assert_eq!(outcome.skipped, vec!["5/hIKX", "HCYBYT"]);
}

#[test]
fn second_run_is_a_byte_level_no_op() {
    let dir = fixture(&[
        ("de.json", r#"{"BdV5Om":"","rd5F5r":"Plan"}"#),
        ("fr.json", r#"{"5/hIKX":"","stale":"vieux"}"#),
    ]);
    let table = UpdateTable::builtin();
    let files = ["de.json", "fr.json"];

    let first = plan_patch(dir.path(), "en.json", &files, &table).unwrap();
    assert_eq!(first.drifted().count(), 2);
    first.write_all().unwrap();
    let after_first = (read(dir.path(), "de.json"), read(dir.path(), "fr.json"));

    let second = plan_patch(dir.path(), "en.json", &files, &table).unwrap();
    assert_eq!(second.drifted().count(), 0);
    second.write_all().unwrap();
    assert_eq!((read(dir.path(), "de.json"), read(dir.path(), "fr.json")), after_first);
}

#[test]
fn absent_update_keys_are_never_inserted() {
    let dir = fixture(&[("es.json", r#"{"BdV5Om":"Sitios"}"#)]);
    let plan = plan_patch(dir.path(), "en.json", &["es.json"], &UpdateTable::builtin()).unwrap();
    plan.write_all().unwrap();
    assert_eq!(read(dir.path(), "es.json"), "{\n  \"BdV5Om\": \"Sitios web\"\n}\n");
}

#[test]
fn locale_without_table_entries_is_only_reordered() {
    let dir = fixture(&[("nl.json", r#"{"BdV5Om":"Websites","rd5F5r":"Aangepast plan"}"#)]);
    let plan = plan_patch(dir.path(), "en.json", &["nl.json"], &UpdateTable::builtin()).unwrap();
    assert!(plan.files()[0].outcome.applied.is_empty());
    assert!(plan.files()[0].outcome.skipped.is_empty());
    plan.write_all().unwrap();
    assert_eq!(
        read(dir.path(), "nl.json"),
        "{\n  \"rd5F5r\": \"Aangepast plan\",\n  \"BdV5Om\": \"Websites\"\n}\n"
    );
}

#[test]
fn malformed_file_aborts_before_any_write() {
    let untouched = r#"{"BdV5Om":""}"#;
    let dir = fixture(&[("zh.json", untouched), ("ja.json", r#"{"BdV5Om": 3}"#)]);
    let err = plan_patch(dir.path(), "en.json", &["zh.json", "ja.json"], &UpdateTable::builtin())
        .unwrap_err();
    assert!(matches!(err, PatchError::Catalog(CatalogError::NonStringValue { .. })));
    assert_eq!(read(dir.path(), "zh.json"), untouched);
}

#[test]
fn missing_file_aborts_before_any_write() {
    let untouched = r#"{"BdV5Om":""}"#;
    let dir = fixture(&[("pt.json", untouched)]);
    let err = plan_patch(dir.path(), "en.json", &["pt.json", "it.json"], &UpdateTable::builtin())
        .unwrap_err();
    assert!(matches!(err, PatchError::Catalog(CatalogError::Io { .. })));
    assert_eq!(read(dir.path(), "pt.json"), untouched);
}

#[test]
fn invalid_table_is_rejected_before_loading() {
    let rows = [LocaleUpdates {
        locale: TargetLocale::Pl,
        entries: &[("k", "a"), ("k", "b")],
    }];
    let dir = fixture(&[]);
    let err = plan_patch(dir.path(), "en.json", &["pl.json"], &UpdateTable::new(&rows)).unwrap_err();
    assert!(matches!(err, PatchError::InvalidTable(_)));
}

#[test]
fn write_leaves_no_temporary_files() {
    let dir = fixture(&[("it.json", r#"{"HCYBYT":""}"#)]);
    let plan = plan_patch(dir.path(), "en.json", &["it.json"], &UpdateTable::builtin()).unwrap();
    plan.write_all().unwrap();
    let mut names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, ["en.json", "it.json"]);
    assert_eq!(read(dir.path(), "it.json"), "{\n  \"HCYBYT\": \"Membri del team\"\n}\n");
}

#[test]
fn write_preserves_unrelated_sibling_files() {
    let dir = fixture(&[("it.json", r#"{"HCYBYT":""}"#)]);
    let notes = "operator notes, unrelated\n";
    for name in ["it.json.tmp", ".it.json.tmp", "it.json.bak"] {
        fs::write(dir.path().join(name), notes).expect("write sibling");
    }

    let plan = plan_patch(dir.path(), "en.json", &["it.json"], &UpdateTable::builtin()).unwrap();
    plan.write_all().unwrap();

    assert_eq!(read(dir.path(), "it.json"), "{\n  \"HCYBYT\": \"Membri del team\"\n}\n");
    for name in ["it.json.tmp", ".it.json.tmp", "it.json.bak"] {
        assert_eq!(read(dir.path(), name), notes, "{name} must survive a patch");
    }
    let mut names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, [".it.json.tmp", "en.json", "it.json", "it.json.bak", "it.json.tmp"]);
}

#[test]
fn failed_write_leaves_target_and_siblings_untouched() {
    let dir = fixture(&[("it.json", r#"{"HCYBYT":""}"#)]);
    let plan = plan_patch(dir.path(), "en.json", &["it.json"], &UpdateTable::builtin()).unwrap();
    fs::remove_file(dir.path().join("it.json")).expect("remove locale");
    fs::create_dir(dir.path().join("it.json")).expect("replace locale with directory");
    fs::write(dir.path().join("it.json.tmp"), "keep").expect("write sibling");

    let err = plan.write_all().unwrap_err();
    assert!(matches!(err, PatchError::Io { .. }));
    assert!(dir.path().join("it.json").is_dir());
    assert_eq!(read(dir.path(), "it.json.tmp"), "keep");
    let leftovers = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(".it.json."))
        .count();
    assert_eq!(leftovers, 0);
}

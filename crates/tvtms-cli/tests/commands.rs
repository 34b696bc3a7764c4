//! End-to-end subcommand tests against temp directories.

use std::fs;
use std::path::{Path, PathBuf};

use tvtms_cli::cli::{ApplyArgs, ProcessArgs};
use tvtms_cli::commands::{run_apply, run_process};
use tvtms_model::Mapping;

const SAMPLE: &str = "\
#DataStart(Expanded)
SourceType\tSourceRef\tStandardRef\tAction\tNoteMarker\tReversification Note\tVersification Note\tAncient Versions\tTests
Latin\tPsa.142:Title\tPsa.142:1\tPsalm Title\t\t\t\t\t
Latin\t142:1\t142:2\tRenumber verse\t\t\t\t\t
Greek\tGen.1:1\t???\tKeep verse\t\t\t\t\t
#DataEnd(Expanded)
";

const POOL: &str = "\
tradition\tbook\tchapter\tverse\tsubverse\ttext
Latin\tPSA\t142\t0\t\tA canticle of David
Latin\tPSA\t142\t1\t\tVoce mea ad Dominum clamavi
";

fn process_args(file: &Path, output_dir: Option<PathBuf>, dry_run: bool) -> ProcessArgs {
    ProcessArgs {
        file: file.to_path_buf(),
        output_dir,
        verse_counts: None,
        fallback_verse_count: None,
        diagnostics_file: None,
        dry_run,
    }
}

// ===== process =====

#[test]
fn process_stores_records_and_appends_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sample.txt");
    fs::write(&input, SAMPLE).unwrap();
    let out = dir.path().join("out");

    let report = run_process(&process_args(&input, Some(out.clone()), false)).unwrap();

    assert_eq!(report.fingerprint.len(), 64);
    assert_eq!(report.output_dir.as_deref(), Some(out.as_path()));
    assert_eq!(report.store.mappings_stored, 2);
    assert_eq!(report.store.diagnostics_logged, 1);

    let mappings: Vec<Mapping> =
        serde_json::from_str(&fs::read_to_string(out.join("mappings.json")).unwrap()).unwrap();
    assert_eq!(mappings.len(), 2);

    let logged = fs::read_to_string(out.join("diagnostics.jsonl")).unwrap();
    assert_eq!(logged.lines().count(), report.stats.diagnostics);
}

#[test]
fn process_stats_add_up() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sample.txt");
    fs::write(&input, SAMPLE).unwrap();

    let report = run_process(&process_args(&input, None, true)).unwrap();

    insta::assert_json_snapshot!(report.stats, @r#"
    {
      "rows_seen": 3,
      "rows_skipped": 0,
      "section_lines": 0,
      "mappings_built": 2,
      "mappings_rejected": 0,
      "rules_built": 0,
      "documentation_built": 0,
      "diagnostics": 1,
      "diagnostics_by_kind": {
        "unparseable_reference": 1
      }
    }
    "#);
}

#[test]
fn dry_run_writes_no_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sample.txt");
    fs::write(&input, SAMPLE).unwrap();
    let out = dir.path().join("out");

    let report = run_process(&process_args(&input, Some(out.clone()), true)).unwrap();

    assert!(report.output_dir.is_none());
    assert!(report.diagnostics_file.is_none());
    // The records still pass through an in-memory store.
    assert_eq!(report.store.mappings_stored, 2);
    assert!(!out.exists());
}

#[test]
fn output_dir_defaults_next_to_the_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sample.txt");
    fs::write(&input, SAMPLE).unwrap();

    let report = run_process(&process_args(&input, None, false)).unwrap();

    let expected = dir.path().join("output");
    assert_eq!(report.output_dir.as_deref(), Some(expected.as_path()));
    assert_eq!(
        report.diagnostics_file.as_deref(),
        Some(expected.join("diagnostics.jsonl").as_path())
    );
    assert!(expected.join("mappings.json").exists());
}

#[test]
fn missing_input_file_reports_context() {
    let dir = tempfile::tempdir().unwrap();

    let error = run_process(&process_args(
        &dir.path().join("missing.txt"),
        None,
        true,
    ))
    .unwrap_err();

    assert!(format!("{error:#}").contains("read input file"));
}

#[test]
fn unreadable_verse_counts_report_their_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sample.txt");
    fs::write(&input, SAMPLE).unwrap();
    let mut args = process_args(&input, None, true);
    args.verse_counts = Some(dir.path().join("no-such-counts.csv"));

    let error = run_process(&args).unwrap_err();

    assert!(format!("{error:#}").contains("load verse counts"));
}

// ===== apply =====

#[test]
fn apply_standardizes_the_pool_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sample.txt");
    fs::write(&input, SAMPLE).unwrap();
    let out = dir.path().join("out");
    run_process(&process_args(&input, Some(out.clone()), false)).unwrap();

    let pool_path = dir.path().join("pool.tsv");
    fs::write(&pool_path, POOL).unwrap();
    let standardized = dir.path().join("standardized.tsv");
    let diagnostics = dir.path().join("apply.jsonl");

    let report = run_apply(&ApplyArgs {
        mappings: out.join("mappings.json"),
        verses: pool_path,
        output: standardized.clone(),
        diagnostics_file: Some(diagnostics.clone()),
    })
    .unwrap();

    assert_eq!(report.pool_rows, 2);
    assert_eq!(report.stats.applied, 2);
    assert_eq!(report.remaining, 0);
    assert_eq!(report.standardized_rows, 2);
    assert_eq!(report.stats.applied_by_tier.get("Renumber"), Some(&1));
    assert_eq!(report.stats.applied_by_tier.get("Psalm Title"), Some(&1));

    let written = fs::read_to_string(&standardized).unwrap();
    assert!(written.contains("standard\tPSA\t142\t1\t\tA canticle of David"));
    assert!(written.contains("standard\tPSA\t142\t2\t\tVoce mea ad Dominum clamavi"));

    // Opened eagerly; empty because nothing ambiguous happened.
    assert!(diagnostics.exists());
    assert_eq!(fs::read_to_string(&diagnostics).unwrap().lines().count(), 0);
}

#[test]
fn apply_with_missing_mappings_file_reports_context() {
    let dir = tempfile::tempdir().unwrap();

    let error = run_apply(&ApplyArgs {
        mappings: dir.path().join("missing.json"),
        verses: dir.path().join("pool.tsv"),
        output: dir.path().join("standardized.tsv"),
        diagnostics_file: None,
    })
    .unwrap_err();

    assert!(format!("{error:#}").contains("open mappings file"));
}

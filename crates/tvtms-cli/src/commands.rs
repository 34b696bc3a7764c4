//! Subcommand implementations.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use tvtms_apply::{ApplyStats, VersePool, apply_mappings};
use tvtms_core::{PipelineStats, StoreReport, process_document, store_outcome};
use tvtms_ingest::{IngestOptions, read_file};
use tvtms_model::Mapping;
use tvtms_standards::{BookCatalog, VerseCounts};
use tvtms_store::{DiagnosticSink, JsonDirStore, JsonlSink, MemorySink, MemoryStore};

use crate::cli::{ApplyArgs, ProcessArgs};
use crate::summary::apply_table_style;

/// What one `process` run did, for the summary printer.
#[derive(Debug)]
pub struct ProcessReport {
    pub source_id: String,
    pub fingerprint: String,
    /// None on a dry run.
    pub output_dir: Option<PathBuf>,
    pub diagnostics_file: Option<PathBuf>,
    pub stats: PipelineStats,
    pub store: StoreReport,
}

/// What one `apply` run did, for the summary printer.
#[derive(Debug)]
pub struct ApplyReport {
    pub mappings: PathBuf,
    pub output: PathBuf,
    pub diagnostics_file: Option<PathBuf>,
    pub pool_rows: usize,
    /// Pool rows no mapping consumed.
    pub remaining: usize,
    pub standardized_rows: usize,
    pub stats: ApplyStats,
}

pub fn run_process(args: &ProcessArgs) -> Result<ProcessReport> {
    let source_id = args.file.display().to_string();
    let process_span = info_span!("process", source = %source_id);
    let _process_guard = process_span.enter();

    // =========================================================================
    // Stage 1: Ingest - read, fingerprint, and row-split the file
    // =========================================================================
    let ingest_start = Instant::now();
    let options = IngestOptions::new(source_id.clone());
    let document = read_file(&args.file, &options).context("read input file")?;
    info!(
        rows = document.rows.len(),
        section_lines = document.section_ranges.len(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    // =========================================================================
    // Stage 2: Standards - pick the verse-count table
    // =========================================================================
    let counts = load_verse_counts(args)?;

    // =========================================================================
    // Stage 3: Process - fold rows, expand sections, validate
    // =========================================================================
    let process_start = Instant::now();
    let outcome = process_document(&document, &counts);
    info!(
        mappings = outcome.stats.mappings_built,
        rejected = outcome.stats.mappings_rejected,
        diagnostics = outcome.stats.diagnostics,
        duration_ms = process_start.elapsed().as_millis(),
        "processing complete"
    );

    // =========================================================================
    // Stage 4: Store - persist records and append diagnostics
    // =========================================================================
    let (store_report, output_dir, diagnostics_file) = if args.dry_run {
        let mut store = MemoryStore::new();
        let mut sink = MemorySink::new();
        let report = store_outcome(&outcome, &mut store, &mut sink).context("store records")?;
        (report, None, None)
    } else {
        let output_dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&args.file));
        let diagnostics_file = args
            .diagnostics_file
            .clone()
            .unwrap_or_else(|| output_dir.join("diagnostics.jsonl"));
        let mut store = JsonDirStore::new(&output_dir);
        let mut sink = JsonlSink::open(&diagnostics_file)
            .with_context(|| format!("open diagnostics log {}", diagnostics_file.display()))?;
        let report = store_outcome(&outcome, &mut store, &mut sink).context("store records")?;
        (report, Some(output_dir), Some(diagnostics_file))
    };

    Ok(ProcessReport {
        source_id: outcome.source_id,
        fingerprint: outcome.fingerprint,
        output_dir,
        diagnostics_file,
        stats: outcome.stats,
        store: store_report,
    })
}

pub fn run_apply(args: &ApplyArgs) -> Result<ApplyReport> {
    let apply_span = info_span!("apply", mappings = %args.mappings.display());
    let _apply_guard = apply_span.enter();

    // =========================================================================
    // Stage 1: Load - mappings JSON and verse pool TSV
    // =========================================================================
    let file = File::open(&args.mappings)
        .with_context(|| format!("open mappings file {}", args.mappings.display()))?;
    let mappings: Vec<Mapping> =
        serde_json::from_reader(BufReader::new(file)).context("parse mappings json")?;
    let mut pool = VersePool::from_tsv_path(&args.verses).context("load verse pool")?;
    let pool_rows = pool.len();
    info!(mappings = mappings.len(), pool_rows, "inputs loaded");

    // =========================================================================
    // Stage 2: Replay - tier-ordered action replay
    // =========================================================================
    let replay_start = Instant::now();
    let outcome = apply_mappings(&mappings, &mut pool);
    info!(
        applied = outcome.stats.applied,
        unresolved = outcome.stats.unresolved,
        duration_ms = replay_start.elapsed().as_millis(),
        "replay complete"
    );

    // =========================================================================
    // Stage 3: Write - standardized pool and diagnostics
    // =========================================================================
    outcome
        .standardized
        .write_tsv_path(&args.output)
        .with_context(|| format!("write standardized pool {}", args.output.display()))?;
    if let Some(path) = &args.diagnostics_file {
        let mut sink = JsonlSink::open(path)
            .with_context(|| format!("open diagnostics log {}", path.display()))?;
        sink.log_all(&outcome.diagnostics).context("log diagnostics")?;
    }

    Ok(ApplyReport {
        mappings: args.mappings.clone(),
        output: args.output.clone(),
        diagnostics_file: args.diagnostics_file.clone(),
        pool_rows,
        remaining: pool.remaining(),
        standardized_rows: outcome.standardized.len(),
        stats: outcome.stats,
    })
}

pub fn run_books() -> Result<()> {
    let catalog = BookCatalog::global();
    let mut table = Table::new();
    table.set_header(vec!["Id", "Name", "Section", "Chapters"]);
    apply_table_style(&mut table);
    for book in catalog.books() {
        table.add_row(vec![
            book.id.as_str().to_string(),
            book.name.to_string(),
            book.section.to_string(),
            book.chapters.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn load_verse_counts(args: &ProcessArgs) -> Result<VerseCounts> {
    let counts = match &args.verse_counts {
        Some(path) => VerseCounts::from_csv_path(path)
            .with_context(|| format!("load verse counts from {}", path.display()))?,
        None => VerseCounts::embedded().clone(),
    };
    Ok(match args.fallback_verse_count {
        Some(fallback) => counts.with_fallback(fallback),
        None => counts,
    })
}

fn default_output_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
        .join("output")
}

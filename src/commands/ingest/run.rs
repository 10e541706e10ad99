use std::fs;

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;
use tracing::{info, warn};

use crate::cli::IngestArgs;
use crate::model::{CorpusPaths, IngestCounts, IngestRunManifest};
use crate::parser::{ClassificationStrategy, run_pipeline};
use crate::util::{
    ensure_directory, now_utc_string, sha256_hex, utc_compact_string, write_json_pretty,
};

use super::DB_SCHEMA_VERSION;
use super::db_setup::{configure_connection, ensure_schema};
use super::persist::persist_corpus;

pub fn run(args: IngestArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    let cache_root = args.cache_root.clone();
    let manifest_dir = cache_root.join("manifests");
    ensure_directory(&manifest_dir)?;

    let ingest_manifest_path = args.ingest_manifest_path.clone().unwrap_or_else(|| {
        manifest_dir.join(format!("ingest_run_{}.json", utc_compact_string(started_ts)))
    });
    let latest_manifest_path = manifest_dir.join("ingest_latest.json");
    let db_path = args
        .db_path
        .clone()
        .unwrap_or_else(|| cache_root.join("ubbl_corpus.sqlite"));

    info!(source = %args.source_text.display(), run_id = %run_id, "starting ingest");

    let source_text = fs::read_to_string(&args.source_text)
        .with_context(|| format!("failed to read source text {}", args.source_text.display()))?;
    let source_sha256 = sha256_hex(source_text.as_bytes());

    let outcome = run_pipeline(&source_text, ClassificationStrategy::default(), &started_at)?;

    for warning in &outcome.warnings {
        warn!(warning = %warning, "corpus warning");
    }

    let mut connection = Connection::open(&db_path)
        .with_context(|| format!("failed to open {}", db_path.display()))?;
    configure_connection(&connection)?;
    ensure_schema(&connection)?;

    let stats = persist_corpus(&mut connection, &outcome.corpus, &source_sha256)?;

    let parts_total = count_rows(&connection, "SELECT COUNT(*) FROM parts")?;
    let clauses_total = count_rows(&connection, "SELECT COUNT(*) FROM clauses")?;
    let updated_at = now_utc_string();

    let corpus = &outcome.corpus;
    let manifest = IngestRunManifest {
        manifest_version: 1,
        run_id: run_id.clone(),
        db_schema_version: DB_SCHEMA_VERSION.to_string(),
        status: "completed".to_string(),
        started_at,
        updated_at,
        source_sha256,
        paths: CorpusPaths {
            cache_root: cache_root.display().to_string(),
            manifest_dir: manifest_dir.display().to_string(),
            source_text_path: args.source_text.display().to_string(),
            db_path: db_path.display().to_string(),
        },
        counts: IngestCounts {
            line_count: outcome.line_count,
            content_line_count: outcome.content_line_count,
            part_count: corpus.parts.len(),
            clause_count: corpus.clauses.len(),
            parts_total,
            clauses_total,
            critical_clause_count: corpus.critical_only().len(),
            calculation_clause_count: corpus
                .clauses
                .iter()
                .filter(|clause| clause.metadata.requires_calculation)
                .count(),
            exception_clause_count: corpus
                .clauses
                .iter()
                .filter(|clause| clause.metadata.has_exceptions)
                .count(),
            warning_count: outcome.warnings.len(),
        },
        warnings: outcome.warnings,
        notes: vec![
            "Corpus persisted to the local sqlite store; re-running ingest replaces it."
                .to_string(),
            "Clause boundaries come from the numeric-prefix predicate over the extracted text."
                .to_string(),
        ],
    };

    write_json_pretty(&ingest_manifest_path, &manifest)?;
    write_json_pretty(&latest_manifest_path, &manifest)?;

    info!(path = %ingest_manifest_path.display(), "wrote ingest run manifest");
    info!(
        parts = stats.parts_inserted,
        clauses = stats.clauses_inserted,
        warnings = manifest.counts.warning_count,
        "ingest completed"
    );

    Ok(())
}

fn count_rows(connection: &Connection, sql: &str) -> Result<i64> {
    let count = connection.query_row(sql, [], |row| row.get(0))?;
    Ok(count)
}

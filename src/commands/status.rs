use std::fs;

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::model::IngestRunManifest;

pub fn run(args: StatusArgs) -> Result<()> {
    let manifest_dir = args.cache_root.join("manifests");
    let latest_manifest_path = manifest_dir.join("ingest_latest.json");
    let db_path = args.cache_root.join("ubbl_corpus.sqlite");

    info!(cache_root = %args.cache_root.display(), "status requested");

    if latest_manifest_path.exists() {
        let raw = fs::read(&latest_manifest_path)
            .with_context(|| format!("failed to read {}", latest_manifest_path.display()))?;
        let manifest: IngestRunManifest = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse {}", latest_manifest_path.display()))?;

        info!(
            run_id = %manifest.run_id,
            status = %manifest.status,
            started_at = %manifest.started_at,
            updated_at = %manifest.updated_at,
            source_sha256 = %manifest.source_sha256,
            parts = manifest.counts.part_count,
            clauses = manifest.counts.clause_count,
            warnings = manifest.counts.warning_count,
            "loaded latest ingest manifest"
        );
    } else {
        warn!(path = %latest_manifest_path.display(), "ingest manifest missing");
    }

    if db_path.exists() {
        let connection = Connection::open(&db_path)
            .with_context(|| format!("failed to open {}", db_path.display()))?;
        let parts_count = query_count(&connection, "SELECT COUNT(*) FROM parts").unwrap_or(0);
        let clauses_count = query_count(&connection, "SELECT COUNT(*) FROM clauses").unwrap_or(0);
        let schema_version = connection
            .query_row(
                "SELECT value FROM metadata WHERE key = 'db_schema_version' LIMIT 1",
                [],
                |row| row.get::<_, String>(0),
            )
            .unwrap_or_default();

        info!(
            path = %db_path.display(),
            schema_version = %schema_version,
            parts = parts_count,
            clauses = clauses_count,
            "database status"
        );
    } else {
        warn!(path = %db_path.display(), "database file missing");
    }

    Ok(())
}

fn query_count(connection: &Connection, sql: &str) -> Result<i64> {
    let count = connection.query_row(sql, [], |row| row.get(0))?;
    Ok(count)
}

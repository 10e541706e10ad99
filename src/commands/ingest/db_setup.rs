use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::util::now_utc_string;

use super::DB_SCHEMA_VERSION;

pub(crate) fn configure_connection(connection: &Connection) -> Result<()> {
    connection
        .pragma_update(None, "journal_mode", "WAL")
        .context("failed to set journal_mode=WAL")?;
    connection
        .pragma_update(None, "synchronous", "NORMAL")
        .context("failed to set synchronous=NORMAL")?;
    Ok(())
}

pub(crate) fn ensure_schema(connection: &Connection) -> Result<()> {
    connection.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS metadata (
          key TEXT PRIMARY KEY,
          value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS parts (
          ordinal INTEGER PRIMARY KEY,
          roman_label TEXT NOT NULL,
          title TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS clauses (
          clause_id TEXT PRIMARY KEY,
          number TEXT NOT NULL,
          seq INTEGER NOT NULL,
          part_ordinal INTEGER NOT NULL,
          part_label TEXT NOT NULL,
          part_title TEXT NOT NULL,
          title TEXT NOT NULL,
          body TEXT NOT NULL,
          page_estimate INTEGER NOT NULL,
          category TEXT NOT NULL,
          complexity_level INTEGER NOT NULL,
          requires_calculation INTEGER NOT NULL,
          has_exceptions INTEGER NOT NULL,
          priority TEXT NOT NULL,
          keywords_json TEXT NOT NULL,
          building_types_json TEXT NOT NULL,
          title_translated TEXT,
          body_translated TEXT,
          embedding BLOB,
          source_hash TEXT NOT NULL,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL,
          FOREIGN KEY(part_ordinal) REFERENCES parts(ordinal)
        );

        CREATE INDEX IF NOT EXISTS idx_clauses_part ON clauses(part_ordinal);
        CREATE INDEX IF NOT EXISTS idx_clauses_category ON clauses(category);
        CREATE INDEX IF NOT EXISTS idx_clauses_priority ON clauses(priority);
        CREATE UNIQUE INDEX IF NOT EXISTS idx_clauses_seq ON clauses(seq);
        ",
    )?;

    let now = now_utc_string();
    connection.execute(
        "INSERT INTO metadata(key, value) VALUES('db_schema_version', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        [DB_SCHEMA_VERSION],
    )?;
    connection.execute(
        "INSERT INTO metadata(key, value) VALUES('db_updated_at', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        [now],
    )?;

    Ok(())
}

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};

use crate::model::{Category, Clause, ClauseMetadata, Corpus, Part, Priority};

pub fn open_read_only(db_path: &Path) -> Result<Connection> {
    Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("failed to open database read-only: {}", db_path.display()))
}

/// Rehydrates the stored corpus in emission order.
pub fn load_corpus(connection: &Connection) -> Result<Corpus> {
    let mut part_statement = connection
        .prepare("SELECT ordinal, roman_label, title FROM parts ORDER BY ordinal ASC")?;
    let mut part_rows = part_statement.query([])?;
    let mut parts = Vec::new();
    while let Some(row) = part_rows.next()? {
        parts.push(Part {
            ordinal: row.get(0)?,
            roman_label: row.get(1)?,
            title: row.get(2)?,
        });
    }

    let mut clause_statement = connection.prepare(
        "
        SELECT clause_id, number, seq, part_ordinal, part_label, part_title,
               title, body, page_estimate, category, complexity_level,
               requires_calculation, has_exceptions, priority,
               keywords_json, building_types_json,
               title_translated, body_translated,
               created_at, updated_at
        FROM clauses
        ORDER BY seq ASC
        ",
    )?;

    let mut rows = clause_statement.query([])?;
    let mut clauses = Vec::new();
    while let Some(row) = rows.next()? {
        let clause_id: String = row.get(0)?;
        let category_raw: String = row.get(9)?;
        let priority_raw: String = row.get(13)?;
        let keywords_json: String = row.get(14)?;
        let building_types_json: String = row.get(15)?;

        let category = Category::parse(&category_raw)
            .with_context(|| format!("unknown category '{category_raw}' on {clause_id}"))?;
        let priority = Priority::parse(&priority_raw)
            .with_context(|| format!("unknown priority '{priority_raw}' on {clause_id}"))?;
        let keywords: Vec<String> = serde_json::from_str(&keywords_json)
            .with_context(|| format!("failed to parse keywords json on {clause_id}"))?;
        let applicable_building_types: Vec<String> = serde_json::from_str(&building_types_json)
            .with_context(|| format!("failed to parse building types json on {clause_id}"))?;

        clauses.push(Clause {
            id: clause_id,
            number: row.get(1)?,
            sequence: row.get(2)?,
            part_ordinal: row.get(3)?,
            part_label: row.get(4)?,
            part_title: row.get(5)?,
            title: row.get(6)?,
            body: row.get(7)?,
            page_estimate: row.get(8)?,
            metadata: ClauseMetadata {
                keywords,
                category,
                complexity_level: row.get(10)?,
                requires_calculation: row.get(11)?,
                has_exceptions: row.get(12)?,
                applicable_building_types,
                priority,
            },
            title_translated: row.get(16)?,
            body_translated: row.get(17)?,
            embedding: None,
            created_at: row.get(18)?,
            updated_at: row.get(19)?,
        });
    }

    Ok(Corpus { parts, clauses })
}

pub fn stored_source_hash(connection: &Connection) -> Option<String> {
    connection
        .query_row(
            "SELECT source_hash FROM clauses ORDER BY seq ASC LIMIT 1",
            [],
            |row| row.get::<_, String>(0),
        )
        .ok()
}

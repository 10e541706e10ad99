use anyhow::{Context, Result};
use rusqlite::{Connection, params};

use crate::model::Corpus;

#[derive(Debug, Default)]
pub(crate) struct PersistStats {
    pub parts_inserted: usize,
    pub clauses_inserted: usize,
}

/// Replaces the stored corpus in one transaction. Re-running ingest from the
/// same input reproduces the same rows.
pub(crate) fn persist_corpus(
    connection: &mut Connection,
    corpus: &Corpus,
    source_hash: &str,
) -> Result<PersistStats> {
    let tx = connection.transaction()?;
    let mut stats = PersistStats::default();

    tx.execute("DELETE FROM clauses", [])?;
    tx.execute("DELETE FROM parts", [])?;

    {
        let mut part_statement = tx.prepare(
            "
            INSERT INTO parts(ordinal, roman_label, title)
            VALUES(?1, ?2, ?3)
            ON CONFLICT(ordinal) DO UPDATE SET
              roman_label=excluded.roman_label,
              title=excluded.title
            ",
        )?;

        for part in &corpus.parts {
            part_statement.execute(params![part.ordinal, &part.roman_label, &part.title])?;
            stats.parts_inserted += 1;
        }

        let mut clause_statement = tx.prepare(
            "
            INSERT INTO clauses(
              clause_id, number, seq, part_ordinal, part_label, part_title,
              title, body, page_estimate, category, complexity_level,
              requires_calculation, has_exceptions, priority,
              keywords_json, building_types_json,
              title_translated, body_translated, embedding,
              source_hash, created_at, updated_at
            )
            VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22)
            ON CONFLICT(clause_id) DO UPDATE SET
              number=excluded.number,
              seq=excluded.seq,
              part_ordinal=excluded.part_ordinal,
              part_label=excluded.part_label,
              part_title=excluded.part_title,
              title=excluded.title,
              body=excluded.body,
              page_estimate=excluded.page_estimate,
              category=excluded.category,
              complexity_level=excluded.complexity_level,
              requires_calculation=excluded.requires_calculation,
              has_exceptions=excluded.has_exceptions,
              priority=excluded.priority,
              keywords_json=excluded.keywords_json,
              building_types_json=excluded.building_types_json,
              title_translated=excluded.title_translated,
              body_translated=excluded.body_translated,
              embedding=excluded.embedding,
              source_hash=excluded.source_hash,
              created_at=excluded.created_at,
              updated_at=excluded.updated_at
            ",
        )?;

        for clause in &corpus.clauses {
            let keywords_json = serde_json::to_string(&clause.metadata.keywords)
                .with_context(|| format!("failed to serialize keywords for {}", clause.id))?;
            let building_types_json =
                serde_json::to_string(&clause.metadata.applicable_building_types)
                    .with_context(|| {
                        format!("failed to serialize building types for {}", clause.id)
                    })?;
            let embedding_blob = clause.embedding.as_ref().map(|values| {
                values
                    .iter()
                    .flat_map(|value| value.to_le_bytes())
                    .collect::<Vec<u8>>()
            });

            clause_statement.execute(params![
                &clause.id,
                &clause.number,
                clause.sequence,
                clause.part_ordinal,
                &clause.part_label,
                &clause.part_title,
                &clause.title,
                &clause.body,
                clause.page_estimate,
                clause.metadata.category.as_str(),
                clause.metadata.complexity_level,
                clause.metadata.requires_calculation,
                clause.metadata.has_exceptions,
                clause.metadata.priority.as_str(),
                keywords_json,
                building_types_json,
                &clause.title_translated,
                &clause.body_translated,
                embedding_blob,
                source_hash,
                &clause.created_at,
                &clause.updated_at
            ])?;
            stats.clauses_inserted += 1;
        }
    }

    tx.commit()?;
    Ok(stats)
}

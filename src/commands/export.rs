use std::fs;

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::{ExportArgs, ExportFormat};
use crate::model::{Corpus, CorpusExport};
use crate::util::{now_utc_string, write_json_pretty};

use super::store::{load_corpus, open_read_only, stored_source_hash};

pub fn run(args: ExportArgs) -> Result<()> {
    let db_path = args
        .db_path
        .clone()
        .unwrap_or_else(|| args.cache_root.join("ubbl_corpus.sqlite"));
    let output_path = args.output_path.clone().unwrap_or_else(|| {
        args.cache_root.join(match args.format {
            ExportFormat::Json => "ubbl_corpus.json",
            ExportFormat::Sql => "ubbl_corpus.sql",
        })
    });

    let connection = open_read_only(&db_path)?;
    let source_sha256 = stored_source_hash(&connection);
    let corpus = load_corpus(&connection)?;

    match args.format {
        ExportFormat::Json => {
            let export = CorpusExport {
                manifest_version: 1,
                generated_at: now_utc_string(),
                source_sha256,
                part_count: corpus.parts.len(),
                clause_count: corpus.clauses.len(),
                parts: corpus.parts.clone(),
                clauses: corpus.clauses.clone(),
            };
            write_json_pretty(&output_path, &export)?;
        }
        ExportFormat::Sql => {
            let script = render_sql_inserts(&corpus);
            fs::write(&output_path, script)
                .with_context(|| format!("failed to write {}", output_path.display()))?;
        }
    }

    info!(
        path = %output_path.display(),
        format = args.format.as_str(),
        parts = corpus.parts.len(),
        clauses = corpus.clauses.len(),
        "export completed"
    );

    Ok(())
}

/// Mechanical per-record INSERT generation; no connection involved, the
/// output targets whatever database the consumer runs it against.
pub(crate) fn render_sql_inserts(corpus: &Corpus) -> String {
    let mut script = String::new();

    for part in &corpus.parts {
        script.push_str(&format!(
            "INSERT INTO bylaw_parts (ordinal, roman_label, title) VALUES ({}, '{}', '{}');\n",
            part.ordinal,
            escape_sql(&part.roman_label),
            escape_sql(&part.title)
        ));
    }

    for clause in &corpus.clauses {
        let keywords = clause.metadata.keywords.join(",");
        let building_types = clause.metadata.applicable_building_types.join(",");

        script.push_str(&format!(
            "INSERT INTO bylaw_clauses (clause_id, number, seq, part_ordinal, title, body, page_estimate, category, complexity_level, requires_calculation, has_exceptions, priority, keywords, building_types, created_at, updated_at) VALUES ('{}', '{}', {}, {}, '{}', '{}', {}, '{}', {}, {}, {}, '{}', '{}', '{}', '{}', '{}');\n",
            escape_sql(&clause.id),
            escape_sql(&clause.number),
            clause.sequence,
            clause.part_ordinal,
            escape_sql(&clause.title),
            escape_sql(&clause.body),
            clause.page_estimate,
            clause.metadata.category.as_str(),
            clause.metadata.complexity_level,
            i32::from(clause.metadata.requires_calculation),
            i32::from(clause.metadata.has_exceptions),
            clause.metadata.priority.as_str(),
            escape_sql(&keywords),
            escape_sql(&building_types),
            escape_sql(&clause.created_at),
            escape_sql(&clause.updated_at)
        ));
    }

    script
}

pub(crate) fn escape_sql(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Clause, ClauseMetadata, Part, Priority};

    fn sample_corpus() -> Corpus {
        Corpus {
            parts: vec![Part {
                ordinal: 1,
                roman_label: "I".to_string(),
                title: "PRELIMINARY".to_string(),
            }],
            clauses: vec![Clause {
                id: "bylaw-1".to_string(),
                number: "1".to_string(),
                sequence: 1,
                part_ordinal: 1,
                part_label: "I".to_string(),
                part_title: "PRELIMINARY".to_string(),
                title: "Architect's duty".to_string(),
                body: "The architect's plans use C:\\ drawings".to_string(),
                page_estimate: 1,
                metadata: ClauseMetadata {
                    keywords: vec!["architect".to_string()],
                    category: Category::General,
                    complexity_level: 1,
                    requires_calculation: false,
                    has_exceptions: false,
                    applicable_building_types: vec!["residential".to_string()],
                    priority: Priority::Standard,
                },
                title_translated: None,
                body_translated: None,
                embedding: None,
                created_at: "2026-01-01T00:00:00Z".to_string(),
                updated_at: "2026-01-01T00:00:00Z".to_string(),
            }],
        }
    }

    #[test]
    fn escape_sql_doubles_quotes_and_backslashes() {
        assert_eq!(escape_sql("it's"), "it''s");
        assert_eq!(escape_sql(r"C:\path"), r"C:\\path");
        assert_eq!(escape_sql("plain"), "plain");
    }

    #[test]
    fn render_sql_inserts_escapes_values_and_emits_one_statement_per_record() {
        let script = render_sql_inserts(&sample_corpus());
        let statements = script.lines().collect::<Vec<&str>>();

        assert_eq!(statements.len(), 2);
        assert!(statements[0].starts_with("INSERT INTO bylaw_parts"));
        assert!(statements[1].contains("Architect''s duty"));
        assert!(statements[1].contains(r"C:\\ drawings"));
    }
}

use anyhow::Result;

use crate::model::Corpus;

mod accumulate;
mod classify;
mod enrich;
mod machine;
mod roman;
mod scan;
mod strategy;
#[cfg(test)]
mod tests;
mod validate;

pub use accumulate::{ClauseAccumulator, ClauseDraft};
pub use classify::{LineClass, LineClassifier};
pub use enrich::MetadataEnricher;
pub use machine::{ParsedDocument, parse_document};
pub use roman::{int_to_roman, roman_to_int};
pub use scan::{LineCursor, RawLine, content_lines};
pub use strategy::ClassificationStrategy;
pub use validate::corpus_warnings;

#[derive(Debug)]
pub struct PipelineOutcome {
    pub corpus: Corpus,
    pub warnings: Vec<String>,
    pub line_count: usize,
    pub content_line_count: usize,
}

/// Full text → structured corpus transformation: sequential scan, then
/// per-clause enrichment, then aggregate validation. `generated_at` stamps
/// every clause, so a run is reproducible for a pinned timestamp.
pub fn run_pipeline(
    text: &str,
    strategy: ClassificationStrategy,
    generated_at: &str,
) -> Result<PipelineOutcome> {
    let classifier = LineClassifier::new(strategy.clone())?;
    let parsed = parse_document(text, &classifier);

    let enricher = MetadataEnricher::new(strategy.clone());
    let clauses = enricher.enrich_clauses(parsed.clauses, generated_at);

    let corpus = Corpus {
        parts: parsed.parts,
        clauses,
    };

    let mut warnings = parsed.warnings;
    warnings.extend(corpus_warnings(&strategy, &corpus.parts, &corpus.clauses));

    Ok(PipelineOutcome {
        corpus,
        warnings,
        line_count: parsed.line_count,
        content_line_count: parsed.content_line_count,
    })
}

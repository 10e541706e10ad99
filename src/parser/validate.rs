use crate::model::{Clause, Part};

use super::strategy::ClassificationStrategy;

/// Aggregate sanity checks over a finished corpus. Everything here is a
/// non-fatal warning; malformed runs still produce a complete corpus.
pub fn corpus_warnings(
    strategy: &ClassificationStrategy,
    parts: &[Part],
    clauses: &[Clause],
) -> Vec<String> {
    let mut warnings = Vec::new();

    let (band_low, band_high) = strategy.expected_clause_band;
    let total = clauses.len();
    if total < band_low || total > band_high {
        warnings.push(format!(
            "clause total {total} outside expected band [{band_low}, {band_high}]"
        ));
    }

    let sequence_breaks = clauses
        .iter()
        .enumerate()
        .filter(|(index, clause)| clause.sequence != *index as u32 + 1)
        .count();
    if sequence_breaks > 0 {
        warnings.push(format!(
            "{sequence_breaks} clauses with out-of-order sequence values"
        ));
    }

    for clause in clauses {
        if !parts.iter().any(|part| part.ordinal == clause.part_ordinal) {
            warnings.push(format!(
                "clause {} references unobserved part ordinal {}",
                clause.number, clause.part_ordinal
            ));
        }
    }

    for clause in clauses {
        if !clause.title.is_empty() && clause.body.starts_with(clause.title.as_str()) {
            warnings.push(format!(
                "clause {} body begins with its own title",
                clause.number
            ));
        }
    }

    warnings
}

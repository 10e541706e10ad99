use crate::model::{Category, Clause, ClauseMetadata, Priority};

use super::accumulate::ClauseDraft;
use super::strategy::ClassificationStrategy;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Pure, stateless derivation of clause metadata from clause text. All rules
/// operate on the lowercased `title + " " + body`; term matching is substring
/// containment, matching the source behavior.
#[derive(Debug, Clone)]
pub struct MetadataEnricher {
    strategy: ClassificationStrategy,
}

impl MetadataEnricher {
    pub fn new(strategy: ClassificationStrategy) -> Self {
        Self { strategy }
    }

    pub fn enrich(&self, title: &str, body: &str) -> ClauseMetadata {
        let text = format!("{title} {body}").to_lowercase();

        let requires_calculation = contains_any(&text, self.strategy.calculation_terms);
        let has_exceptions = contains_any(&text, self.strategy.exception_terms);
        let connective_count = count_connectives(&text, self.strategy.connective_words);

        ClauseMetadata {
            keywords: self.extract_keywords(&text),
            category: self.categorize(&text),
            complexity_level: complexity_level(
                body.len(),
                requires_calculation,
                has_exceptions,
                connective_count,
            ),
            requires_calculation,
            has_exceptions,
            applicable_building_types: self.building_types(&text),
            priority: self.priority(&text),
        }
    }

    #[cfg(feature = "rayon")]
    pub fn enrich_clauses(&self, drafts: Vec<ClauseDraft>, generated_at: &str) -> Vec<Clause> {
        drafts
            .into_par_iter()
            .map(|draft| self.enrich_draft(draft, generated_at))
            .collect()
    }

    #[cfg(not(feature = "rayon"))]
    pub fn enrich_clauses(&self, drafts: Vec<ClauseDraft>, generated_at: &str) -> Vec<Clause> {
        drafts
            .into_iter()
            .map(|draft| self.enrich_draft(draft, generated_at))
            .collect()
    }

    fn enrich_draft(&self, draft: ClauseDraft, generated_at: &str) -> Clause {
        let metadata = self.enrich(&draft.title, &draft.body);

        Clause {
            id: draft.id,
            number: draft.number,
            sequence: draft.sequence,
            part_ordinal: draft.part_ordinal,
            part_label: draft.part_label,
            part_title: draft.part_title,
            title: draft.title,
            body: draft.body,
            page_estimate: draft.page_estimate,
            metadata,
            title_translated: None,
            body_translated: None,
            embedding: None,
            created_at: generated_at.to_string(),
            updated_at: generated_at.to_string(),
        }
    }

    /// First matching rule wins; the table order is fixed.
    fn categorize(&self, text: &str) -> Category {
        self.strategy
            .category_rules
            .iter()
            .find(|(_, terms)| contains_any(text, terms))
            .map(|(category, _)| *category)
            .unwrap_or(Category::General)
    }

    fn priority(&self, text: &str) -> Priority {
        if contains_any(text, self.strategy.critical_terms) {
            Priority::Critical
        } else if contains_any(text, self.strategy.high_priority_terms) {
            Priority::High
        } else {
            Priority::Standard
        }
    }

    /// Unmatched text is assumed broadly applicable, never an empty set.
    fn building_types(&self, text: &str) -> Vec<String> {
        let matched = self
            .strategy
            .building_type_rules
            .iter()
            .filter(|(_, terms)| contains_any(text, terms))
            .map(|(name, _)| name.to_string())
            .collect::<Vec<String>>();

        if matched.is_empty() {
            self.strategy
                .default_building_types
                .iter()
                .map(|name| name.to_string())
                .collect()
        } else {
            matched
        }
    }

    fn extract_keywords(&self, text: &str) -> Vec<String> {
        let mut keywords = Vec::<String>::new();

        for token in text.split(|ch: char| !ch.is_ascii_alphanumeric()) {
            if keywords.len() >= self.strategy.keyword_cap {
                break;
            }
            if token.len() <= 3 || !token.chars().all(|ch| ch.is_ascii_alphabetic()) {
                continue;
            }
            if self.strategy.stop_words.iter().any(|stop| *stop == token) {
                continue;
            }
            if keywords.iter().any(|existing| existing.as_str() == token) {
                continue;
            }

            keywords.push(token.to_string());
        }

        keywords
    }
}

fn contains_any(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| text.contains(term))
}

fn count_connectives(text: &str, connectives: &[&str]) -> usize {
    text.split(|ch: char| !ch.is_ascii_alphanumeric())
        .filter(|token| connectives.iter().any(|connective| connective == token))
        .count()
}

fn complexity_level(
    body_len: usize,
    requires_calculation: bool,
    has_exceptions: bool,
    connective_count: usize,
) -> u8 {
    if body_len > 1000 && requires_calculation && has_exceptions && connective_count > 5 {
        5
    } else if body_len > 600 && requires_calculation && has_exceptions {
        4
    } else if body_len > 300 && (requires_calculation || has_exceptions) {
        3
    } else if body_len > 150 {
        2
    } else {
        1
    }
}

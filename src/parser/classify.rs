use anyhow::{Context, Result};
use regex::Regex;

use super::strategy::ClassificationStrategy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    Noise,
    PartHeader {
        roman: String,
        title_hint: Option<String>,
    },
    ClauseStart {
        number: String,
        title_hint: String,
    },
    Continuation,
}

#[derive(Debug)]
pub struct LineClassifier {
    strategy: ClassificationStrategy,
    part_heading: Regex,
    clause_prefix: Regex,
    page_marker: Regex,
    non_content: Regex,
}

impl LineClassifier {
    pub fn new(strategy: ClassificationStrategy) -> Result<Self> {
        Ok(Self {
            part_heading: Regex::new(r"(?i)^PART\s+([IVXLCDM]+)\b\s*(?:[-–—:]\s*(.+))?$")
                .context("failed to compile part heading regex")?,
            clause_prefix: Regex::new(r"^(\d+[A-Z]?)\.\s*(.*)$")
                .context("failed to compile clause prefix regex")?,
            page_marker: Regex::new(r"(?i)^(?:page\s+)?\d+$")
                .context("failed to compile page marker regex")?,
            non_content: Regex::new(r"^[\d\s\pP]*$")
                .context("failed to compile non-content regex")?,
            strategy,
        })
    }

    pub fn strategy(&self) -> &ClassificationStrategy {
        &self.strategy
    }

    /// Classifies one trimmed line. `previous` is the preceding content line,
    /// consulted only by the clause-boundary predicate.
    pub fn classify(&self, line: &str, previous: Option<&str>) -> LineClass {
        let line = line.trim();

        if self.is_noise(line) {
            return LineClass::Noise;
        }

        if let Some(captures) = self.part_heading.captures(line) {
            let roman = captures
                .get(1)
                .map(|value| value.as_str().to_ascii_uppercase())
                .unwrap_or_default();
            let title_hint = captures
                .get(2)
                .map(|value| value.as_str().trim().to_string())
                .filter(|title| !title.is_empty());

            return LineClass::PartHeader { roman, title_hint };
        }

        if let Some(captures) = self.clause_prefix.captures(line) {
            let number = captures
                .get(1)
                .map(|value| value.as_str().to_string())
                .unwrap_or_default();
            let rest = captures.get(2).map(|value| value.as_str().trim()).unwrap_or("");

            if self.is_actual_clause_start(rest, previous) {
                return LineClass::ClauseStart {
                    number,
                    title_hint: rest.to_string(),
                };
            }

            // Failed candidates degrade: bare numbers and punctuation-only
            // fragments are noise, anything with prose flows into whatever is
            // accumulating.
            if self.non_content.is_match(line) {
                return LineClass::Noise;
            }
            return LineClass::Continuation;
        }

        LineClass::Continuation
    }

    /// The boundary predicate guarding against page numbers, list items and
    /// schedule entries that share the `<digits>.` lexical shape with real
    /// clause headings.
    fn is_actual_clause_start(&self, rest: &str, previous: Option<&str>) -> bool {
        if !rest.chars().any(|ch| ch.is_ascii_alphabetic()) {
            return false;
        }

        let after_numeric_sibling = previous
            .map(|prev| self.clause_prefix.is_match(prev.trim()))
            .unwrap_or(false);
        if after_numeric_sibling && rest.len() <= self.strategy.sub_item_max_rest_len {
            return false;
        }

        if rest.len() > self.strategy.boundary_min_rest_len {
            return true;
        }

        // Short headings ("Short title", "Application") still open clauses
        // when they read as a heading rather than a sentence fragment.
        rest.chars()
            .next()
            .map(|ch| ch.is_ascii_uppercase())
            .unwrap_or(false)
    }

    pub fn is_start_banner(&self, line: &str) -> bool {
        let lowered = line.trim().to_lowercase();
        self.strategy
            .start_banners
            .iter()
            .any(|banner| lowered.contains(banner))
    }

    fn is_noise(&self, line: &str) -> bool {
        if line.len() < self.strategy.min_line_len {
            return true;
        }

        if self.page_marker.is_match(line) || self.non_content.is_match(line) {
            return true;
        }

        let lowered = line.to_lowercase();
        self.strategy
            .noise_prefixes
            .iter()
            .any(|prefix| lowered.starts_with(prefix))
    }
}

use crate::model::Part;

use super::accumulate::{ClauseAccumulator, ClauseDraft};
use super::classify::{LineClass, LineClassifier};
use super::roman::roman_to_int;
use super::scan::{LineCursor, RawLine, content_lines};

/// Structural output of the sequential scan, before enrichment.
#[derive(Debug, Default)]
pub struct ParsedDocument {
    pub parts: Vec<Part>,
    pub clauses: Vec<ClauseDraft>,
    pub warnings: Vec<String>,
    pub line_count: usize,
    pub content_line_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    SeekingStart,
    InPart,
    InClause,
}

/// Per-step parser state threaded through the fold over classified lines.
#[derive(Debug)]
struct ParserContext {
    state: ScanState,
    current_part: Option<Part>,
    active: Option<ClauseAccumulator>,
    next_sequence: u32,
    lines_per_page: usize,
    parts: Vec<Part>,
    clauses: Vec<ClauseDraft>,
    warnings: Vec<String>,
}

/// Single-threaded fold over the document's content lines. Each line is
/// classified exactly once; the mid-clause part header is a single explicit
/// transition (finalize, then open the part), so the cursor is never rewound.
pub fn parse_document(text: &str, classifier: &LineClassifier) -> ParsedDocument {
    let lines = content_lines(text);
    let mut cursor = LineCursor::new(&lines);
    let mut previous: Option<&str> = None;

    let mut context = ParserContext {
        state: ScanState::SeekingStart,
        current_part: None,
        active: None,
        next_sequence: 1,
        lines_per_page: classifier.strategy().lines_per_page,
        parts: Vec::new(),
        clauses: Vec::new(),
        warnings: Vec::new(),
    };

    while let Some(raw) = cursor.next_line() {
        let class = classifier.classify(&raw.text, previous);
        context = context.step(class, raw, &mut cursor, classifier);
        previous = Some(raw.text.as_str());
    }

    context.finish(text.lines().count(), lines.len())
}

impl ParserContext {
    fn step(
        mut self,
        class: LineClass,
        raw: &RawLine,
        cursor: &mut LineCursor<'_>,
        classifier: &LineClassifier,
    ) -> Self {
        if self.state == ScanState::SeekingStart {
            return match class {
                LineClass::PartHeader { roman, title_hint } => {
                    self.open_part(roman, title_hint, cursor, classifier)
                }
                _ if classifier.is_start_banner(&raw.text) => {
                    self.state = ScanState::InPart;
                    self
                }
                _ => self,
            };
        }

        match class {
            LineClass::Noise => self,
            LineClass::PartHeader { roman, title_hint } => {
                self.finalize_active();
                self.open_part(roman, title_hint, cursor, classifier)
            }
            LineClass::ClauseStart { number, title_hint } => {
                self.finalize_active();
                self.begin_clause(number, title_hint, raw.index, cursor, classifier)
            }
            LineClass::Continuation => {
                if let Some(active) = self.active.as_mut() {
                    active.push_fragment(&raw.text);
                }
                self
            }
        }
    }

    fn open_part(
        mut self,
        roman: String,
        title_hint: Option<String>,
        cursor: &mut LineCursor<'_>,
        classifier: &LineClassifier,
    ) -> Self {
        let Some(ordinal) = roman_to_int(&roman) else {
            self.warnings
                .push(format!("part header with undecodable numeral '{roman}'"));
            self.state = ScanState::InPart;
            return self;
        };

        let title = title_hint.unwrap_or_else(|| borrow_part_title(cursor, classifier));
        let part = Part {
            ordinal,
            roman_label: roman,
            title,
        };

        self.parts.push(part.clone());
        self.current_part = Some(part);
        self.state = ScanState::InPart;
        self
    }

    fn begin_clause(
        mut self,
        number: String,
        title_hint: String,
        line_index: usize,
        cursor: &mut LineCursor<'_>,
        classifier: &LineClassifier,
    ) -> Self {
        if self.current_part.is_none() {
            self.warnings
                .push(format!("clause {number} found with no active part; skipped"));
            return self;
        }

        let strategy = classifier.strategy();
        let mut title = title_hint;

        // Wrapped headings: a short same-line hint yields to the next line
        // when that line is long enough and is not a clause boundary itself.
        // The borrowed line is consumed so it cannot re-enter as body text.
        if title.len() < strategy.short_title_max_len {
            if let Some(peeked) = cursor.peek() {
                let next_class = classifier.classify(&peeked.text, None);
                let adoptable = peeked.text.len() > strategy.borrowed_title_min_len
                    && !matches!(next_class, LineClass::ClauseStart { .. });
                if adoptable {
                    title = peeked.text.clone();
                    cursor.advance();
                }
            }
        }

        self.active = Some(ClauseAccumulator::new(number, title, line_index));
        self.state = ScanState::InClause;
        self
    }

    fn finalize_active(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        let Some(part) = self.current_part.as_ref() else {
            return;
        };

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.clauses
            .push(active.finalize(part, sequence, self.lines_per_page));
        self.state = ScanState::InPart;
    }

    fn finish(mut self, line_count: usize, content_line_count: usize) -> ParsedDocument {
        self.finalize_active();

        ParsedDocument {
            parts: self.parts,
            clauses: self.clauses,
            warnings: self.warnings,
            line_count,
            content_line_count,
        }
    }
}

/// Part headers without an inline title take theirs from the next content
/// line, when that line is plain prose.
fn borrow_part_title(cursor: &mut LineCursor<'_>, classifier: &LineClassifier) -> String {
    let Some(peeked) = cursor.peek() else {
        return String::new();
    };

    match classifier.classify(&peeked.text, None) {
        LineClass::Continuation => {
            let title = peeked.text.clone();
            cursor.advance();
            title
        }
        _ => String::new(),
    }
}

use crate::model::Part;

/// A structurally complete clause awaiting metadata enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseDraft {
    pub id: String,
    pub number: String,
    pub sequence: u32,
    pub part_ordinal: u32,
    pub part_label: String,
    pub part_title: String,
    pub title: String,
    pub body: String,
    pub page_estimate: u32,
}

/// Owns the in-progress clause between its start line and the next boundary.
#[derive(Debug)]
pub struct ClauseAccumulator {
    number: String,
    title: String,
    fragments: Vec<String>,
    start_line_index: usize,
}

impl ClauseAccumulator {
    pub fn new(number: String, title: String, start_line_index: usize) -> Self {
        Self {
            number,
            title,
            fragments: Vec::new(),
            start_line_index,
        }
    }

    pub fn push_fragment(&mut self, text: &str) {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            self.fragments.push(trimmed.to_string());
        }
    }

    /// Joins fragments with single spaces and strips an exact title prefix
    /// from the body, which otherwise duplicates when a heading line was also
    /// captured as content.
    pub fn finalize(self, part: &Part, sequence: u32, lines_per_page: usize) -> ClauseDraft {
        let mut body = self.fragments.join(" ").trim().to_string();

        if !self.title.is_empty() {
            if let Some(stripped) = body.strip_prefix(self.title.as_str()) {
                body = stripped.trim_start().to_string();
            }
        }

        let page_estimate = (self.start_line_index / lines_per_page.max(1)) as u32 + 1;

        ClauseDraft {
            id: format!("bylaw-{}", self.number),
            number: self.number,
            sequence,
            part_ordinal: part.ordinal,
            part_label: part.roman_label.clone(),
            part_title: part.title.clone(),
            title: self.title,
            body,
            page_estimate,
        }
    }
}

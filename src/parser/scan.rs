/// One line of prepared input. `index` is the position in the raw text,
/// before blank filtering, so page estimates track the source layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub text: String,
    pub index: usize,
}

pub fn content_lines(text: &str) -> Vec<RawLine> {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(RawLine {
                    text: trimmed.to_string(),
                    index,
                })
            }
        })
        .collect()
}

/// Forward-only cursor with a size-1 lookahead. The scanner advances only
/// through `next_line`/`advance`; boundary decisions read `peek` without
/// consuming, so no code path ever rewinds the index.
#[derive(Debug)]
pub struct LineCursor<'a> {
    lines: &'a [RawLine],
    index: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(lines: &'a [RawLine]) -> Self {
        Self { lines, index: 0 }
    }

    pub fn next_line(&mut self) -> Option<&'a RawLine> {
        let line = self.lines.get(self.index)?;
        self.index += 1;
        Some(line)
    }

    pub fn peek(&self) -> Option<&'a RawLine> {
        self.lines.get(self.index)
    }

    /// Consumes the peeked line, used when a lookahead line is adopted as a
    /// title and must not re-enter the scan as body content.
    pub fn advance(&mut self) {
        if self.index < self.lines.len() {
            self.index += 1;
        }
    }
}

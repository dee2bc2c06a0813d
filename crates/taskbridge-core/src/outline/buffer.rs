//! In-place line buffer for one text snapshot

/// Lines of a document, addressed by the zero-based line numbers the parser
/// hands out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    /// Split a document on `\n`
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }

    pub fn get(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(String::as_str)
    }

    /// Rewrite one line through `f`
    ///
    /// Returns false (and leaves the buffer untouched) if the line doesn't
    /// exist.
    pub fn rewrite(&mut self, line: usize, f: impl FnOnce(&str) -> String) -> bool {
        match self.lines.get_mut(line) {
            Some(current) => {
                *current = f(current);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Join the lines back into a document
    pub fn into_text(self) -> String {
        self.lines.join("\n")
    }
}

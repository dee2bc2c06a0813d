//! Parent/child structure inferred from indentation

use std::collections::HashMap;

use crate::models::TaskRecord;

/// Parent links for every task in one parse pass
///
/// A task's parent is the nearest earlier task with a strictly smaller indent
/// level. Built in one forward pass with a stack of open ancestors.
#[derive(Debug, Default)]
pub struct Hierarchy {
    /// child line -> parent line
    parents: HashMap<usize, usize>,
    /// line -> remote id known before this pass
    known_ids: HashMap<usize, String>,
}

impl Hierarchy {
    /// Build from records in line order
    pub fn build(records: &[TaskRecord]) -> Self {
        let mut parents = HashMap::new();
        let mut known_ids = HashMap::new();
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for record in records {
            while stack
                .last()
                .is_some_and(|&(level, _)| level >= record.indent_level)
            {
                stack.pop();
            }

            if let Some(&(_, parent_line)) = stack.last() {
                parents.insert(record.line_number, parent_line);
            }
            if let Some(ref id) = record.remote_id {
                known_ids.insert(record.line_number, id.clone());
            }

            stack.push((record.indent_level, record.line_number));
        }

        Self { parents, known_ids }
    }

    /// Line of the task's parent, if it has one
    pub fn parent_line(&self, line: usize) -> Option<usize> {
        self.parents.get(&line).copied()
    }

    /// Remote id of the task's parent
    ///
    /// An id assigned earlier in the current pass wins over the id the parent
    /// line carried when it was parsed.
    pub fn parent_id(&self, line: usize, assigned: &HashMap<usize, String>) -> Option<String> {
        let parent = self.parent_line(line)?;
        assigned
            .get(&parent)
            .or_else(|| self.known_ids.get(&parent))
            .cloned()
    }
}

//! Undo/redo history over the ordered annotation list
//!
//! Every commit stores a full copy of the list as it was before the commit.
//! Undo and redo swap whole snapshots, so no snapshot ever aliases the live
//! list.

use std::collections::VecDeque;

use crate::domain::Annotation;

/// Undo depth used when none (or zero) is configured
pub const DEFAULT_MAX_HISTORY: usize = 50;

#[derive(Clone, Debug)]
pub struct History {
    annotations: Vec<Annotation>,
    undo_stack: VecDeque<Vec<Annotation>>,
    redo_stack: Vec<Vec<Annotation>>,
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        let max_depth = if max_depth == 0 {
            DEFAULT_MAX_HISTORY
        } else {
            max_depth
        };
        Self {
            annotations: Vec::new(),
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    /// Append an annotation, recording the previous list for undo
    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.push_undo(self.annotations.clone());
        // Truncate any redo history
        self.redo_stack.clear();
        self.annotations.push(annotation);
    }

    /// Restore the list as it was before the last commit
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo_stack.pop_back() else {
            return false;
        };
        let current = std::mem::replace(&mut self.annotations, previous);
        self.redo_stack.push(current);
        true
    }

    /// Re-apply the last undone commit
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.annotations, next);
        self.push_undo(current);
        true
    }

    /// Committed annotations, oldest (bottom-most) first
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn push_undo(&mut self, snapshot: Vec<Annotation>) {
        self.undo_stack.push_back(snapshot);
        while self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
    }
}

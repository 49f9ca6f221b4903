use std::collections::HashSet;

use crate::arrangement::DragResult;
use crate::models::SectionId;

/// Selection and expand/collapse state for the project pane. Expansion is
/// keyed by section id, so reordering never changes which cards are open.
#[derive(Default)]
pub(crate) struct ProjectView {
    pub(crate) selected: usize,
    expanded: HashSet<SectionId>,
}

impl ProjectView {
    pub(crate) fn move_selection(&mut self, offset: isize, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        let last = len as isize - 1;
        self.selected = (self.selected as isize + offset).clamp(0, last) as usize;
    }

    pub(crate) fn select(&mut self, index: usize, len: usize) {
        self.selected = index;
        self.ensure_in_bounds(len);
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    pub(crate) fn ensure_in_bounds(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Flip the expansion of one card and return its new state.
    pub(crate) fn toggle_expanded(&mut self, id: &SectionId) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.clone());
            true
        }
    }

    pub(crate) fn is_expanded(&self, id: &SectionId) -> bool {
        self.expanded.contains(id)
    }

    /// Drop display state for a section that left the arrangement.
    pub(crate) fn forget(&mut self, id: &SectionId) {
        self.expanded.remove(id);
    }
}

/// A card that has been picked up and is being carried to a new slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MoveState {
    pub(crate) source: usize,
    pub(crate) target: usize,
}

impl MoveState {
    pub(crate) fn new(source: usize) -> Self {
        Self {
            source,
            target: source,
        }
    }

    pub(crate) fn move_target(&mut self, offset: isize, len: usize) {
        if len == 0 {
            return;
        }
        let last = len as isize - 1;
        self.target = (self.target as isize + offset).clamp(0, last) as usize;
    }

    pub(crate) fn target_first(&mut self) {
        self.target = 0;
    }

    pub(crate) fn target_last(&mut self, len: usize) {
        self.target = len.saturating_sub(1);
    }

    /// Arrangement indices in the order they would appear if the card were
    /// dropped on the current target.
    pub(crate) fn preview_order(&self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        if self.source < len && self.target < len {
            let carried = order.remove(self.source);
            order.insert(self.target, carried);
        }
        order
    }

    pub(crate) fn release(self) -> DragResult {
        DragResult::dropped(self.source, self.target)
    }

    pub(crate) fn cancel(self) -> DragResult {
        DragResult::cancelled(self.source)
    }
}

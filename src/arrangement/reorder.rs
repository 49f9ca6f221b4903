use tracing::debug;

use super::Arrangement;

/// A slot in the arrangement as reported by a move gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragLocation {
    pub index: usize,
}

/// Completion event of a move gesture. A missing destination means the
/// gesture was abandoned and the arrangement must stay as it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragResult {
    pub source: DragLocation,
    pub destination: Option<DragLocation>,
}

impl DragResult {
    pub fn dropped(source: usize, destination: usize) -> Self {
        Self {
            source: DragLocation { index: source },
            destination: Some(DragLocation { index: destination }),
        }
    }

    pub fn cancelled(source: usize) -> Self {
        Self {
            source: DragLocation { index: source },
            destination: None,
        }
    }
}

impl Arrangement {
    /// Remove the section at `source` and reinsert it at `destination`,
    /// shifting the sections in between by one slot. Every other section keeps
    /// its relative order.
    ///
    /// Gesture layers only hand out in-range indices; anything else is
    /// ignored. Returns whether the order changed.
    pub fn move_section(&mut self, source: usize, destination: usize) -> bool {
        let len = self.sections.len();
        if source >= len || destination >= len || source == destination {
            return false;
        }
        let moved = self.sections.remove(source);
        debug!(id = %moved.id, source, destination, "moved section");
        self.sections.insert(destination, moved);
        true
    }

    /// Apply the completion event of a move gesture.
    pub fn apply_drag(&mut self, result: &DragResult) -> bool {
        match result.destination {
            Some(destination) => self.move_section(result.source.index, destination.index),
            None => false,
        }
    }
}

//! The arrangement engine split across logical submodules.

mod editor;
mod export;
mod reorder;
mod store;

pub use editor::{EditSession, SectionDraft};
pub use export::{export_arrangement, render_text, ExportError, EXPORT_FILE_NAME};
pub use reorder::{DragLocation, DragResult};
pub use store::Arrangement;

//! Core library surface for the Lyrics Arranger TUI application.
//!
//! The arrangement engine is usable on its own: the TUI in [`ui`] is just one
//! front end driving it through key events.
pub mod arrangement;
pub mod config;
pub mod logging;
pub mod models;
pub mod ui;

/// The ordered section list and its editing, reordering and export helpers.
pub use arrangement::{
    export_arrangement, render_text, Arrangement, DragLocation, DragResult, EditSession,
    ExportError, SectionDraft, EXPORT_FILE_NAME,
};

pub use config::Config;
pub use models::{Section, SectionId, CUSTOM_LABEL, SECTION_TYPES};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};

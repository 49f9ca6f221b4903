use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use super::Arrangement;

/// Name of the file every export writes. Exporting again overwrites it.
pub const EXPORT_FILE_NAME: &str = "lyrics_arrangement.txt";

/// Failures while writing the exported arrangement to disk.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create export directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Render the arrangement as plain text: each section's label on its own
/// line followed by its lyrics, sections separated by one blank line. No
/// trailing newline is added.
pub fn render_text(arrangement: &Arrangement) -> String {
    arrangement
        .iter()
        .map(|section| format!("{}\n{}", section.kind, section.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Write the rendered arrangement into `dir`, creating the directory when
/// needed. An empty arrangement writes nothing and yields `Ok(None)`.
pub fn export_arrangement(
    arrangement: &Arrangement,
    dir: &Path,
) -> Result<Option<PathBuf>, ExportError> {
    if arrangement.is_empty() {
        return Ok(None);
    }

    fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(EXPORT_FILE_NAME);
    let text = render_text(arrangement);
    fs::write(&path, &text).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), sections = arrangement.len(), bytes = text.len(), "exported arrangement");
    Ok(Some(path))
}

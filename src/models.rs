//! Domain models passed between the arrangement engine and the TUI. The types
//! stay light-weight data holders so the other layers can focus on ordering,
//! export, and presentation logic.

use std::fmt;

/// Labels offered by the section picker, in display order. The final entry is
/// the sentinel that switches the composer over to a free-text label.
pub const SECTION_TYPES: &[&str] = &[
    "Instrumental",
    "Verse 1",
    "Verse 2",
    "Verse 3",
    "Pre-Chorus",
    "Chorus 1",
    "Chorus 2",
    "Bridge",
    "Coda 1",
    "Coda 2",
    "Tag",
    "End",
    CUSTOM_LABEL,
];

/// Picker entry that means "use the custom title field instead".
pub const CUSTOM_LABEL: &str = "Custom";

/// Opaque identifier for a section. Ids are only compared for equality; the
/// textual form is kept so duplicates can derive their id from the original.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionId(String);

impl SectionId {
    pub(crate) fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One labeled block of lyrics inside an arrangement.
pub struct Section {
    /// Unique among the sections currently in the arrangement.
    pub id: SectionId,
    /// Section label such as `Verse 1`, or whatever custom text the user typed.
    /// Several sections may share the same label.
    pub kind: String,
    /// Lyrics body. Newlines are preserved verbatim through export.
    pub content: String,
    /// Optional song title captured when the section was added.
    pub song_title: String,
    /// Optional artist captured when the section was added.
    pub artist: String,
}

impl Section {
    /// Compose a `Title - Artist` caption that gracefully omits whichever half
    /// is blank. Returns `None` when neither was provided.
    pub fn source_caption(&self) -> Option<String> {
        let title = self.song_title.trim();
        let artist = self.artist.trim();
        match (title.is_empty(), artist.is_empty()) {
            (true, true) => None,
            (false, true) => Some(title.to_string()),
            (true, false) => Some(artist.to_string()),
            (false, false) => Some(format!("{title} - {artist}")),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(title: &str, artist: &str) -> Section {
        Section {
            id: SectionId::new("section-1"),
            kind: "Verse 1".to_string(),
            content: "la la".to_string(),
            song_title: title.to_string(),
            artist: artist.to_string(),
        }
    }

    #[test]
    fn caption_joins_title_and_artist() {
        assert_eq!(
            section("Hallelujah", "Cohen").source_caption().as_deref(),
            Some("Hallelujah - Cohen")
        );
        assert_eq!(
            section("Hallelujah", " ").source_caption().as_deref(),
            Some("Hallelujah")
        );
        assert_eq!(section("", "Cohen").source_caption().as_deref(), Some("Cohen"));
        assert_eq!(section("", "").source_caption(), None);
    }

    #[test]
    fn vocabulary_ends_with_custom() {
        assert_eq!(SECTION_TYPES.len(), 13);
        assert_eq!(SECTION_TYPES.last(), Some(&CUSTOM_LABEL));
    }
}

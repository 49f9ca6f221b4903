use tracing::debug;

use crate::models::{Section, SectionId};

/// The ordered list of sections that makes up the current project. Position
/// in the list is the only relation between sections: it drives both the
/// display order and the export order.
///
/// The store never validates section contents. Rejecting empty lyrics or a
/// missing label is the editor's job, see [`super::SectionDraft`].
#[derive(Debug, Default)]
pub struct Arrangement {
    pub(super) sections: Vec<Section>,
    /// Monotonic counter feeding id generation. Never reset, so ids stay
    /// distinct even after deletions.
    next_serial: u64,
}

impl Arrangement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sections in arrangement order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn find(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|section| &section.id == id)
    }

    pub fn position(&self, id: &SectionId) -> Option<usize> {
        self.sections.iter().position(|section| &section.id == id)
    }

    /// Append a new section to the end of the arrangement and return its
    /// freshly generated id.
    pub fn append(
        &mut self,
        kind: impl Into<String>,
        content: impl Into<String>,
        song_title: impl Into<String>,
        artist: impl Into<String>,
    ) -> SectionId {
        let id = SectionId::new(format!("section-{}", self.bump_serial()));
        let section = Section {
            id: id.clone(),
            kind: kind.into(),
            content: content.into(),
            song_title: song_title.into(),
            artist: artist.into(),
        };
        debug!(id = %id, kind = %section.kind, position = self.sections.len(), "appended section");
        self.sections.push(section);
        id
    }

    /// Remove the section with the given id. Returns `false` and leaves the
    /// arrangement untouched when no such section exists.
    pub fn delete(&mut self, id: &SectionId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.sections.remove(index);
                debug!(id = %id, index, "deleted section");
                true
            }
            None => false,
        }
    }

    /// Copy a section under a new id derived from the original one and append
    /// the copy at the end of the arrangement, not next to the original.
    pub fn duplicate(&mut self, id: &SectionId) -> Option<SectionId> {
        let original = self.find(id)?.clone();
        let copy_id = SectionId::new(format!("{}-copy-{}", original.id, self.bump_serial()));
        debug!(original = %original.id, copy = %copy_id, "duplicated section");
        self.sections.push(Section {
            id: copy_id.clone(),
            ..original
        });
        Some(copy_id)
    }

    /// Overwrite the label and lyrics of the section with the given id,
    /// keeping its position, id and song metadata.
    pub fn update(&mut self, id: &SectionId, kind: &str, content: &str) -> bool {
        let Some(section) = self.sections.iter_mut().find(|section| &section.id == id) else {
            return false;
        };
        section.kind = kind.to_string();
        section.content = content.to_string();
        debug!(id = %id, kind, "updated section");
        true
    }

    fn bump_serial(&mut self) -> u64 {
        self.next_serial += 1;
        self.next_serial
    }
}

use tracing::{debug, info};

use crate::models::{Section, SectionId, CUSTOM_LABEL};

use super::Arrangement;

/// Inputs captured by the composer before a section is added. The draft is
/// the only gatekeeper for new sections: the store itself accepts anything.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SectionDraft {
    pub song_title: String,
    pub artist: String,
    /// Fixed label picked from the vocabulary. Empty means the custom label
    /// field is in charge.
    selected_label: String,
    pub custom_label: String,
    pub content: String,
}

impl SectionDraft {
    /// Pick a label from the vocabulary. Picking the `Custom` entry clears the
    /// fixed label so the custom title is used instead.
    pub fn select_label(&mut self, label: &str) {
        if label == CUSTOM_LABEL {
            self.selected_label.clear();
        } else {
            self.selected_label = label.to_string();
        }
    }

    /// The fixed label currently picked, if any.
    pub fn selected_label(&self) -> Option<&str> {
        if self.selected_label.is_empty() {
            None
        } else {
            Some(&self.selected_label)
        }
    }

    /// Whether the custom title field is the active label source.
    pub fn uses_custom_label(&self) -> bool {
        self.selected_label.is_empty()
    }

    /// Label the section would be created with. The fixed label wins over the
    /// custom one.
    pub fn label(&self) -> &str {
        if self.selected_label.is_empty() {
            &self.custom_label
        } else {
            &self.selected_label
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.content.is_empty() && !self.label().is_empty()
    }

    /// Append the drafted section to the arrangement and reset every field.
    /// Invalid drafts are ignored silently and left as they are.
    pub fn submit(&mut self, arrangement: &mut Arrangement) -> Option<SectionId> {
        if !self.can_submit() {
            debug!("ignored incomplete section draft");
            return None;
        }
        let id = arrangement.append(
            self.label(),
            self.content.as_str(),
            self.song_title.as_str(),
            self.artist.as_str(),
        );
        self.clear();
        info!(id = %id, total = arrangement.len(), "added section to project");
        Some(id)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Editable copy of one section. Changes only reach the arrangement when the
/// session is confirmed; dropping or cancelling it discards them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    id: SectionId,
    pub kind: String,
    pub content: String,
}

impl EditSession {
    pub fn open(section: &Section) -> Self {
        Self {
            id: section.id.clone(),
            kind: section.kind.clone(),
            content: section.content.clone(),
        }
    }

    /// Write the edited label and lyrics back in place. Returns `false` when
    /// the section disappeared while the session was open.
    pub fn confirm(self, arrangement: &mut Arrangement) -> bool {
        let applied = arrangement.update(&self.id, &self.kind, &self.content);
        if applied {
            info!(id = %self.id, "saved section edit");
        }
        applied
    }

    pub fn cancel(self) {
        debug!(id = %self.id, "discarded section edit");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_draft() -> SectionDraft {
        let mut draft = SectionDraft {
            song_title: "Amazing Grace".to_string(),
            artist: "Newton".to_string(),
            content: "how sweet\nthe sound".to_string(),
            ..SectionDraft::default()
        };
        draft.select_label("Verse 1");
        draft
    }

    #[test]
    fn submit_appends_and_clears_inputs() {
        let mut arrangement = Arrangement::new();
        arrangement.append("Intro", "x", "", "");
        let mut draft = filled_draft();

        let id = draft.submit(&mut arrangement).unwrap();

        assert_eq!(arrangement.len(), 2);
        let added = arrangement.get(1).unwrap();
        assert_eq!(added.id, id);
        assert_eq!(added.kind, "Verse 1");
        assert_eq!(added.content, "how sweet\nthe sound");
        assert_eq!(added.song_title, "Amazing Grace");
        assert_eq!(added.artist, "Newton");
        assert_eq!(draft, SectionDraft::default());
    }

    #[test]
    fn empty_lyrics_are_rejected_without_side_effects() {
        let mut arrangement = Arrangement::new();
        let mut draft = filled_draft();
        draft.content.clear();
        let before = draft.clone();

        assert!(draft.submit(&mut arrangement).is_none());
        assert!(arrangement.is_empty());
        assert_eq!(draft, before);
    }

    #[test]
    fn missing_label_is_rejected() {
        let mut arrangement = Arrangement::new();
        let mut draft = filled_draft();
        draft.select_label(CUSTOM_LABEL);

        assert!(!draft.can_submit());
        assert!(draft.submit(&mut arrangement).is_none());
        assert!(arrangement.is_empty());
    }

    #[test]
    fn custom_label_is_used_when_no_fixed_label_is_picked() {
        let mut arrangement = Arrangement::new();
        let mut draft = filled_draft();
        draft.select_label(CUSTOM_LABEL);
        draft.custom_label = "Outro (half time)".to_string();

        draft.submit(&mut arrangement).unwrap();
        assert_eq!(arrangement.get(0).unwrap().kind, "Outro (half time)");
    }

    #[test]
    fn fixed_label_wins_over_custom_text() {
        let mut draft = filled_draft();
        draft.custom_label = "ignored".to_string();
        assert_eq!(draft.label(), "Verse 1");
        assert!(!draft.uses_custom_label());
    }

    #[test]
    fn picking_custom_clears_fixed_label() {
        let mut draft = filled_draft();
        assert_eq!(draft.selected_label(), Some("Verse 1"));
        draft.select_label(CUSTOM_LABEL);
        assert_eq!(draft.selected_label(), None);
        assert!(draft.uses_custom_label());
    }

    #[test]
    fn metadata_is_not_carried_to_the_next_add() {
        let mut arrangement = Arrangement::new();
        let mut draft = filled_draft();
        draft.submit(&mut arrangement).unwrap();

        draft.select_label("Chorus 1");
        draft.content = "na na".to_string();
        draft.submit(&mut arrangement).unwrap();

        let second = arrangement.get(1).unwrap();
        assert!(second.song_title.is_empty());
        assert!(second.artist.is_empty());
    }

    #[test]
    fn clear_resets_label_and_text() {
        let mut draft = filled_draft();
        draft.custom_label = "Tag".to_string();
        draft.clear();

        assert_eq!(draft, SectionDraft::default());
        assert!(draft.uses_custom_label());
        assert!(!draft.can_submit());
    }

    #[test]
    fn confirmed_edit_replaces_in_place() {
        let mut arrangement = Arrangement::new();
        arrangement.append("Verse 1", "one", "", "");
        let target = arrangement.append("Chorus 1", "two", "Song", "Artist");
        arrangement.append("Bridge", "three", "", "");

        let mut session = EditSession::open(arrangement.find(&target).unwrap());
        session.kind = "Chorus 2".to_string();
        session.content = "two, again".to_string();
        assert!(session.confirm(&mut arrangement));

        let edited = arrangement.get(1).unwrap();
        assert_eq!(edited.id, target);
        assert_eq!(edited.kind, "Chorus 2");
        assert_eq!(edited.content, "two, again");
        assert_eq!(edited.song_title, "Song");
        assert_eq!(arrangement.get(0).unwrap().content, "one");
        assert_eq!(arrangement.get(2).unwrap().content, "three");
    }

    #[test]
    fn cancelled_edit_changes_nothing() {
        let mut arrangement = Arrangement::new();
        let id = arrangement.append("Verse 1", "one", "", "");
        let before = arrangement.sections().to_vec();

        let mut session = EditSession::open(arrangement.find(&id).unwrap());
        session.content = "scratch".to_string();
        session.cancel();

        assert_eq!(arrangement.sections(), before.as_slice());
    }

    #[test]
    fn edit_of_deleted_section_is_a_no_op() {
        let mut arrangement = Arrangement::new();
        let id = arrangement.append("Verse 1", "one", "", "");
        let session = EditSession::open(arrangement.find(&id).unwrap());
        arrangement.delete(&id);

        assert!(!session.confirm(&mut arrangement));
        assert!(arrangement.is_empty());
    }
}

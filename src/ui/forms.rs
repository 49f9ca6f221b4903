use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::arrangement::{Arrangement, EditSession, SectionDraft};
use crate::models::{Section, SectionId, CUSTOM_LABEL, SECTION_TYPES};

/// Fields of the "Add Lyrics" composer, in focus order.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub(crate) enum ComposerField {
    SongTitle,
    Artist,
    #[default]
    Section,
    CustomTitle,
    Lyrics,
}

/// Composer state: the draft itself plus focus and picker position.
#[derive(Clone)]
pub(crate) struct ComposerForm {
    pub(crate) draft: SectionDraft,
    pub(crate) active: ComposerField,
    /// Index into [`SECTION_TYPES`] the picker currently shows.
    pub(crate) picker: usize,
}

impl Default for ComposerForm {
    fn default() -> Self {
        Self {
            draft: SectionDraft::default(),
            active: ComposerField::default(),
            picker: custom_index(),
        }
    }
}

fn custom_index() -> usize {
    SECTION_TYPES
        .iter()
        .position(|label| *label == CUSTOM_LABEL)
        .unwrap_or(SECTION_TYPES.len() - 1)
}

impl ComposerForm {
    /// Move focus to the next visible field. The custom title is skipped
    /// while a fixed label is picked.
    pub(crate) fn next_field(&mut self) {
        self.active = match self.active {
            ComposerField::SongTitle => ComposerField::Artist,
            ComposerField::Artist => ComposerField::Section,
            ComposerField::Section if self.draft.uses_custom_label() => ComposerField::CustomTitle,
            ComposerField::Section | ComposerField::CustomTitle => ComposerField::Lyrics,
            ComposerField::Lyrics => ComposerField::SongTitle,
        };
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = match self.active {
            ComposerField::SongTitle => ComposerField::Lyrics,
            ComposerField::Artist => ComposerField::SongTitle,
            ComposerField::Section => ComposerField::Artist,
            ComposerField::CustomTitle => ComposerField::Section,
            ComposerField::Lyrics if self.draft.uses_custom_label() => ComposerField::CustomTitle,
            ComposerField::Lyrics => ComposerField::Section,
        };
    }

    /// Rotate the section picker and apply the label it lands on. Landing on
    /// `Custom` hands focus to the custom title field.
    pub(crate) fn cycle_label(&mut self, offset: isize) {
        let len = SECTION_TYPES.len() as isize;
        self.picker = (self.picker as isize + offset).rem_euclid(len) as usize;
        let label = SECTION_TYPES[self.picker];
        self.draft.select_label(label);
        if label == CUSTOM_LABEL {
            self.active = ComposerField::CustomTitle;
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            ComposerField::SongTitle => self.draft.song_title.push(ch),
            ComposerField::Artist => self.draft.artist.push(ch),
            ComposerField::Section => return false,
            ComposerField::CustomTitle => self.draft.custom_label.push(ch),
            ComposerField::Lyrics => self.draft.content.push(ch),
        }
        true
    }

    /// Insert a line break. Only the lyrics field is multi-line.
    pub(crate) fn newline(&mut self) -> bool {
        if self.active == ComposerField::Lyrics {
            self.draft.content.push('\n');
            true
        } else {
            false
        }
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            ComposerField::SongTitle => {
                self.draft.song_title.pop();
            }
            ComposerField::Artist => {
                self.draft.artist.pop();
            }
            ComposerField::Section => {}
            ComposerField::CustomTitle => {
                self.draft.custom_label.pop();
            }
            ComposerField::Lyrics => {
                self.draft.content.pop();
            }
        }
    }

    /// Hand the draft to the arrangement. On success the whole form resets,
    /// focus included.
    pub(crate) fn submit(&mut self, arrangement: &mut Arrangement) -> Option<SectionId> {
        let id = self.draft.submit(arrangement)?;
        *self = Self::default();
        Some(id)
    }

    pub(crate) fn build_line(&self, field_name: &str, field: ComposerField) -> Line<'static> {
        let is_active = self.active == field;
        let (value, placeholder) = match field {
            ComposerField::SongTitle => (self.draft.song_title.as_str(), "<optional>"),
            ComposerField::Artist => (self.draft.artist.as_str(), "<optional>"),
            ComposerField::CustomTitle => (self.draft.custom_label.as_str(), "<required>"),
            ComposerField::Section => return self.picker_line(field_name),
            ComposerField::Lyrics => (self.draft.content.as_str(), "<required>"),
        };

        let display = if value.is_empty() {
            placeholder.to_string()
        } else {
            value.to_string()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, field_style(is_active, value.is_empty())),
        ])
    }

    fn picker_line(&self, field_name: &str) -> Line<'static> {
        let is_active = self.active == ComposerField::Section;
        let label = SECTION_TYPES[self.picker];
        let style = field_style(is_active, false).add_modifier(Modifier::BOLD);
        let arrows = if is_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled("< ", arrows),
            Span::styled(label.to_string(), style),
            Span::styled(" >", arrows),
        ])
    }

    /// Lyrics rendered line by line, with a placeholder when empty.
    pub(crate) fn lyrics_lines(&self) -> Vec<Line<'static>> {
        let is_active = self.active == ComposerField::Lyrics;
        if self.draft.content.is_empty() {
            return vec![Line::from(Span::styled(
                "<enter lyrics content>",
                field_style(is_active, true),
            ))];
        }
        let style = field_style(is_active, false);
        self.draft
            .content
            .split('\n')
            .map(|line| Line::from(Span::styled(line.to_string(), style)))
            .collect()
    }

    pub(crate) fn value_len(&self, field: ComposerField) -> usize {
        match field {
            ComposerField::SongTitle => self.draft.song_title.chars().count(),
            ComposerField::Artist => self.draft.artist.chars().count(),
            ComposerField::Section => 0,
            ComposerField::CustomTitle => self.draft.custom_label.chars().count(),
            ComposerField::Lyrics => self.draft.content.chars().count(),
        }
    }
}

/// Fields of the edit dialog.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum EditField {
    Kind,
    Content,
}

/// Edit dialog state wrapping the in-flight [`EditSession`].
pub(crate) struct EditForm {
    pub(crate) session: EditSession,
    pub(crate) active: EditField,
}

impl EditForm {
    pub(crate) fn open(section: &Section) -> Self {
        Self {
            session: EditSession::open(section),
            active: EditField::Content,
        }
    }

    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            EditField::Kind => EditField::Content,
            EditField::Content => EditField::Kind,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            EditField::Kind => self.session.kind.push(ch),
            EditField::Content => self.session.content.push(ch),
        }
        true
    }

    pub(crate) fn newline(&mut self) -> bool {
        if self.active == EditField::Content {
            self.session.content.push('\n');
            true
        } else {
            false
        }
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            EditField::Kind => {
                self.session.kind.pop();
            }
            EditField::Content => {
                self.session.content.pop();
            }
        }
    }

    pub(crate) fn kind_line(&self) -> Line<'static> {
        let is_active = self.active == EditField::Kind;
        Line::from(vec![
            Span::raw("Section: "),
            Span::styled(
                self.session.kind.clone(),
                field_style(is_active, self.session.kind.is_empty()),
            ),
        ])
    }

    pub(crate) fn content_lines(&self) -> Vec<Line<'static>> {
        let style = field_style(
            self.active == EditField::Content,
            self.session.content.is_empty(),
        );
        self.session
            .content
            .split('\n')
            .map(|line| Line::from(Span::styled(line.to_string(), style)))
            .collect()
    }
}

/// Column and row of the text cursor at the end of a possibly multi-line
/// value.
pub(crate) fn end_cursor(value: &str) -> (usize, usize) {
    let row = value.matches('\n').count();
    let col = value
        .rsplit('\n')
        .next()
        .map(|line| line.chars().count())
        .unwrap_or(0);
    (col, row)
}

fn field_style(is_active: bool, is_empty: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Yellow)
    } else if is_empty {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    }
}

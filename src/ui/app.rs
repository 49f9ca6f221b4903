use std::io;
use std::mem;
use std::path::{Path, PathBuf};

use crossterm::event::KeyCode;
use open::that as open_path;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{info, warn};

use crate::arrangement::{export_arrangement, Arrangement};
use crate::models::Section;

use super::forms::{end_cursor, ComposerField, ComposerForm, EditField, EditForm};
use super::helpers::{centered_rect, key_hints, surface_error};
use super::screens::{MoveState, ProjectView};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Header space for the application title.
const HEADER_HEIGHT: u16 = 3;
/// Width share of the composer pane, in percent.
const COMPOSER_WIDTH: u16 = 40;

/// Hands an exported file to the system viewer.
type Opener = fn(&Path) -> io::Result<()>;

fn system_open(path: &Path) -> io::Result<()> {
    open_path(path)
}

/// Which pane receives keystrokes while no dialog is open.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Focus {
    Project,
    Composer,
}

/// Fine-grained modes layered over the two panes. At most one edit dialog
/// exists at a time because it lives inside the mode.
enum Mode {
    Normal,
    Moving(MoveState),
    EditingSection(EditForm),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state. The arrangement is owned here and only ever
/// mutated by the key handlers below.
pub struct App {
    arrangement: Arrangement,
    composer: ComposerForm,
    project: ProjectView,
    focus: Focus,
    mode: Mode,
    status: Option<StatusMessage>,
    export_dir: PathBuf,
    open_after_export: bool,
    last_export: Option<PathBuf>,
    opener: Opener,
}

impl App {
    pub fn new(export_dir: PathBuf, open_after_export: bool) -> Self {
        Self {
            arrangement: Arrangement::new(),
            composer: ComposerForm::default(),
            project: ProjectView::default(),
            focus: Focus::Composer,
            mode: Mode::Normal,
            status: None,
            export_dir,
            open_after_export,
            last_export: None,
            opener: system_open,
        }
    }

    pub fn arrangement(&self) -> &Arrangement {
        &self.arrangement
    }

    /// Route one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => match self.focus {
                Focus::Composer => self.handle_composer_key(code),
                Focus::Project => self.handle_project_key(code, &mut exit),
            },
            Mode::Moving(carry) => self.handle_move(code, carry),
            Mode::EditingSection(form) => self.handle_edit(code, form),
        };

        exit
    }

    /// Ctrl+S: submit the composer or save the open edit dialog.
    pub(crate) fn handle_ctrl_s(&mut self) {
        match mem::replace(&mut self.mode, Mode::Normal) {
            Mode::EditingSection(form) => self.save_edit(form),
            Mode::Normal if self.focus == Focus::Composer => self.submit_composer(),
            other => self.mode = other,
        }
    }

    fn handle_composer_key(&mut self, code: KeyCode) -> Mode {
        match code {
            KeyCode::Esc => {
                self.focus = Focus::Project;
                self.clear_status();
            }
            KeyCode::Tab | KeyCode::Down => self.composer.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.composer.previous_field(),
            KeyCode::Left if self.composer.active == ComposerField::Section => {
                self.composer.cycle_label(-1)
            }
            KeyCode::Right if self.composer.active == ComposerField::Section => {
                self.composer.cycle_label(1)
            }
            KeyCode::Backspace => self.composer.backspace(),
            KeyCode::Enter => {
                if !self.composer.newline() {
                    self.submit_composer();
                }
            }
            KeyCode::Char(ch) => {
                self.composer.push_char(ch);
            }
            _ => {}
        }
        Mode::Normal
    }

    fn handle_project_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        let len = self.arrangement.len();
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => *exit = true,
            KeyCode::Esc => self.clear_status(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.focus = Focus::Composer;
            }
            KeyCode::Up => self.project.move_selection(-1, len),
            KeyCode::Down => self.project.move_selection(1, len),
            KeyCode::PageUp => self.project.move_selection(-5, len),
            KeyCode::PageDown => self.project.move_selection(5, len),
            KeyCode::Home => self.project.select_first(),
            KeyCode::End => self.project.select_last(len),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(section) = self.current_section() {
                    let id = section.id.clone();
                    self.project.toggle_expanded(&id);
                }
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                if self.current_section().is_some() {
                    self.set_status("Moving section. Drop with Enter.", StatusKind::Info);
                    return Mode::Moving(MoveState::new(self.project.selected));
                }
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete | KeyCode::Char('-') => {
                self.delete_current();
            }
            KeyCode::Char('c') | KeyCode::Char('C') => self.duplicate_current(),
            KeyCode::Char('e') | KeyCode::Char('E') => {
                if let Some(section) = self.current_section() {
                    let form = EditForm::open(section);
                    self.clear_status();
                    return Mode::EditingSection(form);
                }
            }
            KeyCode::Char('x') | KeyCode::Char('X') => self.export(),
            KeyCode::Char('o') | KeyCode::Char('O') => self.open_last_export(),
            _ => {}
        }
        Mode::Normal
    }

    fn handle_move(&mut self, code: KeyCode, mut carry: MoveState) -> Mode {
        let len = self.arrangement.len();
        match code {
            KeyCode::Up => carry.move_target(-1, len),
            KeyCode::Down => carry.move_target(1, len),
            KeyCode::PageUp => carry.move_target(-5, len),
            KeyCode::PageDown => carry.move_target(5, len),
            KeyCode::Home => carry.target_first(),
            KeyCode::End => carry.target_last(len),
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('m') | KeyCode::Char('M') => {
                let result = carry.release();
                if self.arrangement.apply_drag(&result) {
                    self.project.select(carry.target, len);
                    self.set_status(
                        format!("Moved section to position {}.", carry.target + 1),
                        StatusKind::Info,
                    );
                } else {
                    self.clear_status();
                }
                return Mode::Normal;
            }
            KeyCode::Esc => {
                self.arrangement.apply_drag(&carry.cancel());
                self.set_status("Move cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            _ => {}
        }
        Mode::Moving(carry)
    }

    fn handle_edit(&mut self, code: KeyCode, mut form: EditForm) -> Mode {
        match code {
            KeyCode::Esc => {
                form.session.cancel();
                self.set_status("Edit cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                if form.active == EditField::Kind {
                    self.save_edit(form);
                    return Mode::Normal;
                }
                form.newline();
            }
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            _ => {}
        }
        Mode::EditingSection(form)
    }

    fn submit_composer(&mut self) {
        if self.composer.submit(&mut self.arrangement).is_some() {
            let len = self.arrangement.len();
            self.project.select_last(len);
            self.set_status("Section added to project.", StatusKind::Info);
        }
    }

    fn save_edit(&mut self, form: EditForm) {
        if form.session.confirm(&mut self.arrangement) {
            self.set_status("Section updated.", StatusKind::Info);
        } else {
            self.clear_status();
        }
    }

    fn delete_current(&mut self) {
        let Some(id) = self.current_section().map(|section| section.id.clone()) else {
            return;
        };
        if self.arrangement.delete(&id) {
            self.project.forget(&id);
            self.project.ensure_in_bounds(self.arrangement.len());
            self.set_status("Section deleted.", StatusKind::Info);
        }
    }

    fn duplicate_current(&mut self) {
        let Some(id) = self.current_section().map(|section| section.id.clone()) else {
            return;
        };
        if self.arrangement.duplicate(&id).is_some() {
            self.set_status("Section duplicated to the end.", StatusKind::Info);
        }
    }

    fn export(&mut self) {
        match export_arrangement(&self.arrangement, &self.export_dir) {
            Ok(Some(path)) => {
                self.set_status(format!("Exported to {}.", path.display()), StatusKind::Info);
                self.last_export = Some(path);
                if self.open_after_export {
                    self.open_last_export();
                }
            }
            Ok(None) => {}
            Err(err) => {
                let err = anyhow::Error::new(err);
                warn!(error = %format!("{err:#}"), "export failed");
                self.set_status(surface_error(&err), StatusKind::Error);
            }
        }
    }

    fn open_last_export(&mut self) {
        let Some(path) = self.last_export.clone() else {
            self.set_status("Nothing exported yet.", StatusKind::Error);
            return;
        };
        if let Err(err) = (self.opener)(&path) {
            self.set_status(format!("Failed to open export: {err}"), StatusKind::Error);
        } else {
            info!(path = %path.display(), "opened export");
            self.set_status(format!("Opened {}.", path.display()), StatusKind::Info);
        }
    }

    fn current_section(&self) -> Option<&Section> {
        self.arrangement.get(self.project.selected)
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(COMPOSER_WIDTH),
                Constraint::Percentage(100 - COMPOSER_WIDTH),
            ])
            .split(chunks[1]);
        self.draw_composer(frame, panes[0]);
        self.draw_project(frame, panes[1]);
        self.draw_footer(frame, chunks[2]);

        if let Mode::EditingSection(form) = &self.mode {
            self.draw_edit_dialog(frame, area, form);
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let count = self.arrangement.len();
        let summary = match count {
            0 => "empty project".to_string(),
            1 => "1 section".to_string(),
            n => format!("{n} sections"),
        };
        let header = Paragraph::new(Line::from(vec![
            Span::styled("Lyrics Mixer", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("  •  {summary}")),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(header, area);
    }

    fn draw_composer(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Composer && matches!(self.mode, Mode::Normal);
        let mut block = Block::default().title("Add Lyrics").borders(Borders::ALL);
        if focused {
            block = block.border_style(Style::default().fg(Color::Yellow));
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let form = &self.composer;
        let mut lines = vec![
            form.build_line("Song Title", ComposerField::SongTitle),
            form.build_line("Artist", ComposerField::Artist),
            form.build_line("Section", ComposerField::Section),
        ];
        if form.draft.uses_custom_label() {
            lines.push(form.build_line("Custom Title", ComposerField::CustomTitle));
        }
        lines.push(Line::from(""));
        let lyrics_top = lines.len() + 1;
        lines.push(Line::from("Lyrics:"));
        lines.extend(form.lyrics_lines());
        lines.push(Line::from(""));
        let submit_style = if form.draft.can_submit() {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(Span::styled("[Ctrl+S] Add to Project", submit_style)));

        let paragraph = Paragraph::new(lines);
        frame.render_widget(paragraph, inner);

        if !focused || inner.width == 0 || inner.height == 0 {
            return;
        }
        let (col, row) = match form.active {
            ComposerField::SongTitle => (
                "Song Title: ".len() + form.value_len(ComposerField::SongTitle),
                0,
            ),
            ComposerField::Artist => ("Artist: ".len() + form.value_len(ComposerField::Artist), 1),
            ComposerField::Section => return,
            ComposerField::CustomTitle => (
                "Custom Title: ".len() + form.value_len(ComposerField::CustomTitle),
                3,
            ),
            ComposerField::Lyrics => {
                let (col, row) = end_cursor(&form.draft.content);
                (col, lyrics_top + row)
            }
        };
        let cursor_x = inner.x + (col as u16).min(inner.width.saturating_sub(1));
        let cursor_y = inner.y + (row as u16).min(inner.height.saturating_sub(1));
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn draw_project(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Project || !matches!(self.mode, Mode::Normal);
        let mut block = Block::default()
            .title(format!("Project ({})", self.arrangement.len()))
            .borders(Borders::ALL);
        if focused {
            block = block.border_style(Style::default().fg(Color::Yellow));
        }

        if self.arrangement.is_empty() {
            let message = Paragraph::new("No sections added to the project yet")
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let (order, highlighted, carried) = match &self.mode {
            Mode::Moving(carry) => (
                carry.preview_order(self.arrangement.len()),
                carry.target,
                Some(carry.source),
            ),
            _ => (
                (0..self.arrangement.len()).collect(),
                self.project.selected,
                None,
            ),
        };

        let items: Vec<ListItem> = order
            .iter()
            .enumerate()
            .filter_map(|(slot, &index)| {
                let section = self.arrangement.get(index)?;
                Some(self.section_card(section, slot == highlighted, carried == Some(index)))
            })
            .collect();

        let highlight = if carried.is_some() {
            Style::default().fg(Color::Magenta)
        } else if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let list = List::new(items).block(block).highlight_style(highlight);
        let mut state = ListState::default().with_selected(Some(highlighted));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn section_card(&self, section: &Section, selected: bool, carried: bool) -> ListItem<'static> {
        let expanded = self.project.is_expanded(&section.id);
        let marker = if carried {
            "≡ "
        } else if selected {
            "▶ "
        } else {
            "  "
        };
        let chevron = if expanded { "▲" } else { "▼" };

        let mut header = vec![
            Span::raw(marker),
            Span::styled(
                section.kind.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(caption) = section.source_caption() {
            header.push(Span::styled(
                format!("  ({caption})"),
                Style::default().fg(Color::Gray),
            ));
        }
        header.push(Span::styled(
            format!("  {chevron}"),
            Style::default().fg(Color::DarkGray),
        ));

        let mut lines = vec![Line::from(header)];
        if expanded {
            lines.extend(
                section
                    .content
                    .split('\n')
                    .map(|line| Line::from(format!("    {line}"))),
            );
        }
        lines.push(Line::from(""));
        ListItem::new(lines)
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph =
            Paragraph::new(vec![status_line, self.footer_instructions()]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        match (&self.mode, self.focus) {
            (Mode::Moving(_), _) => key_hints(&[
                ("↑↓", "Move"),
                ("Home/End", "Top/Bottom"),
                ("Enter", "Drop"),
                ("Esc", "Cancel"),
            ]),
            (Mode::EditingSection(_), _) => key_hints(&[
                ("Tab", "Switch Field"),
                ("Ctrl+S", "Save Changes"),
                ("Esc", "Cancel"),
            ]),
            (Mode::Normal, Focus::Composer) => key_hints(&[
                ("Tab/↑↓", "Field"),
                ("←→", "Section"),
                ("Ctrl+S", "Add to Project"),
                ("Esc", "Project"),
                ("Ctrl+C", "Quit"),
            ]),
            (Mode::Normal, Focus::Project) if self.arrangement.is_empty() => key_hints(&[
                ("a", "Add Lyrics"),
                ("q", "Quit"),
            ]),
            (Mode::Normal, Focus::Project) => {
                let mut hints = vec![
                    ("↑↓", "Select"),
                    ("Space", "Expand"),
                    ("m", "Move"),
                    ("e", "Edit"),
                    ("c", "Duplicate"),
                    ("d", "Delete"),
                    ("x", "Export"),
                ];
                if self.last_export.is_some() {
                    hints.push(("o", "Open Export"));
                }
                hints.push(("a", "Add Lyrics"));
                hints.push(("q", "Quit"));
                key_hints(&hints)
            }
        }
    }

    fn draw_edit_dialog(&self, frame: &mut Frame, area: Rect, form: &EditForm) {
        let popup_area = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Edit Section").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![form.kind_line(), Line::from(""), Line::from("Lyrics:")];
        lines.extend(form.content_lines());
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[Ctrl+S] Save Changes   [Esc] Cancel",
            Style::default().fg(Color::DarkGray),
        )));

        let paragraph = Paragraph::new(lines);
        frame.render_widget(paragraph, inner);

        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let (col, row) = match form.active {
            EditField::Kind => ("Section: ".len() + form.session.kind.chars().count(), 0),
            EditField::Content => {
                let (col, row) = end_cursor(&form.session.content);
                (col, 3 + row)
            }
        };
        let cursor_x = inner.x + (col as u16).min(inner.width.saturating_sub(1));
        let cursor_y = inner.y + (row as u16).min(inner.height.saturating_sub(1));
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

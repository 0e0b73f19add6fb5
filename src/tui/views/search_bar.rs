//! Search bar view: text input with the sectioned suggestion dropdown.
//!
//! The core [`SearchBar`] owns the query text; this view only tracks where
//! the cursor sits in it (in chars) and rewrites the text on each edit.
//! Up/Down walk the flattened dropdown, Enter submits the highlighted entry
//! or the typed text, Esc closes the dropdown.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::core::search::insights::InsightsState;
use crate::core::search::suggestions::SuggestionAction;
use crate::core::search::SearchBar;
use crate::tui::services::Services;
use crate::tui::theme;

use super::ViewInput;

const PLACEHOLDER: &str = "Search listings...";
/// Upper bound on dropdown rows (including borders).
const MAX_DROPDOWN_HEIGHT: u16 = 20;

pub struct SearchBarView {
    bar: SearchBar,
    /// Cursor position as a char index into the query text.
    cursor: usize,
}

impl SearchBarView {
    pub fn new(services: &Services) -> Self {
        Self {
            bar: SearchBar::new(
                services.backend.clone(),
                services.logger.clone(),
                services.debounce,
            ),
            cursor: 0,
        }
    }

    pub fn bar(&self) -> &SearchBar {
        &self.bar
    }

    pub fn text(&self) -> &str {
        self.bar.text()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Open the dropdown (loads insights on first use).
    pub fn focus(&mut self) {
        self.bar.focus();
    }

    pub fn blur(&mut self) {
        self.bar.close();
    }

    /// Apply arrived quick matches / insights. Call from on_tick.
    pub fn poll(&mut self) -> bool {
        self.bar.poll()
    }

    // ── Editing ─────────────────────────────────────────────────────────

    fn char_len(&self) -> usize {
        self.bar.text().chars().count()
    }

    fn byte_offset(&self) -> usize {
        let text = self.bar.text();
        text.char_indices()
            .nth(self.cursor)
            .map_or(text.len(), |(i, _)| i)
    }

    fn insert(&mut self, c: char) {
        let mut text = self.bar.text().to_string();
        text.insert(self.byte_offset(), c);
        self.cursor += 1;
        self.bar.set_text(&text);
    }

    /// Remove the char under the cursor, if any.
    fn remove_at_cursor(&mut self) {
        let at = self.byte_offset();
        let mut text = self.bar.text().to_string();
        if at < text.len() {
            text.remove(at);
            self.bar.set_text(&text);
        }
    }

    fn remove_before_cursor(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.remove_at_cursor();
        }
    }

    pub fn handle_input(&mut self, event: &Event) -> ViewInput {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return ViewInput::Ignored;
        };

        match (*modifiers, *code) {
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                self.insert(c);
                ViewInput::Consumed
            }
            (_, KeyCode::Backspace) => {
                self.remove_before_cursor();
                ViewInput::Consumed
            }
            (_, KeyCode::Delete) => {
                self.remove_at_cursor();
                ViewInput::Consumed
            }
            (_, KeyCode::Left) => {
                self.cursor = self.cursor.saturating_sub(1);
                ViewInput::Consumed
            }
            (_, KeyCode::Right) => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                ViewInput::Consumed
            }
            (_, KeyCode::Home) => {
                self.cursor = 0;
                ViewInput::Consumed
            }
            (_, KeyCode::End) => {
                self.cursor = self.char_len();
                ViewInput::Consumed
            }
            (_, KeyCode::Down) => {
                if self.bar.is_open() {
                    self.bar.select_next();
                } else {
                    self.bar.focus();
                }
                ViewInput::Consumed
            }
            (_, KeyCode::Up) => {
                if self.bar.is_open() {
                    self.bar.select_prev();
                }
                ViewInput::Consumed
            }
            (_, KeyCode::Enter) => match self.bar.submit() {
                Some(route) => {
                    self.cursor = 0;
                    ViewInput::Navigate(route)
                }
                None => ViewInput::Consumed,
            },
            (_, KeyCode::Esc) if self.bar.is_open() => {
                self.bar.close();
                ViewInput::Consumed
            }
            _ => ViewInput::Ignored,
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = theme::panel("Search", focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let text = self.bar.text();
        let line = if text.is_empty() && !focused {
            Line::from(Span::styled(PLACEHOLDER, theme::faint()))
        } else {
            Line::from(vec![
                Span::styled("› ", theme::section()),
                Span::styled(text.to_string(), theme::body()),
            ])
        };
        frame.render_widget(Paragraph::new(line), inner);

        if focused {
            let column = self.cursor.min(self.char_len()) as u16;
            let x = (inner.x + 2 + column).min(inner.right().saturating_sub(1));
            frame.set_cursor_position((x, inner.y));
        }
    }

    /// Render the dropdown as an overlay under `anchor`, clipped to `bounds`.
    pub fn render_dropdown(&self, frame: &mut Frame, anchor: Rect, bounds: Rect) {
        if !self.bar.is_open() {
            return;
        }
        let lines = self.dropdown_lines();
        if lines.is_empty() {
            return;
        }

        let y = anchor.bottom();
        let available = bounds.bottom().saturating_sub(y);
        let height = (lines.len() as u16 + 2).min(MAX_DROPDOWN_HEIGHT).min(available);
        if height < 3 {
            return;
        }
        let area = Rect::new(anchor.x, y, anchor.width, height);

        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(lines).block(theme::dropdown()), area);
    }

    fn dropdown_lines(&self) -> Vec<Line<'static>> {
        let sections = self.bar.sections();
        let mut lines = Vec::new();

        if sections.is_empty() {
            let loading = self.bar.insights().state() == InsightsState::Loading
                || self.bar.quick().is_pending();
            if loading {
                lines.push(Line::from(Span::styled(" Loading suggestions...", theme::secondary())));
            }
            return lines;
        }

        let selected = self.bar.selected();
        let mut idx = 0usize;
        for section in &sections {
            if !lines.is_empty() {
                lines.push(Line::raw(""));
            }
            lines.push(Line::from(Span::styled(
                format!(" {}", section.title()),
                theme::section(),
            )));
            for action in section.actions() {
                let style = if selected == Some(idx) {
                    theme::selected()
                } else if matches!(action, SuggestionAction::ViewAllResults(_)) {
                    theme::link()
                } else {
                    theme::body()
                };
                lines.push(Line::from(Span::styled(format!("   {}", action.label()), style)));
                idx += 1;
            }
        }
        lines
    }
}

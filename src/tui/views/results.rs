//! Results view: sort selector, caption and listing cards grouped by category.
//!
//! Keys: `j`/`k` move between cards, Enter opens the highlighted listing,
//! `s`/`S` cycle the sort key, `r` re-runs the search, and `a` follows the
//! empty state's "View All Listings" link.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::search::{
    Listing, ListingsSearchView, ResultsStatus, Route, SearchParams, SortKey,
};
use crate::tui::services::Services;
use crate::tui::theme;

use super::listing_card::{card_lines, CARD_HEIGHT};
use super::ViewInput;

pub struct ResultsViewState {
    view: ListingsSearchView,
    /// Highlighted card, in grouped display order.
    selected: usize,
    /// Reached through `/listings` rather than `/search-results`.
    browsing: bool,
}

impl ResultsViewState {
    pub fn new(services: &Services) -> Self {
        Self {
            view: ListingsSearchView::new(services.backend.clone()),
            selected: 0,
            browsing: false,
        }
    }

    pub fn view(&self) -> &ListingsSearchView {
        &self.view
    }

    /// Show the page for a results route. Returns true if a search was issued.
    pub fn open(&mut self, route: Route) -> bool {
        match route {
            Route::SearchResults(params) => {
                self.browsing = false;
                self.navigate(params)
            }
            Route::Listings(params) => {
                self.browsing = true;
                self.navigate(params)
            }
            Route::Listing(_) => false,
        }
    }

    /// Location of the page as currently shown, sort included.
    pub fn location(&self) -> Route {
        let params = self.view.params().clone();
        if self.browsing {
            Route::Listings(params)
        } else {
            Route::SearchResults(params)
        }
    }

    /// Show results for `params`. Returns true if a search was issued.
    pub fn navigate(&mut self, params: SearchParams) -> bool {
        let issued = self.view.navigate(params);
        if issued {
            self.selected = 0;
        }
        issued
    }

    /// Poll for async data completion. Call from on_tick.
    pub fn poll(&mut self) -> bool {
        let changed = self.view.poll();
        if changed {
            self.selected = self.selected.min(self.len().saturating_sub(1));
        }
        changed
    }

    /// Listings in display order: group by group.
    fn ordered(&self) -> impl Iterator<Item = &Listing> + '_ {
        self.view.groups().iter().flat_map(|g| g.listings.iter())
    }

    fn len(&self) -> usize {
        self.view.results().len()
    }

    pub fn selected_listing(&self) -> Option<&Listing> {
        self.ordered().nth(self.selected)
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
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                if self.selected + 1 < self.len() {
                    self.selected += 1;
                }
                ViewInput::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.selected = self.selected.saturating_sub(1);
                ViewInput::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Enter) => match self.selected_listing() {
                Some(listing) => ViewInput::Navigate(Route::Listing(listing.id)),
                None => ViewInput::Consumed,
            },
            (KeyModifiers::NONE, KeyCode::Char('s')) => {
                self.set_sort(self.view.params().sort.next());
                ViewInput::Consumed
            }
            (KeyModifiers::SHIFT, KeyCode::Char('S')) => {
                self.set_sort(self.view.params().sort.prev());
                ViewInput::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Char('r')) => {
                self.view.refresh();
                ViewInput::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Char('a')) => match self.view.empty_state_link() {
                Some(route) => ViewInput::Navigate(route),
                None => ViewInput::Ignored,
            },
            _ => ViewInput::Ignored,
        }
    }

    fn set_sort(&mut self, sort: SortKey) {
        if self.view.set_sort(sort) {
            self.selected = 0;
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let title = if self.view.is_loading() && !self.view.results().is_empty() {
            "Results (updating...)"
        } else {
            "Results"
        };
        let block = theme::panel(title, focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(2), // Caption + sort selector
            Constraint::Min(1),
        ])
        .split(inner);

        self.render_header(frame, chunks[0]);

        match self.view.status() {
            ResultsStatus::Loading => self.render_loading(frame, chunks[1]),
            ResultsStatus::NoResults => self.render_empty(frame, chunks[1]),
            ResultsStatus::Results => self.render_groups(frame, chunks[1], focused),
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let caption = match self.view.caption() {
            Some(caption) => Line::from(Span::styled(format!(" {caption}"), theme::secondary())),
            None => Line::from(Span::styled(" All listings", theme::secondary())),
        };

        let current = self.view.params().sort;
        let mut sort_spans = vec![Span::styled(" Sort: ", theme::faint())];
        for key in SortKey::ALL {
            let style = if key == current {
                theme::active()
            } else {
                theme::faint()
            };
            sort_spans.push(Span::styled(format!("[{}]", key.label()), style));
            sort_spans.push(Span::raw(" "));
        }

        frame.render_widget(Paragraph::new(vec![caption, Line::from(sort_spans)]), area);
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect) {
        let loading = Paragraph::new(vec![
            Line::raw(""),
            Line::from(Span::styled("Loading results...", theme::secondary())),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(loading, area);
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                "No results found",
                theme::empty_state(),
            )),
            Line::raw(""),
            Line::from(Span::styled(
                "Try a different search term or browse all listings.",
                theme::secondary(),
            )),
        ];
        if self.view.empty_state_link().is_some() {
            lines.push(Line::raw(""));
            lines.push(Line::from(vec![
                Span::styled("[a] ", theme::faint()),
                Span::styled("View All Listings", theme::link()),
            ]));
        }
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }

    fn render_groups(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let mut lines: Vec<Line> = Vec::new();
        let mut selected_row = 0usize;
        let mut idx = 0usize;

        for group in self.view.groups() {
            if !lines.is_empty() {
                lines.push(Line::raw(""));
            }
            lines.push(Line::from(vec![
                Span::styled(format!(" {}", group.title()), theme::section()),
                Span::styled(format!(" ({})", group.listings.len()), theme::faint()),
            ]));
            for listing in &group.listings {
                let is_selected = focused && idx == self.selected;
                if idx == self.selected {
                    selected_row = lines.len();
                }
                lines.extend(card_lines(listing, is_selected));
                idx += 1;
            }
        }

        // Keep the highlighted card on screen
        let height = area.height as usize;
        let scroll = (selected_row + CARD_HEIGHT).saturating_sub(height);
        frame.render_widget(Paragraph::new(lines).scroll((scroll as u16, 0)), area);
    }
}

use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tokio::sync::mpsc;

use super::events::{AppEvent, AreaFocus, Screen};
use super::layout::AppLayout;
use super::services::Services;
use super::sidebar::SidebarState;
use super::theme;
use super::views::results::ResultsViewState;
use super::views::search_bar::SearchBarView;
use super::views::ViewInput;
use crate::core::search::Route;

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Currently shown screen.
    pub screen: Screen,
    /// Which area receives key input.
    pub area_focus: AreaFocus,
    /// Search bar + suggestion dropdown.
    pub search: SearchBarView,
    /// Full results page.
    pub results: ResultsViewState,
    /// Category sidebar.
    pub sidebar: SidebarState,
    /// Last listing opened from a suggestion or card.
    pub opened_listing: Option<i64>,
    /// Receiver for backend events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Backend services handle.
    services: Services,
}

impl AppState {
    pub fn new(event_rx: mpsc::UnboundedReceiver<AppEvent>, services: Services) -> Self {
        Self {
            running: true,
            screen: Screen::Home,
            area_focus: AreaFocus::Search,
            search: SearchBarView::new(&services),
            results: ResultsViewState::new(&services),
            sidebar: SidebarState::new(),
            opened_listing: None,
            event_rx,
            services,
        }
    }

    /// Current location, as shown in the status bar.
    pub fn location(&self) -> Option<String> {
        match self.screen {
            Screen::Home => None,
            Screen::Results => Some(self.results.location().to_path()),
        }
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        self.services.load_categories();
        self.search.focus();

        while self.running {
            // Render
            terminal.draw(|frame| self.render(frame))?;

            // Select next event
            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => self.handle_input(&crossterm_event),
            AppEvent::Navigate(route) => self.navigate(route),
            AppEvent::CategoriesLoaded(index) => self.sidebar.set_index(index),
            AppEvent::Tick => self.on_tick(),
        }
    }

    fn handle_input(&mut self, event: &Event) {
        // Priority 1: force quit
        if let Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            ..
        }) = event
        {
            self.running = false;
            return;
        }

        // Priority 2: focused area
        let outcome = match self.area_focus {
            AreaFocus::Search => self.search.handle_input(event),
            AreaFocus::Results => self.results.handle_input(event),
            AreaFocus::Sidebar => self.handle_sidebar_input(event),
        };
        match outcome {
            ViewInput::Consumed => return,
            ViewInput::Navigate(route) => {
                self.navigate(route);
                return;
            }
            ViewInput::Ignored => {}
        }

        // Priority 3: global keybindings
        self.handle_global_input(event);
    }

    /// Handle sidebar-specific input.
    fn handle_sidebar_input(&mut self, event: &Event) -> ViewInput {
        let Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return ViewInput::Ignored;
        };

        match code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.sidebar.select_next();
                ViewInput::Consumed
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.sidebar.select_prev();
                ViewInput::Consumed
            }
            KeyCode::Enter | KeyCode::Char('l') => match self.sidebar.selected_route() {
                Some(route) => ViewInput::Navigate(route),
                None => ViewInput::Consumed,
            },
            _ => ViewInput::Ignored,
        }
    }

    fn handle_global_input(&mut self, event: &Event) {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return;
        };

        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Tab) if self.screen == Screen::Results => {
                self.set_area_focus(self.area_focus.next());
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) | (KeyModifiers::NONE, KeyCode::BackTab)
                if self.screen == Screen::Results =>
            {
                self.set_area_focus(self.area_focus.prev());
            }
            (KeyModifiers::NONE, KeyCode::Char('/')) => self.set_area_focus(AreaFocus::Search),
            (KeyModifiers::NONE, KeyCode::Char('q')) => self.running = false,
            (KeyModifiers::NONE, KeyCode::Esc) => match (self.screen, self.area_focus) {
                (Screen::Results, AreaFocus::Search) => self.set_area_focus(AreaFocus::Results),
                (Screen::Results, _) => {}
                (Screen::Home, _) => self.running = false,
            },
            _ => {}
        }
    }

    fn set_area_focus(&mut self, focus: AreaFocus) {
        self.area_focus = focus;
        if focus == AreaFocus::Search {
            self.search.focus();
        } else {
            self.search.blur();
        }
    }

    /// Move to `route`.
    pub fn navigate(&mut self, route: Route) {
        log::info!("Navigating to {}", route.to_path());
        match route {
            Route::Listing(id) => {
                self.opened_listing = Some(id);
            }
            route @ (Route::SearchResults(_) | Route::Listings(_)) => {
                self.screen = Screen::Results;
                self.opened_listing = None;
                self.results.open(route);
                self.set_area_focus(AreaFocus::Results);
            }
        }
    }

    /// Tick: poll async data.
    fn on_tick(&mut self) {
        self.search.poll();
        self.results.poll();
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let (layout, _visibility) = AppLayout::compute(area, self.screen == Screen::Results);

        if let Some(sidebar_area) = layout.sidebar {
            let active = &self.results.view().params().category;
            self.sidebar.render(
                frame,
                sidebar_area,
                active,
                self.area_focus == AreaFocus::Sidebar,
            );
        }

        let search_focused = self.area_focus == AreaFocus::Search;
        self.search.render(frame, layout.search, search_focused);

        match self.screen {
            Screen::Home => self.render_home(frame, layout.main),
            Screen::Results => self.results.render(
                frame,
                layout.main,
                self.area_focus == AreaFocus::Results,
            ),
        }

        self.render_status_bar(frame, layout.status);

        // Overlay
        self.search.render_dropdown(frame, layout.search, layout.main);
    }

    fn render_home(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([Constraint::Percentage(40), Constraint::Min(1)]).split(area);
        let lines = vec![
            Line::from(Span::styled(
                "Find something great",
                theme::active(),
            )),
            Line::raw(""),
            Line::from(Span::styled(
                "Type to search listings, ↑/↓ to pick a suggestion, Enter to go.",
                theme::secondary(),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            chunks[1],
        );
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let location = match (self.opened_listing, self.location()) {
            (Some(id), _) => Span::styled(
                format!("Opened {}", Route::Listing(id).to_path()),
                theme::notice(),
            ),
            (None, Some(path)) => Span::styled(path, theme::location()),
            (None, None) => Span::styled("/", theme::secondary()),
        };

        let mut spans = vec![
            Span::styled(" listing-search ", theme::brand_badge()),
            Span::raw(" "),
            location,
            Span::raw(" │ "),
        ];
        let hints: &[(&str, &str)] = match self.screen {
            Screen::Home => &[("Enter", ":search "), ("Esc", ":quit")],
            Screen::Results => &[
                ("Tab", ":focus "),
                ("/", ":search "),
                ("s/S", ":sort "),
                ("Ctrl+C", ":quit"),
            ],
        };
        for (key, desc) in hints {
            spans.push(Span::styled(*key, theme::faint()));
            spans.push(Span::raw(*desc));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

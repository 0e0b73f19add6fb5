use crate::core::search::{CategoryIndex, Route};

/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick: polls async fetches.
    Tick,
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// Move to a new location.
    Navigate(Route),
    /// The category sidebar finished loading.
    CategoriesLoaded(CategoryIndex),
}

/// Which top-level screen is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Search bar and dropdown only.
    Home,
    /// Categories sidebar, search bar, sort selector and grouped results.
    Results,
}

/// Which area of the current screen receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaFocus {
    Search,
    Sidebar,
    Results,
}

impl AreaFocus {
    /// Tab order on the results screen.
    pub fn next(self) -> Self {
        match self {
            Self::Search => Self::Results,
            Self::Results => Self::Sidebar,
            Self::Sidebar => Self::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Search => Self::Sidebar,
            Self::Sidebar => Self::Results,
            Self::Results => Self::Search,
        }
    }
}

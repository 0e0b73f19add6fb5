//! Search Bar
//!
//! The mountable suggestion widget: owns the typed text, drives the
//! quick-match and insights fetchers, and turns selections into routes,
//! logging search intents on the way out.

use std::sync::Arc;
use std::time::Duration;

use super::backend::SearchBackend;
use super::insights::InsightsFetcher;
use super::query_log::QueryLogger;
use super::quick_match::QuickMatchFetcher;
use super::route::Route;
use super::suggestions::{aggregate, flatten_actions, SuggestionAction, SuggestionSection};

pub struct SearchBar {
    /// The single source of the current query text.
    text: String,
    quick: QuickMatchFetcher,
    insights: InsightsFetcher,
    logger: QueryLogger,
    dropdown_open: bool,
    /// Highlighted entry in the flattened dropdown actions.
    selected: Option<usize>,
}

impl SearchBar {
    pub fn new(backend: Arc<dyn SearchBackend>, logger: QueryLogger, quiet_period: Duration) -> Self {
        Self {
            text: String::new(),
            quick: QuickMatchFetcher::new(backend.clone(), quiet_period),
            insights: InsightsFetcher::new(backend),
            logger,
            dropdown_open: false,
            selected: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_open(&self) -> bool {
        self.dropdown_open
    }

    pub fn quick(&self) -> &QuickMatchFetcher {
        &self.quick
    }

    pub fn quick_mut(&mut self) -> &mut QuickMatchFetcher {
        &mut self.quick
    }

    pub fn insights(&self) -> &InsightsFetcher {
        &self.insights
    }

    pub fn insights_mut(&mut self) -> &mut InsightsFetcher {
        &mut self.insights
    }

    /// Open the dropdown, loading insights on first activation.
    pub fn focus(&mut self) {
        self.insights.activate();
        self.dropdown_open = true;
    }

    pub fn close(&mut self) {
        self.dropdown_open = false;
        self.selected = None;
    }

    /// Replace the typed text (one keystroke or a paste).
    pub fn set_text(&mut self, text: &str) {
        if self.text == text {
            return;
        }
        self.text = text.to_string();
        self.quick.set_query(&self.text);
        self.selected = None;
        self.focus();
    }

    /// Apply arrived fetch results. Returns true if anything changed.
    pub fn poll(&mut self) -> bool {
        let quick_changed = self.quick.poll();
        let insights_changed = self.insights.poll();
        let changed = quick_changed || insights_changed;
        if changed && self.selected.is_some_and(|i| i >= self.actions().len()) {
            self.selected = None;
        }
        changed
    }

    pub fn sections(&self) -> Vec<SuggestionSection> {
        aggregate(&self.text, self.quick.results(), self.insights.snapshot())
    }

    pub fn actions(&self) -> Vec<SuggestionAction> {
        flatten_actions(&self.sections())
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_action(&self) -> Option<SuggestionAction> {
        let index = self.selected?;
        self.actions().into_iter().nth(index)
    }

    /// Move the highlight down, wrapping; no-op on an empty dropdown.
    pub fn select_next(&mut self) {
        let len = self.actions().len();
        if len == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        });
    }

    /// Move the highlight up, wrapping.
    pub fn select_prev(&mut self) {
        let len = self.actions().len();
        if len == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i > 0 => i - 1,
            _ => len - 1,
        });
    }

    /// Enter: run the highlighted action, else search for the typed text.
    pub fn submit(&mut self) -> Option<Route> {
        if let Some(action) = self.selected_action() {
            return Some(self.select(action));
        }
        if self.text.trim().is_empty() {
            return None;
        }
        let text = self.text.clone();
        Some(self.select(SuggestionAction::ViewAllResults(text)))
    }

    /// Run `action`: log its term (if it has one) before navigating.
    pub fn select(&mut self, action: SuggestionAction) -> Route {
        if let Some(term) = action.logged_term() {
            self.logger.log(term);
        }
        let route = action.route();
        log::debug!("Search bar navigating to {}", route.to_path());
        self.reset();
        route
    }

    fn reset(&mut self) {
        self.text.clear();
        self.quick.set_query("");
        self.close();
    }
}

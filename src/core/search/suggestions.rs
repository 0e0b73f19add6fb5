//! Suggestion Aggregator
//!
//! Merges quick matches and insights into the sectioned dropdown. Sections
//! come in a fixed priority and are omitted when empty; each section keeps
//! its source order untouched.

use super::models::{format_price, InsightsSnapshot, PopularSearch, QuickResult};
use super::route::Route;

/// One dropdown section.
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionSection {
    /// Live matches for the typed text, plus a "view all" action for it.
    QuickResults {
        query: String,
        results: Vec<QuickResult>,
    },
    Suggested(Vec<String>),
    Popular(Vec<PopularSearch>),
    Categories(Vec<String>),
}

impl SuggestionSection {
    pub fn title(&self) -> &'static str {
        match self {
            Self::QuickResults { .. } => "Search Results",
            Self::Suggested(_) => "Suggested Searches",
            Self::Popular(_) => "Popular Searches",
            Self::Categories(_) => "Popular Categories",
        }
    }

    /// Selectable entries of this section in display order.
    pub fn actions(&self) -> Vec<SuggestionAction> {
        match self {
            Self::QuickResults { query, results } => results
                .iter()
                .map(|r| SuggestionAction::OpenListing {
                    id: r.id,
                    label: format!("{} – {}", r.title, format_price(r.price)),
                })
                .chain(std::iter::once(SuggestionAction::ViewAllResults(
                    query.clone(),
                )))
                .collect(),
            Self::Suggested(terms) => terms
                .iter()
                .map(|t| SuggestionAction::SearchTerm {
                    term: t.clone(),
                    count: None,
                })
                .collect(),
            Self::Popular(searches) => searches
                .iter()
                .map(|s| SuggestionAction::SearchTerm {
                    term: s.term.clone(),
                    count: Some(s.count),
                })
                .collect(),
            Self::Categories(categories) => categories
                .iter()
                .map(|c| SuggestionAction::BrowseCategory(c.clone()))
                .collect(),
        }
    }
}

/// A selectable dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionAction {
    OpenListing { id: i64, label: String },
    /// Search for exactly what was typed.
    ViewAllResults(String),
    /// A suggested or popular term; `count` is shown for popular ones.
    SearchTerm { term: String, count: Option<u64> },
    /// Category filter. Not a search term, so never logged.
    BrowseCategory(String),
}

impl SuggestionAction {
    pub fn label(&self) -> String {
        match self {
            Self::OpenListing { label, .. } => label.clone(),
            Self::ViewAllResults(_) => "View all results →".to_string(),
            Self::SearchTerm { term, count: None } => term.clone(),
            Self::SearchTerm {
                term,
                count: Some(count),
            } => format!("{term} ({count})"),
            Self::BrowseCategory(category) => category.clone(),
        }
    }

    /// The term to record in the query log before navigating, if any.
    pub fn logged_term(&self) -> Option<&str> {
        match self {
            Self::ViewAllResults(term) | Self::SearchTerm { term, .. } => Some(term),
            Self::OpenListing { .. } | Self::BrowseCategory(_) => None,
        }
    }

    pub fn route(&self) -> Route {
        match self {
            Self::OpenListing { id, .. } => Route::Listing(*id),
            Self::ViewAllResults(term) | Self::SearchTerm { term, .. } => {
                Route::search(term.clone())
            }
            Self::BrowseCategory(category) => Route::category(category.clone()),
        }
    }
}

/// Build the dropdown from the two upstream sources.
pub fn aggregate(
    query: &str,
    quick: &[QuickResult],
    insights: &InsightsSnapshot,
) -> Vec<SuggestionSection> {
    let mut sections = Vec::with_capacity(4);

    if !quick.is_empty() {
        sections.push(SuggestionSection::QuickResults {
            query: query.to_string(),
            results: quick.to_vec(),
        });
    }
    if !insights.suggested_searches.is_empty() {
        sections.push(SuggestionSection::Suggested(
            insights.suggested_searches.clone(),
        ));
    }
    if !insights.popular_searches.is_empty() {
        sections.push(SuggestionSection::Popular(insights.popular_searches.clone()));
    }
    if !insights.popular_categories.is_empty() {
        sections.push(SuggestionSection::Categories(
            insights.popular_categories.clone(),
        ));
    }

    sections
}

/// All selectable entries across `sections`, top to bottom.
pub fn flatten_actions(sections: &[SuggestionSection]) -> Vec<SuggestionAction> {
    sections.iter().flat_map(SuggestionSection::actions).collect()
}

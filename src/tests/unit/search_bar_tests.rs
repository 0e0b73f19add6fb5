use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use crate::core::search::debounce::DEFAULT_DEBOUNCE;
use crate::core::search::suggestions::SuggestionAction;
use crate::core::search::{QueryLogger, Route, SearchBar};
use crate::tests::mocks::{insights, quick, FakeBackend};

const DESKTOP_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_0)";

fn search_bar(backend: &Arc<FakeBackend>) -> SearchBar {
    let logger = QueryLogger::new(backend.clone(), DESKTOP_UA);
    SearchBar::new(backend.clone(), logger, DEFAULT_DEBOUNCE)
}

fn titles(bar: &SearchBar) -> Vec<&'static str> {
    bar.sections().iter().map(|s| s.title()).collect()
}

fn logged_terms(backend: &FakeBackend) -> Vec<String> {
    backend.logged().into_iter().map(|e| e.query_text).collect()
}

fn full_backend() -> FakeBackend {
    FakeBackend::new()
        .with_quick(
            "lamp",
            vec![quick(1, "Desk lamp", 20.0), quick(2, "Floor lamp", 45.5)],
        )
        .with_insights(insights(
            &["lamp shade", "bulbs"],
            &[("sofa", 31), ("desk", 12)],
            &["Furniture", "Lighting"],
        ))
}

#[tokio::test(start_paused = true)]
async fn test_focus_shows_insight_sections_in_priority_order() {
    let backend = Arc::new(full_backend());
    let mut bar = search_bar(&backend);

    bar.focus();
    bar.insights_mut().wait_ready().await;

    assert!(bar.is_open());
    assert_eq!(
        titles(&bar),
        vec!["Suggested Searches", "Popular Searches", "Popular Categories"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_quick_results_lead_with_view_all() {
    let backend = Arc::new(full_backend());
    let mut bar = search_bar(&backend);

    bar.set_text("lamp");
    bar.insights_mut().wait_ready().await;
    bar.quick_mut().next_response().await;

    assert_eq!(
        titles(&bar),
        vec![
            "Search Results",
            "Suggested Searches",
            "Popular Searches",
            "Popular Categories"
        ]
    );
    let actions = bar.actions();
    assert_eq!(actions[0].route(), Route::Listing(1));
    assert_eq!(actions[2], SuggestionAction::ViewAllResults("lamp".into()));
    assert_eq!(actions[2].label(), "View all results →");
}

#[tokio::test(start_paused = true)]
async fn test_selecting_search_term_logs_then_navigates() {
    let backend = Arc::new(full_backend());
    let mut bar = search_bar(&backend);
    bar.focus();
    bar.insights_mut().wait_ready().await;

    let route = bar.select(SuggestionAction::SearchTerm {
        term: "sofa".into(),
        count: Some(31),
    });
    assert_eq!(route, Route::search("sofa"));

    sleep(Duration::from_millis(10)).await;
    assert_eq!(logged_terms(&backend), vec!["sofa"]);
}

#[tokio::test(start_paused = true)]
async fn test_category_and_listing_selections_are_not_logged() {
    let backend = Arc::new(full_backend());
    let mut bar = search_bar(&backend);

    let route = bar.select(SuggestionAction::BrowseCategory("Lighting".into()));
    assert_eq!(route, Route::category("Lighting"));

    let route = bar.select(SuggestionAction::OpenListing {
        id: 2,
        label: "Floor lamp – $45.50".into(),
    });
    assert_eq!(route, Route::Listing(2));

    sleep(Duration::from_millis(10)).await;
    assert!(backend.logged().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_submit_typed_text_logs_and_resets() {
    let backend = Arc::new(full_backend());
    let mut bar = search_bar(&backend);

    bar.set_text("lamp");
    bar.quick_mut().next_response().await;
    assert!(!bar.quick().results().is_empty());

    assert_eq!(bar.submit(), Some(Route::search("lamp")));
    assert_eq!(bar.text(), "");
    assert!(!bar.is_open());
    assert!(bar.quick().results().is_empty());

    sleep(Duration::from_millis(10)).await;
    assert_eq!(logged_terms(&backend), vec!["lamp"]);
}

#[tokio::test(start_paused = true)]
async fn test_submit_blank_text_does_nothing() {
    let backend = Arc::new(full_backend());
    let mut bar = search_bar(&backend);

    bar.set_text("  ");
    assert_eq!(bar.submit(), None);

    sleep(Duration::from_millis(10)).await;
    assert!(backend.logged().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_submit_runs_highlighted_action() {
    let backend = Arc::new(full_backend());
    let mut bar = search_bar(&backend);
    bar.focus();
    bar.insights_mut().wait_ready().await;

    // Suggested: "lamp shade", "bulbs"; then Popular: "sofa", "desk"
    bar.select_next();
    bar.select_next();
    bar.select_next();
    assert_eq!(
        bar.selected_action(),
        Some(SuggestionAction::SearchTerm {
            term: "sofa".into(),
            count: Some(31),
        })
    );

    assert_eq!(bar.submit(), Some(Route::search("sofa")));
    sleep(Duration::from_millis(10)).await;
    assert_eq!(logged_terms(&backend), vec!["sofa"]);
}

#[tokio::test(start_paused = true)]
async fn test_selection_wraps_both_ways() {
    let backend = Arc::new(full_backend());
    let mut bar = search_bar(&backend);
    bar.focus();
    bar.insights_mut().wait_ready().await;
    let len = bar.actions().len();
    assert_eq!(len, 6);

    bar.select_prev();
    assert_eq!(bar.selected(), Some(len - 1));
    bar.select_next();
    assert_eq!(bar.selected(), Some(0));
}

#[tokio::test(start_paused = true)]
async fn test_logging_failure_does_not_block_navigation() {
    let backend = Arc::new(full_backend().failing_log());
    let mut bar = search_bar(&backend);

    bar.set_text("lamp");
    assert_eq!(bar.submit(), Some(Route::search("lamp")));

    sleep(Duration::from_millis(10)).await;
    assert_eq!(backend.logged().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_empty_dropdown_has_no_sections() {
    let backend = Arc::new(FakeBackend::new());
    let mut bar = search_bar(&backend);

    bar.set_text("zzz");
    bar.insights_mut().wait_ready().await;
    bar.quick_mut().next_response().await;

    assert!(bar.sections().is_empty());
    bar.select_next();
    assert_eq!(bar.selected(), None);
}

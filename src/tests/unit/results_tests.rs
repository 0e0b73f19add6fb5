use std::sync::Arc;
use std::time::Duration;

use crate::core::search::{
    FetchOutcome, ListingsSearchView, ResultsStatus, Route, SearchParams, SortKey,
};
use crate::tests::mocks::{listing, FakeBackend};

fn params(q: &str, category: &str) -> SearchParams {
    SearchParams {
        q: q.to_string(),
        category: category.to_string(),
        sort: SortKey::Relevance,
    }
}

fn lamp_backend() -> FakeBackend {
    FakeBackend::new().with_search(
        "lamp",
        vec![
            listing(1, "Desk lamp", Some("Lighting")),
            listing(2, "Lamp table", Some("Furniture")),
            listing(3, "Lava lamp", Some("Lighting")),
            listing(4, "Mystery lamp", None),
        ],
    )
}

#[tokio::test(start_paused = true)]
async fn test_navigate_fetches_and_groups() {
    let backend = Arc::new(lamp_backend());
    let mut view = ListingsSearchView::new(backend.clone());
    assert_eq!(view.status(), ResultsStatus::Loading);

    assert!(view.navigate(SearchParams::query("lamp")));
    assert_eq!(view.status(), ResultsStatus::Loading);
    assert_eq!(view.next_response().await, Some(FetchOutcome::Applied));

    assert_eq!(view.status(), ResultsStatus::Results);
    assert!(!view.is_loading());
    let groups: Vec<(&str, Vec<i64>)> = view
        .groups()
        .iter()
        .map(|g| (g.title(), g.listings.iter().map(|l| l.id).collect()))
        .collect();
    assert_eq!(
        groups,
        vec![
            ("Lighting", vec![1, 3]),
            ("Furniture", vec![2]),
            ("Uncategorized", vec![4]),
        ]
    );
    assert_eq!(backend.searches(), vec![SearchParams::query("lamp")]);
}

#[tokio::test(start_paused = true)]
async fn test_sort_change_refetches_once_with_same_filters() {
    let backend = Arc::new(lamp_backend());
    let mut view = ListingsSearchView::new(backend.clone());

    view.navigate(params("lamp", "Lighting"));
    view.next_response().await;

    assert!(view.set_sort(SortKey::PriceLow));
    view.next_response().await;

    let searches = backend.searches();
    assert_eq!(searches.len(), 2);
    assert_eq!(
        searches[1],
        params("lamp", "Lighting").with_sort(SortKey::PriceLow)
    );
    assert_eq!(
        view.location().to_path(),
        "/search-results?q=lamp&category=Lighting&sort=price_low"
    );
}

#[tokio::test(start_paused = true)]
async fn test_unchanged_params_do_not_refetch() {
    let backend = Arc::new(lamp_backend());
    let mut view = ListingsSearchView::new(backend.clone());

    assert!(view.navigate(SearchParams::query("lamp")));
    view.next_response().await;
    assert!(!view.navigate(SearchParams::query("lamp")));
    assert!(!view.set_sort(SortKey::Relevance));

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(backend.searches().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_first_navigation_to_default_params_fetches() {
    let backend = Arc::new(FakeBackend::new());
    let mut view = ListingsSearchView::new(backend.clone());

    assert!(view.navigate(SearchParams::default()));
    view.next_response().await;
    assert_eq!(backend.searches(), vec![SearchParams::default()]);
}

#[tokio::test(start_paused = true)]
async fn test_slow_earlier_response_is_discarded() {
    let backend = Arc::new(
        FakeBackend::new()
            .with_search("chair", vec![listing(10, "Chair", Some("Furniture"))])
            .with_search_delay("chair", Duration::from_millis(500))
            .with_search("rug", vec![listing(20, "Rug", Some("Home"))])
            .with_search_delay("rug", Duration::from_millis(50)),
    );
    let mut view = ListingsSearchView::new(backend.clone());

    view.set_query("chair");
    view.set_query("rug");

    assert_eq!(view.next_response().await, Some(FetchOutcome::Applied));
    assert_eq!(view.results()[0].id, 20);

    assert_eq!(view.next_response().await, Some(FetchOutcome::Stale));
    assert_eq!(view.results()[0].id, 20);
    assert_eq!(view.params().q, "rug");
}

#[tokio::test(start_paused = true)]
async fn test_previous_results_stay_visible_while_loading() {
    let backend = Arc::new(
        lamp_backend()
            .with_search("rug", vec![listing(20, "Rug", Some("Home"))])
            .with_search_delay("rug", Duration::from_millis(100)),
    );
    let mut view = ListingsSearchView::new(backend);

    view.set_query("lamp");
    view.next_response().await;
    view.set_query("rug");

    assert!(view.is_loading());
    assert_eq!(view.status(), ResultsStatus::Results);
    assert_eq!(view.results().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_failure_shows_empty_state_with_link() {
    let backend = Arc::new(FakeBackend::new().failing_search());
    let mut view = ListingsSearchView::new(backend);

    view.navigate(params("lamp", "Lighting"));
    assert_eq!(view.empty_state_link(), None);
    view.next_response().await;

    assert_eq!(view.status(), ResultsStatus::NoResults);
    assert_eq!(view.empty_state_link(), Some(Route::all_listings()));
    assert_eq!(view.empty_state_link().map(|r| r.to_path()), Some("/listings".into()));
}

#[tokio::test(start_paused = true)]
async fn test_unfiltered_empty_state_has_no_link() {
    let backend = Arc::new(FakeBackend::new());
    let mut view = ListingsSearchView::new(backend);

    view.navigate(SearchParams::default());
    view.next_response().await;

    assert_eq!(view.status(), ResultsStatus::NoResults);
    assert_eq!(view.empty_state_link(), None);
}

#[tokio::test(start_paused = true)]
async fn test_caption_reflects_filters() {
    let backend = Arc::new(FakeBackend::new());
    let mut view = ListingsSearchView::new(backend);
    assert_eq!(view.caption(), None);

    view.navigate(SearchParams::query("lamp"));
    assert_eq!(view.caption().as_deref(), Some("Showing results for \"lamp\""));

    view.set_category("Lighting");
    assert_eq!(
        view.caption().as_deref(),
        Some("Showing results for \"lamp\" in Lighting")
    );

    view.set_query("");
    assert_eq!(view.caption().as_deref(), Some("Showing results for Lighting"));
}

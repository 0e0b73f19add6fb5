use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use tokio::time::sleep;

use crate::config::AppConfig;
use crate::core::search::{CategoryIndex, Route, SearchParams, SortKey};
use crate::tests::mocks::{listing, FakeBackend};
use crate::tui::app::AppState;
use crate::tui::events::{AppEvent, AreaFocus, Screen};
use crate::tui::services::Services;

fn app(backend: &Arc<FakeBackend>) -> AppState {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let services = Services::with_backend(backend.clone(), &AppConfig::default(), event_tx);
    AppState::new(event_rx, services)
}

fn key(app: &mut AppState, code: KeyCode) {
    key_with(app, code, KeyModifiers::NONE);
}

fn key_with(app: &mut AppState, code: KeyCode, modifiers: KeyModifiers) {
    app.handle_event(AppEvent::Input(Event::Key(KeyEvent::new(code, modifiers))));
}

fn type_text(app: &mut AppState, text: &str) {
    for c in text.chars() {
        key(app, KeyCode::Char(c));
    }
}

/// Let spawned fetches finish, then run one tick.
async fn settle(app: &mut AppState) {
    sleep(Duration::from_millis(500)).await;
    app.handle_event(AppEvent::Tick);
}

fn lamp_backend() -> Arc<FakeBackend> {
    Arc::new(
        FakeBackend::new()
            .with_search(
                "lamp",
                vec![
                    listing(1, "Desk lamp", Some("Lighting")),
                    listing(2, "Lamp table", Some("Furniture")),
                ],
            )
            .with_categories(&["Furniture", "Lighting"], &["Lighting"]),
    )
}

#[tokio::test(start_paused = true)]
async fn test_typing_and_enter_opens_results_and_logs() {
    let backend = lamp_backend();
    let mut app = app(&backend);

    type_text(&mut app, "lamp");
    assert_eq!(app.search.text(), "lamp");
    key(&mut app, KeyCode::Enter);

    assert_eq!(app.screen, Screen::Results);
    assert_eq!(app.area_focus, AreaFocus::Results);
    assert_eq!(app.search.text(), "");
    assert_eq!(app.location().as_deref(), Some("/search-results?q=lamp"));

    settle(&mut app).await;
    assert_eq!(app.results.view().results().len(), 2);
    let logged: Vec<String> = backend.logged().into_iter().map(|e| e.query_text).collect();
    assert_eq!(logged, vec!["lamp"]);
}

#[tokio::test(start_paused = true)]
async fn test_sort_key_refetches_with_current_query() {
    let backend = lamp_backend();
    let mut app = app(&backend);
    app.navigate(Route::search("lamp"));
    settle(&mut app).await;

    key(&mut app, KeyCode::Char('s'));
    settle(&mut app).await;

    assert_eq!(
        backend.searches().last(),
        Some(&SearchParams::query("lamp").with_sort(SortKey::PriceLow))
    );
    assert_eq!(
        app.location().as_deref(),
        Some("/search-results?q=lamp&sort=price_low")
    );
}

#[tokio::test(start_paused = true)]
async fn test_sidebar_category_navigates_to_listings() {
    let backend = lamp_backend();
    let mut app = app(&backend);
    app.navigate(Route::search("lamp"));
    app.handle_event(AppEvent::CategoriesLoaded(CategoryIndex {
        categories: vec!["Furniture".into(), "Lighting".into()],
        popular: vec!["Lighting".into()],
    }));

    key(&mut app, KeyCode::Tab);
    assert_eq!(app.area_focus, AreaFocus::Sidebar);
    key(&mut app, KeyCode::Down);
    key(&mut app, KeyCode::Enter);

    assert_eq!(
        app.results.view().params(),
        &SearchParams::category("Furniture")
    );
    assert_eq!(
        app.location().as_deref(),
        Some("/listings?category=Furniture")
    );
    settle(&mut app).await;
    // Category browsing is not a search term
    assert!(backend.logged().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_empty_state_link_goes_to_all_listings() {
    let backend = Arc::new(FakeBackend::new());
    let mut app = app(&backend);
    app.navigate(Route::search("nothing"));
    settle(&mut app).await;

    key(&mut app, KeyCode::Char('a'));
    settle(&mut app).await;
    assert_eq!(app.results.view().params(), &SearchParams::default());
    assert_eq!(backend.searches().len(), 2);
    assert_eq!(app.location().as_deref(), Some("/listings"));
}

#[tokio::test(start_paused = true)]
async fn test_opening_listing_keeps_screen() {
    let backend = lamp_backend();
    let mut app = app(&backend);
    app.navigate(Route::search("lamp"));
    settle(&mut app).await;

    key(&mut app, KeyCode::Enter);
    assert_eq!(app.opened_listing, Some(1));
    assert_eq!(app.screen, Screen::Results);
}

#[tokio::test(start_paused = true)]
async fn test_navigate_event_from_start_location() {
    let backend = lamp_backend();
    let mut app = app(&backend);
    let route = Route::parse("/listings?category=Lighting").unwrap();

    app.handle_event(AppEvent::Navigate(route));
    assert_eq!(app.screen, Screen::Results);
    assert_eq!(app.results.view().params(), &SearchParams::category("Lighting"));
}

#[tokio::test(start_paused = true)]
async fn test_quit_keys() {
    let backend = lamp_backend();

    let mut home = app(&backend);
    key(&mut home, KeyCode::Esc);
    assert!(!home.running);

    let mut results = app(&backend);
    results.navigate(Route::search("lamp"));
    key_with(&mut results, KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(!results.running);
}

#[tokio::test(start_paused = true)]
async fn test_typing_q_in_search_does_not_quit() {
    let backend = lamp_backend();
    let mut app = app(&backend);

    type_text(&mut app, "quilt");
    assert!(app.running);
    assert_eq!(app.search.text(), "quilt");
}

#[tokio::test(start_paused = true)]
async fn test_cursor_edits_in_search_text() {
    let backend = lamp_backend();
    let mut app = app(&backend);

    type_text(&mut app, "lmp");
    key(&mut app, KeyCode::Left);
    key(&mut app, KeyCode::Left);
    key(&mut app, KeyCode::Char('a'));
    assert_eq!(app.search.text(), "lamp");
    assert_eq!(app.search.cursor(), 2);

    key(&mut app, KeyCode::Home);
    key(&mut app, KeyCode::Delete);
    key(&mut app, KeyCode::End);
    key(&mut app, KeyCode::Backspace);
    assert_eq!(app.search.text(), "am");
    assert_eq!(app.search.cursor(), 2);

    key(&mut app, KeyCode::Home);
    key(&mut app, KeyCode::Backspace);
    assert_eq!(app.search.text(), "am");
}

#[tokio::test(start_paused = true)]
async fn test_cursor_counts_chars_not_bytes() {
    let backend = lamp_backend();
    let mut app = app(&backend);

    type_text(&mut app, "caf");
    key(&mut app, KeyCode::Char('é'));
    key(&mut app, KeyCode::Left);
    key(&mut app, KeyCode::Char('e'));
    assert_eq!(app.search.text(), "cafeé");
    assert_eq!(app.search.cursor(), 4);

    key(&mut app, KeyCode::Right);
    key(&mut app, KeyCode::Backspace);
    assert_eq!(app.search.text(), "cafe");
    assert_eq!(app.search.bar().quick().query(), "cafe");
}

#[tokio::test(start_paused = true)]
async fn test_submit_resets_cursor() {
    let backend = lamp_backend();
    let mut app = app(&backend);

    type_text(&mut app, "lamp");
    key(&mut app, KeyCode::Enter);
    assert_eq!(app.search.cursor(), 0);

    key(&mut app, KeyCode::Char('/'));
    assert_eq!(app.area_focus, AreaFocus::Search);
    type_text(&mut app, "rug");
    assert_eq!(app.search.text(), "rug");
}

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use crate::core::search::insights::{InsightsFetcher, InsightsState};
use crate::tests::mocks::{insights, Call, FakeBackend};

#[tokio::test(start_paused = true)]
async fn test_not_fetched_until_activated() {
    let backend = Arc::new(FakeBackend::new());
    let fetcher = InsightsFetcher::new(backend.clone());

    sleep(Duration::from_secs(1)).await;
    assert_eq!(fetcher.state(), InsightsState::Idle);
    assert!(backend.calls().is_empty());
    assert!(fetcher.snapshot().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_fetches_once_across_activations() {
    let snapshot = insights(&["desk"], &[("lamp", 12)], &["Furniture"]);
    let backend = Arc::new(
        FakeBackend::new()
            .with_insights(snapshot.clone())
            .with_insights_delay(Duration::from_millis(100)),
    );
    let mut fetcher = InsightsFetcher::new(backend.clone());

    fetcher.activate();
    fetcher.activate();
    assert_eq!(fetcher.state(), InsightsState::Loading);

    fetcher.wait_ready().await;
    assert_eq!(fetcher.state(), InsightsState::Ready);
    assert_eq!(fetcher.snapshot(), &snapshot);

    fetcher.activate();
    sleep(Duration::from_secs(1)).await;
    assert!(!fetcher.poll());
    assert_eq!(backend.count(&Call::Insights), 1);
}

#[tokio::test(start_paused = true)]
async fn test_failure_reads_as_empty_and_is_not_retried() {
    let backend = Arc::new(FakeBackend::new().failing_insights());
    let mut fetcher = InsightsFetcher::new(backend.clone());

    fetcher.activate();
    fetcher.wait_ready().await;
    assert_eq!(fetcher.state(), InsightsState::Ready);
    assert!(fetcher.snapshot().is_empty());

    fetcher.activate();
    sleep(Duration::from_secs(1)).await;
    assert_eq!(backend.count(&Call::Insights), 1);
}

#[tokio::test(start_paused = true)]
async fn test_poll_reports_arrival_once() {
    let backend = Arc::new(FakeBackend::new().with_insights(insights(&["rug"], &[], &[])));
    let mut fetcher = InsightsFetcher::new(backend);

    fetcher.activate();
    sleep(Duration::from_millis(10)).await;
    assert!(fetcher.poll());
    assert_eq!(fetcher.snapshot().suggested_searches, vec!["rug".to_string()]);
    assert!(!fetcher.poll());
}

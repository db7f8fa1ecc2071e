use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use inventory_console::domain::listing::{Listing, PageDescriptor};
use inventory_console::domain::query::{FilterKey, FilterParams, ListQuery};
use inventory_console::sync::{
    DEFAULT_QUIET_PERIOD, Debouncer, FilterSynchronizer, ListController, ListSource, ListState,
};

const GENRE: &str = "7d3c1a52-8a4e-4f60-9b1d-2e6f0c8a5b31";

#[derive(Default)]
struct Backend {
    fetched: Vec<ListQuery>,
    failing: bool,
}

/// In-memory list source with three pages of titles.
#[derive(Clone, Default)]
struct FakeSource(Arc<Mutex<Backend>>);

impl FakeSource {
    fn fetched(&self) -> Vec<ListQuery> {
        self.0.lock().unwrap().fetched.clone()
    }

    fn set_failing(&self, failing: bool) {
        self.0.lock().unwrap().failing = failing;
    }
}

fn listing(query: &ListQuery) -> Listing<String> {
    let search = query.search.clone().unwrap_or_default();
    Listing {
        items: vec![format!("{search}:{}", query.page)],
        page: PageDescriptor {
            current_page: query.page,
            total_pages: 3,
            page_size: 1,
            total: 3,
            has_next: query.page < 3,
            has_prev: query.page > 1,
        },
    }
}

impl ListSource for FakeSource {
    type Item = String;
    type Error = String;

    fn fetch(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<Listing<String>, String>> + Send {
        let mut backend = self.0.lock().unwrap();
        backend.fetched.push(query.clone());
        let result = if backend.failing {
            Err("backend unavailable".to_string())
        } else {
            Ok(listing(query))
        };
        async move { result }
    }
}

#[tokio::test(start_paused = true)]
async fn typing_within_the_quiet_period_fetches_once() {
    let source = FakeSource::default();
    let mut sync = FilterSynchronizer::new(source.clone(), FilterParams::default());
    assert!(sync.start().await);

    let (debouncer, mut settled) = Debouncer::new(DEFAULT_QUIET_PERIOD);
    for text in ["a", "at", "cat"] {
        debouncer.push(text.to_string());
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    drop(debouncer);

    while let Some(text) = settled.recv().await {
        sync.set_filter(FilterKey::Search, Some(text)).await;
    }

    let fetched = source.fetched();
    assert_eq!(fetched.len(), 2);
    assert_eq!(fetched[1].search.as_deref(), Some("cat"));
    assert_eq!(sync.query_string(), "search=cat");
}

#[tokio::test]
async fn stale_response_never_overwrites_a_newer_one() {
    let source = FakeSource::default();
    let mut controller = ListController::new(source);

    let older = ListQuery {
        search: Some("old".to_string()),
        ..ListQuery::default()
    };
    let newer = ListQuery {
        search: Some("new".to_string()),
        ..ListQuery::default()
    };
    let first = controller.begin(older.clone());
    let second = controller.begin(newer.clone());

    assert!(controller.complete(second, Ok(listing(&newer))));
    assert!(!controller.complete(first, Ok(listing(&older))));

    match controller.state() {
        ListState::Loaded(listing) => assert_eq!(listing.items, vec!["new:1".to_string()]),
        state => panic!("unexpected state {state:?}"),
    }
    assert_eq!(controller.query(), &newer);
}

#[tokio::test]
async fn failure_clears_items_until_manual_retry() {
    let source = FakeSource::default();
    let mut sync = FilterSynchronizer::new(source.clone(), FilterParams::default());
    assert!(sync.start().await);

    source.set_failing(true);
    sync.set_filter(FilterKey::Search, Some("dune".to_string()))
        .await;
    assert_eq!(
        sync.controller().state(),
        &ListState::Failed("backend unavailable".to_string())
    );
    assert!(sync.controller().page().is_none());
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(source.fetched().len(), 2);

    source.set_failing(false);
    assert!(sync.retry().await);
    assert_eq!(source.fetched().len(), 3);
    match sync.controller().state() {
        ListState::Loaded(listing) => assert_eq!(listing.items, vec!["dune:1".to_string()]),
        state => panic!("unexpected state {state:?}"),
    }
}

#[tokio::test]
async fn out_of_range_pages_are_ignored() {
    let source = FakeSource::default();
    let mut sync = FilterSynchronizer::new(source.clone(), FilterParams::default());
    assert!(sync.start().await);

    assert!(!sync.go_to_page(0).await);
    assert!(!sync.go_to_page(4).await);
    assert!(!sync.go_to_page(1).await);
    assert_eq!(source.fetched().len(), 1);

    assert!(sync.go_to_page(3).await);
    assert_eq!(sync.params().page.as_deref(), Some("3"));
    assert_eq!(source.fetched().len(), 2);
    assert_eq!(source.fetched()[1].page, 3);
}

#[tokio::test]
async fn filter_change_returns_to_first_page() {
    let source = FakeSource::default();
    let mut sync = FilterSynchronizer::new(source.clone(), FilterParams::parse("page=2"));
    assert!(sync.start().await);
    assert_eq!(source.fetched()[0].page, 2);

    assert!(sync.set_filter(FilterKey::GenreId, Some(GENRE.to_string())).await);
    assert_eq!(sync.params().page, None);
    assert_eq!(sync.query_string(), format!("genreId={GENRE}"));

    let last = source.fetched().pop().unwrap();
    assert_eq!(last.page, 1);
    assert_eq!(last.genre_id.map(|id| id.to_string()).as_deref(), Some(GENRE));

    assert!(!sync.set_filter(FilterKey::GenreId, Some(GENRE.to_string())).await);
    assert_eq!(source.fetched().len(), 2);
}

#[tokio::test]
async fn navigation_to_the_same_parameters_does_not_refetch() {
    let source = FakeSource::default();
    let mut sync = FilterSynchronizer::new(source.clone(), FilterParams::parse("search=cat"));
    assert!(sync.start().await);

    assert!(!sync.navigate(FilterParams::parse("search=cat&authorId=all")).await);
    assert!(sync.navigate(FilterParams::default()).await);
    assert_eq!(source.fetched().len(), 2);
}

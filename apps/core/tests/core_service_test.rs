use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use deckmark_core::config::Config;
use deckmark_core::core_service::{CoreService, ServiceError};
use deckmark_core::model::RawBookmark;
use deckmark_core::remote::{BookmarkSource, Page, RemoteError};
use deckmark_core::scheduler::ScheduleState;

fn bookmark(id: &str, url: &str, title: &str, labels: &[&str]) -> RawBookmark {
    RawBookmark {
        id: id.to_string(),
        url: url.to_string(),
        title: title.to_string(),
        labels: labels.iter().map(|l| l.to_string()).collect(),
        ..Default::default()
    }
}

struct FixtureSource {
    bookmarks: Vec<RawBookmark>,
    cycles: AtomicUsize,
}

impl FixtureSource {
    fn new(bookmarks: Vec<RawBookmark>) -> Self {
        Self {
            bookmarks,
            cycles: AtomicUsize::new(0),
        }
    }

    fn cycles(&self) -> usize {
        self.cycles.load(Ordering::SeqCst)
    }
}

impl BookmarkSource for FixtureSource {
    fn list_page(&self, _offset: u64, _limit: u64) -> Result<Page, RemoteError> {
        self.cycles.fetch_add(1, Ordering::SeqCst);
        Ok(Page {
            bookmarks: self.bookmarks.clone(),
            total_count: self.bookmarks.len() as u64,
        })
    }

    fn archive(&self, _id: &str) -> Result<(), RemoteError> {
        Ok(())
    }

    fn delete(&self, _id: &str) -> Result<(), RemoteError> {
        Ok(())
    }
}

fn fixture_bookmarks() -> Vec<RawBookmark> {
    vec![
        bookmark(
            "1",
            "https://blog.rust-lang.org",
            "Rust Blog",
            &["rust", "news"],
        ),
        bookmark(
            "2",
            "https://example.com/recipes",
            "Weeknight Recipes",
            &["cooking"],
        ),
    ]
}

fn service_with(source: Arc<FixtureSource>) -> CoreService {
    CoreService::with_source(Config::default(), source).unwrap()
}

fn wait_until(deadline: Duration, mut done: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < deadline {
        if done() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    done()
}

#[test]
fn refresh_now_fills_index_and_search_finds_by_label() {
    let source = Arc::new(FixtureSource::new(fixture_bookmarks()));
    let service = service_with(Arc::clone(&source));

    let indexed = service.refresh_now();
    assert_eq!(indexed, 2);

    let results = service.search("cooking", 10);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "2");
    assert_eq!(results[0].title, "Weeknight Recipes");
}

#[test]
fn search_limit_zero_applies_default_cap() {
    let many: Vec<RawBookmark> = (0..30)
        .map(|i| {
            bookmark(
                &format!("bm-{i}"),
                &format!("https://example.com/{i}"),
                &format!("Article {i}"),
                &["later"],
            )
        })
        .collect();
    let source = Arc::new(FixtureSource::new(many));
    let service = service_with(source);
    service.refresh_now();

    let results = service.search("article", 0);

    assert_eq!(results.len(), 20);
}

#[test]
fn archive_of_unknown_id_is_rejected_before_the_network() {
    let source = Arc::new(FixtureSource::new(fixture_bookmarks()));
    let service = service_with(Arc::clone(&source));
    service.refresh_now();
    let cycles_before = source.cycles();

    let result = service.archive("missing");

    match result {
        Err(ServiceError::ItemNotFound(id)) => assert_eq!(id, "missing"),
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(source.cycles(), cycles_before);
}

#[test]
fn archive_of_known_id_refreshes_index() {
    let source = Arc::new(FixtureSource::new(fixture_bookmarks()));
    let service = service_with(Arc::clone(&source));
    service.refresh_now();
    let cycles_before = source.cycles();

    service.archive("1").unwrap();

    assert_eq!(source.cycles(), cycles_before + 1);
}

#[test]
fn start_populates_store_from_background_thread() {
    let source = Arc::new(FixtureSource::new(fixture_bookmarks()));
    let mut service = service_with(Arc::clone(&source));

    service.start();
    assert!(wait_until(Duration::from_secs(2), || {
        service.store().len() == 2
    }));
    assert_eq!(service.schedule_state(), ScheduleState::Running);

    service.stop();
    assert_eq!(service.schedule_state(), ScheduleState::Stopped);
}

#[test]
fn reconfigure_swaps_scheduler_without_a_second_loop() {
    let source = Arc::new(FixtureSource::new(fixture_bookmarks()));
    let mut service = service_with(Arc::clone(&source));

    service.start();
    assert!(wait_until(Duration::from_secs(2), || source.cycles() == 1));

    // Same credentials, new interval: the mock source is kept and the old
    // loop is joined before the replacement starts.
    let mut new_config = Config::default();
    new_config.cache_length_minutes = 30;
    service.reconfigure(new_config).unwrap();

    assert!(wait_until(Duration::from_secs(2), || source.cycles() == 2));
    assert_eq!(service.schedule_state(), ScheduleState::Running);
    assert_eq!(service.config().cache_length_minutes, 30);

    // With interval measured in minutes, any further cycle here would mean
    // a stray loop survived the reconfiguration.
    std::thread::sleep(Duration::from_millis(150));
    assert_eq!(source.cycles(), 2);

    service.stop();
}

#[test]
fn reconfigure_preserves_existing_generation_until_next_cycle() {
    let source = Arc::new(FixtureSource::new(fixture_bookmarks()));
    let mut service = service_with(Arc::clone(&source));
    service.refresh_now();

    let mut new_config = Config::default();
    new_config.cache_length_minutes = 0; // clamped, not rejected
    service.reconfigure(new_config).unwrap();

    assert_eq!(service.config().cache_length_minutes, 1);
    assert!(service.store().len() >= 2);
    service.stop();
}

#[test]
fn rejects_zero_page_limit() {
    let mut config = Config::default();
    config.page_limit = 0;

    let result = CoreService::with_source(
        config,
        Arc::new(FixtureSource::new(Vec::new())) as Arc<dyn BookmarkSource>,
    );

    match result {
        Err(ServiceError::Config(message)) => assert!(message.contains("page_limit")),
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

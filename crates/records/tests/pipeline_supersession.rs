mod common;

use async_trait::async_trait;
use common::{seeded, Note, NoteField};
use records::{InvalidationSignal, PageRequest, PageResult, PagedSource, PaginatedQuery, QueryConfig, Result, Sort,
              SortField};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use tokio_test::assert_ok;

/// Source whose fetches block until the test opens the matching gate.
/// Each page carries one note titled "<sort>:<page>".
struct GatedSource {
  gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
  calls: AtomicUsize,
  completed: AtomicUsize,
}

fn key(request: &PageRequest<NoteField>) -> String {
  let sort = request.sort().map(|s| s.property.as_str()).unwrap_or("-");
  format!("{}:{}", sort, request.page())
}

impl GatedSource {
  fn new() -> Self {
    Self { gates: Mutex::new(HashMap::new()), calls: AtomicUsize::new(0), completed: AtomicUsize::new(0) }
  }

  fn gate(&self, field: NoteField, page: u64) -> oneshot::Sender<()> {
    let (tx, rx) = oneshot::channel();
    self.gates.lock().unwrap().insert(format!("{}:{}", field.as_str(), page), rx);
    tx
  }

  async fn wait_for(counter: &AtomicUsize, n: usize) {
    while counter.load(Ordering::SeqCst) < n {
      tokio::task::yield_now().await;
    }
  }
}

#[async_trait]
impl PagedSource<Note> for GatedSource {
  async fn fetch_page(&self, request: PageRequest<NoteField>) -> Result<PageResult<Note>> {
    let tag = key(&request);
    let gate = self.gates.lock().unwrap().remove(&tag);
    self.calls.fetch_add(1, Ordering::SeqCst);
    if let Some(gate) = gate {
      let _ = gate.await;
    }
    self.completed.fetch_add(1, Ordering::SeqCst);
    Ok(PageResult { items: vec![Note::draft(&tag, 0)], request })
  }
}

fn title_of(page: &PageResult<Note>) -> &str {
  page.items[0].title.as_str()
}

#[tokio::test]
async fn slow_superseded_fetch_never_overwrites_a_newer_result() {
  let source = Arc::new(GatedSource::new());
  let open_a0 = source.gate(NoteField::Title, 0);
  let open_a1 = source.gate(NoteField::Title, 1);
  let open_b1 = source.gate(NoteField::Priority, 1);
  let signal = InvalidationSignal::new();

  // (A, 0) -> (A, 1) -> (B, 1)
  let mut query = PaginatedQuery::spawn(source.clone(),
                                        signal.subscribe(),
                                        QueryConfig::new(Sort::asc(NoteField::Title), 0)).unwrap();
  query.request_page(1);
  query.set_sort(Sort::asc(NoteField::Priority));
  assert_eq!(query.generation(), 3);
  GatedSource::wait_for(&source.calls, 3).await;

  // newest finishes first
  open_b1.send(()).unwrap();
  let page = assert_ok!(query.next().await.expect("pipeline open"));
  assert_eq!(title_of(&page), "priority:1");

  // the older ones finish afterwards and must be dropped
  open_a1.send(()).unwrap();
  open_a0.send(()).unwrap();
  GatedSource::wait_for(&source.completed, 3).await;
  assert!(query.try_next().is_none());
  assert_eq!(title_of(&query.current_page().unwrap()), "priority:1");
}

#[tokio::test]
async fn results_superseded_before_completion_are_dropped_even_if_they_finish_first() {
  let source = Arc::new(GatedSource::new());
  let open_a0 = source.gate(NoteField::Title, 0);
  let open_a2 = source.gate(NoteField::Title, 2);
  let signal = InvalidationSignal::new();

  let mut query = PaginatedQuery::spawn(source.clone(),
                                        signal.subscribe(),
                                        QueryConfig::new(Sort::asc(NoteField::Title), 0)).unwrap();
  query.request_page(2);
  GatedSource::wait_for(&source.calls, 2).await;

  open_a0.send(()).unwrap();
  GatedSource::wait_for(&source.completed, 1).await;
  assert!(query.try_next().is_none());

  open_a2.send(()).unwrap();
  let page = assert_ok!(query.next().await.unwrap());
  assert_eq!(title_of(&page), "title:2");
}

#[tokio::test]
async fn construction_fetches_the_initial_page() {
  let (_endpoint, client) = seeded(&["c", "a", "b"]);
  let client = Arc::new(client);
  let config = QueryConfig::new(Sort::asc(NoteField::Title), 0).with_page_size(2);
  let mut query = PaginatedQuery::for_client(client, config).unwrap();

  let page = assert_ok!(query.next().await.unwrap());
  let titles: Vec<_> = page.items.iter().map(|n| n.title.clone()).collect();
  assert_eq!(titles, vec!["a", "b"]);
  assert_eq!(page.request.size(), 2);
}

#[tokio::test]
async fn zero_page_size_is_rejected_at_construction() {
  let (_endpoint, client) = seeded(&[]);
  let config = QueryConfig::new(Sort::asc(NoteField::Title), 0).with_page_size(0);
  assert!(PaginatedQuery::for_client(Arc::new(client), config).is_err());
}

#[tokio::test]
async fn invalidation_refetches_with_the_latest_sort_and_page() {
  let (_endpoint, client) = seeded(&["a", "b", "c"]);
  let client = Arc::new(client);
  let config = QueryConfig::new(Sort::asc(NoteField::Title), 0).with_page_size(2);
  let mut query = PaginatedQuery::for_client(client.clone(), config).unwrap();
  assert_ok!(query.next().await.unwrap());

  query.request_page(1);
  let second = assert_ok!(query.next().await.unwrap());
  assert_eq!(second.items.len(), 1);

  // a mutation elsewhere: the pipeline re-reads page 1 without being asked
  assert_ok!(client.create(&Note::draft("d", 7)).await);
  let refreshed = assert_ok!(query.next().await.unwrap());
  assert_eq!(refreshed.request.page(), 1);
  let titles: Vec<_> = refreshed.items.iter().map(|n| n.title.clone()).collect();
  assert_eq!(titles, vec!["c", "d"]);
  assert!(query.last_invalidation().is_some());
}

#[tokio::test]
async fn a_failed_fetch_keeps_the_previous_page_visible() {
  let (endpoint, client) = seeded(&["a", "b"]);
  let mut query =
    PaginatedQuery::for_client(Arc::new(client), QueryConfig::new(Sort::asc(NoteField::Title), 0)).unwrap();
  let first = assert_ok!(query.next().await.unwrap());

  endpoint.fail_fetch_of(1);
  query.refresh();
  let outcome = query.next().await.unwrap();
  assert!(outcome.is_err());
  assert_eq!(query.current_page().unwrap().items, first.items);
}

#[tokio::test]
async fn dropping_the_pipeline_releases_its_subscription() {
  let (_endpoint, client) = seeded(&["a"]);
  let client = Arc::new(client);
  let mut query = PaginatedQuery::for_client(client.clone(), QueryConfig::new(Sort::asc(NoteField::Title), 0)).unwrap();
  assert_ok!(query.next().await.unwrap());
  assert_eq!(client.signal().subscriber_count(), 1);

  query.close();
  for _ in 0..50 {
    if client.signal().subscriber_count() == 0 {
      break;
    }
    tokio::task::yield_now().await;
  }
  assert_eq!(client.signal().subscriber_count(), 0);
}

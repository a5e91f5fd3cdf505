mod common;

use async_trait::async_trait;
use common::{seeded, Note, NoteField};
use records::{IdPage, PageRequest, RecordClient, RecordEndpoint, RecordError, Result, Sort};
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn paged_detail_keeps_identifier_order_when_fetches_finish_out_of_order() {
  let (endpoint, client) = seeded(&["delta", "alpha", "charlie", "bravo"]);
  // ids 1..=4 in insertion order; make the first ones the slowest
  endpoint.delay_fetch_of(2, Duration::from_millis(60));
  endpoint.delay_fetch_of(4, Duration::from_millis(30));

  let request = PageRequest::new(0, 10, Some(Sort::asc(NoteField::Title))).unwrap();
  let ids = assert_ok!(client.list_identifiers(&request).await).ids;
  assert_eq!(ids, vec![2, 4, 3, 1]);

  let page = assert_ok!(client.get_paged_detail(&request).await);
  let titles: Vec<&str> = page.items.iter().map(|n| n.title.as_str()).collect();
  assert_eq!(titles, vec!["alpha", "bravo", "charlie", "delta"]);
  assert_eq!(page.items.iter().map(|n| n.id.unwrap()).collect::<Vec<_>>(), ids);
  assert_eq!(page.request, request);
}

#[tokio::test]
async fn paged_detail_never_exceeds_page_size() {
  let (_endpoint, client) = seeded(&["a", "b", "c", "d", "e", "f", "g"]);
  let base = PageRequest::new(0, 3, Some(Sort::desc(NoteField::Priority))).unwrap();

  let mut seen = Vec::new();
  for page in 0..4 {
    let result = assert_ok!(client.get_paged_detail(&base.with_page(page)).await);
    assert!(result.len() <= 3);
    seen.extend(result.items.into_iter().map(|n| n.title));
  }
  assert_eq!(seen, vec!["g", "f", "e", "d", "c", "b", "a"]);
}

/// Backend that ignores `size` and always answers with five ids.
struct OversizedEndpoint;

#[async_trait]
impl RecordEndpoint<Note> for OversizedEndpoint {
  fn name(&self) -> &str {
    "oversized"
  }

  async fn list_ids(&self, request: &PageRequest<NoteField>) -> Result<IdPage<i64, NoteField>> {
    Ok(IdPage { ids: vec![1, 2, 3, 4, 5], request: request.clone() })
  }

  async fn fetch(&self, id: &i64) -> Result<Note> {
    Ok(Note { id: Some(*id), title: format!("n{}", id), priority: 0 })
  }

  async fn insert(&self, record: &Note) -> Result<Note> {
    Ok(record.clone())
  }

  async fn replace(&self, _id: &i64, record: &Note) -> Result<Note> {
    Ok(record.clone())
  }

  async fn remove(&self, _id: &i64) -> Result<()> {
    Ok(())
  }
}

#[tokio::test]
async fn paged_detail_drops_ids_beyond_page_size_from_a_lax_backend() {
  let client = RecordClient::new(Arc::new(OversizedEndpoint));
  let request = PageRequest::new(0, 2, None).unwrap();

  let page = assert_ok!(client.get_paged_detail(&request).await);
  assert_eq!(page.len(), 2);
  assert_eq!(page.items.iter().map(|n| n.id.unwrap()).collect::<Vec<_>>(), vec![1, 2]);
  assert_eq!(page.request.size(), 2);
}

#[tokio::test]
async fn one_failed_detail_fails_the_whole_page() {
  let (endpoint, client) = seeded(&["a", "b", "c"]);
  endpoint.fail_fetch_of(2);

  let request = PageRequest::new(0, 10, None).unwrap();
  let err = assert_err!(client.get_paged_detail(&request).await);
  assert_eq!(err.status(), Some(500));
  assert!(err.to_string().contains("Status code: 500"));
}

#[tokio::test]
async fn get_missing_record_reports_not_found() {
  let (_endpoint, client) = seeded(&["a"]);
  let err = assert_err!(client.get(&42).await);
  assert!(err.is_not_found());
}

#[test]
fn page_request_rejects_zero_size() {
  let err = PageRequest::<NoteField>::new(0, 0, None).unwrap_err();
  assert!(matches!(err, RecordError::Validation(_)));
}

#[test]
fn query_pairs_only_carry_sort_when_present() {
  let plain = PageRequest::<NoteField>::new(2, 20, None).unwrap();
  assert_eq!(plain.query_pairs(),
             vec![("size", "20".to_string()), ("page", "2".to_string())]);

  let sorted = plain.with_sort(Some(Sort::desc(NoteField::Title)));
  let pairs = sorted.query_pairs();
  assert!(pairs.contains(&("sortProperty", "title".to_string())));
  assert!(pairs.contains(&("sortOrder", "desc".to_string())));
}

#[test]
fn echoed_request_prefers_server_values_but_keeps_sort() {
  let sent = PageRequest::new(1, 10, Some(Sort::asc(NoteField::Priority))).unwrap();
  let echoed = sent.echoed(Some(3), Some(5));
  assert_eq!((echoed.page(), echoed.size()), (3, 5));
  assert_eq!(echoed.sort(), sent.sort());
  // a zero size echo is not a valid request, keep ours
  assert_eq!(sent.echoed(None, Some(0)), sent);
}

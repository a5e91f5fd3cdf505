// Shared fixtures for the `records` integration tests.
#![allow(dead_code)]
use records::stubs::InMemoryRecordEndpoint;
use records::{Record, RecordClient, SortField};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
  pub id: Option<i64>,
  pub title: String,
  pub priority: i32,
}

impl Note {
  pub fn draft(title: &str, priority: i32) -> Self {
    Self { id: None, title: title.to_string(), priority }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteField {
  Title,
  Priority,
}

impl SortField for NoteField {
  fn as_str(&self) -> &'static str {
    match self {
      NoteField::Title => "title",
      NoteField::Priority => "priority",
    }
  }
}

impl Record for Note {
  type Id = i64;
  type Field = NoteField;

  fn id(&self) -> Option<i64> {
    self.id
  }

  fn assign_id(&mut self, id: i64) {
    self.id = Some(id);
  }

  fn compare_by(&self, other: &Self, field: NoteField) -> Ordering {
    match field {
      NoteField::Title => self.title.cmp(&other.title),
      NoteField::Priority => self.priority.cmp(&other.priority),
    }
  }
}

pub type NoteClient = RecordClient<Note, InMemoryRecordEndpoint<Note>>;

/// Endpoint seeded with `titles` (priority = position) plus a client on it.
pub fn seeded(titles: &[&str]) -> (Arc<InMemoryRecordEndpoint<Note>>, NoteClient) {
  let endpoint = Arc::new(InMemoryRecordEndpoint::new("notes"));
  for (i, title) in titles.iter().enumerate() {
    endpoint.seed(Note::draft(title, i as i32)).expect("seed");
  }
  let client = RecordClient::new(endpoint.clone());
  (endpoint, client)
}

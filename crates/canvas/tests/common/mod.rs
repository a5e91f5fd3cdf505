#![allow(dead_code)]

use canvas::{Link, Placeable, Point};
use records::stubs::InMemoryRecordEndpoint;
use records::{Record, RecordClient, SortField};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
  pub id: Option<i64>,
  pub name: String,
  pub x: Option<i32>,
  pub y: Option<i32>,
}

impl Node {
  pub fn loose(name: &str) -> Self {
    Self { id: None, name: name.to_string(), x: None, y: None }
  }

  pub fn at(name: &str, x: i32, y: i32) -> Self {
    Self { id: None, name: name.to_string(), x: Some(x), y: Some(y) }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeField {
  Name,
}

impl SortField for NodeField {
  fn as_str(&self) -> &'static str {
    "name"
  }
}

impl Record for Node {
  type Id = i64;
  type Field = NodeField;

  fn id(&self) -> Option<i64> {
    self.id
  }

  fn assign_id(&mut self, id: i64) {
    self.id = Some(id);
  }

  fn compare_by(&self, other: &Self, _field: NodeField) -> std::cmp::Ordering {
    self.name.cmp(&other.name)
  }
}

impl Placeable for Node {
  fn coordinates(&self) -> Option<Point> {
    match (self.x, self.y) {
      (Some(x), Some(y)) => Some(Point::new(f64::from(x), f64::from(y))),
      _ => None,
    }
  }

  fn set_coordinates(&mut self, position: Point) {
    self.x = Some(position.x.round() as i32);
    self.y = Some(position.y.round() as i32);
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
  pub id: Option<i64>,
  pub from: i64,
  pub to: i64,
  pub label: Option<String>,
}

impl Edge {
  pub fn new(from: i64, to: i64, label: &str) -> Self {
    Self { id: None, from, to, label: Some(label.to_string()) }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeField {
  Label,
}

impl SortField for EdgeField {
  fn as_str(&self) -> &'static str {
    "name"
  }
}

impl Record for Edge {
  type Id = i64;
  type Field = EdgeField;

  fn id(&self) -> Option<i64> {
    self.id
  }

  fn assign_id(&mut self, id: i64) {
    self.id = Some(id);
  }
}

impl Link<i64> for Edge {
  fn source_id(&self) -> i64 {
    self.from
  }

  fn target_id(&self) -> i64 {
    self.to
  }

  fn label(&self) -> Option<&str> {
    self.label.as_deref()
  }
}

pub type NodeClient = RecordClient<Node, InMemoryRecordEndpoint<Node>>;
pub type EdgeClient = RecordClient<Edge, InMemoryRecordEndpoint<Edge>>;

/// Clients over in-memory collections; ids start at 1 in insertion order.
pub fn clients(nodes: Vec<Node>, edges: Vec<Edge>) -> (Arc<InMemoryRecordEndpoint<Node>>, NodeClient, EdgeClient) {
  let node_store = Arc::new(InMemoryRecordEndpoint::new("nodes"));
  for node in nodes {
    node_store.seed(node).unwrap();
  }
  let edge_store = Arc::new(InMemoryRecordEndpoint::new("edges"));
  for edge in edges {
    edge_store.seed(edge).unwrap();
  }
  (node_store.clone(), RecordClient::new(node_store), RecordClient::new(edge_store))
}

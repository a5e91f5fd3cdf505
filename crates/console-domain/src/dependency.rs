// dependency.rs
use crate::errors::{DomainError, Result};
use canvas::Link;
use records::{Record, SortField};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Arista dirigida entre dos servicios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDependency {
  #[serde(default)]
  pub id: Option<i64>,
  pub source_id: i64,
  pub target_id: i64,
  #[serde(default)]
  pub name: Option<String>,
}

impl ServiceDependency {
  pub fn new(source_id: i64, target_id: i64, name: Option<&str>) -> Result<Self> {
    if source_id == target_id {
      return Err(DomainError::ValidationError(format!("el servicio {} no puede depender de sí mismo", source_id)));
    }
    let name = name.map(str::trim).filter(|n| !n.is_empty()).map(str::to_string);
    Ok(Self { id: None, source_id, target_id, name })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyField {
  Id,
  Name,
  SourceId,
}

impl SortField for DependencyField {
  fn as_str(&self) -> &'static str {
    match self {
      DependencyField::Id => "id",
      DependencyField::Name => "name",
      DependencyField::SourceId => "source_id",
    }
  }
}

impl Record for ServiceDependency {
  type Id = i64;
  type Field = DependencyField;

  fn id(&self) -> Option<i64> {
    self.id
  }

  fn assign_id(&mut self, id: i64) {
    self.id = Some(id);
  }

  fn compare_by(&self, other: &Self, field: DependencyField) -> Ordering {
    match field {
      DependencyField::Id => self.id.cmp(&other.id),
      DependencyField::Name => self.name.cmp(&other.name),
      DependencyField::SourceId => self.source_id.cmp(&other.source_id),
    }
  }
}

impl Link<i64> for ServiceDependency {
  fn source_id(&self) -> i64 {
    self.source_id
  }

  fn target_id(&self) -> i64 {
    self.target_id
  }

  fn label(&self) -> Option<&str> {
    self.name.as_deref()
  }
}

// log.rs
use crate::errors::{required, Result};
use records::{Record, SortField};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Entrada del registro de actividad: quién hizo algo y qué hizo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
  #[serde(default)]
  pub id: Option<i64>,
  pub user: String,
  pub description: String,
}

impl Log {
  pub fn new(user: &str, description: &str) -> Result<Self> {
    Ok(Self { id: None, user: required("El usuario", user)?, description: required("La descripción", description)? })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogField {
  Id,
  User,
  Description,
}

impl SortField for LogField {
  fn as_str(&self) -> &'static str {
    match self {
      LogField::Id => "id",
      LogField::User => "user",
      LogField::Description => "description",
    }
  }
}

impl Record for Log {
  type Id = i64;
  type Field = LogField;

  fn id(&self) -> Option<i64> {
    self.id
  }

  fn assign_id(&mut self, id: i64) {
    self.id = Some(id);
  }

  fn compare_by(&self, other: &Self, field: LogField) -> Ordering {
    match field {
      LogField::Id => self.id.cmp(&other.id),
      LogField::User => self.user.cmp(&other.user),
      LogField::Description => self.description.cmp(&other.description),
    }
  }
}

// service.rs
use crate::errors::{required, DomainError, Result};
use canvas::{Placeable, Point};
use records::{Record, SortField};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Servicio monitorizado. `x`/`y` es su posición persistida en el mapa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
  #[serde(default)]
  pub id: Option<i64>,
  pub name: String,
  pub p99_millis: i32,
  #[serde(default)]
  pub x: Option<i32>,
  #[serde(default)]
  pub y: Option<i32>,
}

impl Service {
  pub fn new(name: &str, p99_millis: i32) -> Result<Self> {
    let name = required("El nombre del servicio", name)?;
    if p99_millis < 0 {
      return Err(DomainError::ValidationError(format!("p99 negativo para {}: {}", name, p99_millis)));
    }
    Ok(Self { id: None, name, p99_millis, x: None, y: None })
  }

  pub fn at(self, x: i32, y: i32) -> Self {
    Self { x: Some(x), y: Some(y), ..self }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceField {
  Id,
  Name,
  P99Millis,
}

impl SortField for ServiceField {
  fn as_str(&self) -> &'static str {
    match self {
      ServiceField::Id => "id",
      ServiceField::Name => "name",
      ServiceField::P99Millis => "p99_millis",
    }
  }
}

impl Record for Service {
  type Id = i64;
  type Field = ServiceField;

  fn id(&self) -> Option<i64> {
    self.id
  }

  fn assign_id(&mut self, id: i64) {
    self.id = Some(id);
  }

  fn compare_by(&self, other: &Self, field: ServiceField) -> Ordering {
    match field {
      ServiceField::Id => self.id.cmp(&other.id),
      ServiceField::Name => self.name.cmp(&other.name),
      ServiceField::P99Millis => self.p99_millis.cmp(&other.p99_millis),
    }
  }
}

impl Placeable for Service {
  fn coordinates(&self) -> Option<Point> {
    match (self.x, self.y) {
      (Some(x), Some(y)) => Some(Point::new(f64::from(x), f64::from(y))),
      _ => None,
    }
  }

  /// El servidor guarda enteros: la posición se redondea.
  fn set_coordinates(&mut self, position: Point) {
    self.x = Some(position.x.round() as i32);
    self.y = Some(position.y.round() as i32);
  }
}

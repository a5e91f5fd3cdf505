// contact.rs
use crate::errors::{required, Result};
use chrono::NaiveDate;
use records::{Record, SortField};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Contacto (QSO) registrado por un operador.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  #[serde(default)]
  pub id: Option<i64>,
  pub user_id: i64,
  pub qso_date: NaiveDate,
  pub qso_time: String,
  pub callsign: String,
  pub operator_callsign: String,
  pub band: String,
  pub frequency: String,
  pub mode: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rst_sent: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rst_received: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name_received: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub qth_received: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub grid_square: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub country: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub is_confirmed: Option<bool>,
}

/// Campos obligatorios de un contacto.
#[derive(Debug, Clone)]
pub struct QsoLine<'a> {
  pub user_id: i64,
  pub qso_date: NaiveDate,
  pub qso_time: &'a str,
  pub callsign: &'a str,
  pub operator_callsign: &'a str,
  pub band: &'a str,
  pub frequency: &'a str,
  pub mode: &'a str,
}

impl Contact {
  pub fn new(line: QsoLine<'_>) -> Result<Self> {
    Ok(Self { id: None,
              user_id: line.user_id,
              qso_date: line.qso_date,
              qso_time: required("La hora del QSO", line.qso_time)?,
              callsign: required("El indicativo", line.callsign)?.to_uppercase(),
              operator_callsign: required("El indicativo del operador", line.operator_callsign)?.to_uppercase(),
              band: required("La banda", line.band)?,
              frequency: required("La frecuencia", line.frequency)?,
              mode: required("El modo", line.mode)?.to_uppercase(),
              rst_sent: None,
              rst_received: None,
              name_received: None,
              qth_received: None,
              grid_square: None,
              country: None,
              notes: None,
              is_confirmed: None })
  }

  pub fn with_reports(self, sent: &str, received: &str) -> Self {
    Self { rst_sent: Some(sent.to_string()), rst_received: Some(received.to_string()), ..self }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
  Id,
  QsoDate,
  Callsign,
  Band,
  Mode,
}

impl SortField for ContactField {
  fn as_str(&self) -> &'static str {
    match self {
      ContactField::Id => "id",
      ContactField::QsoDate => "qso_date",
      ContactField::Callsign => "callsign",
      ContactField::Band => "band",
      ContactField::Mode => "mode",
    }
  }
}

impl Record for Contact {
  type Id = i64;
  type Field = ContactField;

  fn id(&self) -> Option<i64> {
    self.id
  }

  fn assign_id(&mut self, id: i64) {
    self.id = Some(id);
  }

  fn compare_by(&self, other: &Self, field: ContactField) -> Ordering {
    match field {
      ContactField::Id => self.id.cmp(&other.id),
      ContactField::QsoDate => (self.qso_date, &self.qso_time).cmp(&(other.qso_date, &other.qso_time)),
      ContactField::Callsign => self.callsign.cmp(&other.callsign),
      ContactField::Band => self.band.cmp(&other.band),
      ContactField::Mode => self.mode.cmp(&other.mode),
    }
  }
}

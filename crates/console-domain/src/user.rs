// user.rs
use crate::errors::{required, Result};
use records::{Record, SortField};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Usuario de la consola. La contraseña viaja en el cuerpo JSON pero nunca
/// aparece en `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  #[serde(default)]
  pub id: Option<i64>,
  pub forename: String,
  pub surname: String,
  pub password: String,
}

impl User {
  pub fn new(forename: &str, surname: &str, password: &str) -> Result<Self> {
    Ok(Self { id: None,
              forename: required("El nombre", forename)?,
              surname: required("El apellido", surname)?,
              password: required("La contraseña", password)? })
  }

  pub fn full_name(&self) -> String {
    format!("{} {}", self.forename, self.surname)
  }
}

impl fmt::Debug for User {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("User")
     .field("id", &self.id)
     .field("forename", &self.forename)
     .field("surname", &self.surname)
     .field("password", &"***")
     .finish()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
  Id,
  Forename,
  Surname,
}

impl SortField for UserField {
  fn as_str(&self) -> &'static str {
    match self {
      UserField::Id => "id",
      UserField::Forename => "forename",
      UserField::Surname => "surname",
    }
  }
}

impl Record for User {
  type Id = i64;
  type Field = UserField;

  fn id(&self) -> Option<i64> {
    self.id
  }

  fn assign_id(&mut self, id: i64) {
    self.id = Some(id);
  }

  fn compare_by(&self, other: &Self, field: UserField) -> Ordering {
    match field {
      UserField::Id => self.id.cmp(&other.id),
      UserField::Forename => self.forename.cmp(&other.forename),
      UserField::Surname => self.surname.cmp(&other.surname),
    }
  }
}

// errors.rs
use records::RecordError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
  #[error("Error de validación: {0}")]
  ValidationError(String),
  #[error(transparent)]
  Record(#[from] RecordError),
}

pub type Result<T> = std::result::Result<T, DomainError>;

pub(crate) fn required(field: &str, value: &str) -> Result<String> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(DomainError::ValidationError(format!("{} no puede estar vacío", field)));
  }
  Ok(trimmed.to_string())
}

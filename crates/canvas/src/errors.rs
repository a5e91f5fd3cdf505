// errors.rs
use records::RecordError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CanvasError {
  #[error(transparent)]
  Record(#[from] RecordError),
  #[error("Error de geometría: {0}")]
  Geometry(String),
  #[error("El registro {0} no está en el lienzo")]
  UnknownNode(String),
}

pub type Result<T> = std::result::Result<T, CanvasError>;

// Archivo: errors.rs
// Propósito: definir los errores del acceso a registros y el alias Result<T>
// usado por las APIs del crate.
use thiserror::Error;

/// Errores comunes del acceso a colecciones de registros.
///
/// - `Request`: fallo HTTP (status no 2xx) o de transporte (status 0).
/// - `Validation`: uso incorrecto de la API (p.ej. `update` sin id).
/// - `Other`: cualquier otro error interno.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
  /// La petición no pudo procesarse. `status` es el código HTTP devuelto por
  /// el servidor, o 0 cuando no hubo respuesta.
  #[error("No se pudo procesar la petición: {message} (Status code: {status})")]
  Request { status: u16, message: String },
  /// Error de validación local; no se llegó a contactar al servidor.
  #[error("Error de validación: {0}")]
  Validation(String),
  /// Otro tipo de error.
  #[error("Otro: {0}")]
  Other(String),
}

impl RecordError {
  pub fn request(status: u16, message: impl Into<String>) -> Self {
    Self::Request { status, message: message.into() }
  }

  /// Código HTTP asociado, si el error proviene de una petición.
  pub fn status(&self) -> Option<u16> {
    match self {
      Self::Request { status, .. } => Some(*status),
      _ => None,
    }
  }

  pub fn is_not_found(&self) -> bool {
    self.status() == Some(404)
  }
}

/// Alias de resultado usado por las APIs del crate.
pub type Result<T> = std::result::Result<T, RecordError>;

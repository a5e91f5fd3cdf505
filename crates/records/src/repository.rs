// Archivo: repository.rs
// Propósito: definir el trait `RecordEndpoint`, el contrato de transporte
// contra una colección REST de un tipo de registro. Las implementaciones
// concretas son `records_rest::RestEndpoint` (HTTP) y
// `stubs::InMemoryRecordEndpoint` (memoria, para pruebas y demos).
use crate::domain::{IdPage, PageRequest, Record};
use crate::errors::Result;
use async_trait::async_trait;

/// Contrato mínimo de una colección de registros de tipo `T`.
///
/// Ninguna operación reintenta: los fallos transitorios se propagan al
/// llamador como `RecordError::Request`.
#[async_trait]
pub trait RecordEndpoint<T: Record>: Send + Sync {
    /// Nombre legible de la colección (para logs).
    fn name(&self) -> &str;

    /// `GET /<collection>?page=&size=&sortProperty=&sortOrder=`: página de
    /// identificadores + petición eco.
    async fn list_ids(&self, request: &PageRequest<T::Field>) -> Result<IdPage<T::Id, T::Field>>;

    /// `GET /<collection>/<id>`.
    async fn fetch(&self, id: &T::Id) -> Result<T>;

    /// `POST /<collection>`: devuelve el registro creado con su id.
    async fn insert(&self, record: &T) -> Result<T>;

    /// `PUT /<collection>/<id>`.
    async fn replace(&self, id: &T::Id, record: &T) -> Result<T>;

    /// `DELETE /<collection>/<id>`.
    async fn remove(&self, id: &T::Id) -> Result<()>;
}

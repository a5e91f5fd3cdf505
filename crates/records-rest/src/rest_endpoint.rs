// Archivo: rest_endpoint.rs
// Propósito: implementación HTTP de `RecordEndpoint` sobre una colección REST
// (`GET/POST /<collection>`, `GET/PUT/DELETE /<collection>/<id>`).
use crate::config::RestConfig;
use async_trait::async_trait;
use records::{IdPage, PageRequest, Record, RecordEndpoint, RecordError, Result};
use reqwest::{Client, Response};
use serde::Deserialize;
use std::marker::PhantomData;

/// Paginación que el servidor devuelve como eco. Todos los campos son
/// opcionales: el backend puede omitirlos.
#[derive(Debug, Default, Deserialize)]
struct WirePagination {
    page: Option<u64>,
    size: Option<u32>,
}

/// Cuerpo de `GET /<collection>`.
#[derive(Debug, Deserialize)]
struct WireIdPage<Id> {
    ids: Vec<Id>,
    #[serde(default)]
    pagination: WirePagination,
}

/// Cuerpo de error del backend: `{"message": "..."}`.
#[derive(Debug, Deserialize)]
struct WireError {
    message: String,
}

/// Endpoint REST de una colección de registros `T`.
pub struct RestEndpoint<T> {
    http: Client,
    url: String,
    name: String,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> RestEndpoint<T> {
    /// Crea el endpoint para `collection` bajo la URL base de `config`.
    pub fn new(config: &RestConfig, collection: &str, name: &str) -> Result<Self> {
        Ok(Self::with_client(config.build_client()?, config, collection, name))
    }

    /// Igual que `new` pero reutilizando un cliente HTTP existente.
    pub fn with_client(http: Client, config: &RestConfig, collection: &str, name: &str) -> Self {
        Self { http, url: config.collection_url(collection), name: name.to_string(), _record: PhantomData }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn record_url(&self, id: &T::Id) -> String {
        format!("{}/{}", self.url, id)
    }
}

/// Convierte un fallo de transporte en `Request` con status 0 (o el status
/// que traiga el propio error).
fn transport_error(e: reqwest::Error) -> RecordError {
    let status = e.status().map(|s| s.as_u16()).unwrap_or(0);
    RecordError::request(status, e.to_string())
}

/// Mensaje legible de un cuerpo de error: el campo `message` si el cuerpo
/// es `{"message": ...}`, si no el cuerpo tal cual. `None` si no hay nada.
fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<WireError>(body) {
        Ok(wire) if !wire.message.trim().is_empty() => Some(wire.message.trim().to_string()),
        _ => Some(body.to_string()),
    }
}

/// Deja pasar respuestas 2xx; el resto se convierte en `Request` con el
/// mensaje del cuerpo (o la frase canónica si viene vacío).
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| status.canonical_reason().unwrap_or("sin detalle").to_string());
    Err(RecordError::request(status.as_u16(), message))
}

async fn read_json<D: serde::de::DeserializeOwned>(response: Response) -> Result<D> {
    let response = ensure_success(response).await?;
    let status = response.status().as_u16();
    response.json::<D>()
            .await
            .map_err(|e| RecordError::request(status, format!("respuesta no válida: {}", e)))
}

#[async_trait]
impl<T: Record> RecordEndpoint<T> for RestEndpoint<T> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn list_ids(&self, request: &PageRequest<T::Field>) -> Result<IdPage<T::Id, T::Field>> {
        let response = self.http
                           .get(&self.url)
                           .query(&request.query_pairs())
                           .send()
                           .await
                           .map_err(transport_error)?;
        let wire: WireIdPage<T::Id> = read_json(response).await?;
        Ok(IdPage { ids: wire.ids, request: request.echoed(wire.pagination.page, wire.pagination.size) })
    }

    async fn fetch(&self, id: &T::Id) -> Result<T> {
        let response = self.http.get(self.record_url(id)).send().await.map_err(transport_error)?;
        read_json(response).await
    }

    async fn insert(&self, record: &T) -> Result<T> {
        let response = self.http.post(&self.url).json(record).send().await.map_err(transport_error)?;
        read_json(response).await
    }

    async fn replace(&self, id: &T::Id, record: &T) -> Result<T> {
        let response = self.http.put(self.record_url(id)).json(record).send().await.map_err(transport_error)?;
        read_json(response).await
    }

    async fn remove(&self, id: &T::Id) -> Result<()> {
        let response = self.http.delete(self.record_url(id)).send().await.map_err(transport_error)?;
        ensure_success(response).await?;
        Ok(())
    }
}

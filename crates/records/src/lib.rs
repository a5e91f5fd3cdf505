//! Crate `records` — acceso genérico a colecciones de registros
//!
//! Este crate define el modelo genérico (`Record`, `Sort`, `PageRequest`,
//! `PageResult`), el contrato de transporte `RecordEndpoint`, el cliente
//! CRUD `RecordClient` con su señal de invalidación y el pipeline paginado
//! `PaginatedQuery`. Incluye una implementación en memoria útil para pruebas
//! (`InMemoryRecordEndpoint`).
//!
//! Diseño resumido:
//! - Página en dos fases: primero identificadores, luego un `get` concurrente
//!   por identificador; el orden final es el de los identificadores.
//! - Todo o nada: si falla un detalle, falla la página.
//! - Invalidación: cada mutación con éxito emite un único aviso a todos los
//!   suscriptores de la colección.
//! - Último disparo gana: el pipeline descarta resultados de disparos ya
//!   superados mediante un contador de generación.
//!
//! Ejemplo rápido:
//! ```rust
//! use records::stubs::InMemoryRecordEndpoint;
//! use records::RecordClient;
//! use serde::{Deserialize, Serialize};
//! use std::sync::Arc;
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Note { id: Option<i64>, title: String }
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum NoteField { Title }
//!
//! impl records::SortField for NoteField {
//!     fn as_str(&self) -> &'static str { "title" }
//! }
//!
//! impl records::Record for Note {
//!     type Id = i64;
//!     type Field = NoteField;
//!     fn id(&self) -> Option<i64> { self.id }
//!     fn assign_id(&mut self, id: i64) { self.id = Some(id) }
//! }
//!
//! let endpoint = Arc::new(InMemoryRecordEndpoint::<Note>::new("notes"));
//! let client: RecordClient<Note, _> = RecordClient::new(endpoint);
//! assert_eq!(client.name(), "notes");
//! ```
pub mod client;
pub mod domain;
pub mod errors;
pub mod pipeline;
pub mod repository;
pub mod signal;
pub mod stubs;

pub use client::*;
pub use domain::*;
pub use errors::*;
pub use pipeline::*;
pub use repository::*;
pub use signal::*;

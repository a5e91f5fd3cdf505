//! Tipos de registro de la consola: servicios, dependencias entre
//! servicios, usuarios, contactos y entradas de actividad. Cada tipo
//! implementa `records::Record` con un enum de campos ordenables; `Service`
//! es además `Placeable` y `ServiceDependency` es un `Link` para el mapa de
//! servicios.
//!
//! `DomainStubs` construye colecciones en memoria con datos de ejemplo.

pub mod contact;
pub mod dependency;
pub mod domain_stubs;
pub mod errors;
pub mod log;
pub mod service;
pub mod user;

pub use contact::{Contact, ContactField, QsoLine};
pub use dependency::{DependencyField, ServiceDependency};
pub use domain_stubs::DomainStubs;
pub use errors::{DomainError, Result};
pub use log::{Log, LogField};
pub use service::{Service, ServiceField};
pub use user::{User, UserField};

/// Nombres de las colecciones REST.
pub const SERVICES: &str = "services";
pub const DEPENDENCIES: &str = "dependencies";
pub const USERS: &str = "users";
pub const CONTACTS: &str = "contacts";
pub const LOGS: &str = "logs";

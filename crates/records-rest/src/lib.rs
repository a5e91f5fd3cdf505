//! Implementación REST del trait `RecordEndpoint`.
//! Este crate expone el endpoint HTTP (`RestEndpoint`), su configuración
//! (`RestConfig`) y el constructor `new_from_env` que lee la URL base y el
//! timeout del entorno. La implementación detallada está en
//! `rest_endpoint.rs`.

mod config;
mod rest_endpoint;

pub use config::{RestConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, ENV_BASE_URL, ENV_TIMEOUT_SECS};
pub use rest_endpoint::RestEndpoint;

use records::{Record, Result};

/// Crea un endpoint para `collection` con la configuración del entorno.
pub fn new_from_env<T: Record>(collection: &str, name: &str) -> Result<RestEndpoint<T>> {
    let config = RestConfig::from_env()?;
    log::debug!("{}: usando {}", name, config.collection_url(collection));
    RestEndpoint::new(&config, collection, name)
}

// Archivo: config.rs
// Propósito: configuración del cliente REST a partir de variables de entorno
// (con soporte de fichero `.env` vía dotenvy).
use records::{RecordError, Result};
use std::time::Duration;

/// URL base por defecto: el backend de captura en local.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/capture";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_BASE_URL: &str = "CONSOLE_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "CONSOLE_API_TIMEOUT_SECS";

/// Parámetros de conexión con la API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestConfig {
    /// Prefijo común de todas las colecciones, sin `/` final.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS) }
    }
}

impl RestConfig {
    /// Construye la configuración validando la URL base.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let lower = trimmed.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(RecordError::Validation(format!("{} no parece una URL http(s): {}", ENV_BASE_URL, base_url)));
        }
        if timeout.is_zero() {
            return Err(RecordError::Validation(format!("{} debe ser mayor que 0", ENV_TIMEOUT_SECS)));
        }
        Ok(Self { base_url: trimmed.to_string(), timeout })
    }

    /// Lee `CONSOLE_API_URL` y `CONSOLE_API_TIMEOUT_SECS` (tras cargar
    /// `.env` si existe). Las variables ausentes toman su valor por defecto;
    /// las presentes pero inválidas son un error.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var(ENV_BASE_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout_secs = match std::env::var(ENV_TIMEOUT_SECS) {
            Ok(raw) => raw.trim()
                          .parse::<u64>()
                          .map_err(|_| RecordError::Validation(format!("{} inválido: {}", ENV_TIMEOUT_SECS, raw)))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        Self::new(&base_url, Duration::from_secs(timeout_secs))
    }

    /// URL completa de una colección (`<base>/<collection>`).
    pub fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.base_url, collection.trim_matches('/'))
    }

    /// Cliente HTTP compartible entre endpoints.
    pub fn build_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder().timeout(self.timeout)
                                  .build()
                                  .map_err(|e| RecordError::Other(format!("no se pudo crear el cliente HTTP: {}", e)))
    }
}

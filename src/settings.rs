// Archivo: settings.rs
// Propósito: opciones del binario leídas del entorno (con `.env` vía
// dotenvy). La URL y el timeout de la API los lee `records_rest`.
use records::{RecordError, Result, DEFAULT_PAGE_SIZE};

pub const ENV_PAGE_SIZE: &str = "CONSOLE_PAGE_SIZE";
pub const ENV_DEMO: &str = "CONSOLE_DEMO";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub page_size: u32,
    /// Usar colecciones en memoria en lugar de la API.
    pub demo: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let page_size = std::env::var(ENV_PAGE_SIZE).ok();
        let demo = std::env::var(ENV_DEMO).ok();
        Self::parse(page_size.as_deref(), demo.as_deref())
    }

    pub fn parse(page_size: Option<&str>, demo: Option<&str>) -> Result<Self> {
        let page_size = match page_size.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => match raw.parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => return Err(RecordError::Validation(format!("{} inválido: {}", ENV_PAGE_SIZE, raw))),
            },
            None => DEFAULT_PAGE_SIZE,
        };
        let demo = demo.map(|raw| matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "si" | "sí"))
                       .unwrap_or(false);
        Ok(Self { page_size, demo })
    }
}

//! Motor del mapa de registros: distribución en rejilla (`layout`), ventana
//! con desplazamiento y zoom (`viewport`), gestos de puntero
//! (`interaction`), conexiones derivadas de enlaces (`connections`) y la
//! sesión que lo combina con los clientes de registros (`session`).
//!
//! `layout` y `viewport` son funciones puras y síncronas; sólo
//! `CanvasSession::load` y `CanvasSession::save` hacen red.

pub mod connections;
pub mod errors;
pub mod interaction;
pub mod layout;
pub mod session;
pub mod viewport;

pub use connections::{connect, Connection, Link};
pub use errors::{CanvasError, Result};
pub use interaction::Gesture;
pub use layout::{GridLayout, Placeable, Point, PositionedRecord, GRID_COLUMNS, GRID_OFFSET, GRID_SIZE};
pub use session::{CanvasSession, SaveReport};
pub use viewport::{ScreenRect, ViewportState, FIT_MIN_EXTENT, FIT_PADDING, MAX_EXTENT, MIN_EXTENT, ZOOM_SENSITIVITY};

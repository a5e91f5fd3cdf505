// Archivo: viewport.rs
// Propósito: ventana visible sobre el espacio de modelo (origen + extensión)
// y conversión de deltas de puntero entre pantalla y modelo.
use crate::errors::{CanvasError, Result};
use crate::layout::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ancho mínimo de la ventana al hacer zoom.
pub const MIN_EXTENT: f64 = 10.0;
/// Ancho máximo de la ventana al hacer zoom.
pub const MAX_EXTENT: f64 = 5000.0;
/// Factor por unidad de rueda: `s = 1 + delta * ZOOM_SENSITIVITY`.
pub const ZOOM_SENSITIVITY: f64 = 0.001;
/// Margen alrededor del contenido al encuadrar.
pub const FIT_PADDING: f64 = 20.0;
/// Extensión mínima al encuadrar.
pub const FIT_MIN_EXTENT: f64 = 50.0;

/// Rectángulo de pantalla sobre el que se dibuja la ventana.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    width: f64,
    height: f64,
}

impl ScreenRect {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(CanvasError::Geometry(format!("rectángulo de pantalla inválido: {}x{}", width, height)));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Ventana visible en coordenadas de modelo. `w > 0` y `h > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, w: 100.0, h: 100.0 }
    }
}

impl fmt::Display for ViewportState {
    /// Formato `viewBox` de SVG: `x y w h`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.w, self.h)
    }
}

impl ViewportState {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Result<Self> {
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(CanvasError::Geometry(format!("extensión inválida: {}x{}", w, h)));
        }
        Ok(Self { x, y, w, h })
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Delta de pantalla convertido a delta de modelo.
    pub fn screen_delta_to_model(&self, dx: f64, dy: f64, screen: &ScreenRect) -> (f64, f64) {
        (dx * self.w / screen.width, dy * self.h / screen.height)
    }

    pub fn screen_to_model(&self, at: Point, screen: &ScreenRect) -> Point {
        let (dx, dy) = self.screen_delta_to_model(at.x, at.y, screen);
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn model_to_screen(&self, position: Point, screen: &ScreenRect) -> Point {
        Point::new((position.x - self.x) * screen.width / self.w,
                   (position.y - self.y) * screen.height / self.h)
    }

    /// Arrastrar a la derecha mueve el origen visible a la izquierda.
    pub fn pan(&mut self, dx: f64, dy: f64, screen: &ScreenRect) {
        let (mdx, mdy) = self.screen_delta_to_model(dx, dy, screen);
        self.x -= mdx;
        self.y -= mdy;
    }

    /// Zoom alrededor del cursor. El punto de modelo bajo el cursor queda
    /// fijo. Devuelve `false` (sin tocar el estado) si el factor no es
    /// positivo o el nuevo ancho sale de `[MIN_EXTENT, MAX_EXTENT]`.
    pub fn zoom_at(&mut self, delta: f64, cursor: Point, screen: &ScreenRect) -> bool {
        let scale = 1.0 + delta * ZOOM_SENSITIVITY;
        if !(scale.is_finite() && scale > 0.0) {
            return false;
        }
        let w = self.w * scale;
        let h = self.h * scale;
        if !(MIN_EXTENT..=MAX_EXTENT).contains(&w) {
            return false;
        }
        let anchor = self.screen_to_model(cursor, screen);
        self.x = anchor.x - cursor.x * w / screen.width;
        self.y = anchor.y - cursor.y * h / screen.height;
        self.w = w;
        self.h = h;
        true
    }

    /// Ventana que cubre todos los puntos más `FIT_PADDING` por lado, con
    /// una extensión mínima de `FIT_MIN_EXTENT` centrada en el contenido.
    /// Sin puntos devuelve la ventana por defecto.
    pub fn fit_to(points: impl IntoIterator<Item = Point>) -> Self {
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            return Self::default();
        };
        let (min, max) = points.fold((first, first), |(min, max), p| {
                                   (Point::new(min.x.min(p.x), min.y.min(p.y)),
                                    Point::new(max.x.max(p.x), max.y.max(p.y)))
                               });
        let (x, w) = padded_span(min.x, max.x);
        let (y, h) = padded_span(min.y, max.y);
        Self { x, y, w, h }
    }
}

fn padded_span(min: f64, max: f64) -> (f64, f64) {
    let extent = (max - min) + 2.0 * FIT_PADDING;
    if extent >= FIT_MIN_EXTENT {
        return (min - FIT_PADDING, extent);
    }
    let center = (min + max) / 2.0;
    (center - FIT_MIN_EXTENT / 2.0, FIT_MIN_EXTENT)
}

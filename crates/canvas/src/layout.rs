// Archivo: layout.rs
// Propósito: motor de distribución en rejilla. Respeta las coordenadas que ya
// traen los registros y asigna celdas libres (recorrido por filas desde
// (0,0)) a los que no las tienen.
use crate::errors::{CanvasError, Result};
use records::Record;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Lado de una celda, en unidades de modelo.
pub const GRID_SIZE: f64 = 20.0;
/// Celdas por fila antes de saltar a la siguiente.
pub const GRID_COLUMNS: u32 = 5;
/// Desplazamiento de la celda (0,0) respecto al origen del modelo.
pub const GRID_OFFSET: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn rounded(&self) -> Self {
        Self { x: self.x.round(), y: self.y.round() }
    }
}

/// Registro que puede dibujarse en el lienzo.
pub trait Placeable: Record {
    /// Posición persistida; `None` si nunca se colocó.
    fn coordinates(&self) -> Option<Point>;

    /// Guarda una posición en el registro. Las implementaciones pueden
    /// redondearla al tipo que persiste el servidor.
    fn set_coordinates(&mut self, position: Point);
}

/// Registro colocado: posición actual (`x`, `y`) y última posición
/// persistida. El llamador puede mover `x`/`y` libremente; la posición
/// original sólo cambia con `mark_saved`.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedRecord<T> {
    pub record: T,
    pub x: f64,
    pub y: f64,
    original_x: f64,
    original_y: f64,
}

impl<T: Placeable> PositionedRecord<T> {
    pub fn new(record: T, position: Point) -> Self {
        Self { record, x: position.x, y: position.y, original_x: position.x, original_y: position.y }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn original(&self) -> Point {
        Point::new(self.original_x, self.original_y)
    }

    pub fn has_unsaved_change(&self) -> bool {
        self.x != self.original_x || self.y != self.original_y
    }

    pub fn move_to(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    /// Fija la posición guardada como nueva original.
    pub fn mark_saved(&mut self, saved: Point) {
        self.move_to(saved);
        self.original_x = saved.x;
        self.original_y = saved.y;
    }

    /// Vuelve a la última posición persistida.
    pub fn revert(&mut self) {
        self.x = self.original_x;
        self.y = self.original_y;
    }

    /// Copia del registro con la posición actual redondeada, lista para un
    /// `update`.
    pub fn persisted_record(&self) -> T {
        let mut record = self.record.clone();
        record.set_coordinates(self.position().rounded());
        record
    }
}

/// Parámetros de la rejilla.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    cell_size: f64,
    columns: u32,
    offset: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self { cell_size: GRID_SIZE, columns: GRID_COLUMNS, offset: GRID_OFFSET }
    }
}

type Cell = (i64, i64);

impl GridLayout {
    pub fn new(cell_size: f64, columns: u32, offset: f64) -> Result<Self> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(CanvasError::Geometry(format!("tamaño de celda inválido: {}", cell_size)));
        }
        if columns == 0 {
            return Err(CanvasError::Geometry("la rejilla necesita al menos una columna".to_string()));
        }
        Ok(Self { cell_size, columns, offset })
    }

    /// Coloca todos los registros conservando el orden de entrada.
    ///
    /// Primero se reservan las celdas de los registros con coordenadas
    /// (redondeando a la celda más cercana); después cada registro sin
    /// coordenadas recibe la siguiente celda libre.
    pub fn place<T: Placeable>(&self, records: Vec<T>) -> Vec<PositionedRecord<T>> {
        let mut occupied: HashSet<Cell> =
            records.iter().filter_map(|r| r.coordinates()).map(|p| self.cell_of(p)).collect();

        let mut cursor: Cell = (0, 0);
        records.into_iter()
               .map(|record| match record.coordinates() {
                   Some(position) => PositionedRecord::new(record, position),
                   None => {
                       while occupied.contains(&cursor) {
                           cursor = self.advance(cursor);
                       }
                       let cell = cursor;
                       occupied.insert(cell);
                       cursor = self.advance(cursor);
                       PositionedRecord::new(record, self.cell_origin(cell))
                   }
               })
               .collect()
    }

    /// Celda más cercana a un punto. Redondea las mitades hacia arriba.
    pub fn cell_of(&self, position: Point) -> (i64, i64) {
        let snap = |c: f64| ((c - self.offset) / self.cell_size + 0.5).floor() as i64;
        (snap(position.x), snap(position.y))
    }

    pub fn cell_origin(&self, (column, row): (i64, i64)) -> Point {
        Point::new(column as f64 * self.cell_size + self.offset, row as f64 * self.cell_size + self.offset)
    }

    fn advance(&self, (column, row): Cell) -> Cell {
        if column + 1 >= i64::from(self.columns) {
            (0, row + 1)
        } else {
            (column + 1, row)
        }
    }
}

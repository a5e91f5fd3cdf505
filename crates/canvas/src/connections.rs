// Archivo: connections.rs
// Propósito: segmentos derivados de los enlaces entre registros colocados.
use crate::layout::{Placeable, PositionedRecord};
use indexmap::IndexMap;
use records::Record;
use serde::{Deserialize, Serialize};

/// Registro que relaciona dos registros colocados (p. ej. una dependencia
/// entre servicios).
pub trait Link<Id>: Record {
    fn source_id(&self) -> Id;
    fn target_id(&self) -> Id;
    fn label(&self) -> Option<&str> {
        None
    }
}

/// Segmento entre las posiciones actuales de origen y destino.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub label: Option<String>,
}

/// Un segmento por enlace cuyos dos extremos están en `nodes`; los enlaces
/// con un extremo ausente se omiten.
pub fn connect<T, L>(nodes: &IndexMap<T::Id, PositionedRecord<T>>, links: &[L]) -> Vec<Connection>
    where T: Placeable,
          L: Link<T::Id>
{
    links.iter()
         .filter_map(|link| {
             let source = nodes.get(&link.source_id());
             let target = nodes.get(&link.target_id());
             match (source, target) {
                 (Some(s), Some(t)) => Some(Connection { x1: s.x,
                                                         y1: s.y,
                                                         x2: t.x,
                                                         y2: t.y,
                                                         label: link.label().map(str::to_string) }),
                 _ => {
                     log::debug!("enlace {} -> {} omitido: extremo ausente", link.source_id(), link.target_id());
                     None
                 }
             }
         })
         .collect()
}

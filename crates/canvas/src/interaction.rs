// Archivo: interaction.rs
// Propósito: estado del gesto de puntero. Sólo uno de {arrastrar un
// registro, desplazar la vista} puede estar activo.
use crate::layout::Point;

#[derive(Debug, Clone, PartialEq)]
pub enum Gesture<Id> {
    Idle,
    /// Arrastre de un registro: punto de pantalla inicial y posición de
    /// modelo del registro al empezar.
    DraggingRecord {
        id: Id,
        start_screen: Point,
        start_position: Point,
    },
    /// Desplazamiento de la vista: punto de pantalla inicial y origen de la
    /// ventana al empezar.
    Panning {
        start_screen: Point,
        start_origin: Point,
    },
}

impl<Id> Default for Gesture<Id> {
    fn default() -> Self {
        Gesture::Idle
    }
}

impl<Id: PartialEq> Gesture<Id> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, Gesture::Panning { .. })
    }

    pub fn dragged_id(&self) -> Option<&Id> {
        match self {
            Gesture::DraggingRecord { id, .. } => Some(id),
            _ => None,
        }
    }

    pub fn is_dragging(&self, candidate: &Id) -> bool {
        self.dragged_id() == Some(candidate)
    }
}

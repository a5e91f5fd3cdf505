// Archivo: session.rs
// Propósito: sesión de visualización del mapa. Es dueña de los registros
// colocados, sus enlaces, la ventana visible y el gesto en curso; expone los
// eventos de puntero y el ciclo cambios -> guardar / descartar.
use crate::connections::{connect, Connection, Link};
use crate::errors::{CanvasError, Result};
use crate::interaction::Gesture;
use crate::layout::{GridLayout, Placeable, Point, PositionedRecord};
use crate::viewport::{ScreenRect, ViewportState};
use indexmap::IndexMap;
use records::{PageRequest, RecordClient, RecordEndpoint, RecordError};
use std::collections::HashSet;

/// Resultado de `save`: ids guardados y fallos por id.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveReport<Id> {
    pub saved: Vec<Id>,
    pub failed: Vec<(Id, RecordError)>,
}

impl<Id> SaveReport<Id> {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct CanvasSession<T, L>
    where T: Placeable,
          L: Link<T::Id>
{
    nodes: IndexMap<T::Id, PositionedRecord<T>>,
    links: Vec<L>,
    connections: Vec<Connection>,
    layout: GridLayout,
    viewport: ViewportState,
    screen: ScreenRect,
    gesture: Gesture<T::Id>,
}

impl<T, L> CanvasSession<T, L>
    where T: Placeable,
          L: Link<T::Id>
{
    /// Sesión vacía con la ventana por defecto.
    pub fn new(screen: ScreenRect) -> Self {
        Self { nodes: IndexMap::new(),
               links: Vec::new(),
               connections: Vec::new(),
               layout: GridLayout::default(),
               viewport: ViewportState::default(),
               screen,
               gesture: Gesture::Idle }
    }

    pub fn with_layout(self, layout: GridLayout) -> Self {
        Self { layout, ..self }
    }

    /// Carga una página de registros y otra de enlaces. Si cualquiera de las
    /// dos falla la sesión no cambia.
    pub async fn load<E, F>(&mut self,
                            records: &RecordClient<T, E>,
                            links: &RecordClient<L, F>,
                            request: &PageRequest<T::Field>,
                            link_request: &PageRequest<L::Field>)
                            -> Result<()>
        where E: RecordEndpoint<T> + 'static,
              F: RecordEndpoint<L> + 'static
    {
        let page = records.get_paged_detail(request).await?;
        let link_page = links.get_paged_detail(link_request).await?;
        log::debug!("mapa cargado: {} registros, {} enlaces", page.len(), link_page.len());
        self.populate(page.items, link_page.items);
        Ok(())
    }

    /// Coloca los registros y calcula las conexiones. Los registros sin id
    /// no pueden guardarse y se descartan; de un id repetido sólo queda la
    /// primera aparición. Ninguno de los descartados ocupa celda.
    pub fn populate(&mut self, records: Vec<T>, links: Vec<L>) {
        let mut seen = HashSet::new();
        let records: Vec<T> = records.into_iter()
                                     .filter(|record| match record.id() {
                                         Some(id) if seen.insert(id.clone()) => true,
                                         Some(id) => {
                                             log::warn!("registro con id repetido {} descartado del mapa: {:?}",
                                                        id,
                                                        record);
                                             false
                                         }
                                         None => {
                                             log::warn!("registro sin id descartado del mapa: {:?}", record);
                                             false
                                         }
                                     })
                                     .collect();
        self.nodes = self.layout
                         .place(records)
                         .into_iter()
                         .filter_map(|node| node.record.id().map(|id| (id, node)))
                         .collect();
        self.links = links;
        self.gesture = Gesture::Idle;
        self.refresh_connections();
    }

    pub fn nodes(&self) -> impl Iterator<Item = &PositionedRecord<T>> {
        self.nodes.values()
    }

    pub fn node(&self, id: &T::Id) -> Option<&PositionedRecord<T>> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn links(&self) -> &[L] {
        &self.links
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    pub fn screen(&self) -> ScreenRect {
        self.screen
    }

    pub fn set_screen(&mut self, screen: ScreenRect) {
        self.screen = screen;
    }

    pub fn gesture(&self) -> &Gesture<T::Id> {
        &self.gesture
    }

    /// Empieza a arrastrar un registro.
    pub fn pointer_down_on_node(&mut self, id: &T::Id, at: Point) -> Result<()> {
        let node = self.nodes.get(id).ok_or_else(|| CanvasError::UnknownNode(id.to_string()))?;
        self.gesture = Gesture::DraggingRecord { id: id.clone(), start_screen: at, start_position: node.position() };
        Ok(())
    }

    /// Empieza a desplazar la vista.
    pub fn pointer_down_on_background(&mut self, at: Point) {
        self.gesture = Gesture::Panning { start_screen: at, start_origin: self.viewport.origin() };
    }

    /// Aplica el movimiento al gesto activo. Devuelve `true` si algo cambió.
    pub fn pointer_move(&mut self, at: Point) -> bool {
        match &self.gesture {
            Gesture::Idle => false,
            Gesture::DraggingRecord { id, start_screen, start_position } => {
                let (dx, dy) =
                    self.viewport.screen_delta_to_model(at.x - start_screen.x, at.y - start_screen.y, &self.screen);
                let target = Point::new(start_position.x + dx, start_position.y + dy);
                let Some(node) = self.nodes.get_mut(id) else {
                    return false;
                };
                node.move_to(target);
                self.refresh_connections();
                true
            }
            Gesture::Panning { start_screen, start_origin } => {
                let (dx, dy) =
                    self.viewport.screen_delta_to_model(at.x - start_screen.x, at.y - start_screen.y, &self.screen);
                self.viewport.x = start_origin.x - dx;
                self.viewport.y = start_origin.y - dy;
                true
            }
        }
    }

    pub fn pointer_up(&mut self) {
        self.gesture = Gesture::Idle;
    }

    pub fn pointer_leave(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Zoom con la rueda alrededor de `at`.
    pub fn wheel(&mut self, delta: f64, at: Point) -> bool {
        self.viewport.zoom_at(delta, at, &self.screen)
    }

    pub fn fit_to_content(&mut self) -> ViewportState {
        self.viewport = ViewportState::fit_to(self.nodes.values().map(PositionedRecord::position));
        self.viewport
    }

    pub fn has_changes(&self) -> bool {
        self.nodes.values().any(PositionedRecord::has_unsaved_change)
    }

    /// Ids con cambios sin guardar, en el orden del mapa.
    pub fn dirty_ids(&self) -> Vec<T::Id> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.has_unsaved_change())
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Devuelve cada registro a su última posición guardada.
    pub fn reset(&mut self) {
        self.nodes.values_mut().for_each(PositionedRecord::revert);
        self.refresh_connections();
    }

    /// Guarda, uno a uno, los registros modificados con su posición
    /// redondeada. Sólo los guardados con éxito fijan su nueva posición
    /// original; los fallidos siguen pendientes.
    pub async fn save<E>(&mut self, client: &RecordClient<T, E>) -> SaveReport<T::Id>
        where E: RecordEndpoint<T> + 'static
    {
        let mut report = SaveReport { saved: Vec::new(), failed: Vec::new() };
        for id in self.dirty_ids() {
            let Some(record) = self.nodes.get(&id).map(PositionedRecord::persisted_record) else {
                continue;
            };
            let fallback = record.coordinates().unwrap_or_default();
            match client.update(&record).await {
                Ok(saved) => {
                    let position = saved.coordinates().unwrap_or(fallback);
                    if let Some(node) = self.nodes.get_mut(&id) {
                        node.record = saved;
                        node.mark_saved(position);
                    }
                    report.saved.push(id);
                }
                Err(e) => {
                    log::warn!("no se pudo guardar la posición de {}: {}", id, e);
                    report.failed.push((id, e));
                }
            }
        }
        self.refresh_connections();
        report
    }

    fn refresh_connections(&mut self) {
        self.connections = connect(&self.nodes, &self.links);
    }
}

// Archivo: client.rs
// Propósito: implementar `RecordClient`, el cliente CRUD genérico sobre una
// colección. Delega el transporte en un `RecordEndpoint` y es dueño de la
// `InvalidationSignal` de la colección.
use crate::domain::{IdPage, PageRequest, PageResult, Record};
use crate::errors::{RecordError, Result};
use crate::repository::RecordEndpoint;
use crate::signal::{InvalidationSignal, Subscription};
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Cliente CRUD tipado para una colección de registros `T`.
///
/// Efectos laterales: una llamada de red y, sólo si tiene éxito una
/// mutación (`create`, `update`, `delete`), exactamente un aviso en la señal
/// de invalidación.
pub struct RecordClient<T, E>
    where T: Record,
          E: RecordEndpoint<T>
{
    endpoint: Arc<E>,
    signal: InvalidationSignal,
    _record: PhantomData<fn() -> T>,
}

impl<T, E> RecordClient<T, E>
    where T: Record,
          E: RecordEndpoint<T> + 'static
{
    /// Crea el cliente sobre el endpoint inyectado. La señal nace con el
    /// cliente y vive lo mismo que él.
    pub fn new(endpoint: Arc<E>) -> Self {
        Self { endpoint, signal: InvalidationSignal::new(), _record: PhantomData }
    }

    pub fn name(&self) -> &str {
        self.endpoint.name()
    }

    pub fn endpoint(&self) -> &Arc<E> {
        &self.endpoint
    }

    /// Señal de invalidación (sólo lectura para los suscriptores).
    pub fn signal(&self) -> &InvalidationSignal {
        &self.signal
    }

    pub fn subscribe(&self) -> Subscription {
        self.signal.subscribe()
    }

    /// Página de identificadores para la petición.
    pub async fn list_identifiers(&self, request: &PageRequest<T::Field>) -> Result<IdPage<T::Id, T::Field>> {
        log::debug!("refrescando {} con {:?}", self.name(), request.query_pairs());
        self.endpoint.list_ids(request).await
    }

    pub async fn get(&self, id: &T::Id) -> Result<T> {
        self.endpoint.fetch(id).await
    }

    /// Página con el detalle de cada registro.
    ///
    /// Pide los identificadores y después lanza un `get` concurrente por
    /// cada uno. El resultado respeta el orden de los identificadores, no el
    /// de finalización. Si un solo detalle falla, falla la página entera.
    ///
    /// Nunca devuelve más de `request.size()` registros: si el servidor
    /// manda más identificadores, se descartan los sobrantes.
    pub async fn get_paged_detail(&self, request: &PageRequest<T::Field>) -> Result<PageResult<T>> {
        let mut page = self.list_identifiers(request).await?;
        let limit = request.size() as usize;
        if page.ids.len() > limit {
            log::warn!("{}: el servidor devolvió {} ids para una página de {}; se descartan los sobrantes",
                       self.name(),
                       page.ids.len(),
                       limit);
            page.ids.truncate(limit);
        }

        let mut tasks = JoinSet::new();
        for (index, id) in page.ids.iter().cloned().enumerate() {
            let endpoint = Arc::clone(&self.endpoint);
            tasks.spawn(async move { (index, endpoint.fetch(&id).await) });
        }

        let mut slots: Vec<Option<T>> = (0..page.ids.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            let (index, fetched) =
                joined.map_err(|e| RecordError::Other(format!("{}: tarea de detalle interrumpida: {}", self.name(), e)))?;
            match fetched {
                Ok(record) => slots[index] = Some(record),
                Err(e) => {
                    tasks.abort_all();
                    log::debug!("{}: detalle de la página {} falló: {}", self.name(), request.page(), e);
                    return Err(e);
                }
            }
        }

        let items = slots.into_iter()
                         .collect::<Option<Vec<T>>>()
                         .ok_or_else(|| RecordError::Other(format!("{}: faltan detalles en la página", self.name())))?;
        Ok(PageResult { items, request: page.request })
    }

    /// Crea el registro. Devuelve el registro con el id asignado por el
    /// servidor.
    pub async fn create(&self, record: &T) -> Result<T> {
        log::debug!("{}: creando {:?}", self.name(), record);
        let created = self.endpoint.insert(record).await?;
        log::debug!("{}: creado {:?}", self.name(), created);
        self.signal.raise();
        Ok(created)
    }

    /// Actualiza el registro. Exige `record.id()`; sin él devuelve
    /// `Validation` sin hacer ninguna petición.
    pub async fn update(&self, record: &T) -> Result<T> {
        let id = record.id()
                       .ok_or_else(|| RecordError::Validation(format!("{}: update requiere un id", self.name())))?;
        let updated = self.endpoint.replace(&id, record).await?;
        log::debug!("{}: actualizado {:?}", self.name(), updated);
        self.signal.raise();
        Ok(updated)
    }

    pub async fn delete(&self, id: &T::Id) -> Result<()> {
        self.endpoint.remove(id).await?;
        log::debug!("{}: eliminado {}", self.name(), id);
        self.signal.raise();
        Ok(())
    }
}

// Archivo: stubs.rs
// Propósito: implementación en memoria de `RecordEndpoint` para pruebas y
// wiring rápido. No es durable. Permite inyectar fallos y latencias para
// ejercitar los caminos de error y las respuestas fuera de orden.
use crate::domain::{IdPage, PageRequest, Record};
use crate::errors::{RecordError, Result};
use crate::repository::RecordEndpoint;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

struct Store<T: Record> {
    /// Registros en orden de inserción.
    records: Vec<T>,
    next_id: u64,
    failing_fetches: HashSet<T::Id>,
    fetch_delays: HashMap<T::Id, Duration>,
    failing_mutation: Option<RecordError>,
}

/// Colección en memoria. Asigna ids secuenciales empezando en 1.
pub struct InMemoryRecordEndpoint<T: Record> {
    name: String,
    store: Mutex<Store<T>>,
    fetches: AtomicUsize,
}

impl<T: Record> InMemoryRecordEndpoint<T> {
    /// Crea una colección vacía.
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(),
               store: Mutex::new(Store { records: Vec::new(),
                                         next_id: 1,
                                         failing_fetches: HashSet::new(),
                                         fetch_delays: HashMap::new(),
                                         failing_mutation: None }),
               fetches: AtomicUsize::new(0) }
    }

    fn lock(&self) -> MutexGuard<'_, Store<T>> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Hace que `fetch(id)` falle con 500.
    pub fn fail_fetch_of(&self, id: T::Id) {
        self.lock().failing_fetches.insert(id);
    }

    /// Retrasa `fetch(id)` el tiempo indicado.
    pub fn delay_fetch_of(&self, id: T::Id, delay: Duration) {
        self.lock().fetch_delays.insert(id, delay);
    }

    /// La próxima mutación (insert/replace/remove) falla con el status dado.
    pub fn fail_next_mutation(&self, status: u16) {
        self.lock().failing_mutation = Some(RecordError::request(status, "fallo inyectado"));
    }

    /// Número de `fetch` recibidos.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().records.is_empty()
    }

    /// Copia de todos los registros en orden de inserción.
    pub fn snapshot(&self) -> Vec<T> {
        self.lock().records.clone()
    }
}

impl<T: Record> InMemoryRecordEndpoint<T> where T::Id: TryFrom<u64>
{
    /// Inserta sin pasar por el trait (no cuenta como mutación fallida).
    pub fn seed(&self, record: T) -> Result<T> {
        let mut store = self.lock();
        Self::store_new(&mut store, record)
    }

    fn store_new(store: &mut Store<T>, mut record: T) -> Result<T> {
        let id = <T::Id as TryFrom<u64>>::try_from(store.next_id)
            .map_err(|_| RecordError::Other(format!("id {} fuera de rango", store.next_id)))?;
        store.next_id += 1;
        record.assign_id(id);
        store.records.push(record.clone());
        Ok(record)
    }

    fn not_found(&self, id: &T::Id) -> RecordError {
        RecordError::request(404, format!("{} {} no encontrado", self.name, id))
    }
}

#[async_trait]
impl<T: Record> RecordEndpoint<T> for InMemoryRecordEndpoint<T> where T::Id: TryFrom<u64>
{
    fn name(&self) -> &str {
        &self.name
    }

    /// Ordena (orden estable) según la petición y recorta la página.
    async fn list_ids(&self, request: &PageRequest<T::Field>) -> Result<IdPage<T::Id, T::Field>> {
        let store = self.lock();
        let mut sorted: Vec<&T> = store.records.iter().collect();
        if let Some(sort) = request.sort() {
            sorted.sort_by(|a, b| sort.order.apply(a.compare_by(b, sort.property)));
        }
        let ids = sorted.into_iter()
                        .skip(request.offset())
                        .take(request.size() as usize)
                        .filter_map(Record::id)
                        .collect();
        Ok(IdPage { ids, request: *request })
    }

    async fn fetch(&self, id: &T::Id) -> Result<T> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let delay = self.lock().fetch_delays.get(id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let store = self.lock();
        if store.failing_fetches.contains(id) {
            return Err(RecordError::request(500, format!("fallo inyectado al leer {}", id)));
        }
        store.records
             .iter()
             .find(|r| r.id().as_ref() == Some(id))
             .cloned()
             .ok_or_else(|| self.not_found(id))
    }

    async fn insert(&self, record: &T) -> Result<T> {
        let mut store = self.lock();
        if let Some(e) = store.failing_mutation.take() {
            return Err(e);
        }
        Self::store_new(&mut store, record.clone())
    }

    async fn replace(&self, id: &T::Id, record: &T) -> Result<T> {
        let mut store = self.lock();
        if let Some(e) = store.failing_mutation.take() {
            return Err(e);
        }
        if record.id().as_ref() != Some(id) {
            return Err(RecordError::request(400, "los ids de la ruta y del cuerpo deben coincidir"));
        }
        let slot = store.records
                        .iter_mut()
                        .find(|r| r.id().as_ref() == Some(id))
                        .ok_or_else(|| self.not_found(id))?;
        *slot = record.clone();
        Ok(record.clone())
    }

    async fn remove(&self, id: &T::Id) -> Result<()> {
        let mut store = self.lock();
        if let Some(e) = store.failing_mutation.take() {
            return Err(e);
        }
        let before = store.records.len();
        store.records.retain(|r| r.id().as_ref() != Some(id));
        if store.records.len() == before {
            return Err(self.not_found(id));
        }
        Ok(())
    }
}

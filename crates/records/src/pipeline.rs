// Archivo: pipeline.rs
// Propósito: implementar `PaginatedQuery`, que combina tres entradas que
// cambian de forma independiente (orden, página pedida y la señal de
// invalidación del cliente) en una única secuencia de páginas.
//
// Regla central: gana el último disparo, no la última respuesta. Cada
// disparo incrementa un contador de generación; una respuesta sólo se
// entrega si su generación sigue siendo la actual.
use crate::client::RecordClient;
use crate::domain::{PageRequest, PageResult, Record, Sort};
use crate::errors::Result;
use crate::repository::RecordEndpoint;
use crate::signal::{Invalidation, Subscription};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Tamaño de página usado por las tablas de la consola.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Fuente de páginas detalladas.
#[async_trait]
pub trait PagedSource<T: Record>: Send + Sync {
    async fn fetch_page(&self, request: PageRequest<T::Field>) -> Result<PageResult<T>>;
}

#[async_trait]
impl<T, E> PagedSource<T> for RecordClient<T, E>
    where T: Record,
          E: RecordEndpoint<T> + 'static
{
    async fn fetch_page(&self, request: PageRequest<T::Field>) -> Result<PageResult<T>> {
        self.get_paged_detail(&request).await
    }
}

/// Configuración obligatoria del pipeline.
#[derive(Debug, Clone, Copy)]
pub struct QueryConfig<F> {
    pub initial_sort: Sort<F>,
    pub initial_page: u64,
    pub page_size: u32,
}

impl<F> QueryConfig<F> {
    pub fn new(initial_sort: Sort<F>, initial_page: u64) -> Self {
        Self { initial_sort, initial_page, page_size: DEFAULT_PAGE_SIZE }
    }

    pub fn with_page_size(self, page_size: u32) -> Self {
        Self { page_size, ..self }
    }
}

/// Lo que recibe el consumidor por cada disparo vigente.
pub type PageEvent<T> = Result<PageResult<T>>;

struct QueryState<T: Record> {
    request: PageRequest<T::Field>,
    generation: u64,
    last_invalidation: Option<Invalidation>,
    latest: Option<PageResult<T>>,
}

struct Shared<T: Record> {
    source: Arc<dyn PagedSource<T>>,
    state: Mutex<QueryState<T>>,
    events: mpsc::UnboundedSender<PageEvent<T>>,
}

impl<T: Record> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, QueryState<T>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Aplica el cambio de entrada, abre una nueva generación y lanza la
    /// petición correspondiente. Devuelve la generación abierta.
    fn trigger(shared: &Arc<Self>, change: impl FnOnce(&mut QueryState<T>)) -> u64 {
        let (generation, request) = {
            let mut state = shared.lock();
            change(&mut state);
            state.generation += 1;
            (state.generation, state.request)
        };
        log::debug!("pidiendo página {} (generación {}) con {:?}",
                    request.page(),
                    generation,
                    request.sort());

        let task_shared = Arc::clone(shared);
        tokio::spawn(async move {
            let outcome = task_shared.source.fetch_page(request).await;
            task_shared.deliver(generation, outcome);
        });
        generation
    }

    /// Entrega el resultado sólo si nadie ha disparado después. La
    /// comprobación y el envío ocurren bajo el mismo lock.
    fn deliver(&self, generation: u64, outcome: PageEvent<T>) {
        let mut state = self.lock();
        if state.generation != generation {
            log::debug!("descartando resultado de la generación {} (actual {})", generation, state.generation);
            return;
        }
        if let Ok(page) = &outcome {
            state.latest = Some(page.clone());
        }
        if self.events.send(outcome).is_err() {
            log::debug!("nadie escucha la generación {}", generation);
        }
    }
}

/// Pipeline paginado y reactivo.
///
/// Se construye con el orden y la página iniciales, por lo que la primera
/// petición sale en el propio constructor. Requiere un runtime de tokio.
pub struct PaginatedQuery<T: Record> {
    shared: Arc<Shared<T>>,
    events: mpsc::UnboundedReceiver<PageEvent<T>>,
    listener: Option<JoinHandle<()>>,
}

impl<T: Record> PaginatedQuery<T> {
    /// Crea el pipeline sobre una fuente y una suscripción de invalidación.
    pub fn spawn(source: Arc<dyn PagedSource<T>>,
                 invalidations: Subscription,
                 config: QueryConfig<T::Field>)
                 -> Result<Self> {
        let request = PageRequest::new(config.initial_page, config.page_size, Some(config.initial_sort))?;
        let (tx, rx) = mpsc::unbounded_channel();
        let shared = Arc::new(Shared { source,
                                       state: Mutex::new(QueryState { request,
                                                                      generation: 0,
                                                                      last_invalidation: None,
                                                                      latest: None }),
                                       events: tx });

        let listener = tokio::spawn(listen(Arc::downgrade(&shared), invalidations));
        Shared::trigger(&shared, |_| {});

        Ok(Self { shared, events: rx, listener: Some(listener) })
    }

    /// Atajo: pipeline sobre un `RecordClient`, suscrito a su señal.
    pub fn for_client<E>(client: Arc<RecordClient<T, E>>, config: QueryConfig<T::Field>) -> Result<Self>
        where E: RecordEndpoint<T> + 'static
    {
        let subscription = client.subscribe();
        Self::spawn(client, subscription, config)
    }

    /// Cambia el orden; mantiene la página actual.
    pub fn set_sort(&self, sort: Sort<T::Field>) -> u64 {
        Shared::trigger(&self.shared, |state| state.request = state.request.with_sort(Some(sort)))
    }

    /// Pide la página `page`; mantiene el orden actual.
    pub fn request_page(&self, page: u64) -> u64 {
        Shared::trigger(&self.shared, |state| state.request = state.request.with_page(page))
    }

    /// Vuelve a pedir la combinación actual, como si llegara una
    /// invalidación.
    pub fn refresh(&self) -> u64 {
        Shared::trigger(&self.shared, |_| {})
    }

    /// Siguiente resultado entregado. `None` si el pipeline se cerró.
    pub async fn next(&mut self) -> Option<PageEvent<T>> {
        self.events.recv().await
    }

    pub fn try_next(&mut self) -> Option<PageEvent<T>> {
        self.events.try_recv().ok()
    }

    /// Última página entregada con éxito; un fallo posterior no la borra.
    pub fn current_page(&self) -> Option<PageResult<T>> {
        self.shared.lock().latest.clone()
    }

    pub fn current_request(&self) -> PageRequest<T::Field> {
        self.shared.lock().request
    }

    pub fn generation(&self) -> u64 {
        self.shared.lock().generation
    }

    pub fn last_invalidation(&self) -> Option<Invalidation> {
        self.shared.lock().last_invalidation
    }

    /// Deja de escuchar invalidaciones y libera la suscripción.
    pub fn close(mut self) {
        self.stop_listener();
    }

    fn stop_listener(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.abort();
        }
    }
}

impl<T: Record> Drop for PaginatedQuery<T> {
    fn drop(&mut self) {
        self.stop_listener();
    }
}

async fn listen<T: Record>(shared: Weak<Shared<T>>, mut invalidations: Subscription) {
    while let Some(invalidation) = invalidations.recv().await {
        let Some(shared) = shared.upgrade() else {
            break;
        };
        log::debug!("invalidación recibida ({})", invalidation.timestamp_millis);
        Shared::trigger(&shared, |state| state.last_invalidation = Some(invalidation));
    }
}

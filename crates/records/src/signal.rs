// Archivo: signal.rs
// Propósito: señal de invalidación de una colección. Es un registro explícito
// de suscriptores (publish/subscribe) propiedad del `RecordClient`: un único
// escritor y cualquier número de lectores. No hay replay: quien no está
// suscrito en el momento del aviso simplemente lo pierde.
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Aviso de "esta colección cambió, vuelve a pedir los datos".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Invalidation {
    /// Milisegundos desde epoch. Nunca decrece para una misma señal.
    pub timestamp_millis: i64,
}

#[derive(Debug)]
struct Registry {
    subscribers: DashMap<Uuid, mpsc::UnboundedSender<Invalidation>>,
    last: AtomicI64,
}

/// Señal de invalidación con registro de suscriptores.
#[derive(Debug)]
pub struct InvalidationSignal {
    registry: Arc<Registry>,
}

impl InvalidationSignal {
    pub fn new() -> Self {
        Self { registry: Arc::new(Registry { subscribers: DashMap::new(),
                                             last: AtomicI64::new(i64::MIN) }) }
    }

    /// Registra un nuevo suscriptor. El registro dura lo que viva la
    /// `Subscription` devuelta.
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        self.registry.subscribers.insert(id, tx);
        Subscription { id, receiver: rx, registry: Arc::downgrade(&self.registry) }
    }

    /// Emite una invalidación con la hora actual.
    pub fn raise(&self) -> Invalidation {
        self.raise_at(Utc::now().timestamp_millis())
    }

    /// Emite una invalidación con el timestamp dado. Si es anterior al último
    /// emitido se usa el último, de modo que la secuencia es no decreciente.
    pub fn raise_at(&self, timestamp_millis: i64) -> Invalidation {
        let previous = self.registry.last.fetch_max(timestamp_millis, Ordering::SeqCst);
        let event = Invalidation { timestamp_millis: previous.max(timestamp_millis) };
        // Los receptores cerrados se eliminan al intentar enviarles.
        self.registry.subscribers.retain(|_, tx| tx.send(event).is_ok());
        log::debug!("invalidación emitida a {} suscriptores ({})",
                    self.registry.subscribers.len(),
                    event.timestamp_millis);
        event
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.subscribers.len()
    }

    /// Última invalidación emitida, si hubo alguna.
    pub fn last_raised(&self) -> Option<Invalidation> {
        match self.registry.last.load(Ordering::SeqCst) {
            i64::MIN => None,
            timestamp_millis => Some(Invalidation { timestamp_millis }),
        }
    }
}

impl Default for InvalidationSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Suscripción a una `InvalidationSignal`. Al soltarla se da de baja del
/// registro.
#[derive(Debug)]
pub struct Subscription {
    id: Uuid,
    receiver: mpsc::UnboundedReceiver<Invalidation>,
    registry: Weak<Registry>,
}

impl Subscription {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Espera el siguiente aviso. Devuelve `None` cuando la señal ya no
    /// existe.
    pub async fn recv(&mut self) -> Option<Invalidation> {
        self.receiver.recv().await
    }

    /// Aviso pendiente, sin esperar.
    pub fn try_recv(&mut self) -> Option<Invalidation> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.subscribers.remove(&self.id);
        }
    }
}

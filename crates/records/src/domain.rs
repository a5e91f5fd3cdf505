// Archivo: domain.rs
// Propósito: tipos del modelo genérico de registros: el trait `Record`, la
// especificación de orden (`Sort`), la petición de página (`PageRequest`) y
// los resultados paginados (`IdPage`, `PageResult`).
use crate::errors::{RecordError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

/// Propiedad por la que puede ordenarse un tipo de registro.
///
/// Cada tipo de registro declara un enum con sus campos ordenables; así una
/// `Sort` sólo puede nombrar campos que existen en el registro.
pub trait SortField: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Nombre del campo tal como lo espera el servidor (`sortProperty`).
    fn as_str(&self) -> &'static str;
}

/// Capacidad mínima que exige el pipeline: un registro serializable con un
/// identificador opcional (ausente mientras es un borrador).
pub trait Record: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Id: Clone
        + Eq
        + Hash
        + fmt::Debug
        + fmt::Display
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;
    type Field: SortField;

    /// Identificador, presente una vez persistido.
    fn id(&self) -> Option<Self::Id>;

    /// Asigna el identificador (lo usan los endpoints que generan ids).
    fn assign_id(&mut self, id: Self::Id);

    /// Compara dos registros por un campo. Por defecto todos son iguales, lo
    /// que deja el orden de inserción intacto.
    fn compare_by(&self, _other: &Self, _field: Self::Field) -> Ordering {
        Ordering::Equal
    }
}

/// Sentido del orden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Aplica el sentido sobre un `Ordering` ascendente.
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Orden solicitado: campo + sentido.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<F> {
    pub property: F,
    pub order: SortOrder,
}

impl<F: SortField> Sort<F> {
    pub fn asc(property: F) -> Self {
        Self { property, order: SortOrder::Asc }
    }

    pub fn desc(property: F) -> Self {
        Self { property, order: SortOrder::Desc }
    }
}

/// Petición de una página (índice base 0, tamaño > 0, orden opcional).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<F> {
    page: u64,
    size: u32,
    sort: Option<Sort<F>>,
}

impl<F: SortField> PageRequest<F> {
    /// Crea la petición. Falla con `Validation` si `size == 0`.
    pub fn new(page: u64, size: u32, sort: Option<Sort<F>>) -> Result<Self> {
        if size == 0 {
            return Err(RecordError::Validation("el tamaño de página debe ser mayor que 0".to_string()));
        }
        Ok(Self { page, size, sort })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort(&self) -> Option<Sort<F>> {
        self.sort
    }

    pub fn with_page(self, page: u64) -> Self {
        Self { page, ..self }
    }

    pub fn with_sort(self, sort: Option<Sort<F>>) -> Self {
        Self { sort, ..self }
    }

    /// Desplazamiento del primer elemento de la página.
    pub fn offset(&self) -> usize {
        (self.page as usize).saturating_mul(self.size as usize)
    }

    /// Parámetros de query: `size` y `page` siempre; `sortProperty` y
    /// `sortOrder` sólo si hay orden.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("size", self.size.to_string()), ("page", self.page.to_string())];
        if let Some(sort) = &self.sort {
            pairs.push(("sortProperty", sort.property.as_str().to_string()));
            pairs.push(("sortOrder", sort.order.as_str().to_string()));
        }
        pairs
    }

    /// Petición "eco" devuelta por el servidor: si éste informa `page` o
    /// `size` (p.ej. por aplicar valores por defecto) se respetan; el orden
    /// se conserva del original.
    pub fn echoed(&self, page: Option<u64>, size: Option<u32>) -> Self {
        let size = match size {
            Some(s) if s > 0 => s,
            _ => self.size,
        };
        Self { page: page.unwrap_or(self.page), size, sort: self.sort }
    }
}

/// Página de identificadores crudos + la petición que la produjo.
#[derive(Debug, Clone, PartialEq)]
pub struct IdPage<Id, F> {
    pub ids: Vec<Id>,
    pub request: PageRequest<F>,
}

/// Página de registros completos, en el mismo orden que los identificadores
/// devueltos para esa petición.
#[derive(Debug, Clone)]
pub struct PageResult<T: Record> {
    pub items: Vec<T>,
    pub request: PageRequest<T::Field>,
}

impl<T: Record> PageResult<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> Vec<Option<T::Id>> {
        self.items.iter().map(Record::id).collect()
    }
}

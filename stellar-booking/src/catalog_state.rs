use stellar_core::ServiceError;
use tracing::{debug, warn};

/// Load state of one catalog list, keyed by the parameters it was requested with.
///
/// Only a response whose key matches the request currently awaited is applied.
/// Anything else is stale and dropped on arrival.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogState<K, T> {
    Idle,
    Loading { key: K },
    Ready { key: K, items: Vec<T> },
    Unavailable { key: K, reason: ServiceError },
}

impl<K, T> Default for CatalogState<K, T> {
    fn default() -> Self {
        CatalogState::Idle
    }
}

impl<K: PartialEq + Copy + std::fmt::Debug, T> CatalogState<K, T> {
    /// Start waiting for `key`, superseding any earlier request
    pub fn begin(&mut self, key: K) {
        *self = CatalogState::Loading { key };
    }

    /// Apply a response. Returns `false` if the response was stale.
    pub fn resolve(&mut self, key: K, result: Result<Vec<T>, ServiceError>) -> bool {
        if self.awaited_key() != Some(key) {
            debug!("Discarding stale catalog response for {:?}", key);
            return false;
        }
        *self = match result {
            Ok(items) => CatalogState::Ready { key, items },
            Err(reason) => {
                warn!("Catalog request for {:?} failed: {}", key, reason);
                CatalogState::Unavailable { key, reason }
            }
        };
        true
    }

    pub fn reset(&mut self) {
        *self = CatalogState::Idle;
    }

    /// Key of the in-flight request, if any
    pub fn awaited_key(&self) -> Option<K> {
        match self {
            CatalogState::Loading { key } => Some(*key),
            _ => None,
        }
    }

    /// Key of whatever the state currently describes
    pub fn key(&self) -> Option<K> {
        match self {
            CatalogState::Idle => None,
            CatalogState::Loading { key }
            | CatalogState::Ready { key, .. }
            | CatalogState::Unavailable { key, .. } => Some(*key),
        }
    }

    /// Loaded items; empty unless ready
    pub fn items(&self) -> &[T] {
        match self {
            CatalogState::Ready { items, .. } => items,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, CatalogState::Loading { .. })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, CatalogState::Ready { .. })
    }

    pub fn error(&self) -> Option<&ServiceError> {
        match self {
            CatalogState::Unavailable { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

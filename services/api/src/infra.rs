use metrics_exporter_prometheus::PrometheusHandle;
use predial::workflows::predial::{AnalysisOptions, PropertyTable};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) tables: TableCache,
    pub(crate) options: AnalysisOptions,
}

/// Content address of an upload: lowercase hex SHA-256 of the raw bytes.
pub(crate) fn table_id(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Normalized uploads kept in memory, evicting the oldest once full.
#[derive(Clone)]
pub(crate) struct TableCache {
    capacity: usize,
    slots: Arc<Mutex<TableSlots>>,
}

#[derive(Default)]
struct TableSlots {
    tables: HashMap<String, Arc<PropertyTable>>,
    order: VecDeque<String>,
}

impl TableCache {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            slots: Arc::default(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TableSlots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `table` under `id`; re-uploading known content is a no-op
    /// that returns the cached table.
    pub(crate) fn insert(&self, id: &str, table: PropertyTable) -> Arc<PropertyTable> {
        let mut guard = self.lock();
        if let Some(existing) = guard.tables.get(id) {
            return existing.clone();
        }

        while guard.order.len() >= self.capacity {
            match guard.order.pop_front() {
                Some(oldest) => {
                    guard.tables.remove(&oldest);
                }
                None => break,
            }
        }

        let table = Arc::new(table);
        guard.order.push_back(id.to_string());
        guard.tables.insert(id.to_string(), table.clone());
        table
    }

    pub(crate) fn get(&self, id: &str) -> Option<Arc<PropertyTable>> {
        self.lock().tables.get(id).cloned()
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, id: &str) -> bool {
        self.lock().tables.contains_key(id)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.lock().tables.len()
    }
}

// ── In-memory stores ──
//
// Thread-safe stores backed by `DashMap`. Every mutation is appended to a
// journal published through a `watch` channel, so consumers (and tests)
// can observe exactly which calls reached the store.

use std::collections::BTreeMap;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use dashmap::DashMap;
use tokio::sync::watch;
use tracing::debug;

use super::{EnodebStore, GatewayPatch, GatewayStore};
use crate::error::StoreError;
use crate::model::{GatewayRecord, RadioUnitInfo};

/// A mutation that reached the gateway store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    Write { id: String },
    Patch { id: String, patch: GatewayPatch },
}

impl StoreOp {
    pub fn id(&self) -> &str {
        match self {
            Self::Write { id } | Self::Patch { id, .. } => id,
        }
    }

    pub fn is_write(&self) -> bool {
        matches!(self, Self::Write { .. })
    }
}

// ── Gateway store ───────────────────────────────────────────────────

pub struct MemoryGatewayStore {
    gateways: DashMap<String, Arc<GatewayRecord>>,
    journal: watch::Sender<Vec<StoreOp>>,
    fail_next: ArcSwapOption<StoreError>,
}

impl MemoryGatewayStore {
    pub fn new() -> Self {
        let (journal, _) = watch::channel(Vec::new());
        Self {
            gateways: DashMap::new(),
            journal,
            fail_next: ArcSwapOption::empty(),
        }
    }

    /// Seed the store without recording journal entries.
    pub fn with_records(records: impl IntoIterator<Item = GatewayRecord>) -> Self {
        let store = Self::new();
        for record in records {
            store.gateways.insert(record.id.clone(), Arc::new(record));
        }
        store
    }

    /// Make the next `write` or `patch` fail with `err` without touching data.
    pub fn fail_next(&self, err: StoreError) {
        self.fail_next.store(Some(Arc::new(err)));
    }

    /// Every mutation accepted so far, oldest first.
    pub fn journal(&self) -> Vec<StoreOp> {
        self.journal.borrow().clone()
    }

    /// Subscribe to journal changes.
    pub fn subscribe(&self) -> watch::Receiver<Vec<StoreOp>> {
        self.journal.subscribe()
    }

    pub fn get(&self, id: &str) -> Option<Arc<GatewayRecord>> {
        self.gateways.get(id).map(|r| Arc::clone(r.value()))
    }

    pub fn len(&self) -> usize {
        self.gateways.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gateways.is_empty()
    }

    /// Sorted copy of every record.
    pub fn snapshot(&self) -> BTreeMap<String, GatewayRecord> {
        self.gateways
            .iter()
            .map(|entry| (entry.key().clone(), (**entry.value()).clone()))
            .collect()
    }

    fn take_failure(&self) -> Result<(), StoreError> {
        match self.fail_next.swap(None) {
            Some(err) => Err((*err).clone()),
            None => Ok(()),
        }
    }

    fn record(&self, op: StoreOp) {
        self.journal.send_modify(|ops| ops.push(op));
    }
}

impl Default for MemoryGatewayStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GatewayStore for MemoryGatewayStore {
    async fn read(&self, id: &str) -> Result<Option<GatewayRecord>, StoreError> {
        debug!(gateway = id, "reading gateway");
        Ok(self.get(id).map(|record| (*record).clone()))
    }

    async fn ids(&self) -> Result<Vec<String>, StoreError> {
        let mut ids: Vec<String> = self.gateways.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        Ok(ids)
    }

    async fn write(&self, id: &str, record: GatewayRecord) -> Result<(), StoreError> {
        self.take_failure()?;
        self.gateways.insert(id.to_owned(), Arc::new(record));
        self.record(StoreOp::Write { id: id.to_owned() });
        debug!(gateway = id, "gateway written");
        Ok(())
    }

    async fn patch(&self, id: &str, patch: GatewayPatch) -> Result<(), StoreError> {
        self.take_failure()?;
        let Some(mut entry) = self.gateways.get_mut(id) else {
            return Err(StoreError::rejected(404, format!("gateway {id} not found")));
        };
        let mut updated = (**entry.value()).clone();
        patch.apply_to(&mut updated);
        *entry.value_mut() = Arc::new(updated);
        drop(entry);

        debug!(gateway = id, slices = ?patch.slices(), "gateway patched");
        self.record(StoreOp::Patch {
            id: id.to_owned(),
            patch,
        });
        Ok(())
    }
}

// ── Enodeb store ────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryEnodebStore {
    enodebs: DashMap<String, RadioUnitInfo>,
}

impl MemoryEnodebStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_units(units: impl IntoIterator<Item = RadioUnitInfo>) -> Self {
        let store = Self::new();
        for unit in units {
            store.insert(unit);
        }
        store
    }

    pub fn insert(&self, unit: RadioUnitInfo) {
        self.enodebs.insert(unit.serial.clone(), unit);
    }

    pub fn snapshot(&self) -> BTreeMap<String, RadioUnitInfo> {
        self.enodebs
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

impl EnodebStore for MemoryEnodebStore {
    async fn read(&self) -> Result<BTreeMap<String, RadioUnitInfo>, StoreError> {
        Ok(self.snapshot())
    }
}

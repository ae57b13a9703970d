// ── Store capabilities ──
//
// The gateway and enodeb inventories live behind these traits. Editors,
// views and the orchestrator receive them as explicit parameters; nothing
// in this crate reaches for a global store.

mod inventory;
mod memory;
mod patch;

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

pub use inventory::Inventory;
pub use memory::{MemoryEnodebStore, MemoryGatewayStore, StoreOp};
pub use patch::GatewayPatch;

use crate::error::StoreError;
use crate::model::{GatewayRecord, RadioUnitInfo};

/// Read, whole-record write and slice patch over the gateway inventory.
pub trait GatewayStore: Send + Sync {
    /// Fetch one record, `None` when the id is unknown.
    fn read(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<GatewayRecord>, StoreError>> + Send;

    /// All known gateway ids.
    fn ids(&self) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;

    /// Create or replace the full record stored under `id`.
    fn write(
        &self,
        id: &str,
        record: GatewayRecord,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Replace only the slices named by `patch`.
    fn patch(
        &self,
        id: &str,
        patch: GatewayPatch,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Read-only view of the radio-unit inventory, keyed by serial.
pub trait EnodebStore: Send + Sync {
    fn read(&self) -> impl Future<Output = Result<BTreeMap<String, RadioUnitInfo>, StoreError>> + Send;
}

impl<T: GatewayStore> GatewayStore for Arc<T> {
    fn read(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<GatewayRecord>, StoreError>> + Send {
        (**self).read(id)
    }

    fn ids(&self) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send {
        (**self).ids()
    }

    fn write(
        &self,
        id: &str,
        record: GatewayRecord,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        (**self).write(id, record)
    }

    fn patch(
        &self,
        id: &str,
        patch: GatewayPatch,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        (**self).patch(id, patch)
    }
}

impl<T: EnodebStore> EnodebStore for Arc<T> {
    fn read(&self) -> impl Future<Output = Result<BTreeMap<String, RadioUnitInfo>, StoreError>> + Send {
        (**self).read()
    }
}

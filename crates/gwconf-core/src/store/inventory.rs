// ── Inventory snapshot ──
//
// Serializable picture of both stores. Used to seed the in-memory stores
// and to dump them again after an edit session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{MemoryEnodebStore, MemoryGatewayStore};
use crate::model::{GatewayRecord, RadioUnitInfo};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub gateways: BTreeMap<String, GatewayRecord>,
    #[serde(default)]
    pub enodebs: BTreeMap<String, RadioUnitInfo>,
}

impl Inventory {
    /// Build both stores. Map keys win over ids embedded in the values.
    pub fn into_stores(self) -> (MemoryGatewayStore, MemoryEnodebStore) {
        let gateways = MemoryGatewayStore::with_records(self.gateways.into_iter().map(
            |(id, mut record)| {
                record.id = id;
                record
            },
        ));
        let enodebs = MemoryEnodebStore::with_units(self.enodebs.into_iter().map(
            |(serial, mut unit)| {
                unit.serial = serial;
                unit
            },
        ));
        (gateways, enodebs)
    }

    pub fn from_stores(gateways: &MemoryGatewayStore, enodebs: &MemoryEnodebStore) -> Self {
        Self {
            gateways: gateways.snapshot(),
            enodebs: enodebs.snapshot(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn map_keys_override_embedded_ids() {
        let json = serde_json::json!({
            "gateways": {
                "gw1": { "id": "stale", "name": "Edge" }
            },
            "enodebs": {
                "enb1": { "serial": "other", "name": "Roof" }
            }
        });
        let inventory: Inventory = serde_json::from_value(json).unwrap();
        let (gateways, enodebs) = inventory.into_stores();

        assert_eq!(gateways.get("gw1").unwrap().id, "gw1");
        assert_eq!(enodebs.snapshot()["enb1"].serial, "enb1");
    }

    #[test]
    fn partial_records_deserialize() {
        let json = serde_json::json!({ "gateways": { "gw1": {} } });
        let inventory: Inventory = serde_json::from_value(json).unwrap();
        let record = &inventory.gateways["gw1"];

        assert!(record.status.is_none());
        assert_eq!(record.tier, "default");
        assert!(record.cellular.epc.ip_block.is_none());

        let (gateways, _) = inventory.into_stores();
        assert_eq!(gateways.get("gw1").unwrap().id, "gw1");
    }
}

// ── Display projection ──
//
// Pure projection of a gateway record (plus the radio-unit inventory)
// into generic rows for the four configuration panels. Missing nested
// fields degrade to placeholders; nothing here can fail.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::editor::Section;
use crate::error::CoreError;
use crate::model::{DynamicService, GatewayRecord, RadioUnitInfo};
use crate::store::{EnodebStore, GatewayStore};

/// Placeholder for unset optional values.
pub const PLACEHOLDER: &str = "-";

/// Shown when the gateway has never reported a version.
pub const MISSING_VERSION: &str = "null";

// ── Row model ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NestedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataCell {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested: Option<NestedTable>,
}

impl DataCell {
    fn new(category: &str, value: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            value: value.into(),
            nested: None,
        }
    }

    fn with_nested(mut self, nested: NestedTable) -> Self {
        self.nested = Some(nested);
        self
    }
}

/// One visual row; some rows hold two cells side by side.
pub type DataRow = Vec<DataCell>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Panel {
    pub section: Section,
    pub title: String,
    pub rows: Vec<DataRow>,
}

impl Panel {
    /// First cell with the given category, searching every row.
    pub fn cell(&self, category: &str) -> Option<&DataCell> {
        self.rows
            .iter()
            .flatten()
            .find(|cell| cell.category.as_deref() == Some(category))
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

fn or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_owned(),
        _ => PLACEHOLDER.to_owned(),
    }
}

fn enabled_label(enabled: bool) -> &'static str {
    if enabled { "Enabled" } else { "Disabled" }
}

// ── Panels ──────────────────────────────────────────────────────────

pub fn identity_panel(gw: &GatewayRecord) -> Panel {
    Panel {
        section: Section::Identity,
        title: "Gateway".into(),
        rows: vec![
            vec![DataCell::new("Name", gw.name.clone())],
            vec![DataCell::new("Gateway ID", gw.id.clone())],
            vec![DataCell::new("Hardware UUID", gw.device.hardware_id.clone())],
            vec![DataCell::new(
                "Version",
                gw.version().unwrap_or(MISSING_VERSION),
            )],
            vec![DataCell::new("Description", gw.description.clone())],
        ],
    }
}

pub fn epc_panel(gw: &GatewayRecord) -> Panel {
    let epc = &gw.cellular.epc;
    let allocation = if epc.nat_enabled { "NAT" } else { "Custom" };
    let ip_block = NestedTable {
        columns: vec!["IP Block".into()],
        rows: vec![vec![or_placeholder(epc.ip_block.as_deref())]],
    };

    Panel {
        section: Section::Epc,
        title: "EPC".into(),
        rows: vec![
            vec![DataCell::new("IP Allocation", allocation).with_nested(ip_block)],
            vec![DataCell::new(
                "Primary DNS",
                or_placeholder(epc.dns_primary.as_deref()),
            )],
            vec![DataCell::new(
                "Secondary DNS",
                or_placeholder(epc.dns_secondary.as_deref()),
            )],
        ],
    }
}

pub fn aggregation_panel(gw: &GatewayRecord) -> Panel {
    let magmad = &gw.magmad;
    Panel {
        section: Section::Aggregation,
        title: "Aggregations".into(),
        rows: vec![vec![
            DataCell::new(
                "Log Aggregation",
                enabled_label(magmad.has_service(DynamicService::TdAgentBit)),
            ),
            DataCell::new(
                "Event Aggregation",
                enabled_label(magmad.has_service(DynamicService::Eventd)),
            ),
        ]],
    }
}

/// RAN panel. Serials the inventory does not know are left out of the
/// nested table but still counted.
pub fn ran_panel(gw: &GatewayRecord, enodebs: &BTreeMap<String, RadioUnitInfo>) -> Panel {
    let ran = &gw.cellular.ran;
    let serials = &gw.connected_enodeb_serials;

    let joined: Vec<Vec<String>> = serials
        .iter()
        .filter_map(|serial| enodebs.get(serial))
        .map(|unit| vec![unit.name.clone(), unit.serial.clone()])
        .collect();
    if joined.len() < serials.len() {
        debug!(
            gateway = %gw.id,
            missing = serials.len() - joined.len(),
            "connected serials absent from enodeb inventory"
        );
    }

    Panel {
        section: Section::Ran,
        title: "Ran".into(),
        rows: vec![
            vec![
                DataCell::new(
                    "PCI",
                    ran.pci.map_or_else(|| PLACEHOLDER.to_owned(), |p| p.to_string()),
                ),
                DataCell::new("eNodeB Transmit", enabled_label(ran.transmit_enabled)),
            ],
            vec![
                DataCell::new("Registered eNodeBs", serials.len().to_string()).with_nested(
                    NestedTable {
                        columns: vec!["Name".into(), "Serial Number".into()],
                        rows: joined,
                    },
                ),
            ],
        ],
    }
}

// ── Aggregate view ──────────────────────────────────────────────────

/// All four panels for one gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayView {
    pub gateway_id: String,
    pub identity: Panel,
    pub aggregation: Panel,
    pub epc: Panel,
    pub ran: Panel,
}

impl GatewayView {
    pub fn build(gw: &GatewayRecord, enodebs: &BTreeMap<String, RadioUnitInfo>) -> Self {
        Self {
            gateway_id: gw.id.clone(),
            identity: identity_panel(gw),
            aggregation: aggregation_panel(gw),
            epc: epc_panel(gw),
            ran: ran_panel(gw, enodebs),
        }
    }

    /// Read both stores and project the gateway stored under `id`.
    pub async fn load<G, E>(gateways: &G, enodebs: &E, id: &str) -> Result<Self, CoreError>
    where
        G: GatewayStore,
        E: EnodebStore,
    {
        let gw = gateways
            .read(id)
            .await?
            .ok_or_else(|| CoreError::GatewayNotFound { id: id.to_owned() })?;
        let units = enodebs.read().await?;
        Ok(Self::build(&gw, &units))
    }

    /// Panels in display order.
    pub fn panels(&self) -> [&Panel; 4] {
        [&self.identity, &self.aggregation, &self.epc, &self.ran]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{EpcConfig, GatewayStatus, PlatformInfo};

    fn gateway() -> GatewayRecord {
        GatewayRecord {
            id: "gw1".into(),
            name: "Edge".into(),
            description: "rooftop".into(),
            ..GatewayRecord::template()
        }
    }

    fn value<'a>(panel: &'a Panel, category: &str) -> &'a str {
        &panel.cell(category).unwrap().value
    }

    #[test]
    fn version_placeholder_for_every_missing_level() {
        let mut gw = gateway();
        for status in [
            None,
            Some(GatewayStatus::default()),
            Some(GatewayStatus {
                platform_info: Some(PlatformInfo { packages: None }),
            }),
            Some(GatewayStatus {
                platform_info: Some(PlatformInfo {
                    packages: Some(Vec::new()),
                }),
            }),
        ] {
            gw.status = status;
            assert_eq!(value(&identity_panel(&gw), "Version"), "null");
        }

        gw.status = Some(GatewayStatus::with_version("1.8.0"));
        assert_eq!(value(&identity_panel(&gw), "Version"), "1.8.0");
    }

    #[test]
    fn identity_rows_in_order() {
        let panel = identity_panel(&gateway());
        let categories: Vec<_> = panel
            .rows
            .iter()
            .flatten()
            .filter_map(|c| c.category.as_deref())
            .collect();
        assert_eq!(
            categories,
            vec!["Name", "Gateway ID", "Hardware UUID", "Version", "Description"]
        );
    }

    #[test]
    fn empty_epc_values_render_placeholders() {
        let mut gw = gateway();
        gw.cellular.epc = EpcConfig {
            nat_enabled: false,
            ip_block: Some(String::new()),
            dns_primary: None,
            dns_secondary: Some(String::new()),
        };
        let panel = epc_panel(&gw);

        let allocation = panel.cell("IP Allocation").unwrap();
        assert_eq!(allocation.value, "Custom");
        assert_eq!(allocation.nested.as_ref().unwrap().rows, vec![vec!["-".to_string()]]);
        assert_eq!(value(&panel, "Primary DNS"), "-");
        assert_eq!(value(&panel, "Secondary DNS"), "-");
    }

    #[test]
    fn nat_label_and_ip_block() {
        let panel = epc_panel(&gateway());
        let allocation = panel.cell("IP Allocation").unwrap();
        assert_eq!(allocation.value, "NAT");
        assert_eq!(
            allocation.nested.as_ref().unwrap().rows,
            vec![vec!["192.168.128.0/24".to_string()]]
        );
    }

    #[test]
    fn aggregation_labels_follow_service_membership() {
        let mut gw = gateway();
        gw.magmad.dynamic_services = vec![DynamicService::Eventd];
        let panel = aggregation_panel(&gw);
        assert_eq!(value(&panel, "Log Aggregation"), "Disabled");
        assert_eq!(value(&panel, "Event Aggregation"), "Enabled");
        assert_eq!(panel.rows.len(), 1);
    }

    #[test]
    fn ran_join_skips_unknown_serials() {
        let mut gw = gateway();
        gw.connected_enodeb_serials = vec!["enb1".into(), "ghost".into(), "enb2".into()];
        gw.cellular.ran.transmit_enabled = false;
        let enodebs: BTreeMap<_, _> = [
            RadioUnitInfo::new("enb1", "Lobby"),
            RadioUnitInfo::new("enb2", "Roof"),
            RadioUnitInfo::new("enb3", "Unrelated"),
        ]
        .into_iter()
        .map(|u| (u.serial.clone(), u))
        .collect();

        let panel = ran_panel(&gw, &enodebs);
        assert_eq!(value(&panel, "PCI"), "260");
        assert_eq!(value(&panel, "eNodeB Transmit"), "Disabled");

        let registered = panel.cell("Registered eNodeBs").unwrap();
        assert_eq!(registered.value, "3");
        assert_eq!(
            registered.nested.as_ref().unwrap().rows,
            vec![
                vec!["Lobby".to_string(), "enb1".to_string()],
                vec!["Roof".to_string(), "enb2".to_string()],
            ]
        );
    }

    #[test]
    fn partially_populated_record_still_projects() {
        let gw: GatewayRecord = serde_json::from_value(serde_json::json!({ "id": "bare" })).unwrap();
        let view = GatewayView::build(&gw, &BTreeMap::new());

        assert_eq!(value(&view.identity, "Version"), "null");
        assert_eq!(value(&view.epc, "IP Allocation"), "Custom");
        assert_eq!(value(&view.ran, "PCI"), "-");
        assert_eq!(value(&view.ran, "Registered eNodeBs"), "0");
    }
}

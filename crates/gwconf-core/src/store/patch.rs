// ── Slice-scoped gateway updates ──
//
// A patch names only the slices it replaces. Absent slices are left
// untouched by the store.

use serde::{Deserialize, Serialize};

use crate::model::{EpcConfig, GatewayRecord, MagmadConfig, RanConfig};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magmad: Option<MagmadConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epc: Option<EpcConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ran: Option<RanConfig>,
    /// Full replacement list, never a diff.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enodeb_serials: Option<Vec<String>>,
}

impl GatewayPatch {
    pub fn magmad(config: MagmadConfig) -> Self {
        Self {
            magmad: Some(config),
            ..Self::default()
        }
    }

    pub fn epc(config: EpcConfig) -> Self {
        Self {
            epc: Some(config),
            ..Self::default()
        }
    }

    pub fn ran(config: RanConfig, enodeb_serials: Vec<String>) -> Self {
        Self {
            ran: Some(config),
            enodeb_serials: Some(enodeb_serials),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.magmad.is_none()
            && self.epc.is_none()
            && self.ran.is_none()
            && self.enodeb_serials.is_none()
    }

    /// Names of the slices this patch replaces, for logging.
    pub fn slices(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.magmad.is_some() {
            names.push("magmad");
        }
        if self.epc.is_some() {
            names.push("epc");
        }
        if self.ran.is_some() {
            names.push("ran");
        }
        if self.enodeb_serials.is_some() {
            names.push("enodeb_serials");
        }
        names
    }

    /// Replace the named slices of `record` in place.
    pub fn apply_to(&self, record: &mut GatewayRecord) {
        if let Some(ref magmad) = self.magmad {
            record.magmad = magmad.clone();
        }
        if let Some(ref epc) = self.epc {
            record.cellular.epc = epc.clone();
        }
        if let Some(ref ran) = self.ran {
            record.cellular.ran = ran.clone();
        }
        if let Some(ref serials) = self.enodeb_serials {
            record.connected_enodeb_serials = serials.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_replaces_only_named_slices() {
        let mut record = GatewayRecord::template();
        record.id = "gw1".into();
        record.connected_enodeb_serials = vec!["old".into()];
        let ran_before = record.cellular.ran.clone();

        let epc = EpcConfig {
            nat_enabled: false,
            ip_block: Some("10.0.0.0/16".into()),
            dns_primary: Some("8.8.8.8".into()),
            dns_secondary: None,
        };
        GatewayPatch::epc(epc.clone()).apply_to(&mut record);

        assert_eq!(record.cellular.epc, epc);
        assert_eq!(record.cellular.ran, ran_before);
        assert_eq!(record.connected_enodeb_serials, vec!["old".to_string()]);
    }

    #[test]
    fn serial_list_is_replaced_wholesale() {
        let mut record = GatewayRecord::template();
        record.connected_enodeb_serials = vec!["enb0".into(), "enb1".into()];

        GatewayPatch::ran(RanConfig::template(), vec!["enb1".into(), "enb2".into()])
            .apply_to(&mut record);

        assert_eq!(record.connected_enodeb_serials, vec!["enb1", "enb2"]);
    }

    #[test]
    fn slices_lists_present_fields() {
        assert!(GatewayPatch::default().is_empty());
        assert_eq!(
            GatewayPatch::ran(RanConfig::default(), Vec::new()).slices(),
            vec!["ran", "enodeb_serials"]
        );
        assert_eq!(GatewayPatch::magmad(MagmadConfig::default()).slices(), vec!["magmad"]);
    }
}

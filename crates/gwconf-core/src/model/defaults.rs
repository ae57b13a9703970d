// ── Template values for records that do not exist yet ──
//
// Editors opened without a base record start from these values, so the
// same editors serve both the add and the edit flow.

use std::collections::BTreeMap;

use super::gateway::{
    CellularConfig, EpcConfig, GatewayDevice, GatewayRecord, GatewayStatus, LogAggregation,
    LogLevel, LoggingConfig, MagmadConfig, RanConfig, default_tier,
};

pub const DEFAULT_IP_BLOCK: &str = "192.168.128.0/24";
pub const DEFAULT_PCI: u16 = 260;
pub const DEFAULT_POLL_INTERVAL_SECS: u32 = 60;
pub const DEFAULT_CHECKIN_INTERVAL_SECS: u32 = 60;
pub const DEFAULT_CHECKIN_TIMEOUT_SECS: u32 = 30;

/// Tag and file shipped by the log aggregator when it is enabled.
pub const AGGREGATED_LOG_TAG: &str = "mme";
pub const AGGREGATED_LOG_FILE: &str = "var/log/mme.log";

impl EpcConfig {
    pub fn template() -> Self {
        Self {
            nat_enabled: true,
            ip_block: Some(DEFAULT_IP_BLOCK.into()),
            dns_primary: Some(String::new()),
            dns_secondary: Some(String::new()),
        }
    }
}

impl RanConfig {
    pub fn template() -> Self {
        Self {
            pci: Some(DEFAULT_PCI),
            transmit_enabled: true,
        }
    }
}

impl CellularConfig {
    pub fn template() -> Self {
        Self {
            epc: EpcConfig::template(),
            ran: RanConfig::template(),
        }
    }
}

impl MagmadConfig {
    pub fn template() -> Self {
        Self {
            autoupgrade_enabled: true,
            autoupgrade_poll_interval: DEFAULT_POLL_INTERVAL_SECS,
            checkin_interval: DEFAULT_CHECKIN_INTERVAL_SECS,
            checkin_timeout: DEFAULT_CHECKIN_TIMEOUT_SECS,
            dynamic_services: Vec::new(),
            logging: None,
        }
    }
}

impl LoggingConfig {
    /// The fixed logging block attached while log aggregation is enabled.
    pub fn aggregated() -> Self {
        let mut target_files_by_tag = BTreeMap::new();
        target_files_by_tag.insert(AGGREGATED_LOG_TAG.into(), AGGREGATED_LOG_FILE.into());
        Self {
            aggregation: Some(LogAggregation {
                target_files_by_tag,
            }),
            log_level: LogLevel::Debug,
        }
    }
}

impl GatewayRecord {
    /// A blank record with every slice set to its template value.
    pub fn template() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            device: GatewayDevice::default(),
            status: Some(GatewayStatus::with_version("")),
            cellular: CellularConfig::template(),
            magmad: MagmadConfig::template(),
            connected_enodeb_serials: Vec::new(),
            tier: default_tier(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::KeyType;

    #[test]
    fn template_matches_documented_defaults() {
        let gw = GatewayRecord::template();
        assert_eq!(gw.cellular.epc.ip_block.as_deref(), Some("192.168.128.0/24"));
        assert!(gw.cellular.epc.nat_enabled);
        assert_eq!(gw.cellular.ran.pci, Some(260));
        assert!(gw.cellular.ran.transmit_enabled);
        assert_eq!(gw.device.key.key_type, KeyType::SoftwareEcdsaSha256);
        assert_eq!(gw.tier, "default");
        assert_eq!(gw.version(), Some(""));
        assert!(gw.magmad.dynamic_services.is_empty());
        assert!(gw.connected_enodeb_serials.is_empty());
    }

    #[test]
    fn aggregated_logging_ships_mme_log_at_debug() {
        let logging = LoggingConfig::aggregated();
        assert_eq!(logging.log_level, LogLevel::Debug);
        let files = &logging.aggregation.unwrap().target_files_by_tag;
        assert_eq!(files.get("mme").map(String::as_str), Some("var/log/mme.log"));
    }
}

// ── Gateway domain types ──
//
// Wire-compatible with the gateway records served by the management
// API. Every nested block carries serde defaults so partially-populated
// records deserialize instead of failing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

// ── Device identity ─────────────────────────────────────────────────

/// Challenge key algorithm.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum KeyType {
    Echo,
    #[default]
    #[serde(rename = "SOFTWARE_ECDSA_SHA256")]
    #[strum(serialize = "SOFTWARE_ECDSA_SHA256")]
    SoftwareEcdsaSha256,
}

/// Challenge key used by the gateway to authenticate its check-ins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeKey {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub key_type: KeyType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayDevice {
    #[serde(default)]
    pub hardware_id: String,
    #[serde(default)]
    pub key: ChallengeKey,
}

// ── Reported status ─────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packages: Option<Vec<Package>>,
}

/// Status as reported by the gateway. Any level may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_info: Option<PlatformInfo>,
}

impl GatewayStatus {
    /// Status block carrying a single package with the given version.
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            platform_info: Some(PlatformInfo {
                packages: Some(vec![Package {
                    name: None,
                    version: Some(version.into()),
                }]),
            }),
        }
    }

    /// Version of the first reported package.
    pub fn version(&self) -> Option<&str> {
        self.platform_info
            .as_ref()?
            .packages
            .as_ref()?
            .first()?
            .version
            .as_deref()
    }
}

// ── Cellular ────────────────────────────────────────────────────────

/// Core-network (EPC) slice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpcConfig {
    #[serde(default)]
    pub nat_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_block: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_secondary: Option<String>,
}

/// Radio (RAN) slice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RanConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pci: Option<u16>,
    #[serde(default)]
    pub transmit_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellularConfig {
    #[serde(default)]
    pub epc: EpcConfig,
    #[serde(default)]
    pub ran: RanConfig,
}

// ── Magmad (aggregation) ────────────────────────────────────────────

/// Optional services a gateway can run on demand.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DynamicService {
    /// Event aggregation daemon.
    Eventd,
    /// Log shipper.
    TdAgentBit,
    Monitord,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Fatal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogAggregation {
    #[serde(default)]
    pub target_files_by_tag: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<LogAggregation>,
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Management daemon settings. Holds the aggregation toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagmadConfig {
    #[serde(default)]
    pub autoupgrade_enabled: bool,
    #[serde(default)]
    pub autoupgrade_poll_interval: u32,
    #[serde(default)]
    pub checkin_interval: u32,
    #[serde(default)]
    pub checkin_timeout: u32,
    #[serde(default)]
    pub dynamic_services: Vec<DynamicService>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

impl MagmadConfig {
    pub fn has_service(&self, service: DynamicService) -> bool {
        self.dynamic_services.contains(&service)
    }
}

// ── Gateway record ──────────────────────────────────────────────────

/// The canonical gateway record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayRecord {
    /// Filled in from the inventory key or the caller when absent.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub device: GatewayDevice,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<GatewayStatus>,
    #[serde(default)]
    pub cellular: CellularConfig,
    #[serde(default)]
    pub magmad: MagmadConfig,
    #[serde(default)]
    pub connected_enodeb_serials: Vec<String>,
    #[serde(default = "default_tier")]
    pub tier: String,
}

pub(crate) fn default_tier() -> String {
    "default".into()
}

impl GatewayRecord {
    /// Reported software version, if any level of the status chain is present.
    pub fn version(&self) -> Option<&str> {
        self.status.as_ref()?.version()
    }
}

// ── Radio unit (eNodeB) types ──

use serde::{Deserialize, Serialize};

/// A radio unit known to the network. Read-only from this crate's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioUnitInfo {
    pub serial: String,
    #[serde(default)]
    pub name: String,
    /// Gateway the unit is currently attached to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_id: Option<String>,
}

impl RadioUnitInfo {
    pub fn new(serial: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            serial: serial.into(),
            name: name.into(),
            gateway_id: None,
        }
    }
}

use std::collections::BTreeMap;

use super::{Section, settle};
use crate::error::CoreError;
use crate::model::{GatewayRecord, RadioUnitInfo, RanConfig};
use crate::store::{GatewayPatch, GatewayStore};

/// Highest valid LTE physical cell identity.
pub const PCI_MAX: u16 = 503;

/// Radio settings and the set of associated radio units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RanEditor {
    base: GatewayRecord,
    pci: String,
    transmit_enabled: bool,
    serials: Vec<String>,
    available: Vec<String>,
    error: Option<String>,
}

impl RanEditor {
    /// `enodebs` is the full radio-unit inventory offered for selection.
    pub fn new(base: Option<&GatewayRecord>, enodebs: &BTreeMap<String, RadioUnitInfo>) -> Self {
        let base = base.cloned().unwrap_or_else(GatewayRecord::template);
        let ran = &base.cellular.ran;
        Self {
            pci: ran.pci.map(|p| p.to_string()).unwrap_or_default(),
            transmit_enabled: ran.transmit_enabled,
            serials: base.connected_enodeb_serials.clone(),
            available: enodebs.keys().cloned().collect(),
            base,
            error: None,
        }
    }

    /// PCI exactly as typed.
    pub fn pci_text(&self) -> &str {
        &self.pci
    }

    pub fn transmit_enabled(&self) -> bool {
        self.transmit_enabled
    }

    /// Selected serials, in selection order.
    pub fn serials(&self) -> &[String] {
        &self.serials
    }

    /// Every serial in the inventory, sorted.
    pub fn available(&self) -> &[String] {
        &self.available
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_pci(&mut self, pci: impl Into<String>) {
        self.pci = pci.into();
    }

    pub fn set_transmit_enabled(&mut self, enabled: bool) {
        self.transmit_enabled = enabled;
    }

    /// Replace the selection, dropping repeats and keeping first-seen order.
    pub fn set_serials<I, T>(&mut self, serials: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.serials.clear();
        for serial in serials {
            let serial = serial.into();
            if !self.serials.contains(&serial) {
                self.serials.push(serial);
            }
        }
    }

    pub fn toggle_serial(&mut self, serial: &str, selected: bool) {
        let present = self.serials.iter().position(|s| s == serial);
        match (selected, present) {
            (true, None) => self.serials.push(serial.to_owned()),
            (false, Some(pos)) => {
                self.serials.remove(pos);
            }
            _ => {}
        }
    }

    /// Parse the PCI text into a slice, rejecting anything outside 0..=503.
    pub fn to_config(&self) -> Result<RanConfig, CoreError> {
        let pci = self
            .pci
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|p| *p <= PCI_MAX)
            .ok_or_else(|| {
                CoreError::validation("pci", format!("expected a number from 0 to {PCI_MAX}"))
            })?;
        Ok(RanConfig {
            pci: Some(pci),
            transmit_enabled: self.transmit_enabled,
        })
    }

    pub async fn save<S: GatewayStore>(&mut self, store: &S) -> Result<GatewayRecord, CoreError> {
        let result = self.submit(store).await;
        settle(Section::Ran, &mut self.error, result)
    }

    async fn submit<S: GatewayStore>(&self, store: &S) -> Result<GatewayRecord, CoreError> {
        let config = self.to_config()?;
        store
            .patch(
                &self.base.id,
                GatewayPatch::ran(config.clone(), self.serials.clone()),
            )
            .await?;

        let mut merged = self.base.clone();
        merged.cellular.ran = config;
        merged.connected_enodeb_serials.clone_from(&self.serials);
        Ok(merged)
    }
}

use super::{Section, settle};
use crate::error::CoreError;
use crate::model::{EpcConfig, GatewayRecord};
use crate::store::{GatewayPatch, GatewayStore};

/// Core-network settings. Values are free text and sent as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpcEditor {
    base: GatewayRecord,
    epc: EpcConfig,
    error: Option<String>,
}

impl EpcEditor {
    pub fn new(base: Option<&GatewayRecord>) -> Self {
        let base = base.cloned().unwrap_or_else(GatewayRecord::template);
        Self {
            epc: base.cellular.epc.clone(),
            base,
            error: None,
        }
    }

    pub fn config(&self) -> &EpcConfig {
        &self.epc
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_nat_enabled(&mut self, enabled: bool) {
        self.epc.nat_enabled = enabled;
    }

    pub fn set_ip_block(&mut self, ip_block: impl Into<String>) {
        self.epc.ip_block = Some(ip_block.into());
    }

    pub fn set_dns_primary(&mut self, dns: impl Into<String>) {
        self.epc.dns_primary = Some(dns.into());
    }

    pub fn set_dns_secondary(&mut self, dns: impl Into<String>) {
        self.epc.dns_secondary = Some(dns.into());
    }

    pub async fn save<S: GatewayStore>(&mut self, store: &S) -> Result<GatewayRecord, CoreError> {
        let result = self.submit(store).await;
        settle(Section::Epc, &mut self.error, result)
    }

    async fn submit<S: GatewayStore>(&self, store: &S) -> Result<GatewayRecord, CoreError> {
        store
            .patch(&self.base.id, GatewayPatch::epc(self.epc.clone()))
            .await?;

        let mut merged = self.base.clone();
        merged.cellular.epc = self.epc.clone();
        Ok(merged)
    }
}

use super::{Section, settle};
use crate::error::CoreError;
use crate::model::{DynamicService, GatewayRecord, LoggingConfig, MagmadConfig};
use crate::store::{GatewayPatch, GatewayStore};

/// Log and event aggregation toggles.
///
/// Toggle state is read straight from `dynamic_services`; there is no
/// separate flag to drift out of sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationEditor {
    base: GatewayRecord,
    magmad: MagmadConfig,
    error: Option<String>,
}

impl AggregationEditor {
    pub fn new(base: Option<&GatewayRecord>) -> Self {
        let base = base.cloned().unwrap_or_else(GatewayRecord::template);
        Self {
            magmad: base.magmad.clone(),
            base,
            error: None,
        }
    }

    pub fn magmad(&self) -> &MagmadConfig {
        &self.magmad
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn log_aggregation(&self) -> bool {
        self.magmad.has_service(DynamicService::TdAgentBit)
    }

    pub fn event_aggregation(&self) -> bool {
        self.magmad.has_service(DynamicService::Eventd)
    }

    pub fn set_log_aggregation(&mut self, enabled: bool) {
        self.toggle(DynamicService::TdAgentBit, enabled);
    }

    pub fn set_event_aggregation(&mut self, enabled: bool) {
        self.toggle(DynamicService::Eventd, enabled);
    }

    /// Add `service` when enabling, drop its first occurrence when disabling.
    fn toggle(&mut self, service: DynamicService, enabled: bool) {
        let services = &mut self.magmad.dynamic_services;
        if enabled {
            if !services.contains(&service) {
                services.push(service);
            }
        } else if let Some(pos) = services.iter().position(|s| *s == service) {
            services.remove(pos);
        }
    }

    /// Magmad slice as it will be sent: logging attached iff the log
    /// shipper is enabled.
    pub fn to_config(&self) -> MagmadConfig {
        let mut config = self.magmad.clone();
        config.logging = self.log_aggregation().then(LoggingConfig::aggregated);
        config
    }

    pub async fn save<S: GatewayStore>(&mut self, store: &S) -> Result<GatewayRecord, CoreError> {
        let result = self.submit(store).await;
        settle(Section::Aggregation, &mut self.error, result)
    }

    async fn submit<S: GatewayStore>(&self, store: &S) -> Result<GatewayRecord, CoreError> {
        let config = self.to_config();
        store
            .patch(&self.base.id, GatewayPatch::magmad(config.clone()))
            .await?;

        let mut merged = self.base.clone();
        merged.magmad = config;
        Ok(merged)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::LogLevel;
    use crate::store::{MemoryGatewayStore, StoreOp};

    fn gateway() -> GatewayRecord {
        let mut gw = GatewayRecord::template();
        gw.id = "gw1".into();
        gw.magmad.dynamic_services = vec![DynamicService::Monitord];
        gw
    }

    #[test]
    fn toggles_derive_from_service_list() {
        let mut editor = AggregationEditor::new(Some(&gateway()));
        assert!(!editor.log_aggregation());

        editor.set_log_aggregation(true);
        editor.set_log_aggregation(true);
        editor.set_event_aggregation(true);
        assert_eq!(
            editor.magmad().dynamic_services,
            vec![
                DynamicService::Monitord,
                DynamicService::TdAgentBit,
                DynamicService::Eventd
            ]
        );

        editor.set_log_aggregation(false);
        assert!(!editor.log_aggregation());
        assert!(editor.event_aggregation());
    }

    #[test]
    fn disabling_removes_only_first_occurrence() {
        let mut gw = gateway();
        gw.magmad.dynamic_services = vec![DynamicService::Eventd, DynamicService::Eventd];
        let mut editor = AggregationEditor::new(Some(&gw));

        editor.set_event_aggregation(false);
        assert_eq!(editor.magmad().dynamic_services, vec![DynamicService::Eventd]);
    }

    #[tokio::test]
    async fn enabling_log_aggregation_attaches_debug_logging() {
        let store = MemoryGatewayStore::with_records([gateway()]);
        let mut editor = AggregationEditor::new(Some(&gateway()));
        editor.set_log_aggregation(true);

        let saved = editor.save(&store).await.unwrap();
        let logging = saved.magmad.logging.unwrap();
        assert_eq!(logging.log_level, LogLevel::Debug);

        let journal = store.journal();
        assert_eq!(journal.len(), 1);
        let StoreOp::Patch { patch, .. } = &journal[0] else {
            panic!("expected a patch, got {journal:?}");
        };
        assert_eq!(patch.slices(), vec!["magmad"]);
    }

    #[tokio::test]
    async fn disabling_log_aggregation_strips_logging() {
        let mut gw = gateway();
        gw.magmad.dynamic_services.push(DynamicService::TdAgentBit);
        gw.magmad.logging = Some(LoggingConfig::aggregated());
        let store = MemoryGatewayStore::with_records([gw.clone()]);

        let mut editor = AggregationEditor::new(Some(&gw));
        editor.set_log_aggregation(false);
        let saved = editor.save(&store).await.unwrap();

        assert!(saved.magmad.logging.is_none());
        assert!(store.get("gw1").unwrap().magmad.logging.is_none());
    }
}

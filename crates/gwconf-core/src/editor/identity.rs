use tracing::debug;

use super::{EditorMode, Section, settle};
use crate::error::CoreError;
use crate::model::{ChallengeKey, GatewayDevice, GatewayRecord, GatewayStatus, KeyType};
use crate::store::GatewayStore;

/// Name, identifier, device and version of a gateway.
///
/// Saving performs a whole-record write: the identity fields are combined
/// with every other slice of the base record so the store receives a
/// complete record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityEditor {
    mode: EditorMode,
    base: GatewayRecord,
    id: String,
    name: String,
    description: String,
    hardware_id: String,
    version: String,
    challenge_key: String,
    key_type: KeyType,
    error: Option<String>,
}

impl IdentityEditor {
    /// Open over `base`, or over the template when no record exists yet.
    pub fn new(base: Option<&GatewayRecord>, mode: EditorMode) -> Self {
        let base = base.cloned().unwrap_or_else(GatewayRecord::template);
        Self {
            mode,
            id: base.id.clone(),
            name: base.name.clone(),
            description: base.description.clone(),
            hardware_id: base.device.hardware_id.clone(),
            version: base.version().unwrap_or_default().to_owned(),
            challenge_key: base.device.key.key.clone(),
            key_type: base.device.key.key_type,
            error: None,
            base,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn hardware_id(&self) -> &str {
        &self.hardware_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn challenge_key(&self) -> &str {
        &self.challenge_key
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the identifier may still be changed.
    pub fn id_editable(&self) -> bool {
        self.mode == EditorMode::Create
    }

    pub fn set_id(&mut self, id: impl Into<String>) -> Result<(), CoreError> {
        if !self.id_editable() {
            return Err(CoreError::validation(
                "id",
                "the identifier of an existing gateway cannot change",
            ));
        }
        self.id = id.into();
        Ok(())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_hardware_id(&mut self, hardware_id: impl Into<String>) {
        self.hardware_id = hardware_id.into();
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = version.into();
    }

    pub fn set_challenge_key(&mut self, key: impl Into<String>) {
        self.challenge_key = key.into();
    }

    pub fn set_key_type(&mut self, key_type: KeyType) {
        self.key_type = key_type;
    }

    /// The full record this editor would write.
    pub fn to_record(&self) -> GatewayRecord {
        GatewayRecord {
            id: self.id.trim().to_owned(),
            name: self.name.clone(),
            description: self.description.clone(),
            device: GatewayDevice {
                hardware_id: self.hardware_id.clone(),
                key: ChallengeKey {
                    key: self.challenge_key.clone(),
                    key_type: self.key_type,
                },
            },
            status: Some(GatewayStatus::with_version(self.version.clone())),
            cellular: self.base.cellular.clone(),
            magmad: self.base.magmad.clone(),
            connected_enodeb_serials: self.base.connected_enodeb_serials.clone(),
            tier: self.base.tier.clone(),
        }
    }

    pub async fn save<S: GatewayStore>(&mut self, store: &S) -> Result<GatewayRecord, CoreError> {
        let result = self.submit(store).await;
        settle(Section::Identity, &mut self.error, result)
    }

    async fn submit<S: GatewayStore>(&self, store: &S) -> Result<GatewayRecord, CoreError> {
        let record = self.to_record();
        if record.id.is_empty() {
            return Err(CoreError::validation("id", "must not be empty"));
        }

        if self.mode == EditorMode::Create && record.id != self.base.id {
            debug!(gateway = %record.id, "checking identifier uniqueness");
            if store.read(&record.id).await?.is_some() {
                return Err(CoreError::GatewayExists { id: record.id });
            }
        }

        store.write(&record.id, record.clone()).await?;
        Ok(record)
    }
}

// ── Section editors ──
//
// Each editor owns a local draft of one configuration slice, derived from
// a base record (or the template when no record exists yet). `save`
// validates, issues exactly one store call and returns the merged record
// for the orchestrator's draft. Failures are kept inline on the editor.

mod aggregation;
mod epc;
mod identity;
mod ran;

pub use aggregation::AggregationEditor;
pub use epc::EpcEditor;
pub use identity::IdentityEditor;
pub use ran::{PCI_MAX, RanEditor};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::{info, warn};

use crate::error::CoreError;
use crate::model::GatewayRecord;
use crate::store::GatewayStore;

/// The four configuration sections, in add-flow order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Section {
    Identity,
    Aggregation,
    Epc,
    Ran,
}

impl Section {
    pub const FIRST: Self = Self::Identity;

    /// Tab index (0..=3).
    pub fn index(self) -> usize {
        match self {
            Self::Identity => 0,
            Self::Aggregation => 1,
            Self::Epc => 2,
            Self::Ran => 3,
        }
    }

    /// Following section in the add flow, `None` after RAN.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Identity => Some(Self::Aggregation),
            Self::Aggregation => Some(Self::Epc),
            Self::Epc => Some(Self::Ran),
            Self::Ran => None,
        }
    }

    /// Human-facing tab label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Identity => "Gateway",
            Self::Aggregation => "Aggregations",
            Self::Epc => "EPC",
            Self::Ran => "Ran",
        }
    }
}

/// How an editor treats its base record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// The record does not exist yet; the identifier is editable.
    Create,
    /// The record exists; the identifier is fixed.
    Update,
}

/// Whichever editor is active in an orchestrator session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveEditor {
    Identity(IdentityEditor),
    Aggregation(AggregationEditor),
    Epc(EpcEditor),
    Ran(RanEditor),
}

impl ActiveEditor {
    pub fn section(&self) -> Section {
        match self {
            Self::Identity(_) => Section::Identity,
            Self::Aggregation(_) => Section::Aggregation,
            Self::Epc(_) => Section::Epc,
            Self::Ran(_) => Section::Ran,
        }
    }

    /// Inline error left by the last failed save.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Identity(e) => e.error(),
            Self::Aggregation(e) => e.error(),
            Self::Epc(e) => e.error(),
            Self::Ran(e) => e.error(),
        }
    }

    pub async fn save<S: GatewayStore>(&mut self, store: &S) -> Result<GatewayRecord, CoreError> {
        match self {
            Self::Identity(e) => e.save(store).await,
            Self::Aggregation(e) => e.save(store).await,
            Self::Epc(e) => e.save(store).await,
            Self::Ran(e) => e.save(store).await,
        }
    }
}

/// Record a save outcome on an editor's inline error slot.
pub(crate) fn settle(
    section: Section,
    slot: &mut Option<String>,
    result: Result<GatewayRecord, CoreError>,
) -> Result<GatewayRecord, CoreError> {
    match result {
        Ok(record) => {
            info!(%section, gateway = %record.id, "section saved");
            *slot = None;
            Ok(record)
        }
        Err(err) => {
            warn!(%section, error = %err, "section save failed");
            *slot = Some(err.inline_message());
            Err(err)
        }
    }
}

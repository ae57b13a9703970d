//! Gateway configuration core: domain model, store capabilities, section
//! editors and the edit orchestrator, consumed by the `gwconf` CLI.
//!
//! - **[`GatewayStore`] / [`EnodebStore`]**: injected async capabilities over
//!   the remote inventories. [`MemoryGatewayStore`] and [`MemoryEnodebStore`]
//!   are `DashMap`-backed implementations with a mutation journal.
//!
//! - **Section editors** ([`editor`]): Identity, Aggregation, EPC and RAN.
//!   Each owns a draft of one slice and issues exactly one store call per
//!   save (a whole-record write for Identity, slice patches otherwise).
//!
//! - **[`EditOrchestrator`]**: the tabbed session that sequences editors,
//!   carries the working draft and applies the [`Transition`] table.
//!
//! - **[`GatewayView`]**: pure projection of a record into display panels.
//!
//! - **[`document`]**: JSON export and whole-record apply.

pub mod document;
pub mod editor;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod store;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use editor::{
    ActiveEditor, AggregationEditor, EditorMode, EpcEditor, IdentityEditor, RanEditor, Section,
};
pub use error::{CoreError, StoreError};
pub use orchestrator::{EditMode, EditOrchestrator, Notice, Transition};
pub use store::{
    EnodebStore, GatewayPatch, GatewayStore, Inventory, MemoryEnodebStore, MemoryGatewayStore,
    StoreOp,
};
pub use view::{DataCell, GatewayView, NestedTable, Panel};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    CellularConfig, DynamicService, EpcConfig, GatewayRecord, GatewayStatus, KeyType,
    LoggingConfig, MagmadConfig, RadioUnitInfo, RanConfig,
};

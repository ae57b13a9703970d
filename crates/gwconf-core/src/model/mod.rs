// ── Domain model ──
//
// Canonical representation of gateway records and radio units. Consumers
// (editors, views, CLI) depend only on these types.

pub mod defaults;
pub mod enodeb;
pub mod gateway;

pub use enodeb::RadioUnitInfo;
pub use gateway::{
    CellularConfig, ChallengeKey, DynamicService, EpcConfig, GatewayDevice, GatewayRecord,
    GatewayStatus, KeyType, LogAggregation, LogLevel, LoggingConfig, MagmadConfig, Package,
    PlatformInfo, RanConfig,
};

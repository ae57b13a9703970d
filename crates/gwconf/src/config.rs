//! CLI configuration -- thin wrapper around `gwconf_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--profile, --inventory).

use std::path::PathBuf;

use tracing::debug;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use gwconf_config::{
    Config, Defaults, Profile, config_path, default_inventory_path, load_config,
    load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Inventory file to work against: flag, then profile, then the default
/// data path. A profile named explicitly with --profile must exist.
pub fn resolve_inventory_path(global: &GlobalOpts) -> Result<PathBuf, CliError> {
    if let Some(ref path) = global.inventory {
        return Ok(path.clone());
    }

    let cfg = load_config()?;
    let name = active_profile_name(global, &cfg);
    let path = match cfg.profile(&name) {
        Ok(profile) => profile.inventory.clone(),
        Err(err) if global.profile.is_some() => return Err(err.into()),
        Err(_) => default_inventory_path(),
    };
    debug!(profile = %name, path = %path.display(), "resolved inventory");
    Ok(path)
}

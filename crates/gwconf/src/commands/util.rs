//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use gwconf_core::{Inventory, MemoryEnodebStore, MemoryGatewayStore};

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;

// ── Inventory-backed stores ─────────────────────────────────────────

/// In-memory stores seeded from the inventory snapshot, plus the path
/// they are written back to.
pub struct Stores {
    pub path: PathBuf,
    pub gateways: Arc<MemoryGatewayStore>,
    pub enodebs: Arc<MemoryEnodebStore>,
}

impl Stores {
    pub fn open(global: &GlobalOpts) -> Result<Self, CliError> {
        let path = config::resolve_inventory_path(global)?;
        let (gateways, enodebs) = load_inventory(&path)?.into_stores();
        Ok(Self {
            path,
            gateways: Arc::new(gateways),
            enodebs: Arc::new(enodebs),
        })
    }

    /// Write the snapshot back if anything reached the gateway store.
    pub fn persist(&self) -> Result<bool, CliError> {
        let changes = self.gateways.journal().len();
        if changes == 0 {
            return Ok(false);
        }
        let inventory = Inventory::from_stores(&self.gateways, &self.enodebs);
        save_inventory(&self.path, &inventory)?;
        info!(path = %self.path.display(), changes, "inventory written");
        Ok(true)
    }
}

/// Read an inventory snapshot. A missing file is an empty inventory.
pub fn load_inventory(path: &Path) -> Result<Inventory, CliError> {
    if !path.exists() {
        debug!(path = %path.display(), "no inventory file, starting empty");
        return Ok(Inventory::default());
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Inventory {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

pub fn save_inventory(path: &Path, inventory: &Inventory) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(inventory).map_err(|e| CliError::Render(e.to_string()))?;
    std::fs::write(path, json)?;
    Ok(())
}

// ── Interaction ─────────────────────────────────────────────────────

/// Whether prompts can be shown.
pub fn interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}

/// Fail early when `action` would need prompts but there is no terminal.
pub fn require_terminal(action: &str) -> Result<(), CliError> {
    if interactive() {
        Ok(())
    } else {
        Err(CliError::NotInteractive {
            action: action.into(),
        })
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !interactive() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()?;
    Ok(confirmed)
}

/// Split repeated `KEY=VALUE` arguments.
pub fn parse_assignments(raw: &[String]) -> Result<Vec<(String, String)>, CliError> {
    raw.iter()
        .map(|item| {
            item.split_once('=')
                .map(|(k, v)| (k.trim().to_owned(), v.to_owned()))
                .filter(|(k, _)| !k.is_empty())
                .ok_or_else(|| CliError::Validation {
                    field: "set".into(),
                    reason: format!("expected KEY=VALUE, got '{item}'"),
                })
        })
        .collect()
}

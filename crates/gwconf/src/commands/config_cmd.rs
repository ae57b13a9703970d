//! Config subcommand handlers.

use std::fmt::Write as _;
use std::path::PathBuf;

use dialoguer::Input;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Helpers ─────────────────────────────────────────────────────────

fn describe(cfg: &Config) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "default_profile = {}",
        cfg.default_profile.as_deref().unwrap_or("(unset)")
    );
    let _ = writeln!(out, "output = {}", cfg.defaults.output);
    let _ = writeln!(out, "color = {}", cfg.defaults.color);
    for name in cfg.profile_names() {
        let Some(profile) = cfg.profiles.get(&name) else {
            continue;
        };
        let _ = writeln!(out, "\n[profiles.{name}]");
        let _ = writeln!(out, "inventory = {}", profile.inventory.display());
        if let Some(ref network) = profile.network {
            let _ = writeln!(out, "network = {network}");
        }
    }
    out.trim_end().to_owned()
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            util::require_terminal("config init")?;
            let path = config::config_path();
            eprintln!("gwconf configuration wizard");
            eprintln!("   Config path: {}\n", path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()?;

            let inventory: String = Input::new()
                .with_prompt("Inventory file")
                .default(config::default_inventory_path().display().to_string())
                .interact_text()?;

            let network: String = Input::new()
                .with_prompt("Network ID (optional)")
                .allow_empty(true)
                .interact_text()?;

            let mut cfg = config::load_config_or_default();
            cfg.profiles.insert(
                profile_name.clone(),
                Profile {
                    inventory: PathBuf::from(inventory),
                    network: Some(network).filter(|n| !n.is_empty()),
                },
            );
            cfg.default_profile = Some(profile_name.clone());

            let written = config::save_config(&cfg)?;
            eprintln!("\n✓ Configuration written to {}", written.display());
            eprintln!("  Active profile: {profile_name}");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out = output::render_single(global.output, &cfg, describe, |_| "config".into())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);

            let profile = cfg
                .profiles
                .entry(profile_name.clone())
                .or_insert_with(|| Profile {
                    inventory: config::default_inventory_path(),
                    network: None,
                });

            match key.as_str() {
                "inventory" => profile.inventory = PathBuf::from(value),
                "network" => profile.network = Some(value).filter(|v| !v.is_empty()),
                other => {
                    return Err(CliError::Validation {
                        field: other.into(),
                        reason: format!(
                            "unknown config key '{other}'. Valid keys: inventory, network"
                        ),
                    });
                }
            }

            config::save_config(&cfg)?;
            eprintln!("✓ Set {key} on profile '{profile_name}'");
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            let names = cfg.profile_names();
            if names.is_empty() {
                eprintln!("No profiles configured. Run: gwconf config init");
            } else {
                for name in names {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ──────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            cfg.profile(&name)?;
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }
    }
}

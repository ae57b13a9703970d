//! Field-level input for section editors: scripted `--set` assignments
//! and interactive dialoguer prompts.

use dialoguer::{Confirm, Input, MultiSelect};

use gwconf_core::editor::PCI_MAX;
use gwconf_core::{
    ActiveEditor, AggregationEditor, EpcEditor, IdentityEditor, KeyType, RanEditor, Section,
};

use crate::error::CliError;

/// Settable keys and the section each belongs to.
const FIELDS: &[(&str, Section)] = &[
    ("id", Section::Identity),
    ("name", Section::Identity),
    ("description", Section::Identity),
    ("hardware_id", Section::Identity),
    ("version", Section::Identity),
    ("challenge_key", Section::Identity),
    ("key_type", Section::Identity),
    ("log_aggregation", Section::Aggregation),
    ("event_aggregation", Section::Aggregation),
    ("nat", Section::Epc),
    ("ip_block", Section::Epc),
    ("dns_primary", Section::Epc),
    ("dns_secondary", Section::Epc),
    ("pci", Section::Ran),
    ("transmit", Section::Ran),
    ("enodebs", Section::Ran),
];

pub fn field_section(key: &str) -> Option<Section> {
    FIELDS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, section)| *section)
}

/// Reject unknown keys, and keys outside `allowed` sections.
pub fn check_fields(fields: &[(String, String)], allowed: &[Section]) -> Result<(), CliError> {
    for (key, _) in fields {
        let Some(section) = field_section(key) else {
            return Err(CliError::Validation {
                field: key.clone(),
                reason: "unknown field".into(),
            });
        };
        if !allowed.contains(&section) {
            return Err(CliError::Validation {
                field: key.clone(),
                reason: format!("belongs to the {section} section, which is not being edited"),
            });
        }
    }
    Ok(())
}

fn parse_bool(key: &str, value: &str) -> Result<bool, CliError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" | "enabled" => Ok(true),
        "false" | "no" | "off" | "0" | "disabled" => Ok(false),
        _ => Err(CliError::Validation {
            field: key.into(),
            reason: format!("expected true or false, got '{value}'"),
        }),
    }
}

// ── Scripted ────────────────────────────────────────────────────────

/// Apply every assignment that targets the editor's section.
pub fn apply_fields(editor: &mut ActiveEditor, fields: &[(String, String)]) -> Result<(), CliError> {
    let section = editor.section();
    let mine = fields
        .iter()
        .filter(|(key, _)| field_section(key) == Some(section));

    for (key, value) in mine {
        let key = key.to_ascii_lowercase();
        match editor {
            ActiveEditor::Identity(e) => apply_identity(e, &key, value)?,
            ActiveEditor::Aggregation(e) => apply_aggregation(e, &key, value)?,
            ActiveEditor::Epc(e) => apply_epc(e, &key, value)?,
            ActiveEditor::Ran(e) => apply_ran(e, &key, value)?,
        }
    }
    Ok(())
}

fn apply_identity(e: &mut IdentityEditor, key: &str, value: &str) -> Result<(), CliError> {
    match key {
        "id" => e.set_id(value)?,
        "name" => e.set_name(value),
        "description" => e.set_description(value),
        "hardware_id" => e.set_hardware_id(value),
        "version" => e.set_version(value),
        "challenge_key" => e.set_challenge_key(value),
        "key_type" => {
            let key_type: KeyType = value.parse().map_err(|_| CliError::Validation {
                field: "key_type".into(),
                reason: "expected ECHO or SOFTWARE_ECDSA_SHA256".into(),
            })?;
            e.set_key_type(key_type);
        }
        _ => {}
    }
    Ok(())
}

fn apply_aggregation(e: &mut AggregationEditor, key: &str, value: &str) -> Result<(), CliError> {
    match key {
        "log_aggregation" => e.set_log_aggregation(parse_bool(key, value)?),
        "event_aggregation" => e.set_event_aggregation(parse_bool(key, value)?),
        _ => {}
    }
    Ok(())
}

fn apply_epc(e: &mut EpcEditor, key: &str, value: &str) -> Result<(), CliError> {
    match key {
        "nat" => e.set_nat_enabled(parse_bool(key, value)?),
        "ip_block" => e.set_ip_block(value),
        "dns_primary" => e.set_dns_primary(value),
        "dns_secondary" => e.set_dns_secondary(value),
        _ => {}
    }
    Ok(())
}

fn apply_ran(e: &mut RanEditor, key: &str, value: &str) -> Result<(), CliError> {
    match key {
        "pci" => e.set_pci(value),
        "transmit" => e.set_transmit_enabled(parse_bool(key, value)?),
        "enodebs" => e.set_serials(
            value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty()),
        ),
        _ => {}
    }
    Ok(())
}

// ── Interactive ─────────────────────────────────────────────────────

fn text(prompt: &str, current: &str) -> Result<String, CliError> {
    Ok(Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?)
}

fn toggle(prompt: &str, current: bool) -> Result<bool, CliError> {
    Ok(Confirm::new().with_prompt(prompt).default(current).interact()?)
}

/// Walk the user through every field of the active editor.
pub fn prompt(editor: &mut ActiveEditor) -> Result<(), CliError> {
    match editor {
        ActiveEditor::Identity(e) => {
            if e.id_editable() {
                let id = text("Gateway ID", e.id())?;
                e.set_id(id)?;
            }
            let name = text("Name", e.name())?;
            e.set_name(name);
            let description = text("Description", e.description())?;
            e.set_description(description);
            let hardware_id = text("Hardware UUID", e.hardware_id())?;
            e.set_hardware_id(hardware_id);
            let version = text("Version", e.version())?;
            e.set_version(version);
            let key = text("Challenge key", e.challenge_key())?;
            e.set_challenge_key(key);
        }
        ActiveEditor::Aggregation(e) => {
            let log = toggle("Enable log aggregation?", e.log_aggregation())?;
            e.set_log_aggregation(log);
            let event = toggle("Enable event aggregation?", e.event_aggregation())?;
            e.set_event_aggregation(event);
        }
        ActiveEditor::Epc(e) => {
            let cfg = e.config().clone();
            e.set_nat_enabled(toggle("NAT enabled?", cfg.nat_enabled)?);
            e.set_ip_block(text("IP block", cfg.ip_block.as_deref().unwrap_or_default())?);
            e.set_dns_primary(text(
                "Primary DNS",
                cfg.dns_primary.as_deref().unwrap_or_default(),
            )?);
            e.set_dns_secondary(text(
                "Secondary DNS",
                cfg.dns_secondary.as_deref().unwrap_or_default(),
            )?);
        }
        ActiveEditor::Ran(e) => {
            let pci = text(&format!("PCI (0-{PCI_MAX})"), e.pci_text())?;
            e.set_pci(pci);
            let transmit = toggle("eNodeB transmit enabled?", e.transmit_enabled())?;
            e.set_transmit_enabled(transmit);

            if !e.available().is_empty() {
                let checked: Vec<bool> = e
                    .available()
                    .iter()
                    .map(|s| e.serials().contains(s))
                    .collect();
                let picked = MultiSelect::new()
                    .with_prompt("Registered eNodeBs")
                    .items(e.available())
                    .defaults(&checked)
                    .interact()?;
                let serials: Vec<String> = picked
                    .into_iter()
                    .filter_map(|i| e.available().get(i).cloned())
                    .collect();
                e.set_serials(serials);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gwconf_core::{EditorMode, GatewayRecord};

    use super::*;

    fn assignments(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn keys_map_to_sections() {
        assert_eq!(field_section("PCI"), Some(Section::Ran));
        assert_eq!(field_section("dns_primary"), Some(Section::Epc));
        assert_eq!(field_section("bogus"), None);
    }

    #[test]
    fn out_of_section_keys_are_rejected() {
        let fields = assignments(&[("pci", "7")]);
        assert!(check_fields(&fields, &[Section::Epc]).is_err());
        assert!(check_fields(&fields, &[Section::Ran]).is_ok());
        assert!(check_fields(&assignments(&[("colour", "red")]), &[Section::Ran]).is_err());
    }

    #[test]
    fn only_matching_section_is_touched() {
        let mut editor = ActiveEditor::Identity(IdentityEditor::new(None, EditorMode::Create));
        apply_fields(
            &mut editor,
            &assignments(&[("id", "gwnew"), ("name", "New"), ("pci", "9")]),
        )
        .unwrap();
        let ActiveEditor::Identity(e) = editor else {
            unreachable!()
        };
        assert_eq!(e.id(), "gwnew");
        assert_eq!(e.name(), "New");
    }

    #[test]
    fn ran_serials_split_on_commas() {
        let gw = GatewayRecord::template();
        let mut editor = ActiveEditor::Ran(RanEditor::new(Some(&gw), &Default::default()));
        apply_fields(&mut editor, &assignments(&[("enodebs", "enb1, enb2,,")])).unwrap();
        let ActiveEditor::Ran(e) = editor else {
            unreachable!()
        };
        assert_eq!(e.serials(), ["enb1", "enb2"]);
    }

    #[test]
    fn booleans_accept_common_spellings() {
        assert!(parse_bool("nat", "Enabled").unwrap());
        assert!(!parse_bool("nat", "off").unwrap());
        assert!(parse_bool("nat", "maybe").is_err());
    }
}

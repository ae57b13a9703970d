//! Gateway command handlers.

use std::sync::Arc;

use tabled::Tabled;
use tracing::debug;

use gwconf_core::{
    EditMode, EditOrchestrator, GatewayRecord, GatewayStore, GatewayView, Section, document,
};

use crate::cli::{EditFields, GatewaysArgs, GatewaysCommand, GlobalOpts, SectionArg};
use crate::error::CliError;
use crate::output;

use super::form;
use super::session::{self, Fill, Outcome};
use super::util::{self, Stores};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct GatewayRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Hardware UUID")]
    hardware_id: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "eNodeBs")]
    enodebs: usize,
}

impl From<&GatewayRecord> for GatewayRow {
    fn from(gw: &GatewayRecord) -> Self {
        Self {
            id: gw.id.clone(),
            name: gw.name.clone(),
            hardware_id: gw.device.hardware_id.clone(),
            version: gw.version().unwrap_or_default().to_owned(),
            enodebs: gw.connected_enodeb_serials.len(),
        }
    }
}

impl From<SectionArg> for Section {
    fn from(arg: SectionArg) -> Self {
        match arg {
            SectionArg::Identity => Self::Identity,
            SectionArg::Aggregation => Self::Aggregation,
            SectionArg::Epc => Self::Epc,
            SectionArg::Ran => Self::Ran,
        }
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

async fn require_gateway(stores: &Stores, id: &str) -> Result<GatewayRecord, CliError> {
    stores.gateways.read(id).await?.ok_or_else(|| CliError::NotFound {
        resource_type: "gateway".into(),
        identifier: id.into(),
        list_command: "gateways list".into(),
    })
}

/// Pick scripted or interactive filling for an edit.
fn fill_for(fields: &EditFields, allowed: &[Section], action: &str) -> Result<Fill, CliError> {
    let assignments = util::parse_assignments(&fields.set)?;
    if assignments.is_empty() {
        util::require_terminal(action)?;
        return Ok(Fill::Interactive);
    }
    form::check_fields(&assignments, allowed)?;
    Ok(Fill::Scripted(assignments))
}

async fn edit_session(
    stores: &Stores,
    mode: EditMode,
    record: Option<GatewayRecord>,
    fill: &Fill,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(global.color);
    let mut orch =
        EditOrchestrator::new(Arc::clone(&stores.gateways), Arc::clone(&stores.enodebs));
    let result = session::run(&mut orch, mode, record, fill, color, global.quiet).await;

    // Sections saved before a failure stay saved.
    let written = stores.persist()?;
    debug!(written, "session finished");

    if result? == Outcome::Cancelled && !global.quiet {
        eprintln!("Cancelled");
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: GatewaysArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let stores = Stores::open(global)?;

    match args.command {
        GatewaysCommand::List => {
            let mut records = Vec::new();
            for id in stores.gateways.ids().await? {
                records.extend(stores.gateways.read(&id).await?);
            }
            let out = output::render_list(
                global.output,
                &records,
                |gw| GatewayRow::from(gw),
                |gw| gw.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        GatewaysCommand::Show { id } => {
            let view = GatewayView::load(&stores.gateways, &stores.enodebs, &id).await?;
            let color = output::should_color(global.color);
            let out = output::render_single(
                global.output,
                &view,
                |v| output::render_panels(&v.panels(), color),
                |v| v.gateway_id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        GatewaysCommand::Add(fields) => {
            let all = [
                Section::Identity,
                Section::Aggregation,
                Section::Epc,
                Section::Ran,
            ];
            let fill = fill_for(&fields, &all, "gateways add")?;
            edit_session(&stores, EditMode::AddNew, None, &fill, global).await
        }

        GatewaysCommand::Edit {
            id,
            section,
            fields,
        } => {
            let section = Section::from(section);
            let fill = fill_for(&fields, &[section], "gateways edit")?;
            let record = require_gateway(&stores, &id).await?;
            edit_session(
                &stores,
                EditMode::SingleSection(section),
                Some(record),
                &fill,
                global,
            )
            .await
        }

        GatewaysCommand::Json { id } => {
            let record = require_gateway(&stores, &id).await?;
            output::print_output(&document::export(&record)?, global.quiet);
            Ok(())
        }

        GatewaysCommand::Apply { id, from_file } => {
            require_gateway(&stores, &id).await?;
            let text = std::fs::read_to_string(&from_file)?;
            // Parse before asking, so a broken file never prompts.
            document::parse(&id, &text)?;
            let prompt = format!("Replace gateway '{id}' with {}?", from_file.display());
            if !util::confirm(&prompt, global.yes)? {
                return Ok(());
            }
            document::apply(stores.gateways.as_ref(), &id, &text).await?;
            stores.persist()?;
            if !global.quiet {
                eprintln!(
                    "{}",
                    output::success(
                        gwconf_core::orchestrator::SAVED_NOTICE,
                        output::should_color(global.color)
                    )
                );
            }
            Ok(())
        }
    }
}

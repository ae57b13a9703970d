//! Drives an edit orchestrator session from the command line.
//!
//! Scripted sessions fill each editor from `--set` assignments and stop
//! at the first failed save. Interactive sessions prompt for every field,
//! show the inline error after a failed save and offer to retry.

use dialoguer::Confirm;
use tracing::debug;

use gwconf_core::{
    EditMode, EditOrchestrator, EnodebStore, GatewayRecord, GatewayStore, Transition,
};

use crate::error::CliError;
use crate::output;

use super::form;

/// How editor fields get their values.
pub enum Fill {
    Scripted(Vec<(String, String)>),
    Interactive,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Cancelled,
}

pub async fn run<G, E>(
    orch: &mut EditOrchestrator<G, E>,
    mode: EditMode,
    record: Option<GatewayRecord>,
    fill: &Fill,
    color: bool,
    quiet: bool,
) -> Result<Outcome, CliError>
where
    G: GatewayStore,
    E: EnodebStore,
{
    orch.open(mode, record).await?;

    let outcome = loop {
        let Some(editor) = orch.editor_mut() else {
            break Outcome::Completed;
        };
        let section = editor.section();

        match fill {
            Fill::Scripted(fields) => form::apply_fields(editor, fields)?,
            Fill::Interactive => {
                eprintln!("\n{}", output::heading(section.label(), color));
                form::prompt(editor)?;
                if !Confirm::new()
                    .with_prompt(format!("Save {}?", section.label()))
                    .default(true)
                    .interact()?
                {
                    orch.cancel();
                    break Outcome::Cancelled;
                }
            }
        }

        let result = orch.save().await;
        for notice in orch.take_notices() {
            if !quiet {
                eprintln!("{}", output::success(&notice.message, color));
            }
        }

        match result {
            Ok(Transition::Advance(next)) => debug!(%next, "next section"),
            Ok(Transition::Close) => break Outcome::Completed,
            Err(err) => {
                let inline = orch
                    .editor()
                    .and_then(|e| e.error())
                    .map_or_else(|| err.to_string(), str::to_owned);
                if matches!(fill, Fill::Interactive) {
                    eprintln!("✗ {inline}");
                    let retry = Confirm::new()
                        .with_prompt("Edit and retry?")
                        .default(true)
                        .interact()?;
                    if retry {
                        continue;
                    }
                }
                orch.cancel();
                return Err(err.into());
            }
        }
    };

    Ok(outcome)
}

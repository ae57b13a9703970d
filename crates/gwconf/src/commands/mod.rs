//! Command dispatch: bridges CLI args to the core stores and editors.

pub mod config_cmd;
pub mod enodebs;
pub mod form;
pub mod gateways;
pub mod session;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an inventory-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Gateways(args) => gateways::handle(args, global).await,
        Command::Enodebs(args) => enodebs::handle(args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}

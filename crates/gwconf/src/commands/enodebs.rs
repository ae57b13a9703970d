//! Radio-unit inventory handlers.

use std::collections::BTreeMap;

use tabled::Tabled;

use gwconf_core::view::PLACEHOLDER;
use gwconf_core::{EnodebStore, RadioUnitInfo};

use crate::cli::{EnodebsArgs, EnodebsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util::Stores;

#[derive(Tabled)]
struct EnodebRow {
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Gateway")]
    gateway: String,
}

pub async fn handle(args: EnodebsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let stores = Stores::open(global)?;

    match args.command {
        EnodebsCommand::List => {
            // Reported attachment first, then the first gateway claiming the serial.
            let mut owners: BTreeMap<String, String> = BTreeMap::new();
            for (id, gw) in stores.gateways.snapshot() {
                for serial in gw.connected_enodeb_serials {
                    owners.entry(serial).or_insert_with(|| id.clone());
                }
            }

            let units: Vec<RadioUnitInfo> = stores.enodebs.read().await?.into_values().collect();
            let out = output::render_list(
                global.output,
                &units,
                |unit| EnodebRow {
                    serial: unit.serial.clone(),
                    name: unit.name.clone(),
                    gateway: unit
                        .gateway_id
                        .as_ref()
                        .or_else(|| owners.get(&unit.serial))
                        .map_or_else(|| PLACEHOLDER.to_owned(), Clone::clone),
                },
                |unit| unit.serial.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

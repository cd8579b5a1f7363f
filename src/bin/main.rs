// SPDX-FileCopyrightText: 2026 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::env;
use std::fs::read;
use std::process::exit;

use legacy_defs::config::kit::IdentityKitDefinition;
use legacy_defs::config::npc::NpcDefinition;
use legacy_defs::config::varbit::BitVariableDefinition;
use legacy_defs::config::varp::ParameterVariableDefinition;
use legacy_defs::map_index::MapIndex;
use legacy_defs::model::Model;
use legacy_defs::Error;

const USAGE: &str = "usage: legacy-dump <npc|idk|varp|varbit|model|map_index> <file> [id]";

fn dump(kind: &str, data: &[u8], id: u32) -> Result<String, Error> {
    let output = match kind {
        "npc" => format!("{:#?}", NpcDefinition::from_existing(id, data)?),
        "idk" => format!("{:#?}", IdentityKitDefinition::from_existing(id, data)?),
        "varp" => format!("{:#?}", ParameterVariableDefinition::from_existing(id, data)?),
        "varbit" => format!("{:#?}", BitVariableDefinition::from_existing(id, data)?),
        "model" => format!("{:#?}", Model::from_existing(data)?),
        "map_index" => format!("{:#?}", MapIndex::from_existing(data)?),
        _ => {
            eprintln!("{USAGE}");
            exit(1);
        }
    };

    Ok(output)
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("{USAGE}");
        exit(1);
    }

    let kind = &args[1];
    let path = &args[2];
    let id = match args.get(3).map(|id| id.parse::<u32>()) {
        Some(Ok(id)) => id,
        Some(Err(_)) => {
            eprintln!("{USAGE}");
            exit(1);
        }
        None => 0,
    };

    let data = match read(path) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("failed to read {path}: {err}");
            exit(1);
        }
    };

    match dump(kind, &data, id) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("failed to decode {path}: {err}");
            exit(1);
        }
    }
}

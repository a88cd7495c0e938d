// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use kassenbuch::{cli, commands, utils};

fn main() -> Result<()> {
    utils::init_tracing();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("report", sub)) => {
            let session = commands::Session::open(&matches)?;
            commands::reports::handle(&session, sub)?;
        }
        Some(("list", sub)) => {
            let session = commands::Session::open(&matches)?;
            commands::records::handle(&session, sub)?;
        }
        Some(("export", sub)) => {
            let session = commands::Session::open(&matches)?;
            commands::exporter::handle(&session, sub)?;
        }
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

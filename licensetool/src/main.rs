//! licensetool CLI
//!
//! Generates package lists and change lists from Yocto license manifests.

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::debug;

use licensetool::{
    cli::{Cli, Commands},
    commands::{cmd_changes, cmd_list, Settings},
    logging::{resolve_level, setup_logging},
};

fn main() {
    let cli = Cli::parse();
    setup_logging(resolve_level(
        cli.log_level.as_deref(),
        cli.verbose,
        cli.debug,
    ));

    let Some(command) = cli.command else {
        if let Err(e) = Cli::command().print_help() {
            debug!("Failed to print help: {}", e);
        }
        println!();
        return;
    };

    let settings = Settings {
        format: cli.format,
        force: cli.force,
    };

    let result = match command {
        Commands::List {
            inputfile,
            listfile,
        } => cmd_list(&inputfile, &listfile, settings).map(|output| {
            println!("Wrote {}", output.display());
        }),
        Commands::Changes {
            previous,
            current,
            changefile,
        } => cmd_changes(&previous, &current, &changefile, settings).map(|_| ()),
    };

    if let Err(e) = result {
        debug!("{:?}", e);
        eprintln!("{} {}", "ERROR -".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

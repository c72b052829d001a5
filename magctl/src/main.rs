use std::io;

use clap::{crate_authors, crate_description, crate_version, CommandFactory, Parser};
use clap_complete::generate;
use eyre::Result;
use tracing::{debug, info, trace};

use magcalc_common::{init_logging, ConfigFile};
use magctl::{
    convert_position, list_models, list_zones, query_field, Config, ListSubCommand, Opts,
    SubCommand,
};

/// Binary name, using a different binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();
/// Authors
pub const AUTHORS: &str = crate_authors!();

fn main() -> Result<()> {
    let opts = Opts::parse();

    // Initialise logging, keep the guard until the end.
    //
    let _guard = init_logging(NAME, opts.verbose, opts.debug, opts.log_dir.clone())?;

    // Config only has the API key and a few defaults.
    //
    let cfg = ConfigFile::<Config>::load(opts.config.as_deref())?;

    // Banner
    //
    banner();

    let subcmd = &opts.subcmd;
    handle_subcmd(cfg.inner(), subcmd)
}

pub fn handle_subcmd(cfg: &Config, subcmd: &SubCommand) -> Result<()> {
    match subcmd {
        // Handle `convert (dms|utm|decimal)`
        //
        SubCommand::Convert(copts) => {
            trace!("convert");

            let str = convert_position(copts)?;
            println!("{}", str);
        }

        // Handle `query (dms|utm|decimal)`
        //
        SubCommand::Query(qopts) => {
            trace!("query");

            let str = query_field(cfg, qopts)?;
            println!("{}", str);
        }

        // Standalone completion generation
        //
        // NOTE: you can generate UNIX shells completion on Windows and vice-versa.  Not worth
        //       trying to limit depending on the OS.
        //
        SubCommand::Completion(copts) => {
            let generator = copts.shell;
            generate(generator, &mut Opts::command(), NAME, &mut io::stdout());
        }

        // Standalone `list` command
        //
        SubCommand::List(lopts) => match lopts.cmd {
            ListSubCommand::Zones => {
                info!("Listing all zones:");

                let str = list_zones()?;
                println!("{}", str);
            }
            ListSubCommand::Models => {
                info!("Listing all models:");

                let str = list_models()?;
                println!("{}", str);
            }
        },
    }
    Ok(())
}

/// Display banner
///
fn banner() {
    info!(
        "{}/{} by {} ({})",
        NAME,
        VERSION,
        AUTHORS,
        crate_description!()
    );
    debug!("Modules: {}", magcalc_common::version());
}

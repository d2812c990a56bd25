use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use batch_patch::cli::{Cli, Commands};
use batch_patch::logging::init_logging;
use batch_patch::patch::{
    BatchOptions, create_patches, default_xdelta_location, show_decomposition, show_plan,
};
use batch_patch::{PROG_NAME, PROG_VERSION};

fn default_output_folder() -> Result<PathBuf> {
    let stamp = chrono::Local::now().format("batch-%Y-%m-%d-%H-%M");
    Ok(std::env::current_dir()?.join(stamp.to_string()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.loglevel);

    if !cli.loglevel.is_silent() {
        println!("{} version {}", PROG_NAME, PROG_VERSION);
    }

    match cli.command {
        Commands::Create {
            old,
            new,
            target,
            xdelta,
            archive,
        } => {
            let target_dir = match target {
                Some(target) => target,
                None => default_output_folder()?,
            };
            let options = BatchOptions {
                old_dir: old,
                new_dir: new,
                target_dir,
                xdelta: xdelta.unwrap_or_else(default_xdelta_location),
                archive,
                log_level: cli.loglevel,
            };
            create_patches(&options)?;
        }
        Commands::Plan { old, new } => {
            show_plan(&old, &new)?;
        }
        Commands::Parse { names } => {
            show_decomposition(&names);
        }
    }

    Ok(())
}

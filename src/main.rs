//! traject - resolve paths to records and records back to paths.

mod cli;

use anyhow::{Context, Result, bail};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use traject::config::{RouteConfig, find_config_file};
use traject::debug;
use traject::logger::set_verbose;
use traject::route::RouteTable;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    set_verbose(cli.verbose);

    let cwd = std::env::current_dir().context("cannot read the current directory")?;
    let Some(config_path) = find_config_file(&cwd, &cli.config) else {
        bail!("config file `{}` not found", cli.config.display());
    };
    debug!("config"; "using {}", config_path.display());
    let config = RouteConfig::load(&config_path)?;

    match &cli.command {
        Commands::Check => cli::check::run(&config),
        Commands::Routes { dump } => {
            cli::routes::run(&RouteTable::from_config(&config)?, *dump);
            Ok(())
        }
        Commands::Resolve { args } => cli::resolve::run(&RouteTable::from_config(&config)?, args),
        Commands::Path { kind, vars } => {
            cli::path::run(&RouteTable::from_config(&config)?, kind, vars)
        }
    }
}

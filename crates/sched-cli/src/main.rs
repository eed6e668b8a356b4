use std::path::Path;

use anyhow::{Context, Result};
use clap::{CommandFactory as _, Parser as _};
use sched_cli::commands::{check, repl, show};
use sched_cli::{Cli, Commands, Config};
use tracing_subscriber::EnvFilter;

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match cli.command {
        Some(Commands::Show {
            schedule,
            view,
            date,
            from,
            to,
            json,
        }) => {
            let config = load_config(cli.config.as_deref())?;
            let request = show::ShowRequest {
                schedule,
                view,
                date,
                from,
                to,
                json,
            };
            show::run(&config, &request)?;
        }
        Some(Commands::Check { schedule }) => {
            if check::run(&schedule)? > 0 {
                std::process::exit(1);
            }
        }
        Some(Commands::Repl { schedule }) => {
            let config = load_config(cli.config.as_deref())?;
            repl::run(&config, schedule.as_deref())?;
        }
        None => {
            Cli::command().print_help()?;
            println!();
        }
    }
    Ok(())
}

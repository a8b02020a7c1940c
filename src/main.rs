use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use focus_space::cli::args::{Cli, Commands};
use focus_space::cli::commands;
use focus_space::config::{Config, Paths};
use focus_space::core::{Clock, SystemClock};
use focus_space::logging;
use focus_space::storage::Database;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::resolve(cli.home.as_deref())?;
    logging::enable_logging(&paths.logs, cli.verbose).context("failed to set up logging")?;

    let config = Config::load_from_path(&paths.config_file)?;
    let format = cli.output.unwrap_or(config.general.default_output);
    let clock = SystemClock;
    tracing::debug!(root = %paths.root.display(), ?format, "starting");

    let output = match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let db = Database::open(&paths).context("failed to open database")?;
            focus_space::tui::run(&db, &paths, config)?;
            String::new()
        }
        Commands::Timer(args) => commands::timer(&config, args.command, format)?,
        Commands::Todo(args) => {
            let db = Database::open(&paths).context("failed to open database")?;
            commands::todo(&db, &clock, args.command, format)?
        }
        Commands::Note(args) => {
            let db = Database::open(&paths).context("failed to open database")?;
            commands::note(&db, &clock, args.command, format)?
        }
        Commands::Quote => commands::quote(clock.now(), format)?,
        Commands::Audio(args) => commands::audio(&config, args.command, format)?,
        Commands::Config(args) => commands::config(&paths, &config, args.command, format)?,
        Commands::Completions { shell, install } => commands::completions(&shell, install)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

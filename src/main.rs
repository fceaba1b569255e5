use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::ConfigArgs;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Fork a repository, clone it, write its .env and install dependencies", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactively fork, clone and set up a repository (default)
    Run {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Check that git and the install command are available
    Doctor {
        #[command(flatten)]
        config: ConfigArgs,

        /// Output results as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the effective configuration
    Config {
        #[command(flatten)]
        config: ConfigArgs,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Run {
        config: ConfigArgs::default(),
    });

    match command {
        Commands::Run { config } => {
            let exit_code = commands::run::execute(config)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Commands::Doctor { config, json } => {
            let exit_code = commands::doctor::execute(config, json)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Commands::Config { config, json } => {
            commands::config::execute(config, json)?;
        }
    }

    Ok(())
}

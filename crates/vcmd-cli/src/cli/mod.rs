//! CLI entry and dispatch.

use anyhow::Result;
use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(name = "vcmd")]
#[command(version)]
#[command(about = "Browse and edit Vault secrets from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Open this mount directly instead of the mount list
    #[arg(short, long, value_name = "MOUNT")]
    mount: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Write a commented default config file
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => commands::browse::run(cli.mount.as_deref()),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}

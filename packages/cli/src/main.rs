mod commands;
mod config;
mod grid;
mod number_editor;
mod script;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{init, render, replay, InitArgs, RenderArgs, ReplayArgs};
use config::Config;
use tracing_subscriber::EnvFilter;

/// Gridedit CLI - drive cell edit sessions from scripts
#[derive(Parser, Debug)]
#[command(name = "gridedit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a sample config and session script
    Init(InitArgs),

    /// Replay a session script against the editor host
    Replay(ReplayArgs),

    /// Print the editor tree rendered for one cell
    Render(RenderArgs),
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let cwd = std::env::current_dir()
        .expect("Cannot get current directory")
        .display()
        .to_string();

    // a broken config still gets default logging so the error is reported
    init_logging(&Config::load(&cwd).unwrap_or_default());

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Replay(args) => replay(args, &cwd),
        Command::Render(args) => render(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

use crate::config::{Config, DEFAULT_CONFIG_NAME};
use crate::script::sample_script;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use gridedit_editor::ColumnRegular;
use std::fs;
use std::path::PathBuf;

pub const SAMPLE_SCRIPT_NAME: &str = "session.json";

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing gridedit session...".bright_blue().bold());

    let config = Config {
        columns: vec![
            ColumnRegular::new("name"),
            ColumnRegular::new("age").with_editor("number"),
        ],
        ..Config::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    let script_path = PathBuf::from(cwd).join(SAMPLE_SCRIPT_NAME);
    if !script_path.exists() || args.force {
        fs::write(&script_path, serde_json::to_string_pretty(&sample_script())?)?;
        println!("  {} Created {}", "✓".green(), SAMPLE_SCRIPT_NAME);
    }

    println!();
    println!("Next steps:");
    println!("  1. Edit {}", SAMPLE_SCRIPT_NAME);
    println!("  2. Run: gridedit replay {}", SAMPLE_SCRIPT_NAME);

    Ok(())
}

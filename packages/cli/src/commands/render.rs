use crate::config::Config;
use crate::grid::ScriptedGrid;
use anyhow::{anyhow, Result};
use clap::Args;
use serde_json::Value;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Column index
    #[arg(short, long, default_value_t = 0)]
    pub x: usize,

    /// Row index
    #[arg(short, long, default_value_t = 0)]
    pub y: usize,

    /// Initial cell value (JSON, or plain text)
    #[arg(short, long)]
    pub value: Option<String>,

    /// Registry name of the editor to use
    #[arg(short, long)]
    pub editor: Option<String>,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut grid = ScriptedGrid::new(config);

    let val = args
        .value
        .map(|raw| serde_json::from_str(&raw).unwrap_or(Value::String(raw)));
    grid.open(args.x, args.y, val, args.editor.as_deref())?;

    let tree = grid
        .last_render()
        .ok_or_else(|| anyhow!("Editor did not render"))?;
    println!("{}", serde_json::to_string_pretty(tree)?);

    // leave the cell untouched
    grid.cancel();
    grid.detach();
    Ok(())
}

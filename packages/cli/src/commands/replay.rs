use crate::config::Config;
use crate::grid::ScriptedGrid;
use crate::script::load_script;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use gridedit_editor::{save_data_to_text, HostEvent};
use serde_json::json;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Session script (JSON list of steps)
    pub script: String,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn replay(args: ReplayArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let script_path = PathBuf::from(cwd).join(&args.script);

    if !script_path.exists() {
        return Err(anyhow!("Script does not exist: {:?}", script_path));
    }

    let steps = load_script(&script_path)?;
    let mut grid = ScriptedGrid::new(config);
    grid.run(&steps)?;

    if args.json {
        let cells: Vec<_> = grid
            .cells()
            .iter()
            .map(|((row, col), val)| json!({ "row": row, "col": col, "val": val }))
            .collect();
        let output = json!({
            "events": grid.transcript(),
            "cells": cells,
            "focus": grid.focus(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} {} ({} steps)",
        "▶".bright_blue(),
        args.script.bright_white(),
        steps.len()
    );

    for event in grid.transcript() {
        match event {
            HostEvent::CellEdit(details) => {
                let val = details
                    .val
                    .as_ref()
                    .map(save_data_to_text)
                    .unwrap_or_else(|| "<none>".to_string());
                let source = if details.prevent_focus == Some(true) {
                    "autosave"
                } else {
                    "save"
                };
                println!(
                    "  {} cellEdit r{} c{} = {} ({})",
                    "✓".green(),
                    details.rg_row,
                    details.rg_col,
                    val.bright_white(),
                    source
                );
            }
            HostEvent::CloseEdit(focus_next) => {
                println!("  {} closeEdit focusNext={:?}", "✗".yellow(), focus_next);
            }
        }
    }

    println!();
    println!("{}", "Cells:".bold());
    if grid.cells().is_empty() {
        println!("  (none committed)");
    }
    for ((row, col), val) in grid.cells() {
        println!("  r{} c{}: {}", row, col, save_data_to_text(val));
    }

    if let Some((row, col)) = grid.focus() {
        println!();
        println!("Focus: r{} c{}", row, col);
    }

    Ok(())
}

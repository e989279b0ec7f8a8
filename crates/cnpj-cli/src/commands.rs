use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, Color, Table};
use tracing::debug;

use cnpj_cli::pipeline;
use cnpj_cli::progress::ConsoleReporter;
use cnpj_model::{ProcessingConfig, RunReport};

use crate::cli::{ConfigArgs, RunArgs};

pub fn run_normalize(args: &RunArgs) -> Result<RunReport> {
    let config = resolve_config(&args.config)?;
    let mut reporter = ConsoleReporter::new(args.quiet_progress);
    pipeline::run(&config, &mut reporter)
}

pub fn run_directories(args: &ConfigArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Directory", "Input", "Output"]);
    for name in &config.directories {
        let input = config.input_dir(name);
        let output = config.output_dir(name);
        table.add_row(vec![
            Cell::new(name),
            presence_cell(&input),
            presence_cell(&output),
        ]);
    }
    println!("Base directory: {}", config.base_dir.display());
    println!("{table}");
    Ok(())
}

fn presence_cell(path: &Path) -> Cell {
    if path.is_dir() {
        Cell::new("present").fg(Color::Green)
    } else {
        Cell::new("missing").fg(Color::Yellow)
    }
}

/// Config file (or defaults), then the positional base directory on top.
fn resolve_config(args: &ConfigArgs) -> Result<ProcessingConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ProcessingConfig::default(),
    };
    if let Some(base_dir) = &args.base_dir {
        config.base_dir.clone_from(base_dir);
    }
    debug!(?config, "configuration resolved");
    Ok(config)
}

fn load_config(path: &Path) -> Result<ProcessingConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse config {}", path.display()))
}

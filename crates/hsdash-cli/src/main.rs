//! hsdash CLI - Homeschool Activity Dashboard Generator
//!
//! Reads one activity workbook per student and writes a self-contained HTML
//! dashboard.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hsdash_core::SessionSet;
use hsdash_ingest::load_workbook;
use hsdash_render::DashboardPage;

#[derive(Parser)]
#[command(name = "hsdash")]
#[command(author, version, about = "Homeschool activity dashboard generator", long_about = None)]
struct Cli {
    /// Activity workbook files, one per student
    #[arg(value_name = "FILES", required = true)]
    files: Vec<PathBuf>,

    /// Output HTML file
    #[arg(short, long, default_value = "dashboard.html")]
    output: PathBuf,

    /// Open the generated dashboard in the default browser
    #[arg(long)]
    open: bool,

    /// Also dump the aggregated data as JSON
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; -v overrides the environment filter
    let filter = match cli.verbose {
        0 => EnvFilter::from_default_env(),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let mut sets: Vec<SessionSet> = Vec::with_capacity(cli.files.len());
    for file in &cli.files {
        tracing::info!(file = %file.display(), "loading workbook");
        let set = load_workbook(file)
            .with_context(|| format!("failed to load {}", file.display()))?;
        tracing::info!(
            subjects = set.subjects.len(),
            hours = set.total_hours(),
            "workbook aggregated"
        );
        sets.push(set);
    }

    if let Some(json_path) = &cli.json {
        let json = serde_json::to_string_pretty(&sets)?;
        std::fs::write(json_path, json)
            .with_context(|| format!("failed to write {}", json_path.display()))?;
    }

    let page = DashboardPage::new();
    let html = page.render_all(&sets)?;
    std::fs::write(&cli.output, html)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    println!("Wrote {}", cli.output.display());

    if cli.open {
        webbrowser::open(&cli.output.to_string_lossy())
            .with_context(|| "failed to open the dashboard in a browser")?;
    }

    Ok(())
}

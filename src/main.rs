//! waterfall CLI - Render a continuous-integration waterfall
//!
//! Reads one waterfall payload and renders it as HTML pages, a scene tree,
//! or a text report.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

use waterfall::{
    html::{self, PageConfig},
    report,
};
use waterfall_core::{compose, DisplayZone, GridIndex, StatusFilter, ViewOptions};

/// waterfall: Status grid of build variants by versions
#[derive(Parser, Debug)]
#[command(name = "waterfall")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the expanded and collapsed HTML pages
    Render(RenderArgs),

    /// Print the composed scene tree as JSON
    Tree(TreeArgs),

    /// Print the collapsed view of every cell as text
    Summary(SummaryArgs),
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Path to the waterfall payload JSON file
    #[arg(short, long, value_name = "FILE", default_value = "waterfall.json")]
    payload: PathBuf,

    /// Project identifier used in build variant links
    #[arg(long, env = "WATERFALL_PROJECT")]
    project: String,

    /// Task statuses listed individually in the collapsed view (comma-separated)
    #[arg(long, default_value = "failed,system-failed")]
    show_status: String,

    /// UTC offset for header times (e.g. "+05:30", "UTC")
    #[arg(long, env = "WATERFALL_UTC_OFFSET", default_value = "UTC")]
    utc_offset: String,
}

impl ViewArgs {
    fn view_options(&self) -> Result<ViewOptions> {
        let filter = StatusFilter::parse(&self.show_status)
            .with_context(|| "Invalid --show-status")?;
        let zone = DisplayZone::parse(&self.utc_offset).with_context(|| "Invalid --utc-offset")?;

        Ok(ViewOptions::new(&self.project)
            .with_status_filter(filter)
            .with_zone(zone))
    }

    fn load_grid(&self) -> Result<GridIndex> {
        info!("Loading waterfall payload from {:?}", self.payload);
        let grid = waterfall::load_grid(&self.payload)
            .with_context(|| format!("Failed to load waterfall payload: {:?}", self.payload))?;
        debug!(
            "Grid has {} versions and {} build variants",
            grid.version_count(),
            grid.variant_count()
        );

        Ok(grid)
    }
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Output directory for the pages
    #[arg(short, long, default_value = "waterfall")]
    output_dir: PathBuf,

    /// Page title
    #[arg(long, default_value = "Waterfall")]
    title: String,

    /// Base URL that version, task and variant links are joined onto
    #[arg(long, env = "WATERFALL_BASE_URL")]
    base_url: Option<String>,
}

#[derive(Parser, Debug)]
struct TreeArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Compose the collapsed view
    #[arg(long, default_value = "false")]
    collapsed: bool,
}

#[derive(Parser, Debug)]
struct SummaryArgs {
    #[command(flatten)]
    view: ViewArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Render(args) => render_command(args),
        Commands::Tree(args) => tree_command(args),
        Commands::Summary(args) => summary_command(args),
    }
}

/// Write both HTML pages and the scene JSON
fn render_command(args: RenderArgs) -> Result<()> {
    let options = args.view.view_options()?;
    let grid = args.view.load_grid()?;

    let mut config = PageConfig {
        title: args.title,
        output_dir: args.output_dir,
        base_url: None,
    };
    if let Some(ref base_url) = args.base_url {
        config = config
            .with_base_url(base_url)
            .with_context(|| format!("Invalid --base-url: {}", base_url))?;
    }

    let current_dir = std::env::current_dir()?;
    let written = html::write_pages(&grid, &options, &config, &current_dir)
        .with_context(|| "Failed to write waterfall pages")?;

    for path in &written {
        info!("Wrote {:?}", path);
    }

    Ok(())
}

/// Print the scene tree
fn tree_command(args: TreeArgs) -> Result<()> {
    let options = args.view.view_options()?.collapsed(args.collapsed);
    let grid = args.view.load_grid()?;

    let scene = compose(&grid, &options);
    println!("{}", serde_json::to_string_pretty(&scene)?);

    Ok(())
}

/// Print the text report
fn summary_command(args: SummaryArgs) -> Result<()> {
    let options = args.view.view_options()?;
    let grid = args.view.load_grid()?;

    println!(
        "{}",
        report::summary(&grid, &options.status_filter, &options.zone)
    );

    Ok(())
}

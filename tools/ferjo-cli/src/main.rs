//! FERJO CLI - Command line tool for the FERJO product catalog.
//!
//! Commands:
//! - `ferjo catalog` - List products, filtered like the storefront grid
//! - `ferjo categories` - List category options
//! - `ferjo images` - Walk every card's image fallback chain against the network
//! - `ferjo render` - Render the grid as static HTML
//! - `ferjo config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ferjo_observability::{init_tracing, LogFormat, LogLevel};

use commands::{CatalogArgs, CategoriesArgs, ConfigArgs, ImagesArgs, RenderArgs};

/// FERJO CLI - Inspect and render the FERJO product catalog
#[derive(Parser)]
#[command(name = "ferjo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Catalog API base URL (overrides config and FERJO_API_BASE)
    #[arg(long, global = true)]
    api: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Catalog(CatalogArgs),

    /// List category options
    Categories(CategoriesArgs),

    /// Probe product images through the variant fallback chain
    Images(ImagesArgs),

    /// Render the catalog grid as HTML
    Render(RenderArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (format, level) = match (cli.json, cli.verbose) {
        (true, true) => (LogFormat::Json, LogLevel::Debug),
        (true, false) => (LogFormat::Json, LogLevel::Warn),
        (false, true) => (LogFormat::Human, LogLevel::Debug),
        (false, false) => (LogFormat::Human, LogLevel::Warn),
    };
    init_tracing(format, level)?;

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, cli.api, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Categories(args) => commands::categories::run(args, &ctx).await,
        Commands::Images(args) => commands::images::run(args, &ctx).await,
        Commands::Render(args) => commands::render::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

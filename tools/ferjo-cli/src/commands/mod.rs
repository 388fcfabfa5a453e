//! CLI command implementations.

pub mod catalog;
pub mod categories;
pub mod config;
pub mod images;
pub mod render;

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use ferjo_catalog::search::StockPolicy;
use ferjo_data::{FileProductSource, HttpProductSource, LoadError, ProductSource};
use ferjo_observability::{SessionId, StructuredLogger};
use ferjo_storefront::CatalogPage;

use crate::context::Context;

/// Where the products come from.
#[derive(Args, Clone)]
pub struct SourceArgs {
    /// Read products from an exported JSON file instead of the API.
    #[arg(short, long)]
    pub file: Option<String>,
}

/// Grid filter inputs.
#[derive(Args, Clone)]
pub struct FilterArgs {
    /// Search text (name, article code or barcode).
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Exact category; empty selects every category.
    #[arg(long, default_value = "")]
    pub category: String,

    /// Hide out-of-stock products.
    #[arg(long)]
    pub exclude_out_of_stock: bool,
}

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the images command.
#[derive(Args)]
pub struct ImagesArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Cards probed at once (default: media.probe_concurrency).
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Per-image download timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Only list failing images.
    #[arg(long)]
    pub failures_only: bool,
}

/// Arguments for the render command.
#[derive(Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output file (default: stdout).
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

/// Build the product source for a command.
fn product_source(source: &SourceArgs, ctx: &Context) -> Result<Box<dyn ProductSource>> {
    if let Some(file) = &source.file {
        return Ok(Box::new(FileProductSource::new(ctx.resolve_path(file))));
    }

    let endpoint = ctx.endpoint().ok_or(LoadError::NotConfigured)?;
    ctx.output.debug(&format!("API base: {}", endpoint.base()));
    let http = HttpProductSource::new(endpoint, ctx.config.api.timeout())
        .context("Failed to build HTTP client")?;
    Ok(Box::new(http))
}

/// Load the catalog into a page and apply the filter inputs.
pub async fn load_page(source: &SourceArgs, filter: Option<&FilterArgs>, ctx: &Context) -> Result<CatalogPage> {
    let mut settings = ctx.config.storefront();
    if filter.map_or(false, |f| f.exclude_out_of_stock) {
        settings = settings.with_stock_policy(StockPolicy::ExcludeOutOfStock);
    }

    let logger = StructuredLogger::new(SessionId::generate()).with_component("cli");
    let mut page = CatalogPage::new(settings, logger);

    let source = product_source(source, ctx)?;
    let spinner = ctx.output.spinner("Loading catalog...");
    let loaded = page.load(source.as_ref()).await;
    spinner.finish_and_clear();
    loaded.context("Catalog load failed")?;

    if let Some(filter) = filter {
        page.on_search_input(&filter.query);
        page.on_category_change(&filter.category);
    }

    Ok(page)
}

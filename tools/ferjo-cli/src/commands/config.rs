//! Configuration management commands.

use std::path::PathBuf;

use anyhow::{bail, Result};
use dialoguer::Confirm;
use ferjo_catalog::search::StockPolicy;
use ferjo_catalog::Currency;
use ferjo_data::ApiEndpoint;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::{config_file_in, Context};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv(
        "base",
        ctx.config.api.base.as_deref().unwrap_or("(unset)"),
    );
    if let Some(secs) = ctx.config.api.timeout_secs {
        ctx.output.kv("timeout_secs", &secs.to_string());
    }
    if let Some(endpoint) = ctx.endpoint() {
        ctx.output.kv("effective", endpoint.base());
    }

    ctx.output.info("");
    ctx.output.info("[media]");
    ctx.output.kv("placeholder", &ctx.config.media.placeholder);
    ctx.output.kv("cdn_width", &ctx.config.media.cdn_width.to_string());
    ctx.output.kv(
        "probe_concurrency",
        &ctx.config.media.probe_concurrency.to_string(),
    );

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output
        .kv("default_currency", &ctx.config.catalog.default_currency);
    ctx.output
        .kv("stock_policy", ctx.config.catalog.stock_policy.as_str());

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let config_path = find_config_file(ctx)?;

    let mut config = CliConfig::load(&config_path)?;
    set_config_value(&mut config, key, value)?;
    config.save(&config_path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("ferjo.toml");

    if config_path.exists() && !force {
        if ctx.output.is_json() {
            bail!(
                "Config file already exists: {}. Use --force to overwrite.",
                config_path.display()
            );
        }
        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", config_path.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            ctx.output.info("Keeping existing config.");
            return Ok(());
        }
    }

    // Carry over an endpoint given on the command line or in the environment.
    let base = ctx.endpoint().map(|e| e.base().to_string());
    std::fs::write(&config_path, generate_default_config(base.as_deref()))?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(&ctx.config);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

/// Errors and warnings for a configuration.
fn check_config(config: &CliConfig) -> (Vec<String>, Vec<String>) {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    match config.api.base.as_deref() {
        None => warnings.push(
            "api.base is not set; FERJO_API_BASE or --api must provide it".to_string(),
        ),
        Some(base) => {
            if ApiEndpoint::new(base).is_none() {
                errors.push("api.base is empty".to_string());
            } else if !is_http_url(base) {
                errors.push(format!("api.base '{}' must be an http(s) URL", base));
            }
        }
    }

    if config.api.timeout_secs == Some(0) {
        errors.push("api.timeout_secs must be greater than 0".to_string());
    }

    if !is_http_url(&config.media.placeholder) {
        warnings.push(format!(
            "media.placeholder '{}' is not an absolute URL",
            config.media.placeholder
        ));
    }

    if config.media.cdn_width == 0 {
        errors.push("media.cdn_width must be greater than 0".to_string());
    }

    if config.media.probe_concurrency == 0 {
        errors.push("media.probe_concurrency must be greater than 0".to_string());
    }

    if Currency::parse(&config.catalog.default_currency).is_err() {
        errors.push(format!(
            "catalog.default_currency '{}' is not a 3-letter currency code",
            config.catalog.default_currency
        ));
    }

    (errors, warnings)
}

fn is_http_url(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["api", "base"] => Ok(config
            .api
            .base
            .as_ref()
            .map(|b| format!("\"{}\"", b))
            .unwrap_or_else(|| "null".to_string())),
        ["api", "timeout_secs"] => Ok(config
            .api
            .timeout_secs
            .map(|t| t.to_string())
            .unwrap_or_else(|| "null".to_string())),
        ["media", "placeholder"] => Ok(format!("\"{}\"", config.media.placeholder)),
        ["media", "cdn_width"] => Ok(config.media.cdn_width.to_string()),
        ["media", "probe_concurrency"] => Ok(config.media.probe_concurrency.to_string()),
        ["catalog", "default_currency"] => Ok(format!("\"{}\"", config.catalog.default_currency)),
        ["catalog", "stock_policy"] => Ok(format!("\"{}\"", config.catalog.stock_policy.as_str())),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["api", "base"] => config.api.base = Some(value.to_string()),
        ["api", "timeout_secs"] => config.api.timeout_secs = Some(value.parse()?),
        ["media", "placeholder"] => config.media.placeholder = value.to_string(),
        ["media", "cdn_width"] => config.media.cdn_width = value.parse()?,
        ["media", "probe_concurrency"] => config.media.probe_concurrency = value.parse()?,
        ["catalog", "default_currency"] => {
            config.catalog.default_currency = Currency::parse(value)?.code().to_string()
        }
        ["catalog", "stock_policy"] => {
            config.catalog.stock_policy = match StockPolicy::from_str(value) {
                Some(policy) => policy,
                None => bail!("Unknown stock policy: {} (use flag_only or exclude_out_of_stock)", value),
            }
        }
        _ => bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}

fn find_config_file(ctx: &Context) -> Result<PathBuf> {
    if let Some(path) = &ctx.config_path {
        return Ok(path.clone());
    }
    match config_file_in(&ctx.cwd) {
        Some(path) => Ok(path),
        None => bail!("No config file found. Run `ferjo config init` to create one."),
    }
}

//! Image probing across the grid.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use ferjo_media::{
    extract_file_id, probe_cards, HttpImageProbe, ImageDimensions, ImageProbe, ImageReport,
    ImageResolver, LoadState, ProbeError,
};
use ferjo_observability::{ImageLoadMetrics, ImageLoadSummary};
use indicatif::ProgressBar;
use serde::Serialize;

use super::{load_page, ImagesArgs};
use crate::context::Context;
use crate::output::{state_badge, truncate};

/// Template label for candidates of a raw source that used no template.
const DIRECT_URL: &str = "direct_url";

/// Probe wrapper that ticks the spinner on every attempt.
struct CountingProbe<'a, P> {
    inner: &'a P,
    spinner: &'a ProgressBar,
    attempts: AtomicUsize,
}

#[async_trait]
impl<'a, P: ImageProbe> ImageProbe for CountingProbe<'a, P> {
    async fn probe(&self, url: &str) -> Result<ImageDimensions, ProbeError> {
        let n = self.attempts.fetch_add(1, Ordering::Relaxed) + 1;
        self.spinner
            .set_message(format!("Probing images... {} candidate(s) tried", n));
        self.inner.probe(url).await
    }
}

#[derive(Serialize)]
struct ImagesOutput<'a> {
    reports: &'a [ImageReport],
    metrics: ImageLoadSummary,
}

/// Run the images command.
pub async fn run(args: ImagesArgs, ctx: &Context) -> Result<()> {
    let mut page = load_page(&args.source, Some(&args.filter), ctx).await?;

    let timeout = args
        .timeout
        .map(Duration::from_secs)
        .or_else(|| ctx.config.api.timeout());
    let http = HttpImageProbe::new(timeout).context("Failed to build HTTP client")?;
    let concurrency = args
        .concurrency
        .unwrap_or(ctx.config.media.probe_concurrency);

    let spinner = ctx.output.spinner("Probing images...");
    let probe = CountingProbe {
        inner: &http,
        spinner: &spinner,
        attempts: AtomicUsize::new(0),
    };
    let reports = probe_cards(page.arena_mut().iter_mut(), &probe, concurrency).await;
    spinner.finish_and_clear();

    let metrics = collect_metrics(&reports, page.arena().resolver());

    if ctx.output.is_json() {
        ctx.output.json(&ImagesOutput {
            reports: &reports,
            metrics: metrics.summary(),
        });
        return Ok(());
    }

    ctx.output.header("Imágenes");
    let widths = [8, 36, 6, 20, 10];
    ctx.output
        .table_row(&["CARD", "PRODUCT", "IMAGE", "VARIANT", "STATE"], &widths);
    for report in &reports {
        let label = state_label(report);
        if args.failures_only && label != "exhausted" {
            continue;
        }
        let name = page
            .card(report.card)
            .map(|c| truncate(&c.name, widths[1]))
            .unwrap_or_default();
        let card = report.card.to_string();
        let image = report.image_index.to_string();
        let variant = report
            .winning_position()
            .map(|p| template_name(page.arena().resolver(), &report.source, p))
            .unwrap_or("-");
        let state = state_badge(label);
        ctx.output.table_row(
            &[
                card.as_str(),
                name.as_str(),
                image.as_str(),
                variant,
                state.as_str(),
            ],
            &widths,
        );
    }

    let summary = metrics.summary();
    ctx.output.header("Variantes");
    for (template, stats) in summary.variants_in_order() {
        ctx.output.kv(
            &format!("{} {}", stats.position, template),
            &format!(
                "{}/{} ({:.0}%)",
                stats.successes,
                stats.attempts,
                stats.success_rate() * 100.0
            ),
        );
    }

    ctx.output.info("");
    ctx.output.kv("loaded", &summary.images_loaded.to_string());
    ctx.output.kv("exhausted", &summary.images_exhausted.to_string());
    ctx.output
        .kv("no image", &summary.images_without_source.to_string());
    ctx.output.kv(
        "elapsed",
        &format!("{:.1}s", metrics.elapsed().as_secs_f64()),
    );

    if summary.images_exhausted > 0 {
        ctx.output.warn(&format!(
            "{} image(s) fell back to the placeholder",
            summary.images_exhausted
        ));
    }

    Ok(())
}

fn collect_metrics(reports: &[ImageReport], resolver: &ImageResolver) -> ImageLoadMetrics {
    let mut metrics = ImageLoadMetrics::new();
    for report in reports {
        for attempt in &report.attempts {
            let template = template_name(resolver, &report.source, attempt.position);
            metrics.record_attempt(template, attempt.position, attempt.succeeded);
        }
        match report.state {
            LoadState::Success(_) => metrics.record_loaded(),
            _ if report.source.is_empty() => metrics.record_without_source(),
            _ => metrics.record_exhausted(),
        }
    }
    metrics
}

fn template_name(resolver: &ImageResolver, source: &str, position: usize) -> &'static str {
    if extract_file_id(source).is_none() {
        return DIRECT_URL;
    }
    resolver
        .templates()
        .get(position)
        .map(|t| t.name())
        .unwrap_or(DIRECT_URL)
}

fn state_label(report: &ImageReport) -> &'static str {
    match report.state {
        LoadState::Success(_) => "loaded",
        LoadState::Attempting(_) => "loading",
        LoadState::Exhausted if report.source.is_empty() => "no image",
        LoadState::Exhausted => "exhausted",
    }
}

//! Image-load counters.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use serde::Serialize;

/// Counters for one candidate template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct VariantStats {
    /// Chain position the template occupies.
    pub position: usize,
    /// Attempts made with this template.
    pub attempts: u64,
    /// Attempts that rendered.
    pub successes: u64,
}

impl VariantStats {
    /// Share of attempts that rendered, in `0.0..=1.0`.
    pub fn success_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.successes as f64 / self.attempts as f64
        }
    }
}

/// Snapshot of a probing run.
#[derive(Debug, Clone, Serialize, serde::Deserialize)]
pub struct ImageLoadSummary {
    /// Images that reached a rendered variant.
    pub images_loaded: u64,
    /// Images whose whole chain failed.
    pub images_exhausted: u64,
    /// Images with no source at all.
    pub images_without_source: u64,
    /// Per-template counters, keyed by template name.
    pub variants: BTreeMap<String, VariantStats>,
    /// Wall time since the collector was created (microseconds).
    pub elapsed_us: u64,
}

impl ImageLoadSummary {
    /// Templates in chain order, ties broken by name.
    pub fn variants_in_order(&self) -> Vec<(&str, &VariantStats)> {
        let mut ordered: Vec<_> = self
            .variants
            .iter()
            .map(|(name, stats)| (name.as_str(), stats))
            .collect();
        ordered.sort_by_key(|(name, stats)| (stats.position, *name));
        ordered
    }
}

/// Collector for image-load outcomes.
#[derive(Debug)]
pub struct ImageLoadMetrics {
    start: Instant,
    loaded: u64,
    exhausted: u64,
    without_source: u64,
    variants: BTreeMap<String, VariantStats>,
}

impl Default for ImageLoadMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLoadMetrics {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            loaded: 0,
            exhausted: 0,
            without_source: 0,
            variants: BTreeMap::new(),
        }
    }

    /// Record one candidate attempt made with `template` at `position`.
    pub fn record_attempt(&mut self, template: &str, position: usize, succeeded: bool) {
        let stats = self
            .variants
            .entry(template.to_string())
            .or_insert_with(|| VariantStats {
                position,
                ..Default::default()
            });
        stats.attempts += 1;
        if succeeded {
            stats.successes += 1;
        }
    }

    /// Record an image that rendered.
    pub fn record_loaded(&mut self) {
        self.loaded += 1;
    }

    /// Record an image whose chain ran out.
    pub fn record_exhausted(&mut self) {
        self.exhausted += 1;
    }

    /// Record a card with nothing to load.
    pub fn record_without_source(&mut self) {
        self.without_source += 1;
    }

    /// Stats for one template.
    pub fn variant(&self, template: &str) -> Option<&VariantStats> {
        self.variants.get(template)
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Take a serializable snapshot.
    pub fn summary(&self) -> ImageLoadSummary {
        ImageLoadSummary {
            images_loaded: self.loaded,
            images_exhausted: self.exhausted,
            images_without_source: self.without_source,
            variants: self.variants.clone(),
            elapsed_us: self.start.elapsed().as_micros() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_template_counts() {
        let mut metrics = ImageLoadMetrics::new();
        metrics.record_attempt("direct_view", 0, false);
        metrics.record_attempt("download_redirect", 1, true);
        metrics.record_loaded();
        metrics.record_attempt("direct_view", 0, true);
        metrics.record_loaded();

        let first = metrics.variant("direct_view").unwrap();
        assert_eq!(first.attempts, 2);
        assert_eq!(first.successes, 1);
        assert!((first.success_rate() - 0.5).abs() < f64::EPSILON);
        assert_eq!(metrics.variant("download_redirect").unwrap().position, 1);
        assert!(metrics.variant("cdn_thumbnail").is_none());
    }

    #[test]
    fn test_templates_sharing_a_position_stay_apart() {
        let mut metrics = ImageLoadMetrics::new();
        metrics.record_attempt("direct_url", 0, true);
        metrics.record_attempt("direct_view", 0, false);

        assert_eq!(metrics.variant("direct_url").unwrap().successes, 1);
        let view = metrics.variant("direct_view").unwrap();
        assert_eq!(view.attempts, 1);
        assert_eq!(view.successes, 0);
    }

    #[test]
    fn test_summary_orders_by_position() {
        let mut metrics = ImageLoadMetrics::new();
        metrics.record_attempt("thumbnail_api", 3, true);
        metrics.record_attempt("direct_view", 0, false);
        metrics.record_attempt("direct_url", 0, true);

        let summary = metrics.summary();
        let names: Vec<&str> = summary
            .variants_in_order()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["direct_url", "direct_view", "thumbnail_api"]);
    }

    #[test]
    fn test_summary_serializes() {
        let mut metrics = ImageLoadMetrics::default();
        metrics.record_exhausted();
        metrics.record_without_source();

        let summary = metrics.summary();
        assert_eq!(summary.images_exhausted, 1);
        assert_eq!(summary.images_without_source, 1);
        assert_eq!(summary.images_loaded, 0);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["images_exhausted"], 1);
        assert!(json["variants"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_unattempted_rate_is_zero() {
        assert_eq!(VariantStats::default().success_rate(), 0.0);
    }
}

//! API base resolution and products URL construction.

/// Environment variable holding the API base.
pub const API_BASE_ENV: &str = "FERJO_API_BASE";

/// A configured catalog endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    base: String,
}

impl ApiEndpoint {
    /// Build from a raw base. Trailing slashes are dropped; an empty result
    /// means "not configured".
    pub fn new(raw: &str) -> Option<Self> {
        let base = raw.trim().trim_end_matches('/');
        if base.is_empty() {
            None
        } else {
            Some(Self {
                base: base.to_string(),
            })
        }
    }

    /// Resolve from an explicit value, then the config file, then
    /// `FERJO_API_BASE`.
    pub fn resolve(explicit: Option<&str>, configured: Option<&str>) -> Option<Self> {
        let env = std::env::var(API_BASE_ENV).ok();
        Self::resolve_from(explicit, configured, env.as_deref())
    }

    /// Same as [`ApiEndpoint::resolve`] with the environment value passed in.
    pub fn resolve_from(
        explicit: Option<&str>,
        configured: Option<&str>,
        env: Option<&str>,
    ) -> Option<Self> {
        [explicit, configured, env]
            .into_iter()
            .flatten()
            .find(|raw| !raw.trim().is_empty())
            .and_then(Self::new)
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Products URL with a fresh cache-busting stamp.
    pub fn products_url(&self) -> String {
        self.products_url_at(chrono::Utc::now().timestamp_millis())
    }

    /// Products URL stamped with `millis`.
    pub fn products_url_at(&self, millis: i64) -> String {
        let join = if self.base.contains('?') { '&' } else { '?' };
        format!("{}{}path=products&t={}", self.base, join, millis)
    }
}

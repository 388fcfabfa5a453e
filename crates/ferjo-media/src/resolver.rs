//! Image reference resolution.
//!
//! Product rows link their pictures through Drive share links in several
//! shapes (`/file/d/<id>/view`, `open?id=<id>`, `uc?export=view&id=<id>`).
//! None of them is reliably renderable, so a raw link is turned into a
//! chain of candidate URLs that are tried in order.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Default width requested from the thumbnail endpoints.
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 1600;

fn id_patterns() -> &'static [Regex; 3] {
    static PATTERNS: OnceLock<[Regex; 3]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            Regex::new(r"/d/([a-zA-Z0-9_-]+)").expect("valid regex"),
            Regex::new(r"[?&]id=([a-zA-Z0-9_-]+)").expect("valid regex"),
            Regex::new(r"uc\?[^#]*id=([a-zA-Z0-9_-]+)").expect("valid regex"),
        ]
    })
}

fn absolute_http() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)^https?://").expect("valid regex"))
}

/// Extract the Drive file identifier from a raw link.
///
/// Patterns are tried in order (path segment, query parameter, `uc?` form)
/// and the first match wins.
pub fn extract_file_id(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    id_patterns()
        .iter()
        .find_map(|re| re.captures(raw))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// One way of addressing a Drive file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VariantTemplate {
    /// `uc?export=view`: the original file, when sharing allows it.
    DirectView,
    /// `uc?export=download`: same file through the download redirect.
    DownloadRedirect,
    /// googleusercontent CDN rendition at a fixed width.
    CdnThumbnail { width: u32 },
    /// Thumbnail API. Can crop, so it goes last.
    ThumbnailApi { width: u32 },
}

impl VariantTemplate {
    /// Instantiate the template for a file id.
    pub fn render(&self, id: &str) -> String {
        match self {
            Self::DirectView => format!("https://drive.google.com/uc?export=view&id={}", id),
            Self::DownloadRedirect => {
                format!("https://drive.google.com/uc?export=download&id={}", id)
            }
            Self::CdnThumbnail { width } => {
                format!("https://lh3.googleusercontent.com/d/{}=w{}", id, width)
            }
            Self::ThumbnailApi { width } => {
                format!("https://drive.google.com/thumbnail?id={}&sz=w{}", id, width)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::DirectView => "direct_view",
            Self::DownloadRedirect => "download_redirect",
            Self::CdnThumbnail { .. } => "cdn_thumbnail",
            Self::ThumbnailApi { .. } => "thumbnail_api",
        }
    }
}

/// Ordered candidate URLs for one raw image source.
///
/// Empty means "show the placeholder straight away".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VariantChain(Vec<String>);

impl VariantChain {
    pub fn new(candidates: Vec<String>) -> Self {
        Self(candidates)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&str> {
        self.0.get(position).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Turns raw image links into variant chains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResolver {
    templates: Vec<VariantTemplate>,
}

impl ImageResolver {
    /// Resolver with a custom template order.
    pub fn new(templates: Vec<VariantTemplate>) -> Self {
        Self { templates }
    }

    /// Default order with a different thumbnail width.
    pub fn with_thumbnail_width(width: u32) -> Self {
        Self::new(default_templates(width))
    }

    pub fn templates(&self) -> &[VariantTemplate] {
        &self.templates
    }

    /// Resolve a raw link into its variant chain.
    ///
    /// Links with a Drive id expand to one candidate per template. Links
    /// without one are used as-is if they are absolute HTTP(S) URLs;
    /// anything else resolves to the empty chain.
    pub fn resolve(&self, raw: &str) -> VariantChain {
        if let Some(id) = extract_file_id(raw) {
            return VariantChain(self.templates.iter().map(|t| t.render(id)).collect());
        }
        let raw = raw.trim();
        if absolute_http().is_match(raw) {
            VariantChain(vec![raw.to_string()])
        } else {
            VariantChain::empty()
        }
    }
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self::with_thumbnail_width(DEFAULT_THUMBNAIL_WIDTH)
    }
}

fn default_templates(width: u32) -> Vec<VariantTemplate> {
    vec![
        VariantTemplate::DirectView,
        VariantTemplate::DownloadRedirect,
        VariantTemplate::CdnThumbnail { width },
        VariantTemplate::ThumbnailApi { width },
    ]
}

/// Resolve with the default templates.
pub fn resolve(raw: &str) -> VariantChain {
    ImageResolver::default().resolve(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_path_segment() {
        assert_eq!(
            extract_file_id("https://drive.google.com/file/d/1AbC_d-9/view?usp=sharing"),
            Some("1AbC_d-9")
        );
    }

    #[test]
    fn test_extract_query_forms() {
        assert_eq!(extract_file_id("https://drive.google.com/open?id=XYZ_1"), Some("XYZ_1"));
        assert_eq!(
            extract_file_id("https://drive.google.com/uc?export=view&id=abc-2"),
            Some("abc-2")
        );
        assert_eq!(extract_file_id("  https://x.test/a?b=1&id=q9  "), Some("q9"));
    }

    #[test]
    fn test_path_segment_wins() {
        assert_eq!(
            extract_file_id("https://drive.google.com/file/d/PATH/view?id=QUERY"),
            Some("PATH")
        );
    }

    #[test]
    fn test_every_candidate_embeds_id() {
        let id = "1x2Y3z_-Q";
        for raw in [
            format!("https://drive.google.com/file/d/{}/view", id),
            format!("https://drive.google.com/file/d/{}/", id),
            format!("/d/{}/", id),
        ] {
            let chain = resolve(&raw);
            assert_eq!(chain.len(), 4);
            assert!(chain.iter().all(|url| url.contains(id)));
        }
    }

    #[test]
    fn test_chain_order() {
        let chain = resolve("https://drive.google.com/file/d/abc/view");
        assert_eq!(
            chain.as_slice(),
            [
                "https://drive.google.com/uc?export=view&id=abc",
                "https://drive.google.com/uc?export=download&id=abc",
                "https://lh3.googleusercontent.com/d/abc=w1600",
                "https://drive.google.com/thumbnail?id=abc&sz=w1600",
            ]
        );
    }

    #[test]
    fn test_empty_and_non_url() {
        assert!(resolve("").is_empty());
        assert!(resolve("   ").is_empty());
        assert!(resolve("foto-martillo.jpg").is_empty());
        assert!(resolve("ftp://files.test/a.png").is_empty());
    }

    #[test]
    fn test_direct_url_is_singleton() {
        let url = "https://cdn.example.com/img/martillo.png";
        assert_eq!(resolve(url).as_slice(), [url]);
        assert_eq!(resolve("HTTP://EXAMPLE.COM/A.JPG").len(), 1);
    }

    #[test]
    fn test_custom_width() {
        let chain = ImageResolver::with_thumbnail_width(800).resolve("/d/abc/");
        assert_eq!(chain.get(2), Some("https://lh3.googleusercontent.com/d/abc=w800"));
    }
}

//! Image probing outside a browser.
//!
//! An [`ImageProbe`] stands in for the image element: it fetches one
//! candidate URL and reports its natural size. The drivers below feed those
//! answers into carousels the same way a presentation layer would, so the
//! fallback order can be checked against the real service.

use std::io::Cursor;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::Serialize;

use crate::carousel::CardCarouselController;
use crate::loader::{CardId, ImageDimensions, LoadOutcome, LoadState};

/// Why a candidate could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Not a decodable image: {0}")]
    Decode(String),
}

/// Loads one candidate URL.
#[async_trait]
pub trait ImageProbe: Send + Sync {
    async fn probe(&self, url: &str) -> Result<ImageDimensions, ProbeError>;
}

/// Probe that downloads the candidate and reads its dimensions.
#[derive(Debug, Clone)]
pub struct HttpImageProbe {
    http: reqwest::Client,
}

impl HttpImageProbe {
    /// Create a probe. `timeout` bounds each download; `None` waits forever,
    /// like a browser image element does.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ProbeError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
        })
    }
}

#[async_trait]
impl ImageProbe for HttpImageProbe {
    async fn probe(&self, url: &str) -> Result<ImageDimensions, ProbeError> {
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ProbeError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = resp.bytes().await?;
        let (width, height) = image::ImageReader::new(Cursor::new(bytes.as_ref()))
            .with_guessed_format()
            .map_err(|e| ProbeError::Decode(e.to_string()))?
            .into_dimensions()
            .map_err(|e| ProbeError::Decode(e.to_string()))?;

        Ok(ImageDimensions::new(width, height))
    }
}

/// One attempt made while probing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptRecord {
    pub position: usize,
    pub url: String,
    pub succeeded: bool,
}

/// Result of walking one image's variant chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageReport {
    pub card: CardId,
    pub image_index: usize,
    pub source: String,
    pub attempts: Vec<AttemptRecord>,
    pub state: LoadState,
}

impl ImageReport {
    /// Position of the variant that rendered, if any.
    pub fn winning_position(&self) -> Option<usize> {
        self.attempts
            .iter()
            .find(|a| a.succeeded)
            .map(|a| a.position)
    }
}

/// Run the carousel's current chain to a terminal state, one attempt at a
/// time.
pub async fn drive_current<P>(carousel: &mut CardCarouselController, probe: &P) -> ImageReport
where
    P: ImageProbe + ?Sized,
{
    let mut attempts = Vec::new();

    while let Some((ticket, url)) = carousel.pending_attempt() {
        let url = url.to_string();
        let outcome = match probe.probe(&url).await {
            Ok(dimensions) => LoadOutcome::Loaded(dimensions),
            Err(e) => {
                tracing::debug!(card = %ticket.card, position = ticket.position, error = %e, "probe failed");
                LoadOutcome::Failed
            }
        };
        attempts.push(AttemptRecord {
            position: ticket.position,
            url,
            succeeded: matches!(outcome, LoadOutcome::Loaded(_)),
        });
        carousel.on_outcome(ticket, outcome);
    }

    ImageReport {
        card: carousel.card(),
        image_index: carousel.image_index(),
        source: carousel
            .sources()
            .get(carousel.image_index())
            .cloned()
            .unwrap_or_default(),
        attempts,
        state: carousel.state(),
    }
}

/// Visit every image of a carousel in order and drive each chain.
pub async fn drive_all_images<P>(carousel: &mut CardCarouselController, probe: &P) -> Vec<ImageReport>
where
    P: ImageProbe + ?Sized,
{
    if carousel.source_count() == 0 {
        return vec![drive_current(carousel, probe).await];
    }

    let mut reports = Vec::with_capacity(carousel.source_count());
    for index in 0..carousel.source_count() {
        carousel.set_image_index(index as i64);
        reports.push(drive_current(carousel, probe).await);
    }
    reports
}

/// Probe many cards. Chains inside a card run sequentially; up to
/// `concurrency` cards run at once. Reports come back in card order.
pub async fn probe_cards<'a, P>(
    carousels: impl IntoIterator<Item = &'a mut CardCarouselController>,
    probe: &P,
    concurrency: usize,
) -> Vec<ImageReport>
where
    P: ImageProbe + ?Sized,
{
    let mut reports: Vec<ImageReport> = stream::iter(carousels)
        .map(|carousel| drive_all_images(carousel, probe))
        .buffer_unordered(concurrency.max(1))
        .flat_map(stream::iter)
        .collect()
        .await;

    reports.sort_by_key(|r| (r.card, r.image_index));
    reports
}

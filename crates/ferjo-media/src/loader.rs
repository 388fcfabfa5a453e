//! Variant fallback loading.
//!
//! A loader walks one [`VariantChain`] on one image surface: it asks the
//! presentation layer to load a candidate, waits for the outcome, and
//! moves to the next candidate on failure. Outcomes come back through
//! [`VariantFallbackLoader::on_outcome`] carrying the [`AttemptTicket`] they
//! were issued with; any ticket that is not the loader's current attempt is
//! ignored, so a late answer for an abandoned image cannot overwrite newer
//! state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resolver::VariantChain;

/// Identifies one rendered card.
///
/// `render` is the render pass the card belongs to; `slot` is its position
/// in that pass. A full re-render starts a new pass, so ids never repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId {
    pub render: u64,
    pub slot: usize,
}

impl CardId {
    pub fn new(render: u64, slot: usize) -> Self {
        Self { render, slot }
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.render, self.slot)
    }
}

/// Monotonic counter bumped every time a card switches images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stamp attached to every load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttemptTicket {
    pub card: CardId,
    pub generation: Generation,
    pub position: usize,
}

/// Natural size of a loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn orientation(&self) -> Orientation {
        if self.height > self.width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

/// Orientation class applied to the image box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn as_class(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// What happened to one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(ImageDimensions),
    Failed,
}

/// Loader state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadState {
    /// Waiting on the candidate at this position.
    Attempting(usize),
    /// A candidate rendered.
    Success(Orientation),
    /// Every candidate failed, or there were none.
    Exhausted,
}

impl LoadState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LoadState::Attempting(_))
    }
}

/// Instruction for the image surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SurfaceCommand {
    /// Load `url`; report the outcome with `ticket`.
    Load { ticket: AttemptTicket, url: String },
    /// Image rendered; set the orientation class.
    SetOrientation { orientation: Orientation },
    /// Show the placeholder and clear any orientation class.
    ShowPlaceholder,
}

/// Drives one surface through one variant chain.
#[derive(Debug, Clone)]
pub struct VariantFallbackLoader {
    card: CardId,
    generation: Generation,
    chain: VariantChain,
    state: LoadState,
    failures: usize,
}

impl VariantFallbackLoader {
    /// Start loading a chain. Returns the loader and the first command.
    pub fn start(card: CardId, generation: Generation, chain: VariantChain) -> (Self, SurfaceCommand) {
        let state = if chain.is_empty() {
            LoadState::Exhausted
        } else {
            LoadState::Attempting(0)
        };
        let loader = Self {
            card,
            generation,
            chain,
            state,
            failures: 0,
        };
        let command = loader.command_for_state();
        (loader, command)
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn chain(&self) -> &VariantChain {
        &self.chain
    }

    /// Failed attempts so far on this chain.
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// The attempt currently in flight, if any.
    pub fn pending_attempt(&self) -> Option<(AttemptTicket, &str)> {
        match self.state {
            LoadState::Attempting(position) => self
                .chain
                .get(position)
                .map(|url| (self.ticket(position), url)),
            _ => None,
        }
    }

    /// Check whether a ticket belongs to the attempt in flight.
    pub fn is_current(&self, ticket: &AttemptTicket) -> bool {
        ticket.card == self.card
            && ticket.generation == self.generation
            && self.state == LoadState::Attempting(ticket.position)
    }

    /// Feed an attempt outcome.
    ///
    /// Returns the next command, or `None` when the ticket is stale.
    pub fn on_outcome(&mut self, ticket: AttemptTicket, outcome: LoadOutcome) -> Option<SurfaceCommand> {
        if !self.is_current(&ticket) {
            tracing::trace!(
                card = %ticket.card,
                generation = %ticket.generation,
                position = ticket.position,
                "ignoring stale image outcome"
            );
            return None;
        }

        match outcome {
            LoadOutcome::Loaded(dimensions) => {
                self.state = LoadState::Success(dimensions.orientation());
            }
            LoadOutcome::Failed => {
                self.failures += 1;
                tracing::warn!(
                    card = %self.card,
                    position = ticket.position,
                    url = self.chain.get(ticket.position).unwrap_or_default(),
                    "image variant failed"
                );
                let next = ticket.position + 1;
                self.state = if next < self.chain.len() {
                    LoadState::Attempting(next)
                } else {
                    tracing::debug!(card = %self.card, candidates = self.chain.len(), "variant chain exhausted");
                    LoadState::Exhausted
                };
            }
        }

        Some(self.command_for_state())
    }

    fn ticket(&self, position: usize) -> AttemptTicket {
        AttemptTicket {
            card: self.card,
            generation: self.generation,
            position,
        }
    }

    fn command_for_state(&self) -> SurfaceCommand {
        match self.state {
            LoadState::Attempting(position) => match self.chain.get(position) {
                Some(url) => {
                    tracing::debug!(card = %self.card, position, url, "loading image variant");
                    SurfaceCommand::Load {
                        ticket: self.ticket(position),
                        url: url.to_string(),
                    }
                }
                None => SurfaceCommand::ShowPlaceholder,
            },
            LoadState::Success(orientation) => SurfaceCommand::SetOrientation { orientation },
            LoadState::Exhausted => SurfaceCommand::ShowPlaceholder,
        }
    }
}

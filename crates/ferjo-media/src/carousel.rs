//! Per-card image carousel.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::loader::{
    AttemptTicket, CardId, Generation, LoadOutcome, LoadState, SurfaceCommand,
    VariantFallbackLoader,
};
use crate::resolver::{ImageResolver, VariantChain};

/// One dot under the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    pub index: usize,
    pub active: bool,
}

/// Carousel navigation input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Navigation {
    Previous,
    Next,
    /// Indicator click; any integer is accepted and wrapped.
    Jump(i64),
}

/// Everything the surface needs after an image switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselUpdate {
    pub card: CardId,
    pub image_index: usize,
    pub controls_visible: bool,
    pub indicators: Vec<Indicator>,
    pub command: SurfaceCommand,
}

/// Owns one card's carousel state.
#[derive(Debug, Clone)]
pub struct CardCarouselController {
    card: CardId,
    sources: Vec<String>,
    resolver: Arc<ImageResolver>,
    image_index: usize,
    generation: Generation,
    loader: VariantFallbackLoader,
}

impl CardCarouselController {
    /// Create the carousel for a freshly rendered card and show its first
    /// image.
    ///
    /// Cards without image sources go straight to the placeholder and
    /// never touch the resolver.
    pub fn mount(
        card: CardId,
        sources: Vec<String>,
        resolver: Arc<ImageResolver>,
    ) -> (Self, CarouselUpdate) {
        let generation = Generation::default();
        let chain = match sources.first() {
            Some(first) => resolver.resolve(first),
            None => VariantChain::empty(),
        };
        let (loader, command) = VariantFallbackLoader::start(card, generation, chain);
        let controller = Self {
            card,
            sources,
            resolver,
            image_index: 0,
            generation,
            loader,
        };
        let update = controller.update(command);
        (controller, update)
    }

    /// Switch to image `index`, wrapped into range.
    ///
    /// Bumps the generation so outcomes for the previous image are
    /// dropped, then restarts the loader on the new chain. No-op for cards
    /// without sources.
    pub fn set_image_index(&mut self, index: i64) -> CarouselUpdate {
        let count = self.sources.len();
        if count == 0 {
            return self.update(SurfaceCommand::ShowPlaceholder);
        }

        self.image_index = index.rem_euclid(count as i64) as usize;
        self.generation = self.generation.next();
        let chain = self.resolver.resolve(&self.sources[self.image_index]);
        let (loader, command) = VariantFallbackLoader::start(self.card, self.generation, chain);
        self.loader = loader;

        tracing::debug!(
            card = %self.card,
            image_index = self.image_index,
            generation = %self.generation,
            "carousel image changed"
        );
        self.update(command)
    }

    pub fn next(&mut self) -> CarouselUpdate {
        self.set_image_index(self.image_index as i64 + 1)
    }

    pub fn previous(&mut self) -> CarouselUpdate {
        self.set_image_index(self.image_index as i64 - 1)
    }

    pub fn navigate(&mut self, navigation: Navigation) -> CarouselUpdate {
        match navigation {
            Navigation::Previous => self.previous(),
            Navigation::Next => self.next(),
            Navigation::Jump(index) => self.set_image_index(index),
        }
    }

    /// Feed an image-load outcome to the active loader.
    pub fn on_outcome(&mut self, ticket: AttemptTicket, outcome: LoadOutcome) -> Option<SurfaceCommand> {
        self.loader.on_outcome(ticket, outcome)
    }

    /// One indicator per source, the current one active.
    pub fn indicators(&self) -> Vec<Indicator> {
        (0..self.sources.len())
            .map(|index| Indicator {
                index,
                active: index == self.image_index,
            })
            .collect()
    }

    /// Prev/next and indicators are only shown for multi-image cards.
    pub fn controls_visible(&self) -> bool {
        self.sources.len() > 1
    }

    pub fn card(&self) -> CardId {
        self.card
    }

    pub fn image_index(&self) -> usize {
        self.image_index
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn state(&self) -> LoadState {
        self.loader.state()
    }

    pub fn loader(&self) -> &VariantFallbackLoader {
        &self.loader
    }

    pub fn current_chain(&self) -> &VariantChain {
        self.loader.chain()
    }

    /// Attempt in flight for the current image, if any.
    pub fn pending_attempt(&self) -> Option<(AttemptTicket, &str)> {
        self.loader.pending_attempt()
    }

    fn update(&self, command: SurfaceCommand) -> CarouselUpdate {
        CarouselUpdate {
            card: self.card,
            image_index: self.image_index,
            controls_visible: self.controls_visible(),
            indicators: self.indicators(),
            command,
        }
    }
}

//! Carousel states for every card in the grid.

use std::sync::Arc;

use crate::carousel::{CardCarouselController, CarouselUpdate, Navigation};
use crate::loader::{AttemptTicket, CardId, LoadOutcome, SurfaceCommand};
use crate::resolver::ImageResolver;

/// Arena of card carousels indexed by [`CardId`].
///
/// A rebuild drops every card and starts a new render pass; ids and
/// tickets from earlier passes no longer resolve to anything.
#[derive(Debug)]
pub struct CarouselArena {
    resolver: Arc<ImageResolver>,
    render: u64,
    cards: Vec<CardCarouselController>,
}

impl CarouselArena {
    pub fn new(resolver: ImageResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
            render: 0,
            cards: Vec::new(),
        }
    }

    /// Replace every card. One entry per card, each holding that card's
    /// image sources. Returns the initial update of each new card.
    pub fn rebuild<I, S>(&mut self, cards: I) -> Vec<CarouselUpdate>
    where
        I: IntoIterator<Item = Vec<S>>,
        S: Into<String>,
    {
        self.render += 1;
        self.cards.clear();

        let mut updates = Vec::new();
        for (slot, sources) in cards.into_iter().enumerate() {
            let sources = sources.into_iter().map(Into::into).collect();
            let (controller, update) = CardCarouselController::mount(
                CardId::new(self.render, slot),
                sources,
                Arc::clone(&self.resolver),
            );
            self.cards.push(controller);
            updates.push(update);
        }

        tracing::debug!(render = self.render, cards = self.cards.len(), "carousel arena rebuilt");
        updates
    }

    pub fn get(&self, card: CardId) -> Option<&CardCarouselController> {
        if card.render != self.render {
            return None;
        }
        self.cards.get(card.slot)
    }

    pub fn get_mut(&mut self, card: CardId) -> Option<&mut CardCarouselController> {
        if card.render != self.render {
            return None;
        }
        self.cards.get_mut(card.slot)
    }

    /// Prev/next/indicator input for a card of the current pass.
    pub fn navigate(&mut self, card: CardId, navigation: Navigation) -> Option<CarouselUpdate> {
        self.get_mut(card).map(|c| c.navigate(navigation))
    }

    /// Route an image-load outcome to its card.
    pub fn on_outcome(&mut self, ticket: AttemptTicket, outcome: LoadOutcome) -> Option<SurfaceCommand> {
        self.get_mut(ticket.card)?.on_outcome(ticket, outcome)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardCarouselController> {
        self.cards.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CardCarouselController> {
        self.cards.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn render_pass(&self) -> u64 {
        self.render
    }

    pub fn resolver(&self) -> &ImageResolver {
        &self.resolver
    }
}

impl Default for CarouselArena {
    fn default() -> Self {
        Self::new(ImageResolver::default())
    }
}

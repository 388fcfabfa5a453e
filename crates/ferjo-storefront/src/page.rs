//! Catalog page controller.

use std::time::Instant;

use ferjo_catalog::catalog::{CatalogStore, ProductRecord};
use ferjo_catalog::search::{CatalogFilterEngine, CategorySelection};
use ferjo_data::ProductSource;
use ferjo_media::{
    AttemptTicket, CardId, CarouselArena, ImageDimensions, LoadOutcome, Navigation,
};
use ferjo_observability::StructuredLogger;

use crate::config::StorefrontConfig;
use crate::error::StorefrontError;
use crate::view::{CardView, GridView};

/// Owns the catalog store, the filter inputs and every card carousel of one
/// page.
///
/// The store is written once by [`CatalogPage::load`]; the filter engine and
/// the renderer only read it. Every render replaces the whole grid and
/// starts a new carousel pass, so callbacks for cards of an earlier render
/// are ignored.
#[derive(Debug)]
pub struct CatalogPage {
    config: StorefrontConfig,
    logger: StructuredLogger,
    engine: CatalogFilterEngine,
    arena: CarouselArena,
    grid: GridView,
}

impl CatalogPage {
    pub fn new(config: StorefrontConfig, logger: StructuredLogger) -> Self {
        let engine = CatalogFilterEngine::new(CatalogStore::default())
            .with_stock_policy(config.stock_policy);
        let arena = CarouselArena::new(config.resolver());
        Self {
            config,
            logger,
            engine,
            arena,
            grid: GridView::default(),
        }
    }

    /// Initial load: fetch, store, render everything.
    ///
    /// On failure the grid is replaced by the user-facing message and the
    /// error is returned; there is no retry.
    pub async fn load<S>(&mut self, source: &S) -> Result<usize, StorefrontError>
    where
        S: ProductSource + ?Sized,
    {
        let started = Instant::now();
        match source.fetch_products().await {
            Ok(products) => {
                let count = products.len();
                self.install(products);
                self.logger
                    .info_builder("catalog loaded")
                    .field_i64("products", count as i64)
                    .field_i64("categories", self.categories().len() as i64)
                    .duration_ms("fetch_ms", started.elapsed())
                    .emit();
                Ok(count)
            }
            Err(e) => {
                self.logger
                    .error_builder("catalog load failed")
                    .field("error", e.to_string())
                    .field_bool("configuration", e.is_configuration())
                    .duration_ms("fetch_ms", started.elapsed())
                    .emit();
                self.grid = GridView::Error(e.user_message().to_string());
                Err(e.into())
            }
        }
    }

    /// Replace the store with `products` and render the current view.
    pub fn install(&mut self, products: Vec<ProductRecord>) {
        let criteria = self.engine.criteria().clone();
        self.engine = CatalogFilterEngine::new(CatalogStore::new(products))
            .with_stock_policy(self.config.stock_policy);
        self.engine.set_criteria(criteria);
        self.refresh();
    }

    /// Render exactly `products`, replacing the grid.
    pub fn render(&mut self, products: &[ProductRecord]) -> &[CardView] {
        let products: Vec<&ProductRecord> = products.iter().collect();
        let cards = render_cards(&mut self.arena, &self.config, &products);
        self.grid = GridView::Cards(cards);
        self.grid.cards()
    }

    /// Search box input.
    pub fn on_search_input(&mut self, raw: &str) -> &[CardView] {
        self.engine.set_query(raw);
        self.refresh()
    }

    /// Category selector change; `""` selects every category.
    pub fn on_category_change(&mut self, value: &str) -> &[CardView] {
        self.engine
            .set_category(CategorySelection::from_select_value(value));
        self.refresh()
    }

    /// Prev/next/indicator click on a card.
    pub fn on_navigate(&mut self, card: CardId, navigation: Navigation) -> Option<&CardView> {
        let update = self.arena.navigate(card, navigation)?;
        let view = self.grid.card_mut(card)?;
        view.apply_update(update, &self.config.placeholder);
        Some(&*view)
    }

    /// The image element finished loading.
    pub fn on_image_loaded(&mut self, ticket: AttemptTicket, dimensions: ImageDimensions) -> Option<&CardView> {
        self.on_outcome(ticket, LoadOutcome::Loaded(dimensions))
    }

    /// The image element failed to load.
    pub fn on_image_failed(&mut self, ticket: AttemptTicket) -> Option<&CardView> {
        let url = self
            .arena
            .get(ticket.card)
            .filter(|c| c.loader().is_current(&ticket))
            .and_then(|c| c.current_chain().get(ticket.position))
            .map(str::to_string);
        if let Some(url) = url {
            self.logger
                .debug_builder("image variant failed")
                .field("card", ticket.card.to_string())
                .field_i64("position", ticket.position as i64)
                .field("url", url)
                .emit();
        }
        self.on_outcome(ticket, LoadOutcome::Failed)
    }

    fn on_outcome(&mut self, ticket: AttemptTicket, outcome: LoadOutcome) -> Option<&CardView> {
        let command = self.arena.on_outcome(ticket, outcome)?;
        let view = self.grid.card_mut(ticket.card)?;
        view.apply_command(command, &self.config.placeholder);
        Some(&*view)
    }

    fn refresh(&mut self) -> &[CardView] {
        let view = self.engine.view();
        let cards = render_cards(&mut self.arena, &self.config, view.items());
        tracing::debug!(
            visible = view.len(),
            total = view.total(),
            query = self.engine.criteria().query(),
            category = %self.engine.criteria().category(),
            "grid rendered"
        );
        self.grid = GridView::Cards(cards);
        self.grid.cards()
    }

    /// Category options for the selector.
    pub fn categories(&self) -> &[String] {
        self.engine.store().categories()
    }

    pub fn grid(&self) -> &GridView {
        &self.grid
    }

    pub fn cards(&self) -> &[CardView] {
        self.grid.cards()
    }

    pub fn card(&self, card: CardId) -> Option<&CardView> {
        self.grid.cards().iter().find(|c| c.card == card)
    }

    pub fn store(&self) -> &CatalogStore {
        self.engine.store()
    }

    pub fn engine(&self) -> &CatalogFilterEngine {
        &self.engine
    }

    pub fn arena(&self) -> &CarouselArena {
        &self.arena
    }

    /// Carousels of the current grid, for out-of-page image probing.
    pub fn arena_mut(&mut self) -> &mut CarouselArena {
        &mut self.arena
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn logger(&self) -> &StructuredLogger {
        &self.logger
    }
}

fn render_cards(
    arena: &mut CarouselArena,
    config: &StorefrontConfig,
    products: &[&ProductRecord],
) -> Vec<CardView> {
    let updates = arena.rebuild(products.iter().map(|p| p.image_sources()));
    products
        .iter()
        .zip(updates)
        .map(|(product, update)| CardView::build(product, update, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ImageView;
    use ferjo_observability::{LogLevel, SessionId};

    fn page() -> CatalogPage {
        let logger = StructuredLogger::new(SessionId::from_string("test")).with_capture();
        CatalogPage::new(StorefrontConfig::default(), logger)
    }

    fn ticket_of(view: &CardView) -> AttemptTicket {
        view.image.ticket().expect("card should be loading")
    }

    #[test]
    fn test_render_is_total_and_idempotent() {
        let mut page = page();
        let products = vec![ProductRecord::default(), ProductRecord::new("Clavo")];

        let first: Vec<String> = page.render(&products).iter().map(|c| c.name.clone()).collect();
        let second: Vec<String> = page.render(&products).iter().map(|c| c.name.clone()).collect();

        assert_eq!(first, vec!["(Sin nombre)", "Clavo"]);
        assert_eq!(first, second);
        assert!(matches!(page.cards()[0].image, ImageView::Placeholder { .. }));
    }

    #[test]
    fn test_filters_rerender_grid() {
        let mut page = page();
        page.install(vec![
            ProductRecord::new("Martillo").with_category("Herramientas"),
            ProductRecord::new("Brocha").with_category("Pinturas"),
        ]);
        assert_eq!(page.categories(), ["Herramientas", "Pinturas"]);

        assert_eq!(page.on_search_input("  BRO ").len(), 1);
        assert_eq!(page.on_category_change("Herramientas").len(), 0);
        assert_eq!(page.on_search_input("").len(), 1);
        assert_eq!(page.on_category_change("").len(), 2);
    }

    #[test]
    fn test_callbacks_from_old_render_are_ignored() {
        let mut page = page();
        page.install(vec![ProductRecord::new("Brocha").with_image("/d/abc/")]);
        let stale = ticket_of(&page.cards()[0]);

        page.on_search_input("bro");
        assert!(page.on_image_failed(stale).is_none());
        assert!(page.on_navigate(stale.card, Navigation::Next).is_none());

        let current = ticket_of(&page.cards()[0]);
        assert_eq!(current.position, 0);
    }

    #[test]
    fn test_failure_advances_and_logs() {
        let mut page = page();
        page.install(vec![ProductRecord::new("Brocha").with_image("/d/abc/")]);
        let ticket = ticket_of(&page.cards()[0]);

        let view = page.on_image_failed(ticket).unwrap();
        assert_eq!(
            view.image.src(),
            "https://drive.google.com/uc?export=download&id=abc"
        );

        let entries = page.logger().captured();
        let failure = entries
            .iter()
            .find(|e| e.message == "image variant failed")
            .unwrap();
        assert_eq!(failure.level, LogLevel::Debug);
        assert_eq!(failure.fields["position"], 0);
    }

    #[test]
    fn test_loaded_sets_orientation() {
        let mut page = page();
        page.install(vec![ProductRecord::new("Brocha").with_image("https://cdn.test/b.png")]);
        let ticket = ticket_of(&page.cards()[0]);

        let view = page
            .on_image_loaded(ticket, ImageDimensions::new(300, 600))
            .unwrap();
        assert_eq!(view.image.src(), "https://cdn.test/b.png");
        assert_eq!(view.image.orientation().map(|o| o.as_class()), Some("portrait"));

        // A second outcome for the same ticket is no longer current.
        assert!(page.on_image_failed(ticket).is_none());
    }
}

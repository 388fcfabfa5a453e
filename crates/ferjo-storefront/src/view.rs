//! View models handed to the presentation layer.

use ferjo_catalog::catalog::ProductRecord;
use ferjo_media::{AttemptTicket, CardId, CarouselUpdate, Indicator, Orientation, SurfaceCommand};
use serde::Serialize;

use crate::config::StorefrontConfig;

/// What the card's image element should be showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ImageView {
    /// Loading `url`; report back with `ticket`.
    Loading { ticket: AttemptTicket, url: String },
    /// `url` rendered with this orientation class.
    Rendered { url: String, orientation: Orientation },
    /// Showing the placeholder.
    Placeholder { url: String },
}

impl ImageView {
    /// URL to put in the image element.
    pub fn src(&self) -> &str {
        match self {
            Self::Loading { url, .. } | Self::Rendered { url, .. } | Self::Placeholder { url } => url,
        }
    }

    pub fn orientation(&self) -> Option<Orientation> {
        match self {
            Self::Rendered { orientation, .. } => Some(*orientation),
            _ => None,
        }
    }

    pub fn ticket(&self) -> Option<AttemptTicket> {
        match self {
            Self::Loading { ticket, .. } => Some(*ticket),
            _ => None,
        }
    }
}

/// One product card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub card: CardId,
    pub name: String,
    pub code_text: String,
    pub price_text: String,
    pub stock_text: String,
    pub out_of_stock: bool,
    pub add_to_cart_enabled: bool,
    pub alt: String,
    pub category: String,
    pub image_index: usize,
    pub controls_visible: bool,
    pub indicators: Vec<Indicator>,
    pub image: ImageView,
}

impl CardView {
    /// Build the card for `product` from its carousel's first update.
    pub(crate) fn build(product: &ProductRecord, update: CarouselUpdate, config: &StorefrontConfig) -> Self {
        let stock = product.stock();
        let currency = product
            .currency
            .as_deref()
            .unwrap_or(&config.default_currency);

        let mut view = Self {
            card: update.card,
            name: product.display_name().to_string(),
            code_text: format!("Código: {}", product.display_code()),
            price_text: format!(
                "Precio: {}",
                ferjo_catalog::format_price(product.price, Some(currency))
            ),
            stock_text: stock.label(),
            out_of_stock: stock.is_out_of_stock(),
            add_to_cart_enabled: !stock.is_out_of_stock(),
            alt: product.display_name().to_string(),
            category: product.category().to_string(),
            image_index: 0,
            controls_visible: false,
            indicators: Vec::new(),
            image: ImageView::Placeholder {
                url: config.placeholder.clone(),
            },
        };
        view.apply_update(update, &config.placeholder);
        view
    }

    /// Apply a carousel update (mount or image switch).
    pub(crate) fn apply_update(&mut self, update: CarouselUpdate, placeholder: &str) {
        self.image_index = update.image_index;
        self.controls_visible = update.controls_visible;
        self.indicators = if update.controls_visible {
            update.indicators
        } else {
            Vec::new()
        };
        self.apply_command(update.command, placeholder);
    }

    /// Apply one image instruction.
    pub(crate) fn apply_command(&mut self, command: SurfaceCommand, placeholder: &str) {
        self.image = match command {
            SurfaceCommand::Load { ticket, url } => ImageView::Loading { ticket, url },
            SurfaceCommand::SetOrientation { orientation } => ImageView::Rendered {
                url: self.image.src().to_string(),
                orientation,
            },
            SurfaceCommand::ShowPlaceholder => ImageView::Placeholder {
                url: placeholder.to_string(),
            },
        };
    }

    /// Index of the active indicator, if indicators are shown.
    pub fn active_indicator(&self) -> Option<usize> {
        self.indicators.iter().find(|i| i.active).map(|i| i.index)
    }
}

/// The grid container's content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum GridView {
    Cards(Vec<CardView>),
    /// The catalog could not be loaded; the grid shows only this message.
    Error(String),
}

impl Default for GridView {
    fn default() -> Self {
        GridView::Cards(Vec::new())
    }
}

impl GridView {
    pub fn cards(&self) -> &[CardView] {
        match self {
            GridView::Cards(cards) => cards,
            GridView::Error(_) => &[],
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, GridView::Error(_))
    }

    pub(crate) fn card_mut(&mut self, card: CardId) -> Option<&mut CardView> {
        match self {
            GridView::Cards(cards) => cards.iter_mut().find(|c| c.card == card),
            GridView::Error(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferjo_media::{CardCarouselController, ImageResolver};
    use std::sync::Arc;

    fn mount(product: &ProductRecord) -> CardView {
        let sources = product.image_sources().into_iter().map(String::from).collect();
        let (_, update) = CardCarouselController::mount(
            CardId::new(1, 0),
            sources,
            Arc::new(ImageResolver::default()),
        );
        CardView::build(product, update, &StorefrontConfig::default())
    }

    #[test]
    fn test_card_texts() {
        let product = ProductRecord::new("Martillo")
            .with_code("A1")
            .with_price(1234.5)
            .with_quantity(5.0);
        let card = mount(&product);

        assert_eq!(card.name, "Martillo");
        assert_eq!(card.code_text, "Código: A1");
        assert_eq!(card.price_text, "Precio: Q1,234.50");
        assert_eq!(card.stock_text, "Stock: 5");
        assert!(card.add_to_cart_enabled);
        assert_eq!(card.alt, "Martillo");
    }

    #[test]
    fn test_empty_record_defaults() {
        let card = mount(&ProductRecord::default());

        assert_eq!(card.name, "(Sin nombre)");
        assert_eq!(card.code_text, "Código: -");
        assert_eq!(card.stock_text, "Sin stock");
        assert!(card.out_of_stock);
        assert!(!card.add_to_cart_enabled);
        assert_eq!(card.alt, "(Sin nombre)");
        assert_eq!(card.image.src(), crate::PLACEHOLDER_IMAGE);
        assert!(!card.controls_visible);
        assert!(card.indicators.is_empty());
    }

    #[test]
    fn test_rendered_keeps_loading_url() {
        let product = ProductRecord::new("Brocha").with_image("https://cdn.test/b.png");
        let mut card = mount(&product);
        assert_eq!(card.image.src(), "https://cdn.test/b.png");

        card.apply_command(
            SurfaceCommand::SetOrientation {
                orientation: Orientation::Landscape,
            },
            crate::PLACEHOLDER_IMAGE,
        );
        assert_eq!(card.image.src(), "https://cdn.test/b.png");
        assert_eq!(card.image.orientation(), Some(Orientation::Landscape));
    }
}

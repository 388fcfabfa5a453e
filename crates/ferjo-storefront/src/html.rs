//! Static HTML rendering of the grid.

use crate::view::{CardView, GridView};

/// Render the grid container's content.
pub fn render_grid_html(grid: &GridView) -> String {
    let content = match grid {
        GridView::Error(message) => format!(r#"<p class="error">{}</p>"#, html_escape(message)),
        GridView::Cards(cards) => cards
            .iter()
            .map(render_card_html)
            .collect(),
    };

    format!(r#"<section id="grid" class="grid">{}</section>"#, content)
}

/// Render one card.
pub fn render_card_html(card: &CardView) -> String {
    let orientation = card
        .image
        .orientation()
        .map(|o| format!(" {}", o.as_class()))
        .unwrap_or_default();

    // A static page cannot run the fallback chain; a loading card points at
    // its current candidate.
    let src = card.image.src();

    let nav_style = if card.controls_visible {
        "inline-flex"
    } else {
        "none"
    };

    let dots: String = card
        .indicators
        .iter()
        .map(|i| {
            if i.active {
                format!(r#"<span class="active" data-index="{}"></span>"#, i.index)
            } else {
                format!(r#"<span data-index="{}"></span>"#, i.index)
            }
        })
        .collect();

    format!(
        r#"<article class="card{}" data-card="{}">
    <div class="img{}">
        <img src="{}" alt="{}" loading="lazy">
        <button class="nav prev" style="display:{}">&#8249;</button>
        <button class="nav next" style="display:{}">&#8250;</button>
        <div class="dots">{}</div>
    </div>
    <h3 class="name">{}</h3>
    <p class="sku">{}</p>
    <p class="price">{}</p>
    <p class="stock">{}</p>
    <button class="btn-add-cart"{}>Agregar al carrito</button>
</article>"#,
        if card.out_of_stock { " out-of-stock" } else { "" },
        card.card,
        orientation,
        html_escape(src),
        html_escape(&card.alt),
        nav_style,
        nav_style,
        dots,
        html_escape(&card.name),
        html_escape(&card.code_text),
        html_escape(&card.price_text),
        html_escape(&card.stock_text),
        if card.add_to_cart_enabled { "" } else { " disabled" },
    )
}

/// Escape text for use in element content and quoted attributes.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

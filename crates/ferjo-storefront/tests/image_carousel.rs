//! Image fallback and carousel navigation through the page.

use ferjo_catalog::catalog::ProductRecord;
use ferjo_media::{AttemptTicket, ImageDimensions, LoadState, Navigation, Orientation};
use ferjo_observability::{SessionId, StructuredLogger};
use ferjo_storefront::{CardView, CatalogPage, ImageView, StorefrontConfig};

fn page_with(products: Vec<ProductRecord>) -> CatalogPage {
    let mut page = CatalogPage::new(
        StorefrontConfig::default(),
        StructuredLogger::new(SessionId::generate()).with_capture(),
    );
    page.install(products);
    page
}

fn loading(view: &CardView) -> AttemptTicket {
    match &view.image {
        ImageView::Loading { ticket, .. } => *ticket,
        other => panic!("expected a loading image, got {:?}", other),
    }
}

/// Fail every remaining attempt of the card's current image.
fn fail_all(page: &mut CatalogPage, view: &CardView) -> usize {
    let mut ticket = loading(view);
    let mut failures = 0;
    loop {
        failures += 1;
        let view = page.on_image_failed(ticket).unwrap().clone();
        match view.image {
            ImageView::Loading { ticket: next, .. } => ticket = next,
            ImageView::Placeholder { .. } => return failures,
            ImageView::Rendered { .. } => panic!("nothing should render"),
        }
    }
}

#[test]
fn test_third_source_wins_on_second_variant() {
    let mut page = page_with(vec![ProductRecord::new("Pala")
        .with_image("https://drive.google.com/file/d/one/view")
        .with_image("https://drive.google.com/open?id=two")
        .with_image("https://drive.google.com/uc?export=view&id=three")]);
    let card = page.cards()[0].card;

    let first = page.cards()[0].clone();
    assert_eq!(fail_all(&mut page, &first), 4);

    let second = page.on_navigate(card, Navigation::Next).unwrap().clone();
    assert_eq!(second.active_indicator(), Some(1));
    assert_eq!(fail_all(&mut page, &second), 4);

    let third = page.on_navigate(card, Navigation::Next).unwrap().clone();
    let ticket = loading(&third);
    let view = page.on_image_failed(ticket).unwrap().clone();
    assert_eq!(
        view.image.src(),
        "https://drive.google.com/uc?export=download&id=three"
    );

    let view = page
        .on_image_loaded(loading(&view), ImageDimensions::new(800, 600))
        .unwrap()
        .clone();
    assert_eq!(view.image.orientation(), Some(Orientation::Landscape));
    assert_eq!(view.image_index, 2);
    assert_eq!(view.active_indicator(), Some(2));

    let carousel = page.arena().get(card).unwrap();
    assert_eq!(carousel.state(), LoadState::Success(Orientation::Landscape));
}

#[test]
fn test_switching_image_discards_in_flight_attempt() {
    let mut page = page_with(vec![ProductRecord::new("Pala")
        .with_image("/d/one/")
        .with_image("/d/two/")]);
    let card = page.cards()[0].card;
    let stale = loading(&page.cards()[0]);

    page.on_navigate(card, Navigation::Jump(-1)).unwrap();
    assert!(page
        .on_image_loaded(stale, ImageDimensions::new(10, 10))
        .is_none());

    let view = page.card(card).unwrap();
    assert_eq!(view.image_index, 1);
    assert_eq!(
        view.image.src(),
        "https://drive.google.com/uc?export=view&id=two"
    );
}

#[test]
fn test_navigation_wraps_both_ways() {
    let mut page = page_with(vec![ProductRecord::new("Pala")
        .with_image("/d/a/")
        .with_image("/d/b/")
        .with_image("/d/c/")]);
    let card = page.cards()[0].card;

    assert_eq!(page.on_navigate(card, Navigation::Previous).unwrap().image_index, 2);
    assert_eq!(page.on_navigate(card, Navigation::Next).unwrap().image_index, 0);
    assert_eq!(page.on_navigate(card, Navigation::Jump(7)).unwrap().image_index, 1);
}

#[test]
fn test_cards_without_images_stay_on_placeholder() {
    let mut page = page_with(vec![ProductRecord::new("Pala"), ProductRecord::new("Balde").with_image("not a link")]);

    for view in page.cards().to_vec() {
        assert!(matches!(view.image, ImageView::Placeholder { .. }));
        assert!(!view.controls_visible);
        let after = page.on_navigate(view.card, Navigation::Next).unwrap();
        assert!(matches!(after.image, ImageView::Placeholder { .. }));
    }
}

#[test]
fn test_direct_url_has_single_attempt() {
    let mut page = page_with(vec![ProductRecord::new("Pala").with_image("https://cdn.test/p.jpg")]);
    let ticket = loading(&page.cards()[0]);

    let view = page.on_image_failed(ticket).unwrap();
    assert!(matches!(view.image, ImageView::Placeholder { .. }));
}

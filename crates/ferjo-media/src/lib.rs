//! Drive image resolution, variant fallback and card carousels.
//!
//! This crate provides:
//! - `ImageResolver` - Raw share links to ordered candidate URLs
//! - `VariantFallbackLoader` - Load/fail state machine over one chain
//! - `CardCarouselController` - Per-card image switching with generation tags
//! - `CarouselArena` - Carousel states for a whole grid, indexed by card
//! - `ImageProbe` - Out-of-browser image loading for diagnostics

mod arena;
mod carousel;
mod loader;
mod probe;
mod resolver;

pub use arena::*;
pub use carousel::*;
pub use loader::*;
pub use probe::*;
pub use resolver::*;

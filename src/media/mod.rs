pub mod carousel;
pub mod items;

pub use carousel::{Indicator, MediaCarousel, Render};
pub use items::{media_items, placeholder_for, MediaItem, MediaKind};

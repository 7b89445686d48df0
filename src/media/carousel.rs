use crate::error::{Error, Result};
use crate::media::items::{media_items, MediaItem, MediaKind};
use crate::models::Property;

/// What the presentation layer should draw for the current item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Render {
    Image {
        url: String,
        alt: String,
    },
    Video {
        url: String,
        controls: bool,
        inline: bool,
        preload_metadata: bool,
        allow_download: bool,
    },
}

/// One dot in the indicator row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    pub index: usize,
    pub kind: MediaKind,
    pub active: bool,
}

/// Cyclic cursor over one property's media.
///
/// The item list is fixed at construction and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaCarousel {
    title: String,
    items: Vec<MediaItem>,
    current: usize,
}

impl MediaCarousel {
    pub fn for_property(property: &Property) -> Self {
        Self {
            title: property.title.clone(),
            items: media_items(property),
            current: 0,
        }
    }

    /// Carousel over explicit items, using `fallback` when `items` is empty
    pub fn with_items(title: impl Into<String>, items: Vec<MediaItem>, fallback: MediaItem) -> Self {
        let items = if items.is_empty() { vec![fallback] } else { items };
        Self {
            title: title.into(),
            items,
            current: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &MediaItem {
        &self.items[self.current]
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn next(&mut self) {
        if self.len() > 1 {
            self.current = (self.current + 1) % self.len();
        }
    }

    pub fn previous(&mut self) {
        if self.len() > 1 {
            self.current = (self.current + self.len() - 1) % self.len();
        }
    }

    pub fn jump_to(&mut self, index: usize) -> Result<()> {
        if index >= self.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        self.current = index;
        Ok(())
    }

    /// Previous/next buttons only make sense with more than one item
    pub fn shows_controls(&self) -> bool {
        self.len() > 1
    }

    pub fn render(&self) -> Render {
        let item = self.current();
        match item.kind {
            MediaKind::Video => Render::Video {
                url: item.url.clone(),
                controls: true,
                inline: true,
                preload_metadata: true,
                allow_download: false,
            },
            MediaKind::Image => Render::Image {
                url: item.url.clone(),
                alt: format!("{} - Image {}", self.title, self.current + 1),
            },
        }
    }

    pub fn indicators(&self) -> Vec<Indicator> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| Indicator {
                index,
                kind: item.kind,
                active: index == self.current,
            })
            .collect()
    }
}

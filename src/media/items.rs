use crate::models::Property;
use serde::{Deserialize, Serialize};

/// Stock image for residential listings without media
pub const HOME_PLACEHOLDER: &str = "/assets/modern-home.jpg";
/// Stock image for every other listing without media
pub const LAND_PLACEHOLDER: &str = "/assets/land-plot.jpg";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaItem {
    pub kind: MediaKind,
    pub url: String,
}

impl MediaItem {
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Image,
            url: url.into(),
        }
    }

    pub fn video(url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Video,
            url: url.into(),
        }
    }

    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}

/// Placeholder image chosen by property type
pub fn placeholder_for(kind: &str) -> MediaItem {
    if kind == "Home" {
        MediaItem::image(HOME_PLACEHOLDER)
    } else {
        MediaItem::image(LAND_PLACEHOLDER)
    }
}

/// Images then videos, never empty
pub fn media_items(property: &Property) -> Vec<MediaItem> {
    let items: Vec<MediaItem> = property
        .display_images()
        .into_iter()
        .map(MediaItem::image)
        .chain(property.videos.iter().cloned().map(MediaItem::video))
        .collect();

    if items.is_empty() {
        vec![placeholder_for(&property.kind)]
    } else {
        items
    }
}

use crate::error::{Result, ValidationError};
use crate::models::{Property, PropertyRecord};
use serde::{Deserialize, Serialize};

/// Editable form state for one property
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PropertyDraft {
    pub title: String,
    pub location: String,
    pub price: String,
    pub area: String,
    pub kind: String,
    pub image_url: String,
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub badge: String,
    pub description: String,
    pub featured: bool,
}

impl PropertyDraft {
    /// Seed the form from an existing property.
    /// A legacy `image_url` becomes the gallery when the gallery is empty.
    pub fn from_property(property: &Property) -> Self {
        let images = if property.images.is_empty() {
            property.image_url.iter().cloned().collect()
        } else {
            property.images.clone()
        };

        Self {
            title: property.title.clone(),
            location: property.location.clone(),
            price: property.price.clone(),
            area: property.area.clone(),
            kind: property.kind.clone(),
            image_url: property.image_url.clone().unwrap_or_default(),
            images,
            videos: property.videos.clone(),
            badge: property.badge.clone().unwrap_or_default(),
            description: property.description.clone().unwrap_or_default(),
            featured: property.featured,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&'static str> = [
            ("title", &self.title),
            ("location", &self.location),
            ("price", &self.price),
            ("area", &self.area),
            ("type", &self.kind),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(missing).into())
        }
    }

    /// Row to write; the cover image is the first gallery image, else the legacy URL
    pub fn to_record(&self) -> PropertyRecord {
        let image_url = self
            .images
            .first()
            .cloned()
            .or_else(|| non_empty(&self.image_url));

        PropertyRecord {
            title: self.title.trim().to_string(),
            location: self.location.trim().to_string(),
            price: self.price.trim().to_string(),
            area: self.area.trim().to_string(),
            kind: self.kind.trim().to_string(),
            image_url,
            images: self.images.clone(),
            videos: self.videos.clone(),
            badge: non_empty(&self.badge),
            description: non_empty(&self.description),
            featured: self.featured,
        }
    }

    /// Drop the image at `index`; out-of-range indexes are ignored
    pub fn remove_image(&mut self, index: usize) {
        if index < self.images.len() {
            self.images.remove(index);
        }
    }

    pub fn remove_video(&mut self, index: usize) {
        if index < self.videos.len() {
            self.videos.remove(index);
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::fixtures::property;

    fn filled() -> PropertyDraft {
        PropertyDraft {
            title: "Lake Plot".to_string(),
            location: "Karur".to_string(),
            price: "₹12 Lakhs".to_string(),
            area: "2400 sq.ft".to_string(),
            kind: "Land".to_string(),
            ..PropertyDraft::default()
        }
    }

    #[test]
    fn required_fields_are_reported_together() {
        let draft = PropertyDraft {
            title: "Plot".to_string(),
            area: "  ".to_string(),
            ..PropertyDraft::default()
        };
        match draft.validate() {
            Err(Error::Validation(ValidationError::MissingFields(fields))) => {
                assert_eq!(fields, vec!["location", "price", "area", "type"]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(filled().validate().is_ok());
    }

    #[test]
    fn cover_image_prefers_gallery() {
        let mut draft = filled();
        draft.image_url = "legacy.jpg".to_string();
        assert_eq!(draft.to_record().image_url.as_deref(), Some("legacy.jpg"));

        draft.images = vec!["first.jpg".to_string(), "second.jpg".to_string()];
        assert_eq!(draft.to_record().image_url.as_deref(), Some("first.jpg"));

        let bare = filled();
        assert_eq!(bare.to_record().image_url, None);
    }

    #[test]
    fn blank_optional_fields_become_null() {
        let mut draft = filled();
        draft.badge = " ".to_string();
        draft.description = "Corner plot".to_string();

        let record = draft.to_record();
        assert_eq!(record.badge, None);
        assert_eq!(record.description.as_deref(), Some("Corner plot"));
    }

    #[test]
    fn editing_seeds_gallery_from_legacy_image() {
        let mut p = property("p1", "Lake Plot", "Karur", "Land");
        p.image_url = Some("legacy.jpg".to_string());
        p.badge = Some("New".to_string());

        let draft = PropertyDraft::from_property(&p);
        assert_eq!(draft.images, vec!["legacy.jpg".to_string()]);
        assert_eq!(draft.badge, "New");
        assert_eq!(draft.description, "");
        assert!(draft.featured);
    }

    #[test]
    fn removing_media_by_index() {
        let mut draft = filled();
        draft.images = vec!["a.jpg".to_string(), "b.jpg".to_string()];
        draft.videos = vec!["tour.mp4".to_string()];

        draft.remove_image(0);
        draft.remove_image(7);
        draft.remove_video(0);

        assert_eq!(draft.images, vec!["b.jpg".to_string()]);
        assert!(draft.videos.is_empty());
    }
}

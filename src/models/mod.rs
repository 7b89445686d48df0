use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel stored in `image_url` by older records that never had a real image
pub const PLACEHOLDER_IMAGE_URL: &str = "/placeholder.svg";

/// Core property listing as stored in the `properties` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub id: String,
    pub title: String,
    pub location: String,
    pub price: String,
    pub area: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub videos: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

impl Property {
    /// Legacy single image, ignoring the placeholder sentinel
    pub fn legacy_image(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .filter(|url| !url.is_empty() && *url != PLACEHOLDER_IMAGE_URL)
    }

    /// Images to display: the gallery, or the legacy image when the gallery is empty
    pub fn display_images(&self) -> Vec<String> {
        if !self.images.is_empty() {
            return self.images.clone();
        }
        self.legacy_image()
            .map(|url| vec![url.to_string()])
            .unwrap_or_default()
    }
}

/// Row written to the store on create/update
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PropertyRecord {
    pub title: String,
    pub location: String,
    pub price: String,
    pub area: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub image_url: Option<String>,
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub badge: Option<String>,
    pub description: Option<String>,
    pub featured: bool,
}

/// One recorded view of a property in the public catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewEvent {
    pub property_id: String,
}

/// Authenticated user as reported by the auth provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub access_token: String,
    pub is_admin: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

use crate::models::Property;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value the selectors use for "no restriction"
pub const ALL: &str = "all";

/// One facet selector: everything, or a single exact value
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum FacetFilter {
    #[default]
    All,
    Only(String),
}

impl FacetFilter {
    pub fn is_all(&self) -> bool {
        matches!(self, FacetFilter::All)
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            FacetFilter::All => true,
            FacetFilter::Only(wanted) => wanted == value,
        }
    }
}

impl From<&str> for FacetFilter {
    fn from(value: &str) -> Self {
        if value == ALL {
            FacetFilter::All
        } else {
            FacetFilter::Only(value.to_string())
        }
    }
}

impl From<Option<String>> for FacetFilter {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(FacetFilter::from).unwrap_or_default()
    }
}

impl fmt::Display for FacetFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetFilter::All => f.write_str(ALL),
            FacetFilter::Only(value) => f.write_str(value),
        }
    }
}

/// Search box plus the two facet selectors
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterState {
    pub search_text: String,
    pub type_filter: FacetFilter,
    pub location_filter: FacetFilter,
}

impl FilterState {
    pub fn new(
        search_text: impl Into<String>,
        type_filter: impl Into<FacetFilter>,
        location_filter: impl Into<FacetFilter>,
    ) -> Self {
        Self {
            search_text: search_text.into(),
            type_filter: type_filter.into(),
            location_filter: location_filter.into(),
        }
    }

    /// Whether the property passes all three conditions
    pub fn matches(&self, property: &Property) -> bool {
        self.matches_search(property)
            && self.type_filter.matches(&property.kind)
            && self.location_filter.matches(&property.location)
    }

    fn matches_search(&self, property: &Property) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        [
            property.title.as_str(),
            property.location.as_str(),
            property.description.as_deref().unwrap_or_default(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Properties passing the filter, in their original order
pub fn apply_filter<'a>(properties: &'a [Property], filter: &FilterState) -> Vec<&'a Property> {
    properties.iter().filter(|p| filter.matches(p)).collect()
}

pub fn has_active_filters(filter: &FilterState) -> bool {
    !filter.search_text.is_empty() || !filter.type_filter.is_all() || !filter.location_filter.is_all()
}

pub fn clear_filters() -> FilterState {
    FilterState::default()
}

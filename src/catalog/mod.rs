pub mod facets;
pub mod filter;
pub mod session;

pub use facets::{derive_facets, Facets};
pub use filter::{apply_filter, clear_filters, has_active_filters, FacetFilter, FilterState};
pub use session::CatalogSession;

use crate::models::Property;

/// Filtered catalog ready for display
#[derive(Debug)]
pub struct CatalogView<'a> {
    pub facets: Facets,
    pub visible: Vec<&'a Property>,
    pub total: usize,
    /// Offer the "clear filters" action
    pub can_clear: bool,
}

impl<'a> CatalogView<'a> {
    /// Recompute facets and the visible subset from a loaded catalog
    pub fn build(properties: &'a [Property], filter: &FilterState) -> Self {
        Self {
            facets: derive_facets(properties),
            visible: apply_filter(properties, filter),
            total: properties.len(),
            can_clear: has_active_filters(filter),
        }
    }

    pub fn summary(&self) -> String {
        format!("Showing {} of {} properties", self.visible.len(), self.total)
    }

    /// Message shown instead of the grid when nothing matches
    pub fn empty_message(&self) -> Option<&'static str> {
        self.visible
            .is_empty()
            .then_some("No properties found matching your criteria.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::property;

    #[test]
    fn view_summarises_filtered_catalog() {
        let properties = vec![
            property("p1", "Lake Plot", "Karur", "Land"),
            property("p2", "Modern Villa", "Chennai", "Home"),
        ];

        let view = CatalogView::build(&properties, &FilterState::new("villa", "all", "all"));
        assert_eq!(view.summary(), "Showing 1 of 2 properties");
        assert!(view.can_clear);
        assert_eq!(view.empty_message(), None);
        assert_eq!(view.facets.types, vec!["Land", "Home"]);
    }

    #[test]
    fn empty_result_offers_message() {
        let properties = vec![property("p1", "Lake Plot", "Karur", "Land")];
        let view = CatalogView::build(&properties, &FilterState::new("", "Home", "all"));
        assert!(view.visible.is_empty());
        assert!(view.empty_message().is_some());
    }
}

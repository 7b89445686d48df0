use serde::{Deserialize, Serialize};

/// Table holding the property listings
pub const PROPERTIES_TABLE: &str = "properties";
/// Table holding one row per recorded view
pub const VIEWS_TABLE: &str = "property_views";
/// Table mapping users to roles
pub const ROLES_TABLE: &str = "user_roles";

/// Selection parameters for property queries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PropertyQuery {
    /// Only rows with `featured = true`
    pub featured_only: bool,
    /// Newest first by `created_at`
    pub newest_first: bool,
}

impl PropertyQuery {
    /// Public catalog: featured listings, newest first
    pub fn featured() -> Self {
        Self {
            featured_only: true,
            newest_first: true,
        }
    }

    /// Admin listing: every property, newest first
    pub fn all() -> Self {
        Self {
            featured_only: false,
            newest_first: true,
        }
    }

    /// Query-string pairs in the record store's filter syntax
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("select", "*".to_string())];
        if self.featured_only {
            pairs.push(("featured", "eq.true".to_string()));
        }
        let direction = if self.newest_first { "desc" } else { "asc" };
        pairs.push(("order", format!("created_at.{}", direction)));
        pairs
    }
}

impl Default for PropertyQuery {
    fn default() -> Self {
        Self::featured()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn featured_query_filters_and_orders() {
        let pairs = PropertyQuery::featured().to_query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("select", "*".to_string()),
                ("featured", "eq.true".to_string()),
                ("order", "created_at.desc".to_string()),
            ]
        );
    }

    #[test]
    fn admin_query_skips_featured_filter() {
        let pairs = PropertyQuery::all().to_query_pairs();
        assert!(pairs.iter().all(|(key, _)| *key != "featured"));
        assert!(pairs.contains(&("order", "created_at.desc".to_string())));
    }
}

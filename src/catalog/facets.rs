use crate::models::Property;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Distinct selector values, in first-seen order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Facets {
    pub types: Vec<String>,
    pub locations: Vec<String>,
}

pub fn derive_facets(properties: &[Property]) -> Facets {
    Facets {
        types: distinct(properties.iter().map(|p| p.kind.as_str())),
        locations: distinct(properties.iter().map(|p| p.location.as_str())),
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .map(str::to_string)
        .collect()
}

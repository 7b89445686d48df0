use crate::backend::{PropertyQuery, RecordStore};
use crate::error::{Error, Result};
use crate::models::{Property, ViewEvent};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One visitor's browsing session over the public catalog.
///
/// Owns the set of property ids whose view has already been recorded, so
/// reloading the catalog never records the same property twice. Dropping
/// the session discards the set.
pub struct CatalogSession {
    store: Arc<dyn RecordStore>,
    recorded: HashSet<String>,
}

impl CatalogSession {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            recorded: HashSet::new(),
        }
    }

    /// Fetch featured properties, newest first, then record views for new ids.
    ///
    /// View recording is best effort: its failures are logged and never
    /// change the returned catalog.
    pub async fn load_catalog(&mut self) -> Result<Vec<Property>> {
        info!("Loading featured properties");

        let properties = self
            .store
            .select_properties(&PropertyQuery::featured())
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        info!("✅ Loaded {} featured properties", properties.len());

        self.record_views(&properties).await;
        Ok(properties)
    }

    /// Number of distinct properties recorded in this session
    pub fn recorded_count(&self) -> usize {
        self.recorded.len()
    }

    async fn record_views(&mut self, properties: &[Property]) {
        for property in properties {
            if !self.recorded.insert(property.id.clone()) {
                continue;
            }

            let event = ViewEvent {
                property_id: property.id.clone(),
            };
            match self.store.insert_view(&event).await {
                Ok(()) => debug!("Recorded view of {}", property.id),
                Err(e) => warn!("Failed to record view of {}: {}", property.id, e),
            }
        }
    }
}

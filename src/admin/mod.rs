pub mod draft;
pub mod upload;

pub use draft::PropertyDraft;
pub use upload::{upload_batch, MediaNamespace, UploadFailure, UploadFile, UploadReport};

use crate::auth::require_admin;
use crate::backend::{ObjectStorage, PropertyQuery, RecordStore};
use crate::error::Result;
use crate::models::{Property, Session, ViewEvent};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// One line of the admin property table
#[derive(Debug, Clone, PartialEq)]
pub struct AdminRow {
    pub property: Property,
    pub views: usize,
    /// Cover image, if any
    pub thumbnail: Option<String>,
    /// Gallery images beyond the cover
    pub extra_images: usize,
}

/// Property management for a signed-in admin
pub struct AdminPanel {
    session: Session,
    store: Arc<dyn RecordStore>,
    storage: Arc<dyn ObjectStorage>,
}

impl AdminPanel {
    /// Open the panel; anonymous users and non-admins are turned away
    pub fn open(
        session: Option<Session>,
        store: Arc<dyn RecordStore>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Result<Self> {
        let session = require_admin(session.as_ref())?.clone();
        info!("Admin panel opened by {}", session.email);

        Ok(Self {
            session,
            store,
            storage,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Every property, featured or not, newest first
    pub async fn list_properties(&self) -> Result<Vec<Property>> {
        self.store.select_properties(&PropertyQuery::all()).await
    }

    pub async fn view_counts(&self) -> Result<HashMap<String, usize>> {
        let views = self.store.select_views().await?;
        Ok(count_views(&views))
    }

    /// Properties joined with their view counts; counts read as 0 when views can't be loaded
    pub async fn overview(&self) -> Result<Vec<AdminRow>> {
        let properties = self.list_properties().await?;
        let counts = match self.view_counts().await {
            Ok(counts) => counts,
            Err(e) => {
                warn!("Failed to load view counts: {}", e);
                HashMap::new()
            }
        };

        Ok(properties
            .into_iter()
            .map(|property| {
                let thumbnail = property
                    .images
                    .first()
                    .cloned()
                    .or_else(|| property.image_url.clone().filter(|url| !url.is_empty()));
                AdminRow {
                    views: counts.get(&property.id).copied().unwrap_or(0),
                    extra_images: property.images.len().saturating_sub(1),
                    thumbnail,
                    property,
                }
            })
            .collect())
    }

    pub async fn create(&self, draft: &PropertyDraft) -> Result<()> {
        draft.validate()?;
        self.store.insert_property(&draft.to_record()).await
    }

    pub async fn update(&self, id: &str, draft: &PropertyDraft) -> Result<()> {
        draft.validate()?;
        self.store.update_property(id, &draft.to_record()).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete_property(id).await
    }

    /// Upload files into a namespace without attaching them to a property
    pub async fn upload(&self, namespace: MediaNamespace, files: Vec<UploadFile>) -> UploadReport {
        upload_batch(self.storage.as_ref(), namespace, files).await
    }

    /// Upload images and append the stored URLs to the draft's gallery
    pub async fn upload_images(&self, draft: &mut PropertyDraft, files: Vec<UploadFile>) -> UploadReport {
        let report = self.upload(MediaNamespace::Images, files).await;
        draft.images.extend(report.uploaded.iter().cloned());
        report
    }

    pub async fn upload_videos(&self, draft: &mut PropertyDraft, files: Vec<UploadFile>) -> UploadReport {
        let report = self.upload(MediaNamespace::Videos, files).await;
        draft.videos.extend(report.uploaded.iter().cloned());
        report
    }
}

/// Views per property id
pub fn count_views(views: &[ViewEvent]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for view in views {
        *counts.entry(view.property_id.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::error::{Error, ValidationError};
    use crate::models::fixtures::property;
    use crate::models::PropertyRecord;
    use async_trait::async_trait;

    /// Store whose view table can't be read
    struct ViewlessStore(MemoryBackend);

    #[async_trait]
    impl RecordStore for ViewlessStore {
        async fn select_properties(&self, query: &PropertyQuery) -> Result<Vec<Property>> {
            self.0.select_properties(query).await
        }

        async fn insert_property(&self, record: &PropertyRecord) -> Result<()> {
            self.0.insert_property(record).await
        }

        async fn update_property(&self, id: &str, record: &PropertyRecord) -> Result<()> {
            self.0.update_property(id, record).await
        }

        async fn delete_property(&self, id: &str) -> Result<()> {
            self.0.delete_property(id).await
        }

        async fn insert_view(&self, event: &ViewEvent) -> Result<()> {
            self.0.insert_view(event).await
        }

        async fn select_views(&self) -> Result<Vec<ViewEvent>> {
            Err(Error::Store {
                status: 500,
                message: "views down".to_string(),
            })
        }
    }

    fn admin() -> Session {
        Session {
            user_id: "u1".to_string(),
            email: "admin@example.com".to_string(),
            access_token: "token".to_string(),
            is_admin: true,
        }
    }

    fn panel(backend: &Arc<MemoryBackend>) -> AdminPanel {
        AdminPanel::open(Some(admin()), backend.clone(), backend.clone()).unwrap()
    }

    fn draft(title: &str) -> PropertyDraft {
        PropertyDraft {
            title: title.to_string(),
            location: "Karur".to_string(),
            price: "₹12 Lakhs".to_string(),
            area: "2400 sq.ft".to_string(),
            kind: "Land".to_string(),
            ..PropertyDraft::default()
        }
    }

    #[test]
    fn refuses_non_admins() {
        let backend = Arc::new(MemoryBackend::new());
        let mut visitor = admin();
        visitor.is_admin = false;

        assert!(matches!(
            AdminPanel::open(None, backend.clone(), backend.clone()),
            Err(Error::AccessDenied(_))
        ));
        assert!(matches!(
            AdminPanel::open(Some(visitor), backend.clone(), backend.clone()),
            Err(Error::AccessDenied(_))
        ));
    }

    #[tokio::test]
    async fn create_update_delete_roundtrip() {
        let backend = Arc::new(MemoryBackend::new());
        let panel = panel(&backend);

        panel.create(&draft("Lake Plot")).await.unwrap();
        let listed = panel.list_properties().await.unwrap();
        assert_eq!(listed.len(), 1);
        let id = listed[0].id.clone();

        let mut edit = PropertyDraft::from_property(&listed[0]);
        edit.featured = true;
        edit.images = vec!["cover.jpg".to_string()];
        panel.update(&id, &edit).await.unwrap();

        let stored = backend.properties().await;
        let updated = &stored[0];
        assert!(updated.featured);
        assert_eq!(updated.image_url.as_deref(), Some("cover.jpg"));

        panel.delete(&id).await.unwrap();
        assert!(panel.list_properties().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_draft_is_not_written() {
        let backend = Arc::new(MemoryBackend::new());
        let panel = panel(&backend);

        let result = panel.create(&PropertyDraft::default()).await;
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::MissingFields(_)))
        ));
        assert!(backend.properties().await.is_empty());
    }

    #[tokio::test]
    async fn overview_joins_view_counts() {
        let mut plot = property("p1", "Lake Plot", "Karur", "Land");
        plot.images = vec!["a.jpg".to_string(), "b.jpg".to_string(), "c.jpg".to_string()];
        let mut villa = property("p2", "Villa", "Chennai", "Home");
        villa.image_url = Some("legacy.jpg".to_string());
        let backend = Arc::new(MemoryBackend::with_properties(vec![plot, villa]));

        for id in ["p1", "p1", "p2"] {
            backend
                .insert_view(&ViewEvent { property_id: id.to_string() })
                .await
                .unwrap();
        }

        let rows = panel(&backend).overview().await.unwrap();
        let plot_row = rows.iter().find(|r| r.property.id == "p1").unwrap();
        assert_eq!(plot_row.views, 2);
        assert_eq!(plot_row.extra_images, 2);
        assert_eq!(plot_row.thumbnail.as_deref(), Some("a.jpg"));

        let villa_row = rows.iter().find(|r| r.property.id == "p2").unwrap();
        assert_eq!(villa_row.views, 1);
        assert_eq!(villa_row.thumbnail.as_deref(), Some("legacy.jpg"));
    }

    #[tokio::test]
    async fn overview_survives_unreadable_views() {
        let store = Arc::new(ViewlessStore(MemoryBackend::with_properties(vec![
            property("p1", "Lake Plot", "Karur", "Land"),
            property("p2", "Villa", "Chennai", "Home"),
        ])));
        let storage = Arc::new(MemoryBackend::new());
        let panel = AdminPanel::open(Some(admin()), store, storage).unwrap();

        assert!(panel.view_counts().await.is_err());

        let rows = panel.overview().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.views == 0));
    }

    #[tokio::test]
    async fn standalone_upload_returns_urls() {
        let backend = Arc::new(MemoryBackend::new());
        let report = panel(&backend)
            .upload(
                MediaNamespace::Videos,
                vec![
                    UploadFile::new("tour.mp4", "video/mp4", vec![1]),
                    UploadFile::new("cover.jpg", "image/jpeg", vec![1]),
                ],
            )
            .await;

        assert_eq!((report.succeeded(), report.failed()), (1, 1));
        assert!(report.uploaded[0].contains("property-videos/"));
        assert_eq!(backend.stored_paths().await.len(), 1);
    }

    #[tokio::test]
    async fn uploads_extend_the_draft() {
        let backend = Arc::new(MemoryBackend::new());
        let panel = panel(&backend);
        let mut form = draft("Lake Plot");
        form.images = vec!["existing.jpg".to_string()];

        let report = panel
            .upload_images(
                &mut form,
                vec![
                    UploadFile::new("new.jpg", "image/jpeg", vec![1, 2, 3]),
                    UploadFile::new("clip.mp4", "video/mp4", vec![1]),
                ],
            )
            .await;
        assert_eq!(report.succeeded(), 1);
        assert_eq!(form.images.len(), 2);
        assert_eq!(form.images[0], "existing.jpg");

        let report = panel
            .upload_videos(&mut form, vec![UploadFile::new("clip.mp4", "video/mp4", vec![1])])
            .await;
        assert_eq!(report.succeeded(), 1);
        assert_eq!(form.videos.len(), 1);
    }

    #[test]
    fn counts_views_per_property() {
        let views = vec![
            ViewEvent { property_id: "a".to_string() },
            ViewEvent { property_id: "b".to_string() },
            ViewEvent { property_id: "a".to_string() },
        ];
        let counts = count_views(&views);
        assert_eq!(counts.get("a"), Some(&2));
        assert_eq!(counts.get("b"), Some(&1));
        assert_eq!(counts.get("c"), None);
    }
}

use crate::auth::Credentials;
use crate::backend::traits::{AuthProvider, ObjectStorage, RecordStore};
use crate::backend::types::PropertyQuery;
use crate::error::{Error, Result};
use crate::models::{Property, PropertyRecord, Session, ViewEvent};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

/// In-process backend used for demo runs and tests
#[derive(Default)]
pub struct MemoryBackend {
    properties: Mutex<Vec<Property>>,
    views: Mutex<Vec<ViewEvent>>,
    objects: Mutex<Vec<(String, String, usize)>>,
    accounts: Mutex<Vec<(Credentials, bool)>>,
    sessions: Mutex<HashMap<String, Session>>,
    unavailable: AtomicBool,
    views_unavailable: AtomicBool,
    failing_content_types: Mutex<HashSet<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_properties(properties: Vec<Property>) -> Self {
        Self {
            properties: Mutex::new(properties),
            ..Self::default()
        }
    }

    /// Register an account the backend will accept at sign-in
    pub fn with_account(mut self, credentials: Credentials, is_admin: bool) -> Self {
        self.accounts.get_mut().push((credentials, is_admin));
        self
    }

    /// Make every record-store call fail as if the backend were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Make view inserts fail while the rest of the store keeps working
    pub fn set_views_unavailable(&self, unavailable: bool) {
        self.views_unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Reject uploads of the given content type
    pub async fn fail_uploads_of(&self, content_type: &str) {
        self.failing_content_types
            .lock()
            .await
            .insert(content_type.to_string());
    }

    pub async fn recorded_views(&self) -> Vec<ViewEvent> {
        self.views.lock().await.clone()
    }

    /// Paths of every stored object, in upload order
    pub async fn stored_paths(&self) -> Vec<String> {
        self.objects
            .lock()
            .await
            .iter()
            .map(|(path, _, _)| path.clone())
            .collect()
    }

    pub async fn properties(&self) -> Vec<Property> {
        self.properties.lock().await.clone()
    }

    fn ensure_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::Store {
                status: 503,
                message: "service unavailable".to_string(),
            });
        }
        Ok(())
    }

    /// Sample listings for demo runs without a backend
    pub fn demo() -> Self {
        info!("📋 Using built-in demo listings");

        let now = Utc::now();
        let listing = |id: &str, title: &str, location: &str, kind: &str, age_days: i64| Property {
            id: id.to_string(),
            title: title.to_string(),
            location: location.to_string(),
            price: String::new(),
            area: String::new(),
            kind: kind.to_string(),
            images: vec![],
            videos: vec![],
            image_url: None,
            badge: None,
            description: None,
            featured: true,
            created_at: now - Duration::days(age_days),
        };

        let mut lake = listing("demo-1", "Lake View Plot", "Karur", "Land", 1);
        lake.price = "₹12 Lakhs".to_string();
        lake.area = "2400 sq.ft".to_string();
        lake.badge = Some("New".to_string());
        lake.description = Some("DTCP approved plot facing the lake, road access on two sides.".to_string());
        lake.images = vec![
            "https://images.example.com/lake-plot-1.jpg".to_string(),
            "https://images.example.com/lake-plot-2.jpg".to_string(),
        ];
        lake.videos = vec!["https://videos.example.com/lake-plot-walkthrough.mp4".to_string()];

        let mut villa = listing("demo-2", "Modern Villa", "Chennai", "Home", 3);
        villa.price = "₹85 Lakhs".to_string();
        villa.area = "1800 sq.ft".to_string();
        villa.description = Some("3 BHK villa with garden and covered parking.".to_string());
        villa.image_url = Some("https://images.example.com/villa.jpg".to_string());

        let mut commercial = listing("demo-3", "Highway Commercial Site", "Karur", "Commercial", 7);
        commercial.price = "₹1.2 Crore".to_string();
        commercial.area = "0.5 acre".to_string();
        commercial.badge = Some("Hot Deal".to_string());

        let mut farm = listing("demo-4", "Farm Land", "Trichy", "Land", 10);
        farm.price = "₹30 Lakhs".to_string();
        farm.area = "2 acres".to_string();
        farm.featured = false;

        Self::with_properties(vec![lake, villa, commercial, farm])
    }
}

#[async_trait]
impl RecordStore for MemoryBackend {
    async fn select_properties(&self, query: &PropertyQuery) -> Result<Vec<Property>> {
        self.ensure_available()?;

        let mut selected: Vec<Property> = self
            .properties
            .lock()
            .await
            .iter()
            .filter(|p| !query.featured_only || p.featured)
            .cloned()
            .collect();
        if query.newest_first {
            selected.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        } else {
            selected.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        }
        Ok(selected)
    }

    async fn insert_property(&self, record: &PropertyRecord) -> Result<()> {
        self.ensure_available()?;

        self.properties.lock().await.push(Property {
            id: Uuid::new_v4().to_string(),
            title: record.title.clone(),
            location: record.location.clone(),
            price: record.price.clone(),
            area: record.area.clone(),
            kind: record.kind.clone(),
            images: record.images.clone(),
            videos: record.videos.clone(),
            image_url: record.image_url.clone(),
            badge: record.badge.clone(),
            description: record.description.clone(),
            featured: record.featured,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn update_property(&self, id: &str, record: &PropertyRecord) -> Result<()> {
        self.ensure_available()?;

        let mut properties = self.properties.lock().await;
        if let Some(p) = properties.iter_mut().find(|p| p.id == id) {
            p.title = record.title.clone();
            p.location = record.location.clone();
            p.price = record.price.clone();
            p.area = record.area.clone();
            p.kind = record.kind.clone();
            p.images = record.images.clone();
            p.videos = record.videos.clone();
            p.image_url = record.image_url.clone();
            p.badge = record.badge.clone();
            p.description = record.description.clone();
            p.featured = record.featured;
        }
        Ok(())
    }

    async fn delete_property(&self, id: &str) -> Result<()> {
        self.ensure_available()?;
        self.properties.lock().await.retain(|p| p.id != id);
        Ok(())
    }

    async fn insert_view(&self, event: &ViewEvent) -> Result<()> {
        self.ensure_available()?;
        if self.views_unavailable.load(Ordering::SeqCst) {
            return Err(Error::Store {
                status: 500,
                message: "views table unavailable".to_string(),
            });
        }
        self.views.lock().await.push(event.clone());
        Ok(())
    }

    async fn select_views(&self) -> Result<Vec<ViewEvent>> {
        self.ensure_available()?;
        Ok(self.views.lock().await.clone())
    }
}

#[async_trait]
impl ObjectStorage for MemoryBackend {
    async fn upload(&self, path: &str, content_type: &str, bytes: Vec<u8>) -> Result<()> {
        if self.failing_content_types.lock().await.contains(content_type) {
            return Err(Error::Store {
                status: 400,
                message: format!("{} uploads are rejected", content_type),
            });
        }
        self.objects
            .lock()
            .await
            .push((path.to_string(), content_type.to_string(), bytes.len()));
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("memory://properties/{}", path)
    }
}

#[async_trait]
impl AuthProvider for MemoryBackend {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session> {
        let accounts = self.accounts.lock().await;
        let (_, is_admin) = accounts
            .iter()
            .find(|(known, _)| known == credentials)
            .ok_or_else(|| Error::Store {
                status: 400,
                message: "Invalid login credentials".to_string(),
            })?;

        let session = Session {
            user_id: format!("user-{}", credentials.email),
            email: credentials.email.clone(),
            access_token: Uuid::new_v4().to_string(),
            is_admin: *is_admin,
        };
        self.sessions
            .lock()
            .await
            .insert(session.access_token.clone(), session.clone());
        Ok(session)
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<()> {
        let mut accounts = self.accounts.lock().await;
        if accounts.iter().any(|(known, _)| known.email == credentials.email) {
            return Err(Error::Store {
                status: 422,
                message: "User already registered".to_string(),
            });
        }
        accounts.push((credentials.clone(), false));
        Ok(())
    }

    async fn sign_out(&self, session: &Session) -> Result<()> {
        self.sessions.lock().await.remove(&session.access_token);
        Ok(())
    }

    async fn current_session(&self, access_token: &str) -> Result<Option<Session>> {
        Ok(self.sessions.lock().await.get(access_token).cloned())
    }
}

use crate::auth::Credentials;
use crate::backend::types::PropertyQuery;
use crate::error::Result;
use crate::models::{Property, PropertyRecord, Session, ViewEvent};
use async_trait::async_trait;

/// Table access for properties and their view events
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Select properties matching the query, in the query's order
    async fn select_properties(&self, query: &PropertyQuery) -> Result<Vec<Property>>;

    async fn insert_property(&self, record: &PropertyRecord) -> Result<()>;

    async fn update_property(&self, id: &str, record: &PropertyRecord) -> Result<()>;

    async fn delete_property(&self, id: &str) -> Result<()>;

    /// Record one view of a property
    async fn insert_view(&self, event: &ViewEvent) -> Result<()>;

    /// Every recorded view event
    async fn select_views(&self) -> Result<Vec<ViewEvent>>;
}

/// Binary uploads addressed by a path inside the storage bucket
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(&self, path: &str, content_type: &str, bytes: Vec<u8>) -> Result<()>;

    /// Public URL the object is served from once uploaded
    fn public_url(&self, path: &str) -> String;
}

/// Sign-in and account management
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session>;

    async fn sign_up(&self, credentials: &Credentials) -> Result<()>;

    async fn sign_out(&self, session: &Session) -> Result<()>;

    /// Resolve an access token to its session, or `None` once it is no longer valid
    async fn current_session(&self, access_token: &str) -> Result<Option<Session>>;
}

//! Selection store adapter.
//!
//! CRUD facade over the remote record store that persists each user's
//! selected destinations. The store is addressed by the composite key
//! `(user, waypoint name)` and keeps at most one record per pair - the
//! selection is a set, not a multiset.
//!
//! The adapter does not cache; the synchronizer owns the only local cache.

use crate::error::{PlanError, Result};
use crate::{Category, GeoPoint, Waypoint};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use tokio::sync::Mutex;

/// Opaque authenticated user handle supplied by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted form of a [`Waypoint`] plus its owning user.
///
/// `created_at` is assigned by the store on insert (RFC 3339) and drives
/// the retrieval order of [`SelectionStore::list_selections`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRecord {
    pub user_id: UserId,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub image: Option<String>,
    pub rating: f64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl SelectionRecord {
    /// Build the persisted form of a waypoint for a user.
    pub fn from_waypoint(user: &UserId, waypoint: &Waypoint) -> Self {
        Self {
            user_id: user.clone(),
            name: waypoint.name.clone(),
            category: waypoint.category,
            description: waypoint.description.clone(),
            image: waypoint.image.clone(),
            rating: waypoint.rating,
            latitude: waypoint.position.latitude,
            longitude: waypoint.position.longitude,
            created_at: None,
        }
    }

    /// Recover the waypoint carried by this record.
    pub fn into_waypoint(self) -> Waypoint {
        Waypoint {
            name: self.name,
            category: self.category,
            position: GeoPoint::new(self.latitude, self.longitude),
            rating: self.rating,
            description: self.description,
            image: self.image,
        }
    }
}

/// Async CRUD contract against the selection record store.
///
/// Futures are `Send` so callers may drive operations from spawned tasks.
/// Implementations must preserve insertion order in `list_selections` and
/// must not perform side effects beyond the remote store.
pub trait SelectionStore: Send + Sync {
    /// All selections for a user, in insertion order. An unknown user has
    /// an empty selection, never an error.
    fn list_selections(
        &self,
        user: &UserId,
    ) -> impl Future<Output = Result<Vec<SelectionRecord>>> + Send;

    /// Insert a selection record. Fails with [`PlanError::AlreadyExists`]
    /// when the (user, name) pair is already present.
    fn add_selection(&self, record: SelectionRecord) -> impl Future<Output = Result<()>> + Send;

    /// Delete a selection by composite key. Fails with
    /// [`PlanError::NotFound`] when no such record exists.
    fn remove_selection(
        &self,
        user: &UserId,
        name: &str,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Stores shared across surfaces (several pages toggling against the same
/// records) can be handed around as `Arc<S>`.
impl<S: SelectionStore> SelectionStore for std::sync::Arc<S> {
    async fn list_selections(&self, user: &UserId) -> Result<Vec<SelectionRecord>> {
        (**self).list_selections(user).await
    }

    async fn add_selection(&self, record: SelectionRecord) -> Result<()> {
        (**self).add_selection(record).await
    }

    async fn remove_selection(&self, user: &UserId, name: &str) -> Result<()> {
        (**self).remove_selection(user, name).await
    }
}

/// In-process selection store.
///
/// Backs tests and offline sessions with the same contract as the remote
/// store: per-user record lists in insertion order, one record per
/// (user, name) pair.
#[derive(Debug, Default)]
pub struct MemorySelectionStore {
    rows: Mutex<HashMap<UserId, Vec<SelectionRecord>>>,
}

impl MemorySelectionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionStore for MemorySelectionStore {
    async fn list_selections(&self, user: &UserId) -> Result<Vec<SelectionRecord>> {
        let rows = self.rows.lock().await;
        Ok(rows.get(user).cloned().unwrap_or_default())
    }

    async fn add_selection(&self, mut record: SelectionRecord) -> Result<()> {
        let mut rows = self.rows.lock().await;
        let list = rows.entry(record.user_id.clone()).or_default();
        if list.iter().any(|r| r.name == record.name) {
            return Err(PlanError::AlreadyExists {
                name: record.name,
            });
        }
        if record.created_at.is_none() {
            record.created_at = Some(chrono::Utc::now().to_rfc3339());
        }
        list.push(record);
        Ok(())
    }

    async fn remove_selection(&self, user: &UserId, name: &str) -> Result<()> {
        let mut rows = self.rows.lock().await;
        let list = rows.entry(user.clone()).or_default();
        let before = list.len();
        list.retain(|r| r.name != name);
        if list.len() == before {
            return Err(PlanError::NotFound {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

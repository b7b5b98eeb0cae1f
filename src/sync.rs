//! Selection synchronizer.
//!
//! Reconciles the in-memory selection state with the selection store and
//! exposes a single idempotent operation: [`Synchronizer::toggle`]. Two
//! consecutive toggles of the same waypoint return the set to its original
//! state, and from the caller's point of view a waypoint is always in
//! exactly one of {selected, not-selected}.
//!
//! The local cache is the only shared mutable state in the crate and is
//! mutated exclusively here. Toggles are optimistic: the cache is updated
//! before the store call settles and rolled back if it ultimately fails,
//! so cache reads reflect the intended state while requests are in flight.
//!
//! Toggles against the same (user, waypoint) key are serialized through a
//! per-key async lock so a rapid double-click cannot lose an update;
//! toggles against distinct keys proceed concurrently. A per-key sequence
//! token additionally guards rollbacks: a failure observed after a newer
//! toggle has already re-applied the key leaves the newer state intact.

use crate::error::{PlanError, Result};
use crate::store::{SelectionRecord, SelectionStore, UserId};
use crate::Waypoint;
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Mutex as KeyLock;

/// Outcome of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The waypoint was added to the selection.
    Added,
    /// The waypoint was removed from the selection.
    Removed,
}

/// Cached selection state for one user.
#[derive(Debug, Default)]
struct UserCache {
    /// Selected waypoints in insertion order.
    selected: Vec<Waypoint>,
    /// Per-waypoint sequence tokens, bumped on every optimistic apply.
    seq: HashMap<String, u64>,
}

impl UserCache {
    fn position(&self, name: &str) -> Option<usize> {
        self.selected.iter().position(|w| w.name == name)
    }
}

/// What the optimistic phase did to the cache, so a failed store call can
/// revert exactly that.
#[derive(Debug)]
enum Applied {
    Inserted,
    Removed { index: usize },
}

/// Reconciles UI selection state with a [`SelectionStore`].
pub struct Synchronizer<S> {
    store: S,
    cache: Mutex<HashMap<UserId, UserCache>>,
    key_locks: Mutex<HashMap<(UserId, String), Arc<KeyLock<()>>>>,
}

impl<S: SelectionStore> Synchronizer<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            cache: Mutex::new(HashMap::new()),
            key_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Access the underlying store adapter.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Toggle a waypoint in the user's selection.
    ///
    /// Requires an authenticated identity; an anonymous caller gets
    /// [`PlanError::Unauthenticated`] and no mutation happens. On
    /// [`PlanError::StoreUnavailable`] the optimistic cache update is
    /// rolled back and the error surfaced for retry. Benign store
    /// conflicts (`AlreadyExists` on add, `NotFound` on remove) mean the
    /// cached view was stale but the optimistic apply already matches the
    /// store, so they are reconciled silently.
    pub async fn toggle(&self, user: Option<&UserId>, waypoint: &Waypoint) -> Result<Toggle> {
        let user = user.ok_or(PlanError::Unauthenticated)?.clone();

        // Serialize toggles on this (user, name) key; unrelated waypoints
        // keep their own locks.
        let key_lock = self.key_lock(&user, &waypoint.name);
        let _guard = key_lock.lock().await;

        let (applied, token) = self.apply_optimistic(&user, waypoint);

        let result = match &applied {
            Applied::Inserted => {
                let record = SelectionRecord::from_waypoint(&user, waypoint);
                match self.store.add_selection(record).await {
                    Ok(()) => Ok(Toggle::Added),
                    Err(PlanError::AlreadyExists { name }) => {
                        debug!("'{}' already stored for {}; reconciled", name, user);
                        Ok(Toggle::Added)
                    }
                    Err(err) => Err(err),
                }
            }
            Applied::Removed { .. } => match self.store.remove_selection(&user, &waypoint.name).await {
                Ok(()) => Ok(Toggle::Removed),
                Err(PlanError::NotFound { name }) => {
                    debug!("'{}' already absent for {}; reconciled", name, user);
                    Ok(Toggle::Removed)
                }
                Err(err) => Err(err),
            },
        };

        if let Err(err) = &result {
            warn!(
                "toggle of '{}' for {} failed ({}); rolling back",
                waypoint.name, user, err
            );
            self.rollback(&user, waypoint, applied, token);
        }

        result
    }

    /// Reload the user's selection from the store, replacing the cache.
    pub async fn refresh(&self, user: Option<&UserId>) -> Result<Vec<Waypoint>> {
        let user = user.ok_or(PlanError::Unauthenticated)?;
        let records = self.store.list_selections(user).await?;
        let waypoints: Vec<Waypoint> = records
            .into_iter()
            .map(SelectionRecord::into_waypoint)
            .collect();

        let mut cache = self.cache.lock().unwrap();
        let entry = cache.entry(user.clone()).or_default();
        entry.selected = waypoints.clone();
        debug!("refreshed {} selections for {}", waypoints.len(), user);
        Ok(waypoints)
    }

    /// The cached selection for a user, in insertion order. Anonymous
    /// callers and users never refreshed or toggled have an empty set.
    pub fn selections(&self, user: Option<&UserId>) -> Vec<Waypoint> {
        let Some(user) = user else {
            return Vec::new();
        };
        let cache = self.cache.lock().unwrap();
        cache
            .get(user)
            .map(|entry| entry.selected.clone())
            .unwrap_or_default()
    }

    /// Whether the named waypoint is in the user's cached selection.
    pub fn is_selected(&self, user: Option<&UserId>, name: &str) -> bool {
        let Some(user) = user else {
            return false;
        };
        let cache = self.cache.lock().unwrap();
        cache
            .get(user)
            .map(|entry| entry.position(name).is_some())
            .unwrap_or(false)
    }

    fn key_lock(&self, user: &UserId, name: &str) -> Arc<KeyLock<()>> {
        let mut locks = self.key_locks.lock().unwrap();
        locks
            .entry((user.clone(), name.to_string()))
            .or_insert_with(|| Arc::new(KeyLock::new(())))
            .clone()
    }

    /// Tentatively flip membership in the cache and bump the key's
    /// sequence token. Returns what was done and the token that a matching
    /// rollback must present.
    fn apply_optimistic(&self, user: &UserId, waypoint: &Waypoint) -> (Applied, u64) {
        let mut cache = self.cache.lock().unwrap();
        let entry = cache.entry(user.clone()).or_default();

        let applied = match entry.position(&waypoint.name) {
            Some(index) => {
                entry.selected.remove(index);
                Applied::Removed { index }
            }
            None => {
                entry.selected.push(waypoint.clone());
                Applied::Inserted
            }
        };

        let token = entry
            .seq
            .entry(waypoint.name.clone())
            .and_modify(|t| *t += 1)
            .or_insert(1);
        (applied, *token)
    }

    /// Revert an optimistic apply after a store failure. Suppressed when a
    /// newer apply has since bumped the key's token: the late failure
    /// belongs to a superseded toggle and must not clobber newer state.
    fn rollback(&self, user: &UserId, waypoint: &Waypoint, applied: Applied, token: u64) {
        let mut cache = self.cache.lock().unwrap();
        let Some(entry) = cache.get_mut(user) else {
            return;
        };

        if entry.seq.get(&waypoint.name) != Some(&token) {
            debug!(
                "stale rollback of '{}' for {} suppressed",
                waypoint.name, user
            );
            return;
        }

        match applied {
            Applied::Inserted => {
                if let Some(index) = entry.position(&waypoint.name) {
                    entry.selected.remove(index);
                }
            }
            Applied::Removed { index } => {
                let index = index.min(entry.selected.len());
                entry.selected.insert(index, waypoint.clone());
            }
        }
    }
}

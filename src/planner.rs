//! Planner facade.
//!
//! Wires the pipeline together: toggle events flow through the
//! synchronizer into the store, and reads derive a fresh route over the
//! cached selection. The route is a pure view - recomputed on every read,
//! never persisted.

use crate::render::RoutePlan;
use crate::route::{plan_route, RouteConfig, RouteState};
use crate::store::{SelectionStore, UserId};
use crate::sync::{Synchronizer, Toggle};
use crate::{Result, Waypoint};

/// Facade over selection sync and route synthesis for one store.
pub struct RoutePlanner<S> {
    sync: Synchronizer<S>,
    config: RouteConfig,
}

impl<S: SelectionStore> RoutePlanner<S> {
    /// Create a planner with the default route configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, RouteConfig::default())
    }

    pub fn with_config(store: S, config: RouteConfig) -> Self {
        Self {
            sync: Synchronizer::new(store),
            config,
        }
    }

    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    /// The synchronizer driving this planner.
    pub fn synchronizer(&self) -> &Synchronizer<S> {
        &self.sync
    }

    /// Toggle a waypoint in the user's selection. See
    /// [`Synchronizer::toggle`] for the semantics.
    pub async fn toggle(&self, user: Option<&UserId>, waypoint: &Waypoint) -> Result<Toggle> {
        self.sync.toggle(user, waypoint).await
    }

    /// Reload the user's selection from the store.
    pub async fn refresh(&self, user: Option<&UserId>) -> Result<Vec<Waypoint>> {
        self.sync.refresh(user).await
    }

    /// The cached selection, in insertion order.
    pub fn selections(&self, user: Option<&UserId>) -> Vec<Waypoint> {
        self.sync.selections(user)
    }

    pub fn is_selected(&self, user: Option<&UserId>, name: &str) -> bool {
        self.sync.is_selected(user, name)
    }

    /// Derive the current route state over the cached selection.
    pub fn route_state(&self, user: Option<&UserId>) -> RouteState {
        plan_route(&self.sync.selections(user), &self.config)
    }

    /// Derive the render-ready plan over the cached selection.
    pub fn plan(&self, user: Option<&UserId>) -> RoutePlan {
        RoutePlan::from_state(&self.route_state(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySelectionStore;
    use crate::{catalog, Category};

    #[tokio::test]
    async fn test_toggle_then_plan() {
        let planner = RoutePlanner::new(MemorySelectionStore::new());
        let user = UserId::new("u1");

        for waypoint in catalog::nature().iter().take(3) {
            planner.toggle(Some(&user), waypoint).await.unwrap();
        }

        let state = planner.route_state(Some(&user));
        assert_eq!(state.waypoints.len(), 3);
        assert!(!state.simplified_path.is_empty());
        assert!(state.total_distance > 0.0);

        let plan = planner.plan(Some(&user));
        assert_eq!(plan.markers.len(), 3);
        assert_eq!(plan.markers[0].label, catalog::nature()[0].name);
    }

    #[tokio::test]
    async fn test_anonymous_plan_is_empty() {
        let planner = RoutePlanner::new(MemorySelectionStore::new());
        let plan = planner.plan(None);
        assert!(plan.markers.is_empty());
        assert!(plan.path.is_empty());
        assert!(plan.bounds().is_none());
    }

    #[tokio::test]
    async fn test_route_recomputed_after_toggle_off() {
        let planner = RoutePlanner::new(MemorySelectionStore::new());
        let user = UserId::new("u1");
        let a = Waypoint::new("a", Category::Culture, 1.2, -77.3);
        let b = Waypoint::new("b", Category::Culture, 1.4, -77.1);

        planner.toggle(Some(&user), &a).await.unwrap();
        planner.toggle(Some(&user), &b).await.unwrap();
        assert_eq!(planner.route_state(Some(&user)).simplified_path.len(), 2);

        // Dropping below two waypoints removes the path entirely
        planner.toggle(Some(&user), &b).await.unwrap();
        let state = planner.route_state(Some(&user));
        assert_eq!(state.waypoints.len(), 1);
        assert!(state.simplified_path.is_empty());
    }
}

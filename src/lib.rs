//! # Route Planner
//!
//! Waypoint selection and route synthesis for destination-map applications.
//!
//! This library provides:
//! - A per-user selection set kept consistent with a remote record store
//!   through idempotent add/remove toggles
//! - Route synthesis over the selected waypoints with Douglas-Peucker
//!   polyline simplification
//! - A render-ready output contract (markers + simplified path, GeoJSON)
//!
//! ## Features
//!
//! - **`http`** - Enable the REST-backed selection store (reqwest client)
//!
//! ## Quick Start
//!
//! ```rust
//! use route_planner::{catalog, plan_route, RouteConfig, RoutePlan};
//!
//! // Plan a route over a handful of catalog destinations
//! let waypoints = catalog::culture();
//! let state = plan_route(&waypoints, &RouteConfig::default());
//!
//! assert_eq!(state.waypoints.len(), waypoints.len());
//! assert!(state.simplified_path.len() >= 2);
//!
//! let plan = RoutePlan::from_state(&state);
//! println!("{} markers, {:.0} m", plan.markers.len(), state.total_distance);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// Unified error handling
pub mod error;
pub use error::{PlanError, Result};

// Selection store adapter (trait + in-memory implementation)
pub mod store;
pub use store::{MemorySelectionStore, SelectionRecord, SelectionStore, UserId};

// Selection synchronizer (idempotent toggles, optimistic cache)
pub mod sync;
pub use sync::{Synchronizer, Toggle};

// Route builder (selection-order coordinate sequences)
pub mod route;
pub use route::{build_path, plan_route, RouteConfig, RouteState};

// Polyline simplification and distance utilities
pub mod simplify;
pub use simplify::{path_length, simplify_path};

// Render-sink contract (markers + path, GeoJSON encoding)
pub mod render;
pub use render::{Marker, RoutePlan};

// Static destination catalog
pub mod catalog;

// Planner facade wiring synchronizer -> builder -> simplifier
pub mod planner;
pub use planner::RoutePlanner;

// REST-backed selection store
#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "http")]
pub use http::{RestSelectionStore, RestStoreConfig};

// ============================================================================
// Core Types
// ============================================================================

/// A geographic coordinate in WGS84 degrees.
///
/// # Example
/// ```
/// use route_planner::GeoPoint;
/// let point = GeoPoint::new(1.214, -77.278); // Pasto
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new geographic point.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// Bounding box for a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Create bounds from geographic points.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lng = f64::MAX;
        let mut max_lng = f64::MIN;

        for p in points {
            min_lat = min_lat.min(p.latitude);
            max_lat = max_lat.max(p.latitude);
            min_lng = min_lng.min(p.longitude);
            max_lng = max_lng.max(p.longitude);
        }

        Some(Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        })
    }

    /// Get the center point of the bounds.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}

/// Destination category. Informational only - never used for routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Gastronomy,
    Nature,
    Culture,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Gastronomy => "gastronomy",
            Category::Nature => "nature",
            Category::Culture => "culture",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "gastronomy" => Some(Category::Gastronomy),
            "nature" => Some(Category::Nature),
            "culture" => Some(Category::Culture),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selectable geographic point of interest.
///
/// The `name` is the natural key within a user's selection scope - at most
/// one selection per (user, name) pair exists at any time. The display
/// metadata (`rating`, `description`, `image`) is opaque to the routing
/// core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    pub category: Category,
    pub position: GeoPoint,
    pub rating: f64,
    pub description: String,
    pub image: Option<String>,
}

impl Waypoint {
    /// Create a waypoint with empty display metadata.
    pub fn new(
        name: impl Into<String>,
        category: Category,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            position: GeoPoint::new(latitude, longitude),
            rating: 0.0,
            description: String::new(),
            image: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_validation() {
        assert!(GeoPoint::new(1.214, -77.278).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 181.0).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_bounds_from_points() {
        let points = vec![
            GeoPoint::new(1.0, -77.0),
            GeoPoint::new(1.5, -77.6),
            GeoPoint::new(0.8, -77.2),
        ];
        let bounds = Bounds::from_points(&points).unwrap();
        assert_eq!(bounds.min_lat, 0.8);
        assert_eq!(bounds.max_lat, 1.5);
        assert_eq!(bounds.min_lng, -77.6);
        assert_eq!(bounds.max_lng, -77.0);

        let center = bounds.center();
        assert!((center.latitude - 1.15).abs() < 1e-9);
        assert!((center.longitude - (-77.3)).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_empty() {
        assert!(Bounds::from_points(&[]).is_none());
    }

    #[test]
    fn test_category_round_trip() {
        for cat in [Category::Gastronomy, Category::Nature, Category::Culture] {
            assert_eq!(Category::from_str(cat.as_str()), Some(cat));
        }
        assert_eq!(Category::from_str("beaches"), None);
    }
}

//! Route builder.
//!
//! Collects the current selected waypoints into an ordered coordinate
//! sequence and derives the simplified visual path. The order is the
//! store-retrieval (insertion) order - the path follows the order in which
//! destinations were selected, not a nearest-neighbor tour.

use crate::simplify::{path_length, simplify_path};
use crate::{GeoPoint, Waypoint};
use log::warn;

/// Configuration for route synthesis.
#[derive(Debug, Clone)]
pub struct RouteConfig {
    /// Tolerance for Douglas-Peucker simplification, in degrees.
    /// Larger values smooth the path harder at the cost of fidelity.
    /// Default: 0.01 (~1.1 km), tuned for regional-scale maps.
    pub simplification_tolerance: f64,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            simplification_tolerance: 0.01,
        }
    }
}

/// Derived view over the current selection. Recomputed whenever the
/// waypoint set changes, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteState {
    /// Selected waypoints in retrieval order.
    pub waypoints: Vec<Waypoint>,
    /// Simplified path over the waypoint coordinates. Empty when fewer
    /// than two usable points exist - no line is drawn through 0 or 1
    /// points. Otherwise shares first and last points with the raw path.
    pub simplified_path: Vec<GeoPoint>,
    /// Length of the raw path in meters.
    pub total_distance: f64,
}

impl RouteState {
    /// A state with no selections and no path.
    pub fn empty() -> Self {
        Self {
            waypoints: Vec::new(),
            simplified_path: Vec::new(),
            total_distance: 0.0,
        }
    }
}

/// Collect waypoint coordinates into an ordered sequence, preserving the
/// input order. Waypoints with out-of-range or non-finite coordinates are
/// skipped - they cannot be placed on the map.
pub fn build_path(waypoints: &[Waypoint]) -> Vec<GeoPoint> {
    waypoints
        .iter()
        .filter(|w| {
            if w.position.is_valid() {
                true
            } else {
                warn!("skipping '{}': invalid coordinates", w.name);
                false
            }
        })
        .map(|w| w.position)
        .collect()
}

/// Derive the route state for a waypoint set.
pub fn plan_route(waypoints: &[Waypoint], config: &RouteConfig) -> RouteState {
    let raw_path = build_path(waypoints);

    let simplified_path = if raw_path.len() < 2 {
        Vec::new()
    } else {
        simplify_path(&raw_path, config.simplification_tolerance)
    };

    RouteState {
        waypoints: waypoints.to_vec(),
        total_distance: path_length(&raw_path),
        simplified_path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;

    fn waypoint(name: &str, lat: f64, lng: f64) -> Waypoint {
        Waypoint::new(name, Category::Nature, lat, lng)
    }

    #[test]
    fn test_path_preserves_selection_order() {
        let waypoints = vec![
            waypoint("south", 0.8, -77.6),
            waypoint("north", 1.6, -77.1),
            waypoint("middle", 1.2, -77.3),
        ];
        let path = build_path(&waypoints);
        assert_eq!(path.len(), 3);
        // No spatial reordering: the path follows selection order
        assert_eq!(path[0], waypoints[0].position);
        assert_eq!(path[1], waypoints[1].position);
        assert_eq!(path[2], waypoints[2].position);
    }

    #[test]
    fn test_invalid_coordinates_skipped() {
        let waypoints = vec![
            waypoint("ok", 1.2, -77.3),
            waypoint("bad", 95.0, -77.3),
            waypoint("nan", f64::NAN, 0.0),
        ];
        let path = build_path(&waypoints);
        assert_eq!(path, vec![waypoints[0].position]);
    }

    #[test]
    fn test_no_path_below_two_points() {
        let config = RouteConfig::default();

        let state = plan_route(&[], &config);
        assert_eq!(state, RouteState::empty());

        let state = plan_route(&[waypoint("only", 1.2, -77.3)], &config);
        assert_eq!(state.waypoints.len(), 1);
        assert!(state.simplified_path.is_empty());

        // Two waypoints where one is unusable is still a trivial sequence
        let state = plan_route(
            &[waypoint("ok", 1.2, -77.3), waypoint("bad", 95.0, 0.0)],
            &config,
        );
        assert!(state.simplified_path.is_empty());
    }

    #[test]
    fn test_route_state_endpoints() {
        let waypoints = vec![
            waypoint("a", 0.0, 0.0),
            waypoint("b", 0.0, 1.0),
            waypoint("c", 0.0, 2.0),
            waypoint("d", 5.0, 5.0),
        ];
        let state = plan_route(&waypoints, &RouteConfig::default());

        assert_eq!(state.simplified_path.first(), Some(&waypoints[0].position));
        assert_eq!(state.simplified_path.last(), Some(&waypoints[3].position));
        assert!(state.simplified_path.len() <= waypoints.len());
        assert!(state.total_distance > 0.0);
    }

    #[test]
    fn test_default_tolerance_is_regional() {
        // Points a few kilometers apart survive the default tolerance
        let waypoints = vec![
            waypoint("pasto", 1.214, -77.278),
            waypoint("cocha", 1.090, -77.173),
            waypoint("tuquerres", 1.087, -77.619),
        ];
        let state = plan_route(&waypoints, &RouteConfig::default());
        assert_eq!(state.simplified_path.len(), 3);
    }
}

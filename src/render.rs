//! Render-sink contract.
//!
//! The planner's sole output toward the map layer: an ordered marker list
//! plus the simplified path. The map itself (tiles, icons, popups) is the
//! host application's concern; this module only shapes the data, including
//! a GeoJSON encoding that web map libraries consume directly.

use crate::route::RouteState;
use crate::{Bounds, Category, GeoPoint};
use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde_json::{Map as JsonObject, Value as JsonValue};

/// A labeled map marker for one selected waypoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: GeoPoint,
    pub label: String,
    pub category: Category,
    pub rating: f64,
    pub image: Option<String>,
}

/// Render-ready route: markers in selection order plus the simplified
/// path. A path shorter than two points means no line is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    pub markers: Vec<Marker>,
    pub path: Vec<GeoPoint>,
}

impl RoutePlan {
    /// Shape a derived route state for the rendering sink.
    pub fn from_state(state: &RouteState) -> Self {
        let markers = state
            .waypoints
            .iter()
            .filter(|w| w.position.is_valid())
            .map(|w| Marker {
                position: w.position,
                label: w.name.clone(),
                category: w.category,
                rating: w.rating,
                image: w.image.clone(),
            })
            .collect();

        Self {
            markers,
            path: state.simplified_path.clone(),
        }
    }

    /// Bounding box over the markers, for initial map framing.
    pub fn bounds(&self) -> Option<Bounds> {
        let positions: Vec<GeoPoint> = self.markers.iter().map(|m| m.position).collect();
        Bounds::from_points(&positions)
    }

    /// Encode the plan as a GeoJSON feature collection: one Point feature
    /// per marker (with display properties) and, when a line exists, a
    /// LineString feature for the path. Coordinates are [lng, lat] per the
    /// GeoJSON spec.
    pub fn to_feature_collection(&self) -> FeatureCollection {
        let mut features: Vec<Feature> = self.markers.iter().map(marker_feature).collect();

        if self.path.len() >= 2 {
            let coords: Vec<Vec<f64>> = self
                .path
                .iter()
                .map(|p| vec![p.longitude, p.latitude])
                .collect();

            let mut props = JsonObject::new();
            props.insert("kind".to_string(), JsonValue::String("route".to_string()));

            features.push(Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::LineString(coords))),
                id: None,
                properties: Some(props),
                foreign_members: None,
            });
        }

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}

fn marker_feature(marker: &Marker) -> Feature {
    let geometry = Geometry::new(Value::Point(vec![
        marker.position.longitude,
        marker.position.latitude,
    ]));

    let mut props = JsonObject::new();
    props.insert("kind".to_string(), JsonValue::String("waypoint".to_string()));
    props.insert(
        "name".to_string(),
        JsonValue::String(marker.label.clone()),
    );
    props.insert(
        "category".to_string(),
        JsonValue::String(marker.category.as_str().to_string()),
    );
    if let Some(rating) = serde_json::Number::from_f64(marker.rating) {
        props.insert("rating".to_string(), JsonValue::Number(rating));
    }
    if let Some(image) = &marker.image {
        props.insert("image".to_string(), JsonValue::String(image.clone()));
    }

    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(props),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{plan_route, RouteConfig};
    use crate::Waypoint;

    fn sample_state() -> RouteState {
        let waypoints = vec![
            Waypoint {
                name: "Iglesia de Las Lajas".to_string(),
                category: Category::Culture,
                position: GeoPoint::new(0.806, -77.585),
                rating: 5.0,
                description: "Sanctuary over a canyon".to_string(),
                image: Some("/images/las-lajas.jpg".to_string()),
            },
            Waypoint::new("Volcán Galeras", Category::Nature, 1.221, -77.358),
            Waypoint::new("Laguna de La Cocha", Category::Nature, 1.090, -77.173),
        ];
        plan_route(&waypoints, &RouteConfig::default())
    }

    #[test]
    fn test_plan_from_state() {
        let plan = RoutePlan::from_state(&sample_state());
        assert_eq!(plan.markers.len(), 3);
        assert_eq!(plan.markers[0].label, "Iglesia de Las Lajas");
        assert_eq!(plan.path.first(), Some(&plan.markers[0].position));
        assert_eq!(plan.path.last(), Some(&plan.markers[2].position));
    }

    #[test]
    fn test_bounds_cover_markers() {
        let plan = RoutePlan::from_state(&sample_state());
        let bounds = plan.bounds().unwrap();
        assert_eq!(bounds.min_lat, 0.806);
        assert_eq!(bounds.max_lat, 1.221);
        assert_eq!(bounds.min_lng, -77.585);
        assert_eq!(bounds.max_lng, -77.173);
    }

    #[test]
    fn test_geojson_encoding() {
        let plan = RoutePlan::from_state(&sample_state());
        let collection = plan.to_feature_collection();

        // Three waypoint features plus the route line
        assert_eq!(collection.features.len(), 4);

        let first = &collection.features[0];
        let props = first.properties.as_ref().unwrap();
        assert_eq!(props["kind"], "waypoint");
        assert_eq!(props["name"], "Iglesia de Las Lajas");
        assert_eq!(props["category"], "culture");
        assert_eq!(props["image"], "/images/las-lajas.jpg");
        match &first.geometry.as_ref().unwrap().value {
            Value::Point(coords) => {
                // GeoJSON order is [lng, lat]
                assert_eq!(coords[0], -77.585);
                assert_eq!(coords[1], 0.806);
            }
            other => panic!("expected Point, got {:?}", other),
        }

        let line = collection.features.last().unwrap();
        assert_eq!(line.properties.as_ref().unwrap()["kind"], "route");
        assert!(matches!(
            line.geometry.as_ref().unwrap().value,
            Value::LineString(_)
        ));
    }

    #[test]
    fn test_no_line_feature_without_path() {
        let state = plan_route(
            &[Waypoint::new("only", Category::Culture, 1.2, -77.3)],
            &RouteConfig::default(),
        );
        let plan = RoutePlan::from_state(&state);
        let collection = plan.to_feature_collection();
        assert_eq!(collection.features.len(), 1);
        assert_eq!(
            collection.features[0].properties.as_ref().unwrap()["kind"],
            "waypoint"
        );
    }
}

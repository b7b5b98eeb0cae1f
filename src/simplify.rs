//! Polyline simplification and distance utilities.
//!
//! Simplification is Douglas-Peucker via the `geo` crate: recursively keep
//! the point farthest from the chord of each segment whenever its
//! perpendicular distance exceeds the tolerance. Deterministic for a given
//! input and tolerance, endpoints always retained.

use crate::GeoPoint;
use geo::{algorithm::simplify::Simplify, Coord, LineString};

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Simplify an ordered coordinate sequence within a distance tolerance.
///
/// The tolerance is in coordinate units (degrees, like the coordinates
/// themselves). The output is an ordered subsequence of the input that
/// always includes the first and last points; for inputs of at least two
/// points its length is between 2 and the input length. Sequences shorter
/// than two points are returned unchanged - there is no path to simplify.
///
/// A tolerance of zero still collapses exactly-colinear interiors to the
/// segment endpoints; negative tolerances behave as zero.
pub fn simplify_path(points: &[GeoPoint], tolerance: f64) -> Vec<GeoPoint> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let tolerance = tolerance.max(0.0);
    let coords: Vec<Coord<f64>> = points
        .iter()
        .map(|p| Coord {
            x: p.longitude,
            y: p.latitude,
        })
        .collect();

    let line = LineString::new(coords);
    let simplified = line.simplify(&tolerance);

    simplified
        .coords()
        .map(|c| GeoPoint::new(c.y, c.x))
        .collect()
}

/// Total length of a path in meters (haversine over consecutive pairs).
pub fn path_length(points: &[GeoPoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    points
        .windows(2)
        .map(|w| haversine_distance(&w[0], &w[1]))
        .sum()
}

/// Great-circle distance between two points in meters.
pub fn haversine_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

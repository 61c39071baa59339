//! GeoJSON-shaped spatial track payloads.
//!
//! The backend's `/mcap-logs/{id}/geojson` endpoint returns a feature
//! collection describing a log's track as a point or line string. Only
//! those two geometry kinds exist in the contract; positions are
//! `[longitude, latitude]` pairs.

use serde::{Deserialize, Serialize};

/// A `[longitude, latitude]` pair.
pub type Position = [f64; 2];

/// Geometry of a single feature, tagged by the GeoJSON `"type"` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    LineString { coordinates: Vec<Position> },
}

/// One feature of the track payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
    /// Free-form feature properties; passed through untouched.
    #[serde(default)]
    pub properties: serde_json::Value,
}

/// The full track payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// Axis-aligned bounds of a track, for fitting a preview viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl FeatureCollection {
    /// All positions across all features, in feature order.
    pub fn track_points(&self) -> Vec<Position> {
        let mut points = Vec::new();
        for feature in &self.features {
            match &feature.geometry {
                Geometry::Point { coordinates } => points.push(*coordinates),
                Geometry::LineString { coordinates } => points.extend_from_slice(coordinates),
            }
        }
        points
    }

    /// Bounds of every position, or `None` for an empty collection.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let points = self.track_points();
        let first = points.first()?;
        let mut bounds = BoundingBox {
            min_lon: first[0],
            min_lat: first[1],
            max_lon: first[0],
            max_lat: first[1],
        };
        for [lon, lat] in &points[1..] {
            bounds.min_lon = bounds.min_lon.min(*lon);
            bounds.min_lat = bounds.min_lat.min(*lat);
            bounds.max_lon = bounds.max_lon.max(*lon);
            bounds.max_lat = bounds.max_lat.max(*lat);
        }
        Some(bounds)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

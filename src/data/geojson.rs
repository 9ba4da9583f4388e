use crate::core::geo::{LatLng, LatLngBounds};
use crate::{Result, WidgetError};
use serde::{Deserialize, Serialize};

/// An ordered feature property map.
///
/// `serde_json::Map` preserves source order (the crate enables
/// `preserve_order`), so attribute tables render keys the way the data
/// listed them.
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// GeoJSON geometry types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: [f64; 2],
    },
    LineString {
        coordinates: Vec<[f64; 2]>,
    },
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPoint {
        coordinates: Vec<[f64; 2]>,
    },
    MultiLineString {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<Properties>,
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq)]
pub enum GeoJson {
    Feature(GeoJsonFeature),
    FeatureCollection { features: Vec<GeoJsonFeature> },
    Geometry(GeoJsonGeometry),
}

impl GeoJson {
    /// Parses a GeoJSON document from its textual form.
    ///
    /// No geometry validation or repair happens here; a structurally valid
    /// document with nonsense coordinates parses fine and is the rendering
    /// engine's problem.
    pub fn from_str(geojson_str: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(geojson_str)
            .map_err(|e| WidgetError::Parse(format!("Invalid GeoJSON: {}", e)))?;
        Self::from_value(value)
    }

    /// Parses an already-deserialized JSON value as GeoJSON.
    ///
    /// The document-level dispatch is by the `type` member: `Feature` and
    /// `FeatureCollection` are handled here, anything else is expected to
    /// be a geometry.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        #[derive(Deserialize)]
        struct Collection {
            features: Vec<GeoJsonFeature>,
        }

        let kind = value
            .get("type")
            .and_then(|t| t.as_str())
            .map(str::to_owned)
            .ok_or_else(|| WidgetError::Parse("GeoJSON object has no \"type\"".to_string()))?;

        let parsed = match kind.as_str() {
            "Feature" => serde_json::from_value(value).map(GeoJson::Feature),
            "FeatureCollection" => serde_json::from_value::<Collection>(value)
                .map(|c| GeoJson::FeatureCollection {
                    features: c.features,
                }),
            _ => serde_json::from_value(value).map(GeoJson::Geometry),
        };

        parsed.map_err(|e| WidgetError::Parse(format!("Invalid GeoJSON: {}", e)))
    }

    /// Flattens the document into its features.
    ///
    /// A bare geometry becomes a single feature with no properties.
    pub fn into_features(self) -> Vec<GeoJsonFeature> {
        match self {
            GeoJson::Feature(feature) => vec![feature],
            GeoJson::FeatureCollection { features } => features,
            GeoJson::Geometry(geometry) => vec![GeoJsonFeature {
                id: None,
                geometry: Some(geometry),
                properties: None,
            }],
        }
    }
}

impl GeoJsonFeature {
    /// Looks up a property value by key
    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.as_ref().and_then(|props| props.get(key))
    }

    /// The bounding box of the feature's geometry, if it has one
    pub fn bounds(&self) -> Option<LatLngBounds> {
        self.geometry.as_ref().and_then(|g| g.bounds())
    }
}

impl GeoJsonGeometry {
    /// The bounding box of this geometry, or `None` when it contains no
    /// coordinates
    pub fn bounds(&self) -> Option<LatLngBounds> {
        match self {
            GeoJsonGeometry::Point { coordinates } => {
                let point = LatLng::new(coordinates[1], coordinates[0]);
                Some(LatLngBounds::new(point, point))
            }
            GeoJsonGeometry::LineString { coordinates } => Self::coords_bounds(coordinates),
            GeoJsonGeometry::Polygon { coordinates } => {
                // Holes lie within the exterior ring, so it alone decides
                coordinates.first().and_then(|ring| Self::coords_bounds(ring))
            }
            GeoJsonGeometry::MultiPoint { coordinates } => Self::coords_bounds(coordinates),
            GeoJsonGeometry::MultiLineString { coordinates } => {
                Self::union_of(coordinates.iter().map(|line| Self::coords_bounds(line)))
            }
            GeoJsonGeometry::MultiPolygon { coordinates } => Self::union_of(
                coordinates
                    .iter()
                    .map(|polygon| polygon.first().and_then(|ring| Self::coords_bounds(ring))),
            ),
            GeoJsonGeometry::GeometryCollection { geometries } => {
                Self::union_of(geometries.iter().map(|g| g.bounds()))
            }
        }
    }

    fn coords_bounds(coordinates: &[[f64; 2]]) -> Option<LatLngBounds> {
        let first = coordinates.first()?;
        let mut bounds = LatLngBounds::new(
            LatLng::new(first[1], first[0]),
            LatLng::new(first[1], first[0]),
        );

        for coord in coordinates.iter().skip(1) {
            bounds.extend(&LatLng::new(coord[1], coord[0]));
        }

        Some(bounds)
    }

    fn union_of(parts: impl Iterator<Item = Option<LatLngBounds>>) -> Option<LatLngBounds> {
        let mut bounds: Option<LatLngBounds> = None;
        for part in parts.flatten() {
            bounds = Some(match bounds {
                None => part,
                Some(b) => b.union(&part),
            });
        }
        bounds
    }
}

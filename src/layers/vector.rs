use crate::{
    core::geo::LatLngBounds,
    data::geojson::GeoJsonFeature,
    Result, WidgetError,
};
use serde::{Deserialize, Serialize};

/// An RGB color for overlay styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#rrggbb` hex string
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| WidgetError::InvalidColor(hex.to_string()))?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(WidgetError::InvalidColor(hex.to_string()));
        }

        let r = u8::from_str_radix(&digits[0..2], 16)
            .map_err(|_| WidgetError::InvalidColor(hex.to_string()))?;
        let g = u8::from_str_radix(&digits[2..4], 16)
            .map_err(|_| WidgetError::InvalidColor(hex.to_string()))?;
        let b = u8::from_str_radix(&digits[4..6], 16)
            .map_err(|_| WidgetError::InvalidColor(hex.to_string()))?;

        Ok(Self { r, g, b })
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Style applied uniformly to every feature in one overlay.
///
/// There is deliberately no per-feature override: one overlay, one style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayStyle {
    /// Stroke color
    pub stroke_color: Color,
    /// Stroke width in display units
    pub stroke_weight: f32,
    /// Stroke opacity (0.0 to 1.0)
    pub stroke_opacity: f32,
    /// Fill color
    pub fill_color: Color,
    /// Fill opacity (0.0 to 1.0)
    pub fill_opacity: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            stroke_color: Color::rgb(0, 0, 0),
            stroke_weight: 3.0,
            stroke_opacity: 0.5,
            fill_color: Color::rgb(0, 0, 0),
            fill_opacity: 0.1,
        }
    }
}

impl OverlayStyle {
    /// Builds a style that drives stroke and fill from one color, the
    /// common call shape for choropleth-like region overlays
    pub fn uniform(color: Color, stroke_opacity: f32, fill_opacity: f32) -> Self {
        Self {
            stroke_color: color,
            fill_color: color,
            stroke_opacity,
            fill_opacity,
            ..Self::default()
        }
    }
}

/// A displayed vector overlay: a set of features sharing one style.
///
/// Owned exclusively by the widget's overlay slot; at most one exists per
/// widget at any time. Each overlay generation carries a fresh id so stale
/// engine layers can never be confused with the current one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    id: String,
    features: Vec<GeoJsonFeature>,
    style: OverlayStyle,
}

impl Overlay {
    pub fn new(id: String, features: Vec<GeoJsonFeature>, style: OverlayStyle) -> Self {
        Self {
            id,
            features,
            style,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn features(&self) -> &[GeoJsonFeature] {
        &self.features
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// The smallest bounds enclosing every feature, or `None` for an
    /// overlay with no located geometry
    pub fn bounds(&self) -> Option<LatLngBounds> {
        let mut bounds: Option<LatLngBounds> = None;

        for feature in &self.features {
            if let Some(feature_bounds) = feature.bounds() {
                bounds = Some(match bounds {
                    None => feature_bounds,
                    Some(b) => b.union(&feature_bounds),
                });
            }
        }

        bounds
    }
}

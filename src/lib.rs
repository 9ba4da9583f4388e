//! # Regionmap
//!
//! An embeddable interactive map widget in the spirit of Leaflet's
//! mini-API: a base tile layer (optionally with a satellite alternative),
//! a single positional marker, and a single styled GeoJSON overlay with
//! per-feature tooltips or popups.
//!
//! The widget does no drawing of its own. All rendering capabilities are
//! consumed through the [`RenderEngine`] trait, so the same controller can
//! sit on top of any engine that can display tiles, markers, and vector
//! layers. A recording [`HeadlessEngine`] ships with the crate for tests
//! and server-side use.

pub mod core;
pub mod data;
pub mod engine;
pub mod layers;
pub mod ui;
pub mod widget;

pub mod prelude;

// Re-export public API
pub use crate::core::{
    config::WidgetConfig,
    geo::{LatLng, LatLngBounds},
    viewport::Viewport,
};

pub use crate::layers::{
    marker::Marker,
    tile::{TileService, TileSource},
    vector::{Color, Overlay, OverlayStyle},
};

pub use crate::data::geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry};

pub use crate::ui::presenter::{
    Affordance, FeaturePresenter, PopupTable, PresentationPolicy, Tooltip,
};

pub use crate::engine::{HeadlessEngine, RenderEngine};

pub use crate::widget::{MapWidget, OverlayOptions};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, WidgetError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Layer error: {0}")]
    Layer(String),
}

/// Error type alias for convenience
pub type Error = WidgetError;

//! Prelude module for common regionmap types and traits
//!
//! Re-exports the most commonly used types for easy importing with
//! `use regionmap::prelude::*;`

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

pub use crate::data::geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry, Properties};

pub use crate::ui::presenter::{
    Affordance, FeaturePresenter, PopupTable, PresentationPolicy, Tooltip,
};

pub use crate::engine::{HeadlessEngine, RenderEngine};

pub use crate::widget::{MapWidget, OverlayOptions};

pub use crate::{Result, WidgetError};

pub use fxhash::FxHashMap as HashMap;

use crate::core::geo::LatLngBounds;
use serde::{Deserialize, Serialize};

/// How a base layer's tiles are served
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TileService {
    /// Slippy-map URL template with `{s}`/`{z}`/`{x}`/`{y}` placeholders
    UrlTemplate {
        url: String,
        subdomains: Vec<String>,
    },
    /// WMS endpoint serving a named layer
    Wms { url: String, layer: String },
}

/// Descriptor for one base tile source.
///
/// Purely static configuration: the widget registers sources at mount and
/// never touches them again. Fetching, caching, and drawing tiles is the
/// rendering engine's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileSource {
    /// Layer id handed to the rendering engine
    pub id: String,
    /// Label shown by the engine's layer-switch control
    pub label: String,
    pub service: TileService,
    pub attribution: String,
    /// Geographic extent the source covers, if limited
    pub bounds: Option<LatLngBounds>,
}

impl TileSource {
    pub fn new(id: String, label: String, service: TileService, attribution: String) -> Self {
        Self {
            id,
            label,
            service,
            attribution,
            bounds: None,
        }
    }

    pub fn with_bounds(mut self, bounds: LatLngBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// The CartoDB light basemap
    pub fn carto_light() -> Self {
        Self::new(
            "base-carto-light".to_string(),
            "OpenStreetMap".to_string(),
            TileService::UrlTemplate {
                url: "http://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}.png".to_string(),
                subdomains: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            },
            "© OpenStreetMap contributors | © CartoDB".to_string(),
        )
        .with_bounds(LatLngBounds::world())
    }

    /// EOX Sentinel-2 cloudless satellite imagery
    pub fn eox_sentinel2() -> Self {
        Self::new(
            "base-eox-s2cloudless".to_string(),
            "Satellite".to_string(),
            TileService::Wms {
                url: "https://tiles.maps.eox.at/wms".to_string(),
                layer: "s2cloudless-2020_3857".to_string(),
            },
            "Sentinel-2 cloudless by EOX IT Services GmbH \
             (contains modified Copernicus Sentinel data 2020)"
                .to_string(),
        )
        .with_bounds(LatLngBounds::world())
    }
}

use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// The current view of the map: a center coordinate and a zoom level.
///
/// The viewport is a record of the last view the host asked for, not a live
/// camera; it is overwritten wholesale by each `set_location` / `set_view`
/// call and retains no history. Zoom is the integer tile-pyramid level; any
/// fractional interpolation is the rendering engine's business.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: u8,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self { center, zoom }
    }
}

impl Default for Viewport {
    /// The view before the host has asked for one: null island, fully
    /// zoomed out
    fn default() -> Self {
        Self::new(LatLng::default(), 0)
    }
}

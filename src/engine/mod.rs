//! The rendering-engine boundary.
//!
//! The widget controller consumes a mapping engine as an opaque set of
//! capabilities: displaying tile, marker, and vector layers, moving the
//! camera, fitting an extent, and offering layer-switch/scale controls.
//! Anything that can do those things can sit behind [`RenderEngine`],
//! whether a GPU renderer, a browser binding, or the recording
//! [`HeadlessEngine`].

pub mod headless;

pub use headless::HeadlessEngine;

use crate::{
    core::geo::{LatLng, LatLngBounds},
    layers::{marker::Marker, tile::TileSource, vector::Overlay},
    ui::presenter::Affordance,
    Result,
};

/// Capabilities the widget requires from a rendering engine.
///
/// Layer identity is by id string: the widget guarantees it never reuses
/// an id for two live layers, and releases every layer it stops owning via
/// [`remove_layer`](RenderEngine::remove_layer). Implementations should
/// treat a remove of an unknown id as an error rather than a no-op; it
/// means the caller's bookkeeping is broken.
pub trait RenderEngine: Send {
    /// Centers the camera on `center` at `zoom`
    fn set_view(&mut self, center: LatLng, zoom: u8) -> Result<()>;

    /// Adjusts the camera so `bounds` is fully visible
    fn fit_bounds(&mut self, bounds: &LatLngBounds) -> Result<()>;

    /// Displays a base tile layer; `active` selects the initially visible
    /// source when several are registered
    fn add_tile_layer(&mut self, source: &TileSource, active: bool) -> Result<()>;

    /// Displays a marker
    fn add_marker(&mut self, marker: &Marker) -> Result<()>;

    /// Displays a vector overlay. `affordances` has one entry per feature,
    /// in feature order; `None` means that feature gets no tooltip/popup.
    fn add_overlay(&mut self, overlay: &Overlay, affordances: &[Option<Affordance>])
        -> Result<()>;

    /// Detaches a previously added layer of any kind
    fn remove_layer(&mut self, layer_id: &str) -> Result<()>;

    /// Offers a user-facing control for switching between the labelled
    /// base layers
    fn add_layer_control(&mut self, labels: &[String]) -> Result<()>;

    /// Adds a scale indicator control
    fn add_scale_control(&mut self) -> Result<()>;

    /// Dynamic casting support
    fn as_any(&self) -> &dyn std::any::Any;
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

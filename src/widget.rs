//! The map widget controller.
//!
//! `MapWidget` owns the widget's mutable visual state (current viewport,
//! current marker, current overlay, registered base layers) and keeps it
//! in lockstep with whatever [`RenderEngine`] it was mounted on. The state
//! model is deliberately narrow: one marker slot and one overlay slot,
//! each a nullable owned reference that is detached from the engine
//! before it is ever overwritten.

use crate::{
    core::{config::WidgetConfig, geo::LatLng, viewport::Viewport},
    data::geojson::GeoJson,
    engine::RenderEngine,
    layers::{marker::Marker, vector::{Overlay, OverlayStyle}},
    ui::presenter::FeaturePresenter,
    Result,
};
use log::{debug, warn};

/// Engine layer id of the marker slot
const MARKER_LAYER_ID: &str = "marker";

/// Per-call options for [`MapWidget::add_overlay`].
///
/// A successful call always ends with exactly the new overlay displayed;
/// `remove_previous` only decides when the previous overlay is torn down.
/// `true` detaches it before the replacement is built, so an engine
/// failure leaves the widget with no overlay; `false` defers the detach
/// until the replacement is attached, so a failure leaves the previous
/// overlay in place.
#[derive(Debug, Clone)]
pub struct OverlayOptions {
    /// Style for the new overlay; `None` uses the widget's configured
    /// default style
    pub style: Option<OverlayStyle>,
    pub remove_previous: bool,
    /// Refit the viewport to the new overlay's extent after insertion.
    /// A refit against an overlay with no extent is a no-op.
    pub refit: bool,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            style: None,
            remove_previous: true,
            refit: false,
        }
    }
}

impl OverlayOptions {
    pub fn with_style(mut self, style: OverlayStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_remove_previous(mut self, remove_previous: bool) -> Self {
        self.remove_previous = remove_previous;
        self
    }

    pub fn with_refit(mut self, refit: bool) -> Self {
        self.refit = refit;
        self
    }
}

/// An interactive map widget bound to one rendering engine.
///
/// Instantiated once per widget mount; dropped when the host tears the
/// widget down. All operations are synchronous and complete before
/// returning.
pub struct MapWidget {
    engine: Box<dyn RenderEngine>,
    config: WidgetConfig,
    presenter: FeaturePresenter,
    viewport: Viewport,
    marker: Option<Marker>,
    overlay: Option<Overlay>,
    overlay_seq: u64,
}

impl MapWidget {
    /// Default zoom when focusing on a point of interest
    pub const LOCATION_ZOOM: u8 = 9;
    /// Default zoom for a wide overview
    pub const OVERVIEW_ZOOM: u8 = 3;

    /// Mounts the widget on a rendering engine: registers the configured
    /// base layers (first one active) and the scale control. With more
    /// than one base layer the engine's layer-switch control is added too.
    pub fn mount(mut engine: Box<dyn RenderEngine>, config: WidgetConfig) -> Result<Self> {
        for (index, source) in config.base_layers.iter().enumerate() {
            engine.add_tile_layer(source, index == 0)?;
        }
        if config.scale_control {
            engine.add_scale_control()?;
        }
        if config.base_layers.len() > 1 {
            let labels: Vec<String> = config
                .base_layers
                .iter()
                .map(|source| source.label.clone())
                .collect();
            engine.add_layer_control(&labels)?;
        }
        debug!(
            "mounted widget with {} base layer(s)",
            config.base_layers.len()
        );

        let presenter = FeaturePresenter::new(config.presentation.clone());
        Ok(Self {
            engine,
            config,
            presenter,
            viewport: Viewport::default(),
            marker: None,
            overlay: None,
            overlay_seq: 0,
        })
    }

    /// Centers the map on a position and drops a marker there.
    ///
    /// Any previous marker is detached first; after the call exactly one
    /// marker exists, at the given coordinates. `zoom` defaults to
    /// [`Self::LOCATION_ZOOM`]. Coordinates are passed through unchecked;
    /// range handling is the engine's responsibility.
    pub fn set_location(&mut self, lat: f64, lng: f64, zoom: Option<u8>) -> Result<()> {
        let zoom = zoom.unwrap_or(Self::LOCATION_ZOOM);
        let center = LatLng::new(lat, lng);

        self.viewport = Viewport::new(center, zoom);
        self.engine.set_view(center, zoom)?;

        self.detach_marker()?;
        let marker = Marker::new(MARKER_LAYER_ID.to_string(), center);
        self.engine.add_marker(&marker)?;
        self.marker = Some(marker);

        debug!("set_location ({}, {}) @ {}", lat, lng, zoom);
        Ok(())
    }

    /// Centers the map on a position without placing a marker.
    ///
    /// Any existing marker is removed. `zoom` defaults to
    /// [`Self::OVERVIEW_ZOOM`].
    pub fn set_view(&mut self, lat: f64, lng: f64, zoom: Option<u8>) -> Result<()> {
        let zoom = zoom.unwrap_or(Self::OVERVIEW_ZOOM);
        let center = LatLng::new(lat, lng);

        self.detach_marker()?;
        self.viewport = Viewport::new(center, zoom);
        self.engine.set_view(center, zoom)?;

        debug!("set_view ({}, {}) @ {}", lat, lng, zoom);
        Ok(())
    }

    /// Replaces the displayed overlay with one built from `collection`.
    ///
    /// Every feature gets the overlay style uniformly, plus the affordance
    /// the configured presentation policy derives from its properties. An
    /// empty collection yields an overlay with no visible geometry and is
    /// not an error. See [`OverlayOptions`] for the teardown-timing
    /// semantics of `remove_previous` and for `refit`.
    pub fn add_overlay(&mut self, collection: GeoJson, options: OverlayOptions) -> Result<()> {
        if options.remove_previous {
            self.detach_overlay()?;
        }

        let style = options
            .style
            .unwrap_or_else(|| self.config.default_style.clone());
        let features = collection.into_features();
        let affordances: Vec<_> = features
            .iter()
            .map(|feature| self.presenter.affordance(feature))
            .collect();

        self.overlay_seq += 1;
        let overlay = Overlay::new(format!("overlay-{}", self.overlay_seq), features, style);

        if let Err(e) = self.engine.add_overlay(&overlay, &affordances) {
            warn!(
                "overlay attach failed ({}); widget keeps {} overlay",
                e,
                if self.overlay.is_some() {
                    "the previous"
                } else {
                    "no"
                }
            );
            return Err(e);
        }

        // Deferred teardown path: the old overlay is still attached when
        // remove_previous was false
        self.detach_overlay()?;

        let extent = overlay.bounds();
        debug!(
            "overlay {} attached with {} feature(s)",
            overlay.id(),
            overlay.feature_count()
        );
        self.overlay = Some(overlay);

        if options.refit {
            match extent {
                Some(bounds) => self.engine.fit_bounds(&bounds)?,
                None => debug!("refit skipped: overlay has no extent"),
            }
        }

        Ok(())
    }

    /// The last explicitly requested view
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The currently displayed marker, if any
    pub fn marker(&self) -> Option<&Marker> {
        self.marker.as_ref()
    }

    /// The currently displayed overlay, if any
    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn engine(&self) -> &dyn RenderEngine {
        self.engine.as_ref()
    }

    /// Detaches the marker slot's engine layer before clearing it
    fn detach_marker(&mut self) -> Result<()> {
        if let Some(marker) = self.marker.take() {
            self.engine.remove_layer(marker.id())?;
            debug!("marker removed");
        }
        Ok(())
    }

    /// Detaches the overlay slot's engine layer before clearing it
    fn detach_overlay(&mut self) -> Result<()> {
        if let Some(overlay) = self.overlay.take() {
            self.engine.remove_layer(overlay.id())?;
            debug!("overlay {} removed", overlay.id());
        }
        Ok(())
    }
}

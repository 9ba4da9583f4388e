//! A rendering engine that renders nothing.
//!
//! `HeadlessEngine` records the scene a real engine would display: the
//! camera, every attached layer in attach order, the registered controls,
//! and the last extent it was asked to fit. It backs the crate's own test
//! suite and is useful anywhere the widget runs without a display.

use crate::{
    core::geo::{LatLng, LatLngBounds},
    layers::{marker::Marker, tile::TileSource, vector::Overlay},
    prelude::HashMap,
    ui::presenter::Affordance,
    Result, WidgetError,
};

/// One layer as the engine would display it
#[derive(Debug, Clone, PartialEq)]
pub enum SceneLayer {
    Tile { source: TileSource, active: bool },
    Marker { position: LatLng },
    Overlay {
        overlay: Overlay,
        affordances: Vec<Option<Affordance>>,
    },
}

/// Recording stand-in for a real rendering engine
#[derive(Debug, Default)]
pub struct HeadlessEngine {
    camera: Option<(LatLng, u8)>,
    layers: HashMap<String, SceneLayer>,
    attach_order: Vec<String>,
    layer_control: Option<Vec<String>>,
    scale_control: bool,
    fitted: Option<LatLngBounds>,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The camera from the last `set_view`/`fit_bounds`, if any
    pub fn camera(&self) -> Option<(LatLng, u8)> {
        self.camera
    }

    /// Attached layer ids, oldest first
    pub fn layer_ids(&self) -> &[String] {
        &self.attach_order
    }

    pub fn layer(&self, layer_id: &str) -> Option<&SceneLayer> {
        self.layers.get(layer_id)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Positions of all attached markers, in attach order
    pub fn marker_positions(&self) -> Vec<LatLng> {
        self.attach_order
            .iter()
            .filter_map(|id| match self.layers.get(id) {
                Some(SceneLayer::Marker { position }) => Some(*position),
                _ => None,
            })
            .collect()
    }

    /// All attached overlays, in attach order
    pub fn overlays(&self) -> Vec<&Overlay> {
        self.attach_order
            .iter()
            .filter_map(|id| match self.layers.get(id) {
                Some(SceneLayer::Overlay { overlay, .. }) => Some(overlay),
                _ => None,
            })
            .collect()
    }

    /// The affordances attached with the overlay `layer_id`
    pub fn overlay_affordances(&self, layer_id: &str) -> Option<&[Option<Affordance>]> {
        match self.layers.get(layer_id) {
            Some(SceneLayer::Overlay { affordances, .. }) => Some(affordances),
            _ => None,
        }
    }

    /// Labels registered on the layer-switch control, if one was added
    pub fn layer_control(&self) -> Option<&[String]> {
        self.layer_control.as_deref()
    }

    pub fn has_scale_control(&self) -> bool {
        self.scale_control
    }

    /// The extent of the last `fit_bounds` call, if any
    pub fn fitted_bounds(&self) -> Option<&LatLngBounds> {
        self.fitted.as_ref()
    }

    fn attach(&mut self, layer_id: String, layer: SceneLayer) -> Result<()> {
        if self.layers.contains_key(&layer_id) {
            return Err(WidgetError::Layer(format!(
                "layer id already attached: {}",
                layer_id
            )));
        }
        self.attach_order.push(layer_id.clone());
        self.layers.insert(layer_id, layer);
        Ok(())
    }
}

impl super::RenderEngine for HeadlessEngine {
    fn set_view(&mut self, center: LatLng, zoom: u8) -> Result<()> {
        log::trace!("headless: set_view ({}, {}) @ {}", center.lat, center.lng, zoom);
        self.camera = Some((center, zoom));
        Ok(())
    }

    fn fit_bounds(&mut self, bounds: &LatLngBounds) -> Result<()> {
        // Zoom selection needs pixel geometry a headless engine does not
        // have, so the camera centers on the extent at its current zoom
        let zoom = self.camera.map(|(_, z)| z).unwrap_or(0);
        self.camera = Some((bounds.center(), zoom));
        self.fitted = Some(bounds.clone());
        Ok(())
    }

    fn add_tile_layer(&mut self, source: &TileSource, active: bool) -> Result<()> {
        self.attach(
            source.id.clone(),
            SceneLayer::Tile {
                source: source.clone(),
                active,
            },
        )
    }

    fn add_marker(&mut self, marker: &Marker) -> Result<()> {
        self.attach(
            marker.id().to_string(),
            SceneLayer::Marker {
                position: marker.position(),
            },
        )
    }

    fn add_overlay(
        &mut self,
        overlay: &Overlay,
        affordances: &[Option<Affordance>],
    ) -> Result<()> {
        self.attach(
            overlay.id().to_string(),
            SceneLayer::Overlay {
                overlay: overlay.clone(),
                affordances: affordances.to_vec(),
            },
        )
    }

    fn remove_layer(&mut self, layer_id: &str) -> Result<()> {
        if self.layers.remove(layer_id).is_none() {
            return Err(WidgetError::Layer(format!(
                "cannot remove unknown layer: {}",
                layer_id
            )));
        }
        self.attach_order.retain(|id| id != layer_id);
        Ok(())
    }

    fn add_layer_control(&mut self, labels: &[String]) -> Result<()> {
        self.layer_control = Some(labels.to_vec());
        Ok(())
    }

    fn add_scale_control(&mut self) -> Result<()> {
        self.scale_control = true;
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

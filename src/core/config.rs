use crate::{
    layers::{tile::TileSource, vector::OverlayStyle},
    ui::presenter::PresentationPolicy,
};

/// Static configuration fixed at mount time.
///
/// Everything that varied between deployments of the widget lives here:
/// which base layers exist, how overlays look when the caller does not say
/// otherwise, and which affordance features carry.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Base tile sources; the first one starts active. With more than one,
    /// the engine's layer-switch control is added at mount.
    pub base_layers: Vec<TileSource>,
    /// Style used by `add_overlay` calls that bring no style of their own
    pub default_style: OverlayStyle,
    pub presentation: PresentationPolicy,
    /// Whether to add the engine's scale control at mount
    pub scale_control: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            base_layers: vec![TileSource::carto_light(), TileSource::eox_sentinel2()],
            default_style: OverlayStyle::default(),
            presentation: PresentationPolicy::default(),
            scale_control: true,
        }
    }
}

impl WidgetConfig {
    /// Replaces the base-layer set
    pub fn with_base_layers(mut self, base_layers: Vec<TileSource>) -> Self {
        self.base_layers = base_layers;
        self
    }

    /// Appends one base layer
    pub fn with_base_layer(mut self, source: TileSource) -> Self {
        self.base_layers.push(source);
        self
    }

    pub fn with_default_style(mut self, style: OverlayStyle) -> Self {
        self.default_style = style;
        self
    }

    pub fn with_presentation(mut self, presentation: PresentationPolicy) -> Self {
        self.presentation = presentation;
        self
    }

    pub fn with_scale_control(mut self, scale_control: bool) -> Self {
        self.scale_control = scale_control;
        self
    }
}

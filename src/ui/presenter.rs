//! Turns feature properties into the interactive affordance shown on the
//! map: either a hover tooltip carrying one summary value, or a click
//! popup listing every property as a two-column table.

use crate::data::geojson::GeoJsonFeature;
use serde::{Deserialize, Serialize};

/// Tooltip opacity matching the widget's visual defaults
pub const TOOLTIP_OPACITY: f32 = 0.8;

/// Popup panel dimensions in display units
pub const POPUP_MAX_HEIGHT: f32 = 300.0;
pub const POPUP_MIN_WIDTH: f32 = 490.0;

/// Which affordance the widget attaches to overlay features.
///
/// The two policies are mutually exclusive per widget; pick one in
/// [`WidgetConfig`](crate::WidgetConfig).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PresentationPolicy {
    /// A short-lived hover tooltip showing the value of one designated
    /// property; features without that property get no affordance
    HoverTooltip { summary_key: String },
    /// A click-triggered popup listing all properties as key/value rows
    ClickPopup,
}

impl Default for PresentationPolicy {
    fn default() -> Self {
        Self::HoverTooltip {
            summary_key: "name".to_string(),
        }
    }
}

/// A transient hover tooltip. Dismissed on hover-out, carries no state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub text: String,
    pub opacity: f32,
}

impl Tooltip {
    pub fn new(text: String) -> Self {
        Self {
            text,
            opacity: TOOLTIP_OPACITY,
        }
    }
}

/// A click popup rendering feature attributes as a two-column table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupTable {
    /// (key, formatted value) per property, in source order
    pub rows: Vec<(String, String)>,
    pub max_height: f32,
    pub min_width: f32,
}

impl PopupTable {
    pub fn new(rows: Vec<(String, String)>) -> Self {
        Self {
            rows,
            max_height: POPUP_MAX_HEIGHT,
            min_width: POPUP_MIN_WIDTH,
        }
    }
}

/// The affordance attached to one overlay feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Affordance {
    Tooltip(Tooltip),
    Popup(PopupTable),
}

/// Derives affordances from feature properties.
///
/// Derivation is pure: it reads the property map and nothing else, and
/// never mutates the feature.
#[derive(Debug, Clone)]
pub struct FeaturePresenter {
    policy: PresentationPolicy,
}

impl FeaturePresenter {
    pub fn new(policy: PresentationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PresentationPolicy {
        &self.policy
    }

    /// The affordance for one feature, or `None` when the policy yields
    /// nothing for it
    pub fn affordance(&self, feature: &GeoJsonFeature) -> Option<Affordance> {
        match &self.policy {
            PresentationPolicy::HoverTooltip { summary_key } => {
                let value = feature.property(summary_key)?;
                Some(Affordance::Tooltip(Tooltip::new(format_value(value))))
            }
            PresentationPolicy::ClickPopup => {
                let properties = feature.properties.as_ref()?;
                let rows = properties
                    .iter()
                    .map(|(key, value)| (key.clone(), format_value(value)))
                    .collect();
                Some(Affordance::Popup(PopupTable::new(rows)))
            }
        }
    }
}

/// Formats a property value for display.
///
/// Numbers always render with exactly one decimal place; strings render
/// unquoted; everything else falls back to its JSON text.
pub fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(f) => format!("{:.1}", f),
            None => n.to_string(),
        },
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

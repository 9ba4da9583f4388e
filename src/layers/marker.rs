use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// The single positional marker a widget can display.
///
/// Owned exclusively by the widget's marker slot; at most one exists per
/// widget at any time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    id: String,
    position: LatLng,
}

impl Marker {
    pub fn new(id: String, position: LatLng) -> Self {
        Self { id, position }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn position(&self) -> LatLng {
        self.position
    }
}

//! Editor configuration.

use crate::geometry::OverlayShape;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// Smallest scale accepted for the overlay and main images, in percent.
pub const MIN_SCALE_PERCENT: f64 = 1.0;

/// Tunable defaults for a fresh editor.
///
/// Every field has a default, so a partial JSON document is enough to
/// override a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub initial_shape: OverlayShape,
    /// Edge length of a resizable overlay in pixels.
    pub initial_size_px: f64,
    pub initial_border_width_px: f64,
    pub initial_border_color: String,
    pub initial_overlay_scale_percent: f64,
    pub initial_main_scale_percent: f64,
    /// Offset between the overlay translation and the shadow translation.
    pub shadow_depth: Vec2,
    /// Angle applied by the rotate-left/rotate-right step buttons.
    pub rotation_step_degrees: i32,
    /// Distance moved by one press of the image nudge arrows.
    pub nudge_step_px: f64,
    /// Lower bound for image scale percentages.
    pub min_scale_percent: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            initial_shape: OverlayShape::Square,
            initial_size_px: 200.0,
            initial_border_width_px: 5.0,
            initial_border_color: "#ffffff".to_string(),
            initial_overlay_scale_percent: 100.0,
            initial_main_scale_percent: 100.0,
            shadow_depth: Vec2::new(3.0, 3.0),
            rotation_step_degrees: 10,
            nudge_step_px: 10.0,
            min_scale_percent: MIN_SCALE_PERCENT,
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

//! Per-shape geometry rules.
//!
//! Everything here is a pure function of the overlay shape and plain numbers.
//! The transform state and the shadow synchronizer dispatch on these rules
//! instead of testing class names.

use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Overlay frame shape.
///
/// Persisted as the class name the rendering surface uses (`"circle"`,
/// `"square"`, `"sklejka"`, `"skos"`). Unknown class names are kept verbatim
/// in [`OverlayShape::Other`] and behave like a plain square frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OverlayShape {
    Circle,
    #[default]
    Square,
    /// Composite board with a footprint fixed by its container.
    Sklejka,
    /// Diagonal cut with a fixed shadow strip along the cut.
    Skos,
    Other(String),
}

/// How the shadow box is derived for a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowRule {
    /// Overlay box grown by the border on every side, following the overlay
    /// rotation.
    BorderBox,
    /// Fixed strip laid along the diagonal cut, at a fixed angle.
    CutStrip,
}

impl OverlayShape {
    /// Class name used by the rendering surface and in persisted records.
    pub fn class_name(&self) -> &str {
        match self {
            OverlayShape::Circle => "circle",
            OverlayShape::Square => "square",
            OverlayShape::Sklejka => "sklejka",
            OverlayShape::Skos => "skos",
            OverlayShape::Other(name) => name,
        }
    }

    /// Whether the size control may change the overlay footprint.
    ///
    /// Sklejka and Skos take their footprint from the container layout.
    pub fn is_resizable(&self) -> bool {
        !matches!(self, OverlayShape::Sklejka | OverlayShape::Skos)
    }

    /// Shadow derivation rule for this shape.
    pub fn shadow_rule(&self) -> ShadowRule {
        match self {
            OverlayShape::Skos => ShadowRule::CutStrip,
            _ => ShadowRule::BorderBox,
        }
    }

    /// Marker class toggled on the shadow element, if any.
    pub fn shadow_class(&self) -> Option<&'static str> {
        match self {
            OverlayShape::Sklejka => Some("sklejka"),
            OverlayShape::Skos => Some("skos"),
            _ => None,
        }
    }
}

impl FromStr for OverlayShape {
    type Err = std::convert::Infallible;

    /// Parse a class attribute. A class list containing `sklejka` or `skos`
    /// selects that shape even when other classes are present.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let has = |class: &str| trimmed.split_whitespace().any(|c| c == class);

        let shape = if has("sklejka") {
            OverlayShape::Sklejka
        } else if has("skos") {
            OverlayShape::Skos
        } else if trimmed == "circle" {
            OverlayShape::Circle
        } else if trimmed == "square" {
            OverlayShape::Square
        } else {
            OverlayShape::Other(trimmed.to_string())
        };
        Ok(shape)
    }
}

impl From<String> for OverlayShape {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(shape) => shape,
            Err(never) => match never {},
        }
    }
}

impl From<OverlayShape> for String {
    fn from(shape: OverlayShape) -> Self {
        shape.class_name().to_string()
    }
}

impl fmt::Display for OverlayShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Largest uniform scale at which `image` fits inside `container` without
/// distortion.
///
/// Returns `None` when any dimension is not a positive finite number (an image
/// that has not loaded yet reports zero natural size).
pub fn fit_scale(container: Size, image: Size) -> Option<f64> {
    let dims = [container.width, container.height, image.width, image.height];
    if dims.iter().any(|d| !d.is_finite() || *d <= 0.0) {
        return None;
    }
    Some((container.width / image.width).min(container.height / image.height))
}

/// [`fit_scale`] as a whole percentage, the value shown on scale sliders.
pub fn fit_scale_percent(container: Size, image: Size) -> Option<f64> {
    fit_scale(container, image).map(|scale| (scale * 100.0).round())
}

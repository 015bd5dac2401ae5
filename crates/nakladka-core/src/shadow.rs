//! Shadow synchronization.
//!
//! The shadow is a blurred box painted under the overlay. Its geometry is a
//! function of the overlay shape, the transform state, the border width and
//! the measured layout of the overlay inside its container.

use crate::geometry::{OverlayShape, ShadowRule};
use crate::transform::TransformState;
use kurbo::{Point, Size, Vec2};
use peniko::Color;
use std::fmt;

/// Stacking index of the overlay frame.
pub const OVERLAY_Z_INDEX: i32 = 6;
/// Stacking index of the shadow. Always below the overlay.
pub const SHADOW_Z_INDEX: i32 = 5;

/// Tint of the border-box shadow.
pub const BOX_SHADOW_COLOR: Color = Color::new([0.0, 0.0, 0.0, 0.66]);
pub const BOX_SHADOW_BLUR_PX: f64 = 10.0;

/// Tint of the cut-strip shadow.
pub const STRIP_SHADOW_COLOR: Color = Color::new([0.0, 0.0, 0.0, 0.92]);
pub const STRIP_SHADOW_BLUR_PX: f64 = 9.0;
pub const STRIP_WIDTH_PX: f64 = 8.0;
pub const STRIP_HEIGHT_PCT: f64 = 120.0;
pub const STRIP_LEFT_PCT: f64 = 50.5;
pub const STRIP_TOP_PCT: f64 = -10.0;
pub const STRIP_TRANSLATE_X_PCT: f64 = -49.0;
/// The strip follows the cut, not the overlay rotation.
pub const STRIP_ROTATION_DEGREES: i32 = 8;

/// A CSS length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CssLength {
    Px(f64),
    Percent(f64),
}

impl fmt::Display for CssLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssLength::Px(v) => write!(f, "{}px", v),
            CssLength::Percent(v) => write!(f, "{}%", v),
        }
    }
}

/// Shadow transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShadowTransform {
    /// Mirrors the overlay translation (plus the shadow depth) and rotation.
    Follow { translate: Vec2, rotation_degrees: i32 },
    /// Centers the cut strip horizontally and tilts it to the cut angle.
    Strip,
}

impl ShadowTransform {
    pub fn rotation_degrees(&self) -> i32 {
        match self {
            ShadowTransform::Follow { rotation_degrees, .. } => *rotation_degrees,
            ShadowTransform::Strip => STRIP_ROTATION_DEGREES,
        }
    }

    /// CSS transform string.
    pub fn css(&self) -> String {
        match self {
            ShadowTransform::Follow { translate, rotation_degrees } => format!(
                "translate({}px, {}px) rotate({}deg)",
                translate.x, translate.y, rotation_degrees
            ),
            ShadowTransform::Strip => format!(
                "translateX({}%) rotate({}deg)",
                STRIP_TRANSLATE_X_PCT, STRIP_ROTATION_DEGREES
            ),
        }
    }
}

/// Measured placement of the overlay inside its container, reported by the
/// rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverlayLayout {
    /// Laid-out top-left corner, before the drag translation.
    pub origin: Point,
    /// Footprint imposed by the container on shapes that cannot be resized.
    pub fixed_footprint: Size,
}

/// Derived shadow geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowGeometry {
    pub width: CssLength,
    pub height: CssLength,
    pub left: CssLength,
    pub top: CssLength,
    pub transform: ShadowTransform,
    pub shape_class: Option<&'static str>,
    pub color: Color,
    pub blur_px: f64,
}

impl ShadowGeometry {
    pub fn rotation_degrees(&self) -> i32 {
        self.transform.rotation_degrees()
    }

    /// CSS `rgba(...)` for the shadow tint.
    pub fn color_css(&self) -> String {
        let rgba = self.color.to_rgba8();
        format!(
            "rgba({}, {}, {}, {})",
            rgba.r, rgba.g, rgba.b, self.color.components[3]
        )
    }

    /// CSS `blur(...)` filter.
    pub fn filter_css(&self) -> String {
        format!("blur({}px)", self.blur_px)
    }
}

/// Derives shadow geometry from overlay state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowSynchronizer {
    /// Offset between the overlay translation and the shadow translation.
    pub depth: Vec2,
}

impl Default for ShadowSynchronizer {
    fn default() -> Self {
        Self { depth: Vec2::new(3.0, 3.0) }
    }
}

impl ShadowSynchronizer {
    pub fn new(depth: Vec2) -> Self {
        Self { depth }
    }

    /// Transform that mirrors the overlay's current translation and rotation.
    ///
    /// This is what the live drag and rotation paths write, for every shape.
    pub fn follow(&self, state: &TransformState) -> ShadowTransform {
        ShadowTransform::Follow {
            translate: state.position_offset() + self.depth,
            rotation_degrees: state.rotation_degrees(),
        }
    }

    /// Full recompute from the current state.
    pub fn compute(&self, state: &TransformState, layout: &OverlayLayout) -> ShadowGeometry {
        let shape = state.shape();
        match shape.shadow_rule() {
            ShadowRule::BorderBox => self.border_box(state, shape, layout),
            ShadowRule::CutStrip => ShadowGeometry {
                width: CssLength::Px(STRIP_WIDTH_PX),
                height: CssLength::Percent(STRIP_HEIGHT_PCT),
                left: CssLength::Percent(STRIP_LEFT_PCT),
                top: CssLength::Percent(STRIP_TOP_PCT),
                transform: ShadowTransform::Strip,
                shape_class: shape.shadow_class(),
                color: STRIP_SHADOW_COLOR,
                blur_px: STRIP_SHADOW_BLUR_PX,
            },
        }
    }

    fn border_box(
        &self,
        state: &TransformState,
        shape: &OverlayShape,
        layout: &OverlayLayout,
    ) -> ShadowGeometry {
        let border = state.border_width_px();
        let size = state.box_size(layout.fixed_footprint);
        ShadowGeometry {
            width: CssLength::Px(size.width + border * 2.0),
            height: CssLength::Px(size.height + border * 2.0),
            left: CssLength::Px(layout.origin.x - border),
            top: CssLength::Px(layout.origin.y - border),
            transform: self.follow(state),
            shape_class: shape.shadow_class(),
            color: BOX_SHADOW_COLOR,
            blur_px: BOX_SHADOW_BLUR_PX,
        }
    }
}

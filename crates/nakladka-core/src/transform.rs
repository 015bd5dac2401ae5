//! Overlay transform state.

use crate::config::EditorConfig;
use crate::geometry::OverlayShape;
use kurbo::{Affine, Point, Size, Vec2};

/// Normalize an angle in whole degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: i64) -> i32 {
    // rem_euclid keeps the result in 0..360, so the cast cannot truncate.
    degrees.rem_euclid(360) as i32
}

/// Position, rotation, scale, shape and border of the overlay frame.
///
/// Fields are private so every change goes through a mutator that keeps
/// the invariants: rotation in `[0, 360)`, scale above the configured
/// minimum, border width non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformState {
    position_offset: Vec2,
    rotation_degrees: i32,
    scale_percent: f64,
    shape: OverlayShape,
    size_px: f64,
    border_width_px: f64,
    border_color: String,
    min_scale_percent: f64,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl TransformState {
    /// Create a transform state from configured defaults.
    pub fn from_config(config: &EditorConfig) -> Self {
        let min_scale_percent = if config.min_scale_percent > 0.0 {
            config.min_scale_percent
        } else {
            crate::config::MIN_SCALE_PERCENT
        };
        Self {
            position_offset: Vec2::ZERO,
            rotation_degrees: normalize_degrees(0),
            scale_percent: config.initial_overlay_scale_percent.max(min_scale_percent),
            shape: config.initial_shape.clone(),
            size_px: config.initial_size_px.max(0.0),
            border_width_px: config.initial_border_width_px.max(0.0),
            border_color: config.initial_border_color.clone(),
            min_scale_percent,
        }
    }

    pub fn position_offset(&self) -> Vec2 {
        self.position_offset
    }

    pub fn rotation_degrees(&self) -> i32 {
        self.rotation_degrees
    }

    /// Overlay image scale in percent.
    pub fn scale_percent(&self) -> f64 {
        self.scale_percent
    }

    pub fn shape(&self) -> &OverlayShape {
        &self.shape
    }

    /// Requested edge length. The rendered footprint of fixed shapes comes
    /// from the layout instead.
    pub fn size_px(&self) -> f64 {
        self.size_px
    }

    pub fn border_width_px(&self) -> f64 {
        self.border_width_px
    }

    pub fn border_color(&self) -> &str {
        &self.border_color
    }

    /// Set the accumulated drag translation.
    pub fn set_position_offset(&mut self, dx: f64, dy: f64) {
        self.position_offset = Vec2::new(dx, dy);
    }

    /// Set the rotation, normalized into `[0, 360)`.
    pub fn set_rotation(&mut self, degrees: i32) {
        self.rotation_degrees = normalize_degrees(i64::from(degrees));
    }

    /// Rotate relative to the current angle.
    pub fn rotate_by(&mut self, delta: i64) {
        self.rotation_degrees =
            normalize_degrees(i64::from(self.rotation_degrees) + delta.rem_euclid(360));
    }

    /// Set the overlay image scale.
    ///
    /// Non-finite and non-positive values are ignored. Values below the
    /// minimum are raised to it. Returns whether the input was accepted.
    pub fn set_scale(&mut self, percent: f64) -> bool {
        if !percent.is_finite() || percent <= 0.0 {
            log::warn!("Ignoring invalid overlay scale {}%", percent);
            return false;
        }
        self.scale_percent = percent.max(self.min_scale_percent);
        true
    }

    pub fn set_shape(&mut self, shape: OverlayShape) {
        self.shape = shape;
    }

    /// Set the edge length of a resizable overlay.
    ///
    /// Returns `false` without changing anything for shapes whose footprint is
    /// fixed by the container.
    pub fn set_size(&mut self, px: f64) -> bool {
        if !self.shape.is_resizable() {
            log::debug!("Size control ignored for fixed shape {}", self.shape);
            return false;
        }
        if !px.is_finite() {
            log::warn!("Ignoring invalid overlay size {}", px);
            return false;
        }
        self.size_px = px.max(0.0);
        true
    }

    pub fn set_border(&mut self, width_px: f64, color: impl Into<String>) {
        self.set_border_width(width_px);
        self.set_border_color(color);
    }

    /// Set the border width, clamped to zero from below.
    pub fn set_border_width(&mut self, width_px: f64) {
        if !width_px.is_finite() {
            log::warn!("Ignoring invalid border width {}", width_px);
            return;
        }
        self.border_width_px = width_px.max(0.0);
    }

    pub fn set_border_color(&mut self, color: impl Into<String>) {
        self.border_color = color.into();
    }

    /// Rendered overlay box size, given the footprint the container imposes on
    /// fixed shapes.
    pub fn box_size(&self, fixed_footprint: Size) -> Size {
        if self.shape.is_resizable() {
            Size::new(self.size_px, self.size_px)
        } else {
            fixed_footprint
        }
    }

    /// Overlay frame transform as an affine map: rotation about `center`
    /// followed by the drag translation in the parent frame.
    pub fn overlay_affine(&self, center: Point) -> Affine {
        let radians = f64::from(self.rotation_degrees).to_radians();
        Affine::translate(self.position_offset) * Affine::rotate_about(radians, center)
    }

    /// CSS transform of the overlay frame.
    pub fn overlay_css(&self) -> String {
        format!(
            "translate({}px, {}px) rotate({}deg)",
            self.position_offset.x, self.position_offset.y, self.rotation_degrees
        )
    }

    /// CSS transform of the image inside the overlay frame. Rotation tracks the
    /// frame, scale is local to the image.
    pub fn overlay_image_css(&self) -> String {
        format!(
            "rotate({}deg) scale({})",
            self.rotation_degrees,
            self.scale_percent / 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_normalized() {
        let mut state = TransformState::default();
        state.set_rotation(-10);
        assert_eq!(state.rotation_degrees(), 350);
        state.set_rotation(720);
        assert_eq!(state.rotation_degrees(), 0);
        state.set_rotation(i32::MIN);
        assert!((0..360).contains(&state.rotation_degrees()));
        state.set_rotation(i32::MAX);
        assert!((0..360).contains(&state.rotation_degrees()));
    }

    #[test]
    fn test_rotate_by_stays_in_range() {
        let mut state = TransformState::default();
        for delta in [-10, 10, 355, -725, i64::MAX, i64::MIN, 1, -1] {
            for _ in 0..50 {
                state.rotate_by(delta);
                assert!((0..360).contains(&state.rotation_degrees()));
            }
        }
    }

    #[test]
    fn test_rotate_by_steps() {
        let mut state = TransformState::default();
        state.rotate_by(-10);
        assert_eq!(state.rotation_degrees(), 350);
        state.rotate_by(20);
        assert_eq!(state.rotation_degrees(), 10);
    }

    #[test]
    fn test_scale_rejects_non_positive() {
        let mut state = TransformState::default();
        assert!(state.set_scale(150.0));
        assert!(!state.set_scale(0.0));
        assert!(!state.set_scale(-20.0));
        assert!(!state.set_scale(f64::NAN));
        assert!((state.scale_percent() - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scale_clamped_to_minimum() {
        let mut state = TransformState::default();
        assert!(state.set_scale(0.25));
        assert!((state.scale_percent() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_size_ignored_for_fixed_shapes() {
        let mut state = TransformState::default();
        assert!(state.set_size(120.0));

        state.set_shape(OverlayShape::Sklejka);
        assert!(!state.set_size(300.0));
        state.set_shape(OverlayShape::Skos);
        assert!(!state.set_size(300.0));
        assert!((state.size_px() - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_box_size_by_shape() {
        let mut state = TransformState::default();
        state.set_size(120.0);
        let footprint = Size::new(400.0, 250.0);
        assert_eq!(state.box_size(footprint), Size::new(120.0, 120.0));
        state.set_shape(OverlayShape::Sklejka);
        assert_eq!(state.box_size(footprint), footprint);
    }

    #[test]
    fn test_border_width_clamped() {
        let mut state = TransformState::default();
        state.set_border(-4.0, "#ff0000");
        assert!(state.border_width_px().abs() < f64::EPSILON);
        assert_eq!(state.border_color(), "#ff0000");
    }

    #[test]
    fn test_overlay_css() {
        let mut state = TransformState::default();
        state.set_position_offset(12.0, -4.5);
        state.set_rotation(30);
        state.set_scale(80.0);
        assert_eq!(state.overlay_css(), "translate(12px, -4.5px) rotate(30deg)");
        assert_eq!(state.overlay_image_css(), "rotate(30deg) scale(0.8)");
    }

    #[test]
    fn test_overlay_affine_translates_center() {
        let mut state = TransformState::default();
        state.set_position_offset(10.0, 20.0);
        state.set_rotation(90);
        let center = Point::new(50.0, 50.0);
        let moved = state.overlay_affine(center) * center;
        assert!((moved.x - 60.0).abs() < 1e-10);
        assert!((moved.y - 70.0).abs() < 1e-10);
    }
}

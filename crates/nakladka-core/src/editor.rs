//! Editor state and input handling.
//!
//! The editor is the single owner of the overlay transform and the derived
//! shadow. Every mutation that changes layout recomputes the shadow before
//! returning, so callers never observe a stale shadow.

use crate::canvas::EditorSize;
use crate::config::EditorConfig;
use crate::drag::{DragSession, PointerEvent};
use crate::geometry::{OverlayShape, fit_scale_percent};
use crate::shadow::{
    OVERLAY_Z_INDEX, OverlayLayout, SHADOW_Z_INDEX, ShadowGeometry, ShadowSynchronizer,
};
use crate::storage::Storage;
use crate::template::{Template, TemplateResult, TemplateStore};
use crate::transform::TransformState;
use kurbo::{Point, Rect, Size, Vec2};

/// Image moved by the nudge arrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeTarget {
    MainImage,
    OverlayImage,
}

/// Direction of a nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl NudgeDirection {
    fn unit(self) -> Vec2 {
        match self {
            NudgeDirection::Up => Vec2::new(0.0, -1.0),
            NudgeDirection::Down => Vec2::new(0.0, 1.0),
            NudgeDirection::Left => Vec2::new(-1.0, 0.0),
            NudgeDirection::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Shadow as handed to the rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowRender {
    pub geometry: ShadowGeometry,
    pub width: String,
    pub height: String,
    pub left: String,
    pub top: String,
    pub transform: String,
    pub background: String,
    pub filter: String,
    pub z_index: i32,
}

/// Everything the rendering surface needs to draw the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    /// Fixed container size, if the canvas mode imposes one.
    pub container_size: Option<Size>,
    pub overlay_class: String,
    /// Explicit overlay size; `None` when the container sizes the overlay.
    pub overlay_size: Option<Size>,
    pub overlay_transform: String,
    pub overlay_z_index: i32,
    pub border_width: String,
    pub border_color: String,
    pub overlay_image_transform: String,
    pub overlay_image_offset: Vec2,
    pub main_image_transform: String,
    pub main_image_offset: Vec2,
    /// `None` while the shadow is switched off.
    pub shadow: Option<ShadowRender>,
}

/// Overlay editor.
#[derive(Debug, Clone)]
pub struct Editor {
    config: EditorConfig,
    transform: TransformState,
    synchronizer: ShadowSynchronizer,
    shadow: ShadowGeometry,
    shadow_enabled: bool,
    layout: OverlayLayout,
    editor_size: EditorSize,
    main_scale_percent: f64,
    main_image_offset: Vec2,
    overlay_image_offset: Vec2,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Create an editor with the shadow switched on.
    pub fn new(config: EditorConfig) -> Self {
        let transform = TransformState::from_config(&config);
        let synchronizer = ShadowSynchronizer::new(config.shadow_depth);
        let layout = OverlayLayout::default();
        let shadow = synchronizer.compute(&transform, &layout);
        let main_scale_percent = config.initial_main_scale_percent.max(config.min_scale_percent);
        Self {
            config,
            transform,
            synchronizer,
            shadow,
            shadow_enabled: true,
            layout,
            editor_size: EditorSize::default(),
            main_scale_percent,
            main_image_offset: Vec2::ZERO,
            overlay_image_offset: Vec2::ZERO,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    /// Current shadow geometry, kept up to date even while the shadow is off.
    pub fn shadow(&self) -> &ShadowGeometry {
        &self.shadow
    }

    pub fn is_shadow_enabled(&self) -> bool {
        self.shadow_enabled
    }

    pub fn layout(&self) -> &OverlayLayout {
        &self.layout
    }

    pub fn editor_size(&self) -> EditorSize {
        self.editor_size
    }

    pub fn main_scale_percent(&self) -> f64 {
        self.main_scale_percent
    }

    pub fn image_offset(&self, target: NudgeTarget) -> Vec2 {
        match target {
            NudgeTarget::MainImage => self.main_image_offset,
            NudgeTarget::OverlayImage => self.overlay_image_offset,
        }
    }

    /// Rebuild the shadow from scratch.
    ///
    /// For the cut-strip shape this replaces any drag-written transform with
    /// the fixed strip angle.
    fn recompute_shadow(&mut self) {
        self.shadow = self.synchronizer.compute(&self.transform, &self.layout);
    }

    /// Mirror the overlay translation and rotation onto the shadow, leaving
    /// its box untouched. Applies to every shape, the cut strip included.
    fn track_shadow(&mut self) {
        if self.shadow_enabled {
            self.shadow.transform = self.synchronizer.follow(&self.transform);
        }
    }

    /// Move the overlay to an absolute drag offset.
    pub fn set_position_offset(&mut self, dx: f64, dy: f64) {
        self.transform.set_position_offset(dx, dy);
        self.track_shadow();
    }

    pub fn set_rotation(&mut self, degrees: i32) {
        self.transform.set_rotation(degrees);
        self.track_shadow();
    }

    pub fn rotate_by(&mut self, delta: i64) {
        self.transform.rotate_by(delta);
        self.track_shadow();
    }

    /// Rotate counter-clockwise by the configured step.
    pub fn rotate_left(&mut self) {
        self.rotate_by(-i64::from(self.config.rotation_step_degrees));
    }

    /// Rotate clockwise by the configured step.
    pub fn rotate_right(&mut self) {
        self.rotate_by(i64::from(self.config.rotation_step_degrees));
    }

    /// Set the overlay image scale. Returns whether the value was accepted.
    pub fn set_overlay_scale(&mut self, percent: f64) -> bool {
        self.transform.set_scale(percent)
    }

    pub fn set_shape(&mut self, shape: OverlayShape) {
        log::debug!("Overlay shape set to {}", shape);
        self.transform.set_shape(shape);
        self.recompute_shadow();
    }

    /// Set the overlay edge length. Ignored for fixed-footprint shapes.
    pub fn set_size(&mut self, px: f64) -> bool {
        let changed = self.transform.set_size(px);
        if changed {
            self.recompute_shadow();
        }
        changed
    }

    pub fn set_border(&mut self, width_px: f64, color: impl Into<String>) {
        self.transform.set_border(width_px, color);
        self.recompute_shadow();
    }

    pub fn set_border_width(&mut self, width_px: f64) {
        self.transform.set_border_width(width_px);
        self.recompute_shadow();
    }

    /// Border color does not affect shadow geometry.
    pub fn set_border_color(&mut self, color: impl Into<String>) {
        self.transform.set_border_color(color);
    }

    /// Record the overlay placement measured by the rendering surface.
    pub fn set_layout(&mut self, layout: OverlayLayout) {
        self.layout = layout;
        self.recompute_shadow();
    }

    pub fn set_editor_size(&mut self, size: EditorSize) {
        self.editor_size = size;
        self.recompute_shadow();
    }

    pub fn set_shadow_enabled(&mut self, enabled: bool) {
        self.shadow_enabled = enabled;
        if enabled {
            self.recompute_shadow();
        }
    }

    /// Set the main image scale. Returns whether the value was accepted.
    pub fn set_main_scale(&mut self, percent: f64) -> bool {
        if !percent.is_finite() || percent <= 0.0 {
            log::warn!("Ignoring invalid main image scale {}%", percent);
            return false;
        }
        self.main_scale_percent = percent.max(self.config.min_scale_percent);
        true
    }

    /// Scale the main image to fit `container`. Returns the applied percent.
    pub fn fit_main_image(&mut self, container: Size, natural: Size) -> Option<f64> {
        let percent = fit_scale_percent(container, natural)?;
        if !self.set_main_scale(percent) {
            return None;
        }
        Some(self.main_scale_percent)
    }

    /// Scale a newly loaded overlay image to fit the overlay box, border
    /// included. Returns the applied percent.
    pub fn fit_overlay_image(&mut self, natural: Size) -> Option<f64> {
        let border = 2.0 * self.transform.border_width_px();
        let content = self.overlay_box_size();
        let container = Size::new(content.width + border, content.height + border);
        let percent = fit_scale_percent(container, natural)?;
        if !self.set_overlay_scale(percent) {
            return None;
        }
        Some(self.transform.scale_percent())
    }

    /// Move an image by one nudge step.
    pub fn nudge(&mut self, target: NudgeTarget, direction: NudgeDirection) {
        let delta = direction.unit() * self.config.nudge_step_px;
        match target {
            NudgeTarget::MainImage => self.main_image_offset += delta,
            NudgeTarget::OverlayImage => self.overlay_image_offset += delta,
        }
    }

    /// Rendered size of the overlay box, excluding the border.
    pub fn overlay_box_size(&self) -> Size {
        self.transform.box_size(self.layout.fixed_footprint)
    }

    /// Whether a point in container coordinates lies on the overlay,
    /// border included, after translation and rotation.
    pub fn hit_test(&self, point: Point) -> bool {
        let border = self.transform.border_width_px();
        let frame = Rect::from_origin_size(self.layout.origin, self.overlay_box_size())
            .inflate(border, border);
        let to_local = self.transform.overlay_affine(frame.center()).inverse();
        frame.contains(to_local * point)
    }

    /// Feed one pointer event through a drag session.
    ///
    /// Returns `true` when the overlay moved.
    pub fn handle_pointer_event(&mut self, session: &mut DragSession, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { position } => {
                let hit = self.hit_test(position);
                session.press(position, self.transform.position_offset(), hit);
                false
            }
            PointerEvent::Move { position } => match session.drag(position) {
                Some(offset) => {
                    self.set_position_offset(offset.x, offset.y);
                    true
                }
                None => false,
            },
            PointerEvent::Up => {
                session.release();
                false
            }
        }
    }

    /// Snapshot the current configuration as a template.
    pub fn snapshot(&self) -> Template {
        Template {
            shape: self.transform.shape().clone(),
            overlay_size: Some(self.transform.size_px()),
            border_width: self.transform.border_width_px(),
            border_color: self.transform.border_color().to_string(),
            position: self.transform.position_offset(),
            rotation: self.transform.rotation_degrees(),
            shadow: self.shadow_enabled,
            overlay_scale: self.transform.scale_percent(),
            editor_size: self.editor_size,
        }
    }

    /// Restore a template.
    ///
    /// The overlay size is only restored for resizable shapes; the others
    /// take their footprint from the container.
    pub fn apply(&mut self, template: &Template) {
        self.transform.set_shape(template.shape.clone());
        if let Some(size) = template.overlay_size {
            self.transform.set_size(size);
        }
        self.transform
            .set_border(template.border_width, template.border_color.clone());
        self.transform
            .set_position_offset(template.position.x, template.position.y);
        self.transform.set_rotation(template.rotation);
        self.transform.set_scale(template.overlay_scale);
        self.editor_size = template.editor_size;
        self.shadow_enabled = template.shadow;
        self.recompute_shadow();
    }

    /// Save the current configuration under `name`.
    pub fn save_template<S: Storage>(
        &self,
        store: &mut TemplateStore<S>,
        name: &str,
    ) -> TemplateResult<()> {
        store.save(name, &self.snapshot())
    }

    /// Load the template `name` and apply it.
    pub fn load_template<S: Storage>(
        &mut self,
        store: &TemplateStore<S>,
        name: &str,
    ) -> TemplateResult<()> {
        let template = store.load(name)?;
        self.apply(&template);
        log::info!("Applied template {:?}", name);
        Ok(())
    }

    /// Resolve the current state into render parameters.
    pub fn render(&self) -> RenderState {
        let shadow = self.shadow_enabled.then(|| ShadowRender {
            geometry: self.shadow.clone(),
            width: self.shadow.width.to_string(),
            height: self.shadow.height.to_string(),
            left: self.shadow.left.to_string(),
            top: self.shadow.top.to_string(),
            transform: self.shadow.transform.css(),
            background: self.shadow.color_css(),
            filter: self.shadow.filter_css(),
            z_index: SHADOW_Z_INDEX,
        });
        let shape = self.transform.shape();
        RenderState {
            container_size: self.editor_size.fixed_dimensions(),
            overlay_class: shape.class_name().to_string(),
            overlay_size: shape
                .is_resizable()
                .then(|| Size::new(self.transform.size_px(), self.transform.size_px())),
            overlay_transform: self.transform.overlay_css(),
            overlay_z_index: OVERLAY_Z_INDEX,
            border_width: format!("{}px", self.transform.border_width_px()),
            border_color: self.transform.border_color().to_string(),
            overlay_image_transform: self.transform.overlay_image_css(),
            overlay_image_offset: self.overlay_image_offset,
            main_image_transform: format!(
                "translate(-50%, -50%) scale({})",
                self.main_scale_percent / 100.0
            ),
            main_image_offset: self.main_image_offset,
            shadow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shadow::{CssLength, ShadowTransform};

    #[test]
    fn test_square_size_drives_shadow() {
        let mut editor = Editor::default();
        editor.set_border_width(5.0);
        assert!(editor.set_size(120.0));

        assert_eq!(editor.overlay_box_size(), Size::new(120.0, 120.0));
        assert_eq!(editor.shadow().width, CssLength::Px(130.0));
        assert_eq!(editor.shadow().height, CssLength::Px(130.0));
    }

    #[test]
    fn test_size_ignored_for_sklejka() {
        let mut editor = Editor::default();
        editor.set_layout(OverlayLayout {
            origin: Point::ZERO,
            fixed_footprint: Size::new(320.0, 200.0),
        });
        editor.set_shape(OverlayShape::Sklejka);
        assert!(!editor.set_size(90.0));
        assert_eq!(editor.overlay_box_size(), Size::new(320.0, 200.0));
        assert_eq!(editor.render().overlay_size, None);
    }

    #[test]
    fn test_skos_rotation_divergence() {
        let mut editor = Editor::default();
        editor.set_shape(OverlayShape::Skos);
        editor.set_rotation(45);
        editor.set_position_offset(10.0, 10.0);
        assert_eq!(editor.shadow().rotation_degrees(), 45);

        editor.set_border_width(8.0);
        assert_eq!(editor.shadow().rotation_degrees(), 8);
        assert_eq!(editor.shadow().transform, ShadowTransform::Strip);
        assert_eq!(editor.transform().rotation_degrees(), 45);
    }

    #[test]
    fn test_border_color_does_not_recompute() {
        let mut editor = Editor::default();
        editor.set_shape(OverlayShape::Skos);
        editor.set_rotation(45);
        editor.set_border_color("#000000");
        assert_eq!(editor.shadow().rotation_degrees(), 45);
        assert_eq!(editor.transform().border_color(), "#000000");
    }

    #[test]
    fn test_rotation_steps() {
        let mut editor = Editor::default();
        editor.rotate_left();
        assert_eq!(editor.transform().rotation_degrees(), 350);
        editor.rotate_right();
        editor.rotate_right();
        assert_eq!(editor.transform().rotation_degrees(), 10);
        assert_eq!(editor.shadow().rotation_degrees(), 10);
    }

    #[test]
    fn test_rotation_steps_with_extreme_config() {
        let mut editor = Editor::new(EditorConfig {
            rotation_step_degrees: i32::MIN,
            ..EditorConfig::default()
        });
        editor.rotate_left();
        // 2^31 mod 360 = 128
        assert_eq!(editor.transform().rotation_degrees(), 128);
        editor.rotate_right();
        assert_eq!(editor.transform().rotation_degrees(), 0);
    }

    #[test]
    fn test_disabled_shadow_is_not_tracked() {
        let mut editor = Editor::default();
        editor.set_shadow_enabled(false);
        editor.set_position_offset(50.0, 0.0);
        assert!(editor.render().shadow.is_none());
        assert_eq!(
            editor.shadow().transform,
            ShadowTransform::Follow { translate: Vec2::new(3.0, 3.0), rotation_degrees: 0 }
        );

        editor.set_shadow_enabled(true);
        assert_eq!(
            editor.shadow().transform,
            ShadowTransform::Follow { translate: Vec2::new(53.0, 3.0), rotation_degrees: 0 }
        );
    }

    #[test]
    fn test_disabled_shadow_survives_snapshot_apply() {
        let mut editor = Editor::default();
        editor.set_shadow_enabled(false);
        let snapshot = editor.snapshot();
        assert!(!snapshot.shadow);

        editor.apply(&snapshot);
        assert!(!editor.is_shadow_enabled());
        assert!(editor.render().shadow.is_none());
    }

    #[test]
    fn test_hit_test_follows_translation() {
        let mut editor = Editor::default();
        editor.set_border_width(0.0);
        editor.set_size(100.0);
        assert!(editor.hit_test(Point::new(50.0, 50.0)));
        assert!(!editor.hit_test(Point::new(150.0, 50.0)));

        editor.set_position_offset(100.0, 0.0);
        assert!(editor.hit_test(Point::new(150.0, 50.0)));
        assert!(!editor.hit_test(Point::new(50.0, 50.0)));
    }

    #[test]
    fn test_hit_test_follows_rotation() {
        let mut editor = Editor::default();
        editor.set_border_width(0.0);
        editor.set_size(100.0);
        // A corner of the unrotated box falls outside once rotated by 45°.
        assert!(editor.hit_test(Point::new(2.0, 2.0)));
        editor.set_rotation(45);
        assert!(!editor.hit_test(Point::new(2.0, 2.0)));
        assert!(editor.hit_test(Point::new(50.0, 50.0)));
    }

    #[test]
    fn test_pointer_miss_does_not_drag() {
        let mut editor = Editor::default();
        let mut session = DragSession::new();
        editor.handle_pointer_event(&mut session, PointerEvent::Down { position: Point::new(900.0, 900.0) });
        assert!(!session.is_dragging());
        assert!(!editor.handle_pointer_event(&mut session, PointerEvent::Move { position: Point::new(950.0, 950.0) }));
        assert_eq!(editor.transform().position_offset(), Vec2::ZERO);
    }

    #[test]
    fn test_fit_overlay_image() {
        let mut editor = Editor::default();
        editor.set_border_width(0.0);
        editor.set_size(200.0);
        let percent = editor.fit_overlay_image(Size::new(400.0, 800.0)).unwrap();
        assert!((percent - 25.0).abs() < f64::EPSILON);
        assert_eq!(editor.render().overlay_image_transform, "rotate(0deg) scale(0.25)");
    }

    #[test]
    fn test_fit_overlay_image_includes_border() {
        let mut editor = Editor::default();
        editor.set_border_width(50.0);
        editor.set_size(300.0);
        // 300 + 2 * 50 = 400 across, against an 800px tall image.
        let percent = editor.fit_overlay_image(Size::new(400.0, 800.0)).unwrap();
        assert!((percent - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fit_main_image() {
        let mut editor = Editor::default();
        let percent = editor
            .fit_main_image(Size::new(1620.0, 1000.0), Size::new(3240.0, 1000.0))
            .unwrap();
        assert!((percent - 50.0).abs() < f64::EPSILON);
        assert_eq!(editor.render().main_image_transform, "translate(-50%, -50%) scale(0.5)");
        assert_eq!(editor.fit_main_image(Size::new(10.0, 10.0), Size::ZERO), None);
    }

    #[test]
    fn test_main_scale_rejects_non_positive() {
        let mut editor = Editor::default();
        assert!(!editor.set_main_scale(0.0));
        assert!((editor.main_scale_percent() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_nudge() {
        let mut editor = Editor::default();
        editor.nudge(NudgeTarget::MainImage, NudgeDirection::Up);
        editor.nudge(NudgeTarget::MainImage, NudgeDirection::Left);
        editor.nudge(NudgeTarget::OverlayImage, NudgeDirection::Right);
        editor.nudge(NudgeTarget::OverlayImage, NudgeDirection::Down);
        editor.nudge(NudgeTarget::OverlayImage, NudgeDirection::Down);

        assert_eq!(editor.image_offset(NudgeTarget::MainImage), Vec2::new(-10.0, -10.0));
        assert_eq!(editor.image_offset(NudgeTarget::OverlayImage), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_render_strings() {
        let mut editor = Editor::default();
        editor.set_border(4.0, "#ff0000");
        editor.set_size(100.0);
        editor.set_position_offset(7.0, 8.0);
        editor.set_rotation(15);
        editor.set_editor_size(EditorSize::Cms);
        let render = editor.render();

        assert_eq!(render.container_size, Some(Size::new(1620.0, 1000.0)));
        assert_eq!(render.overlay_class, "square");
        assert_eq!(render.overlay_transform, "translate(7px, 8px) rotate(15deg)");
        assert_eq!(render.border_width, "4px");
        assert_eq!(render.border_color, "#ff0000");
        let shadow = render.shadow.unwrap();
        assert_eq!(shadow.width, "108px");
        assert_eq!(shadow.left, "-4px");
        assert_eq!(shadow.transform, "translate(10px, 11px) rotate(15deg)");
        assert_eq!(shadow.background, "rgba(0, 0, 0, 0.66)");
        assert!(shadow.z_index < render.overlay_z_index);
    }

    #[test]
    fn test_snapshot_records_live_state() {
        let mut editor = Editor::default();
        editor.set_shape(OverlayShape::Circle);
        editor.set_size(150.0);
        editor.set_position_offset(3.0, 4.0);
        editor.set_rotation(-90);
        editor.set_editor_size(EditorSize::Cms);
        let snapshot = editor.snapshot();

        assert_eq!(snapshot.shape, OverlayShape::Circle);
        assert_eq!(snapshot.overlay_size, Some(150.0));
        assert_eq!(snapshot.position, Vec2::new(3.0, 4.0));
        assert_eq!(snapshot.rotation, 270);
        assert!(snapshot.shadow);
        assert_eq!(snapshot.editor_size, EditorSize::Cms);
    }
}

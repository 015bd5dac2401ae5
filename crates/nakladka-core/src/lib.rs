//! Nakladka Core Library
//!
//! Overlay transform state, shadow synchronization and template persistence
//! for the Nakladka photo-overlay editor. Rendering is left to the caller:
//! the core only produces transform parameters.

pub mod canvas;
pub mod config;
pub mod drag;
pub mod editor;
pub mod geometry;
pub mod shadow;
pub mod storage;
pub mod template;
pub mod transform;

pub use canvas::{CMS_CANVAS_SIZE, EditorSize};
pub use config::{EditorConfig, MIN_SCALE_PERCENT};
pub use drag::{DragSession, PointerEvent};
pub use editor::{Editor, NudgeDirection, NudgeTarget, RenderState, ShadowRender};
pub use geometry::{OverlayShape, ShadowRule, fit_scale, fit_scale_percent};
pub use shadow::{CssLength, OverlayLayout, ShadowGeometry, ShadowSynchronizer, ShadowTransform};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, StorageResult};
pub use template::{Template, TemplateError, TemplateResult, TemplateStore};
pub use transform::TransformState;

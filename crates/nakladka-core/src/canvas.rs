//! Canvas-size modes of the editor container.

use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Fixed container size used for CMS uploads.
pub const CMS_CANVAS_SIZE: Size = Size::new(1620.0, 1000.0);

/// Size mode of the editor container.
///
/// Only the container the overlay and shadow are positioned within changes;
/// transform math is unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorSize {
    /// Whatever size the surrounding page gives the container.
    #[default]
    Current,
    /// Fixed 1620×1000 with a locked aspect ratio.
    Cms,
}

impl EditorSize {
    /// Fixed container dimensions, if this mode imposes any.
    pub fn fixed_dimensions(&self) -> Option<Size> {
        match self {
            EditorSize::Current => None,
            EditorSize::Cms => Some(CMS_CANVAS_SIZE),
        }
    }

    /// File name used when the composed image is exported.
    pub fn export_file_name(&self) -> &'static str {
        match self {
            EditorSize::Current => "edited-image.png",
            EditorSize::Cms => "edited-image-1620x1000.png",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EditorSize::Current => "current",
            EditorSize::Cms => "cms",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_dimensions() {
        assert_eq!(EditorSize::Current.fixed_dimensions(), None);
        assert_eq!(EditorSize::Cms.fixed_dimensions(), Some(Size::new(1620.0, 1000.0)));
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(EditorSize::Cms.export_file_name(), "edited-image-1620x1000.png");
        assert_eq!(EditorSize::Current.export_file_name(), "edited-image.png");
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&EditorSize::Cms).unwrap(), "\"cms\"");
        let mode: EditorSize = serde_json::from_str("\"current\"").unwrap();
        assert_eq!(mode, EditorSize::Current);
    }
}

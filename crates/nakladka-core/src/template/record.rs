//! Persisted template record.

use crate::canvas::EditorSize;
use crate::geometry::OverlayShape;
use kurbo::Vec2;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A flat snapshot of the editor's overlay configuration.
///
/// The JSON layout matches the records the browser editor keeps in local
/// storage, so those records load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub shape: OverlayShape,
    /// Edge length as a `"<n>px"` string. Empty when the size was never set.
    #[serde(
        default,
        serialize_with = "serialize_optional_px",
        deserialize_with = "deserialize_optional_px"
    )]
    pub overlay_size: Option<f64>,
    #[serde(serialize_with = "serialize_px", deserialize_with = "deserialize_px")]
    pub border_width: f64,
    pub border_color: String,
    pub position: Vec2,
    #[serde(deserialize_with = "deserialize_rotation")]
    pub rotation: i32,
    #[serde(default = "default_shadow")]
    pub shadow: bool,
    #[serde(deserialize_with = "deserialize_number")]
    pub overlay_scale: f64,
    #[serde(default)]
    pub editor_size: EditorSize,
}

fn default_shadow() -> bool {
    true
}

impl Template {
    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Numbers arrive either as JSON numbers or as the string value of a form
/// input, optionally with a `px` unit.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Number(f64),
    Text(String),
}

impl Lenient {
    fn into_number<E: serde::de::Error>(self) -> Result<Option<f64>, E> {
        match self {
            Lenient::Number(n) => Ok(Some(n)),
            Lenient::Text(text) => {
                let trimmed = text.trim();
                let digits = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
                if digits.is_empty() {
                    return Ok(None);
                }
                digits
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| E::custom(format!("invalid number {:?}", text)))
            }
        }
    }
}

fn required<E: serde::de::Error>(value: Option<f64>) -> Result<f64, E> {
    value.ok_or_else(|| E::custom("missing numeric value"))
}

fn serialize_px<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{}px", value))
}

fn serialize_optional_px<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serialize_px(v, serializer),
        None => serializer.serialize_str(""),
    }
}

fn deserialize_px<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    required(Lenient::deserialize(deserializer)?.into_number::<D::Error>()?)
}

fn deserialize_optional_px<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    match Option::<Lenient>::deserialize(deserializer)? {
        Some(value) => value.into_number(),
        None => Ok(None),
    }
}

fn deserialize_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    required(Lenient::deserialize(deserializer)?.into_number::<D::Error>()?)
}

fn deserialize_rotation<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let degrees = deserialize_number(deserializer)?;
    if !degrees.is_finite() {
        return Err(<D::Error as serde::de::Error>::custom("rotation is not finite"));
    }
    Ok(crate::transform::normalize_degrees(degrees.round() as i64))
}

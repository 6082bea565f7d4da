/// Visualization configuration: term specs and JSON interchange
use crate::placement::PlacementConfig;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors that can occur while loading or validating a visualization spec.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading the spec file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON or a field that failed to deserialize.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Spec deserialized but carries an unusable value.
    #[error("term {index} ({term:?}): {message}")]
    Validation {
        index: usize,
        term: String,
        message: String,
    },
}

/// An sRGB display color, serialized as a `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` hex string or one of the handful of named colors
    /// the demo configs use.
    pub fn parse(value: &str) -> Option<Self> {
        if let Some(hex) = value.strip_prefix('#') {
            if hex.len() != 6 {
                return None;
            }
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Self::new(
                r as f32 / 255.0,
                g as f32 / 255.0,
                b as f32 / 255.0,
            ));
        }
        match value {
            "black" => Some(Self::new(0.0, 0.0, 0.0)),
            "white" => Some(Self::new(1.0, 1.0, 1.0)),
            "red" => Some(Self::new(1.0, 0.0, 0.0)),
            "green" => Some(Self::new(0.0, 0.5, 0.0)),
            "blue" => Some(Self::new(0.0, 0.0, 1.0)),
            "brown" => Some(Self::new(0.65, 0.16, 0.16)),
            "gray" | "grey" => Some(Self::new(0.5, 0.5, 0.5)),
            "pink" => Some(Self::new(1.0, 0.75, 0.8)),
            _ => None,
        }
    }

    /// Format as `#rrggbb`.
    pub fn to_hex(self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value).ok_or_else(|| format!("unrecognized color {:?}", value))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Primitive rendered for a term's placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Cube,
    Sphere,
    Torus,
    Cylinder,
    Plane,
}

fn default_count() -> usize {
    100
}

fn default_diameter() -> f64 {
    10.0
}

fn default_visible() -> bool {
    true
}

/// One search term and how its matches are rendered.
///
/// Immutable once built; the panel hands a fresh copy to the pipeline on
/// every visualize action instead of sharing a live object with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermSpec {
    pub term: String,
    pub color: Color,
    /// Placements per match.
    #[serde(default = "default_count")]
    pub count: usize,
    /// Nominal horizontal scatter diameter.
    #[serde(default = "default_diameter")]
    pub diameter: f64,
    #[serde(default)]
    pub shape: Shape,
    /// Independent random rotation per axis.
    #[serde(default)]
    pub randomized: bool,
    /// Widen scatter with height.
    #[serde(default)]
    pub dia_increase: bool,
    /// Height-derived rotation, one scalar on all axes.
    #[serde(default)]
    pub height_rotation: bool,
    /// Uniform scale of `height * 0.1`.
    #[serde(default)]
    pub height_scale: bool,
    /// Initial visibility of the term's scene group.
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl TermSpec {
    pub fn new(term: impl Into<String>, color: Color) -> Self {
        Self {
            term: term.into(),
            color,
            count: default_count(),
            diameter: default_diameter(),
            shape: Shape::default(),
            randomized: false,
            dia_increase: false,
            height_rotation: false,
            height_scale: false,
            visible: true,
        }
    }

    /// Emission parameters for this term.
    pub fn placement_config(&self) -> PlacementConfig {
        PlacementConfig {
            count: self.count,
            diameter: self.diameter,
            randomized: self.randomized,
            dia_increase: self.dia_increase,
            height_rotation: self.height_rotation,
            height_scale: self.height_scale,
        }
    }
}

/// A full visualization request: the source text plus its term specs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationSpec {
    pub source_text: String,
    pub terms: Vec<TermSpec>,
}

impl VisualizationSpec {
    /// The two-term demo configuration the prototypes ship with.
    pub fn demo() -> Self {
        // #aa00ff and #00ffaa
        let mut fox = TermSpec::new("fox", Color::new(170.0 / 255.0, 0.0, 1.0));
        fox.randomized = true;
        let mut dog = TermSpec::new("dog", Color::new(0.0, 1.0, 170.0 / 255.0));
        dog.randomized = true;
        Self {
            source_text: "The quick brown fox jumped over the lazy dog.".to_owned(),
            terms: vec![fox, dog],
        }
    }

    /// Parse a spec from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let spec: Self = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Read and parse a spec file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let spec = Self::from_json_str(&json)?;
        info!(
            "loaded visualization spec: {} terms, {} source chars",
            spec.terms.len(),
            spec.source_text.len()
        );
        Ok(spec)
    }

    /// Reject term specs the pipeline cannot render meaningfully.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, spec) in self.terms.iter().enumerate() {
            let fail = |message: &str| ConfigError::Validation {
                index,
                term: spec.term.clone(),
                message: message.to_owned(),
            };
            if spec.count == 0 {
                return Err(fail("placement count must be positive"));
            }
            if !(spec.diameter > 0.0) {
                return Err(fail("diameter must be positive"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_round_trip() {
        let color = Color::parse("#aa00ff").unwrap();
        assert!((color.r - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(color.g, 0.0);
        assert_eq!(color.b, 1.0);
        assert_eq!(color.to_hex(), "#aa00ff");
    }

    #[test]
    fn test_color_named_and_invalid() {
        assert_eq!(Color::parse("red"), Some(Color::new(1.0, 0.0, 0.0)));
        assert!(Color::parse("chartreuse-ish").is_none());
        assert!(Color::parse("#12345").is_none());
        assert!(Color::parse("#gggggg").is_none());
    }

    #[test]
    fn test_spec_from_json_applies_defaults() {
        let json = r##"{
            "source_text": "the quick brown fox",
            "terms": [
                { "term": "fox", "color": "#aa00ff" }
            ]
        }"##;
        let spec = VisualizationSpec::from_json_str(json).unwrap();
        assert_eq!(spec.terms.len(), 1);
        let term = &spec.terms[0];
        assert_eq!(term.count, 100);
        assert_eq!(term.diameter, 10.0);
        assert_eq!(term.shape, Shape::Cube);
        assert!(term.visible);
        assert!(!term.randomized);
    }

    #[test]
    fn test_spec_json_round_trip() {
        let spec = VisualizationSpec::demo();
        let json = serde_json::to_string(&spec).unwrap();
        let back = VisualizationSpec::from_json_str(&json).unwrap();
        assert_eq!(spec, back);
    }

    #[test]
    fn test_spec_rejects_zero_count() {
        let json = r##"{
            "source_text": "text",
            "terms": [
                { "term": "text", "color": "#ffffff", "count": 0 }
            ]
        }"##;
        let err = VisualizationSpec::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { index: 0, .. }));
    }

    #[test]
    fn test_spec_rejects_unknown_shape() {
        let json = r##"{
            "source_text": "text",
            "terms": [
                { "term": "text", "color": "#ffffff", "shape": "teapot" }
            ]
        }"##;
        assert!(matches!(
            VisualizationSpec::from_json_str(json),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_demo_spec_is_valid() {
        assert!(VisualizationSpec::demo().validate().is_ok());
    }
}

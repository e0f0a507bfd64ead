use std::str::FromStr;

use egui::{Color32, Stroke};

use crate::{ClassSpec, EditorError};

/// Mouse button assignment for the lasso and pan gestures. Accepts the
/// names "left"/"middle"/"right" or the numbers 1/2/3 in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase", try_from = "MouseButtonRepr")]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    pub fn pointer_button(self) -> egui::PointerButton {
        match self {
            MouseButton::Left => egui::PointerButton::Primary,
            MouseButton::Middle => egui::PointerButton::Middle,
            MouseButton::Right => egui::PointerButton::Secondary,
        }
    }
}

impl FromStr for MouseButton {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(MouseButton::Left),
            "middle" => Ok(MouseButton::Middle),
            "right" => Ok(MouseButton::Right),
            _ => Err(EditorError::UnknownMouseButton(s.to_owned())),
        }
    }
}

impl TryFrom<u8> for MouseButton {
    type Error = EditorError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MouseButton::Left),
            2 => Ok(MouseButton::Middle),
            3 => Ok(MouseButton::Right),
            _ => Err(EditorError::UnknownMouseButton(value.to_string())),
        }
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum MouseButtonRepr {
    Name(String),
    Number(u8),
}

impl TryFrom<MouseButtonRepr> for MouseButton {
    type Error = EditorError;

    fn try_from(repr: MouseButtonRepr) -> Result<Self, Self::Error> {
        match repr {
            MouseButtonRepr::Name(name) => name.parse(),
            MouseButtonRepr::Number(number) => number.try_into(),
        }
    }
}

/// Drawing style of the lasso outline while a gesture is in progress.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LassoStyle {
    pub color: [u8; 3],
    pub width: f32,
    pub opacity: f32,
}

impl Default for LassoStyle {
    fn default() -> Self {
        Self {
            color: [0, 0, 0],
            width: 1.0,
            opacity: 0.8,
        }
    }
}

impl LassoStyle {
    pub fn stroke(&self) -> Stroke {
        let [r, g, b] = self.color;
        let a = (self.opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Stroke::new(self.width, Color32::from_rgba_unmultiplied(r, g, b, a))
    }
}

/// Everything the editor needs at construction besides the image size.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    pub classes: ClassSpec,
    /// Row-major seed for the label mask, values in `[0, classes]`.
    #[serde(skip)]
    pub seed_mask: Option<Vec<u16>>,
    /// One color per class. Falls back to the default palette when absent.
    pub colors: Option<Vec<[u8; 3]>>,
    /// Alpha applied to every class color, in `[0, 1]`.
    pub opacity: f32,
    pub lasso_style: LassoStyle,
    pub lasso_button: MouseButton,
    pub pan_button: MouseButton,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            classes: ClassSpec::default(),
            seed_mask: None,
            colors: None,
            opacity: 0.75,
            lasso_style: LassoStyle::default(),
            lasso_button: MouseButton::Left,
            pan_button: MouseButton::Middle,
        }
    }
}

use std::path::PathBuf;

use egui_segmenter::{ClassSpec, EditorOptions, LassoStyle, MouseButton};

/// Application configuration, loadable from a JSON file. Every field has a
/// default so a partial file is enough.
#[derive(Debug, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// The image to segment.
    pub image: PathBuf,
    /// Class count or explicit class names.
    pub classes: ClassSpec,
    /// One color per class; defaults to the built-in palette.
    pub colors: Option<Vec<[u8; 3]>>,
    pub opacity: f32,
    pub lasso_style: LassoStyle,
    pub lasso_button: MouseButton,
    pub pan_button: MouseButton,
    /// Initial window size when a new window is created.
    pub window_size: [f32; 2],
}

impl Default for Config {
    fn default() -> Self {
        let defaults = EditorOptions::default();
        Self {
            image: "image.png".into(),
            classes: defaults.classes,
            colors: None,
            opacity: defaults.opacity,
            lasso_style: defaults.lasso_style,
            lasso_button: defaults.lasso_button,
            pan_button: defaults.pan_button,
            window_size: [1000.0, 700.0],
        }
    }
}

impl Config {
    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions {
            classes: self.classes.clone(),
            seed_mask: None,
            colors: self.colors.clone(),
            opacity: self.opacity,
            lasso_style: self.lasso_style.clone(),
            lasso_button: self.lasso_button,
            pan_button: self.pan_button,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"image": "leaves.png", "classes": 3}"#).unwrap();
        assert_eq!(config.image, PathBuf::from("leaves.png"));
        assert_eq!(config.classes, ClassSpec::Count(3));
        assert_eq!(config.opacity, 0.75);
        assert_eq!(config.lasso_button, MouseButton::Left);
        assert_eq!(config.pan_button, MouseButton::Middle);
    }
}

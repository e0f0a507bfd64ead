use egui::Color32;

use crate::EditorError;

/// Default per-class colors (the ten tableau colors). Editors with more
/// classes than this must supply explicit colors.
pub const DEFAULT_PALETTE: [[u8; 3]; 10] = [
    [31, 119, 180],
    [255, 127, 14],
    [44, 160, 44],
    [214, 39, 40],
    [148, 103, 189],
    [140, 86, 75],
    [227, 119, 194],
    [127, 127, 127],
    [188, 189, 34],
    [23, 190, 207],
];

/// Fixed 1-based-indexed color table (entry 0 of the returned Vec is class
/// index 1). The alpha channel of every entry is forced to `opacity`.
pub(crate) fn build_color_table(
    classes: usize,
    explicit: Option<&[[u8; 3]]>,
    opacity: f32,
) -> Result<Vec<Color32>, EditorError> {
    if !(0.0..=1.0).contains(&opacity) {
        return Err(EditorError::InvalidOpacity(opacity));
    }
    let alpha = (opacity * 255.0).round() as u8;

    let rgb = match explicit {
        Some(colors) => {
            if colors.len() != classes {
                return Err(EditorError::ColorCountMismatch {
                    classes,
                    colors: colors.len(),
                });
            }
            colors
        }
        None => {
            if classes > DEFAULT_PALETTE.len() {
                return Err(EditorError::PaletteExhausted {
                    classes,
                    palette: DEFAULT_PALETTE.len(),
                });
            }
            &DEFAULT_PALETTE[..classes]
        }
    };

    Ok(rgb
        .iter()
        .map(|&[r, g, b]| Color32::from_rgba_unmultiplied(r, g, b, alpha))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_is_forced_to_the_configured_opacity() {
        let table = build_color_table(2, Some(&[[10, 20, 30], [40, 50, 60]]), 1.0).unwrap();
        assert_eq!(table[0], Color32::from_rgba_unmultiplied(10, 20, 30, 255));
        assert_eq!(table[1], Color32::from_rgba_unmultiplied(40, 50, 60, 255));
    }

    #[test]
    fn default_palette_covers_up_to_ten_classes() {
        assert_eq!(build_color_table(10, None, 0.75).unwrap().len(), 10);
        assert!(matches!(
            build_color_table(11, None, 0.75),
            Err(EditorError::PaletteExhausted {
                classes: 11,
                palette: 10
            })
        ));
    }

    #[test]
    fn explicit_color_count_must_match_classes() {
        assert!(matches!(
            build_color_table(3, Some(&[[0, 0, 0]]), 0.75),
            Err(EditorError::ColorCountMismatch {
                classes: 3,
                colors: 1
            })
        ));
    }

    #[test]
    fn opacity_outside_unit_range_is_rejected() {
        assert!(matches!(
            build_color_table(1, None, 1.5),
            Err(EditorError::InvalidOpacity(_))
        ));
        assert!(matches!(
            build_color_table(1, None, -0.1),
            Err(EditorError::InvalidOpacity(_))
        ));
    }
}

use egui::{
    self, Color32, ColorImage, ImageSource, Pos2, TextureHandle, TextureOptions,
    load::SizedTexture,
};
use log::debug;

use crate::{ClassLabel, ClassRegistry, ClassSelector, EditorError, EditorOptions, Polygon};

mod palette;

pub use palette::DEFAULT_PALETTE;

/// Chronological record of every completed gesture, split by the mode it
/// was drawn in. Appended to on each selection, never mutated otherwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionPaths {
    pub adding: Vec<Polygon>,
    pub erasing: Vec<Polygon>,
}

/// Owns the label mask and its derived display overlay, and reacts to
/// completed lasso gestures by overwriting both inside the selected region.
///
/// Invariant: `overlay` is always the projection of `mask` through the
/// color table — transparent where the mask is 0, the class color
/// elsewhere. Every mutation below touches both buffers together.
pub struct MaskEditor {
    size: [usize; 2],
    classes: ClassRegistry,
    color_table: Vec<Color32>,
    mask: Vec<u16>,
    overlay: Vec<Color32>,
    /// Query set for containment tests: one coordinate per mask cell,
    /// row-major, built once and never resized.
    pixel_coords: Vec<Pos2>,
    current_class_idx: usize,
    erasing: bool,
    paths: SelectionPaths,
    texture_handle: Option<(TextureHandle, ImageSource<'static>)>,
    texture_dirty: bool,
}

impl MaskEditor {
    /// `size` is `[width, height]` of the image being segmented. Fails on
    /// any invalid configuration: empty or duplicate classes, a color list
    /// whose length differs from the class count, more classes than the
    /// default palette can color, an opacity outside `[0, 1]`, or a seed
    /// mask with the wrong cell count or values above the class count.
    pub fn new(size: [usize; 2], options: EditorOptions) -> Result<Self, EditorError> {
        let EditorOptions {
            classes,
            seed_mask,
            colors,
            opacity,
            ..
        } = options;

        let classes = classes.into_registry()?;
        let color_table = palette::build_color_table(classes.len(), colors.as_deref(), opacity)?;

        let cells = size[0] * size[1];
        let mask = match seed_mask {
            Some(seed) => {
                if seed.len() != cells {
                    return Err(EditorError::SeedMaskSizeMismatch {
                        expected: cells,
                        got: seed.len(),
                    });
                }
                if let Some(&value) = seed.iter().find(|v| **v as usize > classes.len()) {
                    return Err(EditorError::SeedMaskValueOutOfRange {
                        value,
                        classes: classes.len(),
                    });
                }
                seed
            }
            None => vec![0; cells],
        };

        // Replay the seed through the color table so the overlay invariant
        // holds before the first gesture.
        let overlay = mask
            .iter()
            .map(|&class| match class {
                0 => Color32::TRANSPARENT,
                c => color_table[c as usize - 1],
            })
            .collect();

        let pixel_coords = (0..size[1])
            .flat_map(|y| (0..size[0]).map(move |x| Pos2::new(x as f32, y as f32)))
            .collect();

        Ok(Self {
            size,
            classes,
            color_table,
            mask,
            overlay,
            pixel_coords,
            current_class_idx: 1,
            erasing: false,
            paths: SelectionPaths::default(),
            texture_handle: None,
            texture_dirty: false,
        })
    }

    pub fn size(&self) -> [usize; 2] {
        self.size
    }

    /// The label mask, row-major. 0 is background, `1..=classes` are class
    /// indices.
    pub fn mask(&self) -> &[u16] {
        &self.mask
    }

    /// The RGBA overlay derived from the mask, row-major.
    pub fn overlay(&self) -> &[Color32] {
        &self.overlay
    }

    pub fn class_labels(&self) -> impl Iterator<Item = &ClassLabel> {
        self.classes.labels()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Color-table entry for a 1-based class index.
    ///
    /// Panics if `index` is 0 or above the class count.
    pub fn class_color(&self, index: usize) -> Color32 {
        self.color_table[index - 1]
    }

    /// Label of the active class (not its raw index).
    pub fn current_class(&self) -> &ClassLabel {
        self.classes.label(self.current_class_idx)
    }

    /// 1-based index of the active class.
    pub fn current_class_index(&self) -> usize {
        self.current_class_idx
    }

    /// Switch the active class, by label or by 1-based index. Index 0 is
    /// rejected (it denotes the background); a failed write leaves the
    /// previous class active.
    pub fn set_current_class(
        &mut self,
        class: impl Into<ClassSelector>,
    ) -> Result<(), EditorError> {
        self.current_class_idx = self.classes.resolve(&class.into())?;
        Ok(())
    }

    pub fn erasing(&self) -> bool {
        self.erasing
    }

    pub fn set_erasing(&mut self, erasing: bool) {
        self.erasing = erasing;
    }

    /// All gestures accepted so far, split into adding and erasing lists.
    pub fn paths(&self) -> &SelectionPaths {
        &self.paths
    }

    /// Gesture-completion handler. Closes the vertex list into a polygon,
    /// overwrites the mask and overlay at every contained pixel (current
    /// class when adding, background when erasing), records the polygon,
    /// and marks the overlay texture for re-upload on the next frame.
    /// Later gestures strictly overwrite earlier ones.
    pub fn on_selection_complete(&mut self, vertices: Vec<Pos2>) {
        let polygon = Polygon::new(vertices);

        let (class, color) = if self.erasing {
            (0, Color32::TRANSPARENT)
        } else {
            (
                self.current_class_idx as u16,
                self.color_table[self.current_class_idx - 1],
            )
        };

        let mut touched = 0usize;
        for (i, point) in self.pixel_coords.iter().enumerate() {
            if polygon.contains(*point) {
                self.mask[i] = class;
                self.overlay[i] = color;
                touched += 1;
            }
        }
        debug!(
            "{} {touched} pixels with {} vertices",
            if self.erasing { "erased" } else { "labeled" },
            polygon.vertices().len()
        );

        if self.erasing {
            self.paths.erasing.push(polygon);
        } else {
            self.paths.adding.push(polygon);
        }
        self.texture_dirty = true;
    }

    /// Overlay image source for the display surface. The texture is only
    /// re-uploaded when a gesture dirtied it; egui coalesces the actual
    /// repaint.
    pub fn sources(
        &mut self,
        ctx: &egui::Context,
    ) -> impl Iterator<Item = ImageSource<'static>> + '_ {
        if self.texture_handle.is_none() || self.texture_dirty {
            self.texture_dirty = false;

            let handle = ctx.load_texture(
                "mask_overlay",
                ColorImage {
                    size: self.size,
                    pixels: self.overlay.clone(),
                },
                TextureOptions {
                    magnification: egui::TextureFilter::Nearest,
                    ..Default::default()
                },
            );
            let source = ImageSource::Texture(SizedTexture::from_handle(&handle));
            self.texture_handle = Some((handle, source));
        }

        self.texture_handle.iter().map(|(_, source)| source.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClassSpec;

    fn editor(size: [usize; 2], classes: usize) -> MaskEditor {
        MaskEditor::new(
            size,
            EditorOptions {
                classes: ClassSpec::Count(classes),
                ..Default::default()
            },
        )
        .unwrap()
    }

    fn square(min: f32, max: f32) -> Vec<Pos2> {
        vec![
            Pos2::new(min, min),
            Pos2::new(max, min),
            Pos2::new(max, max),
            Pos2::new(min, max),
        ]
    }

    /// Covers every pixel coordinate of a 3x3 editor.
    fn full_cover() -> Vec<Pos2> {
        square(-1.0, 3.0)
    }

    /// Contains only the center pixel (1, 1) of a 3x3 editor.
    fn center_only() -> Vec<Pos2> {
        square(0.5, 1.5)
    }

    fn far_outside() -> Vec<Pos2> {
        square(10.0, 12.0)
    }

    #[test]
    fn current_class_round_trips_by_label_and_index() {
        let mut editor = MaskEditor::new(
            [3, 3],
            EditorOptions {
                classes: ClassSpec::Labels(vec!["leaf".into(), "stem".into()]),
                ..Default::default()
            },
        )
        .unwrap();

        editor.set_current_class("stem").unwrap();
        assert_eq!(editor.current_class(), &ClassLabel::Name("stem".into()));
        assert_eq!(editor.current_class_index(), 2);

        editor.set_current_class(1).unwrap();
        assert_eq!(editor.current_class(), &ClassLabel::Name("leaf".into()));
    }

    #[test]
    fn invalid_class_writes_leave_state_unchanged() {
        let mut editor = editor([3, 3], 2);
        editor.set_current_class(2).unwrap();

        assert!(editor.set_current_class(0).is_err());
        assert!(editor.set_current_class(3).is_err());
        assert!(editor.set_current_class("unknown").is_err());
        assert_eq!(editor.current_class_index(), 2);
    }

    #[test]
    fn polygon_outside_the_image_only_appends_history() {
        let mut editor = editor([3, 3], 2);
        editor.on_selection_complete(far_outside());

        assert!(editor.mask().iter().all(|&c| c == 0));
        assert!(editor.overlay().iter().all(|&c| c == Color32::TRANSPARENT));
        assert_eq!(editor.paths().adding.len(), 1);
        assert!(editor.paths().erasing.is_empty());
    }

    #[test]
    fn full_cover_add_then_erase_round_trips() {
        let mut editor = editor([3, 3], 2);
        editor.set_current_class(2).unwrap();
        editor.on_selection_complete(full_cover());

        let color = editor.class_color(2);
        assert!(editor.mask().iter().all(|&c| c == 2));
        assert!(editor.overlay().iter().all(|&c| c == color));

        editor.set_erasing(true);
        editor.on_selection_complete(full_cover());
        assert!(editor.mask().iter().all(|&c| c == 0));
        assert!(editor.overlay().iter().all(|&c| c == Color32::TRANSPARENT));
        assert_eq!(editor.paths().adding.len(), 1);
        assert_eq!(editor.paths().erasing.len(), 1);
    }

    #[test]
    fn applying_the_same_selection_twice_is_idempotent() {
        let mut once = editor([3, 3], 1);
        once.on_selection_complete(center_only());

        let mut twice = editor([3, 3], 1);
        twice.on_selection_complete(center_only());
        twice.on_selection_complete(center_only());

        assert_eq!(once.mask(), twice.mask());
        assert_eq!(once.overlay(), twice.overlay());
    }

    #[test]
    fn later_selection_overwrites_the_overlap() {
        let mut editor = editor([3, 3], 2);
        editor.on_selection_complete(full_cover());
        editor.set_current_class(2).unwrap();
        editor.on_selection_complete(center_only());

        let center = 1 + 3; // (1, 1) row-major
        assert_eq!(editor.mask()[center], 2);
        assert_eq!(editor.overlay()[center], editor.class_color(2));
        assert!(
            editor
                .mask()
                .iter()
                .enumerate()
                .all(|(i, &c)| c == if i == center { 2 } else { 1 })
        );
    }

    #[test]
    fn center_pixel_scenario() {
        let mut editor = editor([3, 3], 2);
        editor.on_selection_complete(center_only());

        let center = 1 + 3;
        for i in 0..9 {
            if i == center {
                assert_eq!(editor.mask()[i], 1);
                assert_eq!(editor.overlay()[i], editor.class_color(1));
            } else {
                assert_eq!(editor.mask()[i], 0);
                assert_eq!(editor.overlay()[i], Color32::TRANSPARENT);
            }
        }
        assert_eq!(
            editor.paths(),
            &SelectionPaths {
                adding: vec![Polygon::new(center_only())],
                erasing: vec![],
            }
        );
    }

    #[test]
    fn seed_mask_replays_into_the_overlay() {
        let editor = MaskEditor::new(
            [2, 2],
            EditorOptions {
                classes: ClassSpec::Count(2),
                seed_mask: Some(vec![0, 1, 2, 0]),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(editor.overlay()[0], Color32::TRANSPARENT);
        assert_eq!(editor.overlay()[1], editor.class_color(1));
        assert_eq!(editor.overlay()[2], editor.class_color(2));
        assert_eq!(editor.overlay()[3], Color32::TRANSPARENT);
    }

    #[test]
    fn seed_mask_is_validated() {
        let sized = MaskEditor::new(
            [2, 2],
            EditorOptions {
                seed_mask: Some(vec![0, 0, 0]),
                ..Default::default()
            },
        );
        assert!(matches!(
            sized,
            Err(EditorError::SeedMaskSizeMismatch {
                expected: 4,
                got: 3
            })
        ));

        let valued = MaskEditor::new(
            [2, 2],
            EditorOptions {
                seed_mask: Some(vec![0, 0, 0, 2]),
                ..Default::default()
            },
        );
        assert!(matches!(
            valued,
            Err(EditorError::SeedMaskValueOutOfRange {
                value: 2,
                classes: 1
            })
        ));
    }

    #[test]
    fn first_class_and_adding_mode_are_the_initial_state() {
        let editor = editor([3, 3], 3);
        assert_eq!(editor.current_class_index(), 1);
        assert!(!editor.erasing());
        assert_eq!(editor.paths(), &SelectionPaths::default());
    }
}

use crate::ClassLabel;

/// Configuration errors surfaced synchronously at construction or at the
/// offending property write. There are no transient failure modes.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("at least one class is required")]
    EmptyClasses,
    #[error("duplicate class {0}")]
    DuplicateClass(ClassLabel),
    #[error("{label} is not one of the classes: {known:?}")]
    UnknownClass {
        label: ClassLabel,
        known: Vec<ClassLabel>,
    },
    #[error(
        "current class must be between 1 and {classes}, got {index}. \
         It cannot be 0 as 0 is the background"
    )]
    ClassIndexOutOfRange { index: usize, classes: usize },
    #[error(
        "default palette has only {palette} colors but {classes} classes were requested; \
         pass explicit colors"
    )]
    PaletteExhausted { classes: usize, palette: usize },
    #[error("expected one color per class ({classes}), got {colors}")]
    ColorCountMismatch { classes: usize, colors: usize },
    #[error("seed mask has {got} cells but the image has {expected}")]
    SeedMaskSizeMismatch { expected: usize, got: usize },
    #[error("seed mask value {value} exceeds the class count {classes}")]
    SeedMaskValueOutOfRange { value: u16, classes: usize },
    #[error("mask opacity must be within 0.0..=1.0, got {0}")]
    InvalidOpacity(f32),
    #[error("unknown mouse button {0:?}, expected left/middle/right or 1/2/3")]
    UnknownMouseButton(String),
}

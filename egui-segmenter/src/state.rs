use crate::{
    EditorError, EditorOptions, ImageSurface, LassoTool, MaskEditor, PanTool, SurfacePainter,
    Tool, ToolContext,
};

/// Wires the editor, the display surface, and the gesture handlers together
/// at construction time. The lasso and pan tools share the surface; which
/// one reacts to a drag is decided by the button assignment in the options.
pub struct SegmenterState {
    pub editor: MaskEditor,
    pub surface: ImageSurface,
    lasso: LassoTool,
    pan: PanTool,
}

impl SegmenterState {
    pub fn new(size: [usize; 2], options: EditorOptions) -> Result<Self, EditorError> {
        let lasso = LassoTool::new(options.lasso_button, options.lasso_style.clone());
        let pan = PanTool::new(options.pan_button);
        let editor = MaskEditor::new(size, options)?;
        Ok(Self {
            editor,
            surface: ImageSurface::default(),
            lasso,
            pan,
        })
    }

    /// Dispatch one frame's surface response to both tools.
    pub fn handle_interaction(
        &mut self,
        response: &egui::Response,
        painter: &SurfacePainter,
        cursor_image_pos: Option<(usize, usize)>,
        ctx: &egui::Context,
    ) {
        self.lasso.handle_interaction(ToolContext {
            editor: &mut self.editor,
            surface: &mut self.surface,
            response,
            painter,
            cursor_image_pos,
            egui: ctx,
        });
        self.pan.handle_interaction(ToolContext {
            editor: &mut self.editor,
            surface: &mut self.surface,
            response,
            painter,
            cursor_image_pos,
            egui: ctx,
        });
    }
}

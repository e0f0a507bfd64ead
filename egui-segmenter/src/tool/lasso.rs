use egui::Pos2;

use crate::{LassoStyle, MouseButton, Tool, ToolContext};

/// Freehand selection tool. Collects the drag path in image coordinates,
/// draws the styled outline while the gesture is in progress, and hands the
/// full vertex list to the editor once the drag stops. An abandoned gesture
/// (no collected vertices) never reaches the editor.
pub struct LassoTool {
    button: MouseButton,
    style: LassoStyle,
    vertices: Vec<Pos2>,
}

impl LassoTool {
    pub fn new(button: MouseButton, style: LassoStyle) -> Self {
        Self {
            button,
            style,
            vertices: Vec::new(),
        }
    }
}

impl Tool for LassoTool {
    fn handle_interaction(&mut self, ctx: ToolContext<'_>) {
        let button = self.button.pointer_button();

        if ctx.response.drag_started_by(button) {
            self.vertices.clear();
        }

        if ctx.response.dragged_by(button) {
            if let Some(screen) = ctx.response.interact_pointer_pos() {
                let image = ctx.painter.screen_to_image(screen);
                if self.vertices.last() != Some(&image) {
                    self.vertices.push(image);
                }
            }
            if self.vertices.len() >= 2 {
                let outline = self
                    .vertices
                    .iter()
                    .map(|v| ctx.painter.image_to_screen(*v))
                    .collect();
                ctx.painter.draw_outline(outline, self.style.stroke());
            }
        }

        if ctx.response.drag_stopped_by(button) {
            let vertices = std::mem::take(&mut self.vertices);
            if !vertices.is_empty() {
                ctx.editor.on_selection_complete(vertices);
                ctx.egui.request_repaint();
            }
        }
    }
}

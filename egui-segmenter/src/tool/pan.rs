use egui::Vec2;

use crate::{MouseButton, Tool, ToolContext};

/// Moves the surface's pan offset while the configured button is dragged.
pub struct PanTool {
    button: MouseButton,
}

impl PanTool {
    pub fn new(button: MouseButton) -> Self {
        Self { button }
    }
}

impl Tool for PanTool {
    fn handle_interaction(&mut self, ctx: ToolContext<'_>) {
        if !ctx.response.dragged_by(self.button.pointer_button()) {
            return;
        }
        let drag_delta = ctx.response.drag_delta();
        if drag_delta == Vec2::ZERO {
            return;
        }

        // Pan offset is a fraction of the rendered image size.
        let image_size_px = ctx.painter.image_rect().size();
        let offset = ctx.surface.pan_offset() - drag_delta / image_size_px;
        ctx.surface.set_pan_offset(offset);
    }
}

use egui::{Pos2, Rect, Stroke, Vec2};

use crate::{ImageSurface, MaskEditor, SurfaceInteraction};

mod lasso;
mod pan;

pub use lasso::*;
pub use pan::*;

/// Interaction handler attached to the display surface. Tools see every
/// frame's response; the mouse-button assignment decides which one reacts.
pub trait Tool {
    fn handle_interaction(&mut self, ctx: ToolContext<'_>);
}

pub struct ToolContext<'a> {
    pub editor: &'a mut MaskEditor,
    pub surface: &'a mut ImageSurface,
    pub response: &'a egui::Response,
    pub painter: &'a SurfacePainter,
    pub cursor_image_pos: Option<(usize, usize)>,
    pub egui: &'a egui::Context,
}

/// Maps between screen and image coordinates for the current frame and
/// draws tool feedback above the surface.
pub struct SurfacePainter {
    painter: egui::Painter,
    image_rect: Rect,
    image_size: Vec2,
}

impl SurfacePainter {
    pub fn new(painter: egui::Painter, interaction: &SurfaceInteraction) -> Self {
        Self {
            painter,
            image_rect: interaction.image_rect,
            image_size: interaction.image_size,
        }
    }

    pub fn image_rect(&self) -> Rect {
        self.image_rect
    }

    pub fn screen_to_image(&self, screen: Pos2) -> Pos2 {
        let scale = self.image_size.x / self.image_rect.width();
        ((screen - self.image_rect.min) * scale).to_pos2()
    }

    pub fn image_to_screen(&self, image: Pos2) -> Pos2 {
        let scale = self.image_rect.width() / self.image_size.x;
        self.image_rect.min + image.to_vec2() * scale
    }

    /// Outline of the in-progress lasso, closed from the last point back to
    /// the first.
    pub fn draw_outline(&self, points: Vec<Pos2>, stroke: Stroke) {
        self.painter.add(egui::Shape::closed_line(points, stroke));
    }
}

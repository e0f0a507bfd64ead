use egui::{
    self, ImageSource, InnerResponse, Pos2, Rect, Sense, TextureOptions, Vec2,
    load::{SizedTexture, TexturePoll},
};

/// Display surface for the image and its mask overlay.
///
/// Renders a stack of image sources into the available viewport, with zoom
/// anchored at the cursor and a pan offset expressed as a fraction of the
/// rendered image size. Zoom 1.0 means the whole image fits the viewport.
pub struct ImageSurface {
    zoom: f32,
    pan_offset: Vec2,
}

impl Default for ImageSurface {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_offset: Vec2::ZERO,
        }
    }
}

/// Per-frame result handed to the tools.
pub struct SurfaceInteraction {
    pub image_size: Vec2,
    /// Where the (possibly zoomed) image currently sits on screen.
    pub image_rect: Rect,
    /// Hovered pixel, if the cursor is over the image.
    pub cursor_image_pos: Option<(usize, usize)>,
}

impl ImageSurface {
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_offset = Vec2::ZERO;
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn modify_zoom(&mut self, zoom: impl Fn(f32) -> f32) {
        self.zoom = zoom(self.zoom).clamp(0.05, 1.0);
    }

    pub fn pan_offset(&self) -> Vec2 {
        self.pan_offset
    }

    /// Offsets are clamped so the image can never be dragged fully out of
    /// the viewport.
    pub fn set_pan_offset(&mut self, offset: Vec2) {
        self.pan_offset = offset.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
    }

    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        sources: impl Iterator<Item = ImageSource<'static>>,
        sense: Option<Sense>,
    ) -> InnerResponse<Option<SurfaceInteraction>> {
        let viewport_rect = ui.available_rect_before_wrap();
        let available_size = viewport_rect.size();

        let textures: Vec<SizedTexture> = sources
            .filter_map(|source| {
                let image = egui::Image::new(source).texture_options(TextureOptions {
                    magnification: egui::TextureFilter::Nearest,
                    ..Default::default()
                });
                match image.load_for_size(ui.ctx(), available_size) {
                    Ok(TexturePoll::Ready { texture }) => Some(texture),
                    _ => None,
                }
            })
            .collect();

        let Some(first) = textures.first() else {
            return InnerResponse {
                inner: None,
                response: ui.response(),
            };
        };
        let image_size = first.size;

        let surface_sense = Sense::hover().union(Sense::drag());
        let combined_sense = sense.map(|s| s.union(surface_sense)).unwrap_or(surface_sense);
        let response = ui.allocate_rect(viewport_rect, combined_sense);
        let painter = ui.painter().with_clip_rect(viewport_rect);

        let fit_scale =
            (available_size.x / image_size.x).min(available_size.y / image_size.y);

        // Zoom around the hovered point so it stays put on screen.
        if let Some(hover) = response.hover_pos() {
            let delta = ui.input(|i| i.zoom_delta());
            if delta != 1.0 {
                let render_scale = fit_scale / self.zoom;
                let pixel_offset = image_size * render_scale * -self.pan_offset;
                let screen_rel = hover - viewport_rect.min;
                let anchor = (screen_rel - pixel_offset) * (self.zoom / fit_scale);
                self.modify_zoom(|z| z / delta);
                let rel_zoom = self.zoom / fit_scale;
                self.pan_offset = (anchor - screen_rel * rel_zoom) / image_size;
            }
        }

        if (self.zoom - 1.0).abs() <= f32::EPSILON {
            // Fully zoomed out: keep the image centered in the viewport.
            let image_size_px = image_size * (fit_scale / self.zoom);
            let blank = ((available_size - image_size_px) * 0.5).max(Vec2::ZERO);
            self.pan_offset = -(blank / image_size_px);
        }

        let render_scale = fit_scale / self.zoom;
        let image_size_px = image_size * render_scale;
        let image_rect = Rect::from_min_size(
            viewport_rect.min + image_size_px * -self.pan_offset,
            image_size_px,
        );

        let uv = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0));
        for texture in &textures {
            painter.image(texture.id, image_rect, uv, egui::Color32::WHITE);
        }

        let cursor_image_pos = response.hover_pos().and_then(|hover| {
            let p = (hover - image_rect.min) / render_scale;
            (p.x >= 0.0 && p.y >= 0.0 && p.x < image_size.x && p.y < image_size.y)
                .then(|| (p.x as usize, p.y as usize))
        });

        InnerResponse {
            inner: Some(SurfaceInteraction {
                image_size,
                image_rect,
                cursor_image_pos,
            }),
            response,
        }
    }
}

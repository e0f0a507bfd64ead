use std::iter;

use egui::{
    self, Color32, ColorImage, ImageSource, InnerResponse, Sense, TextureHandle, TextureOptions,
    load::SizedTexture,
};
use egui_segmenter::{ClassLabel, SegmenterState, SurfacePainter};

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to read config: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error(transparent)]
    Editor(#[from] egui_segmenter::EditorError),
}

pub struct SegmenterApp {
    state: SegmenterState,
    #[allow(
        dead_code,
        reason = "Acts as strong reference for the SizedTexture. The image would not render if the TextureHandle were dropped"
    )]
    texture: TextureHandle,
    source: ImageSource<'static>,
}

impl SegmenterApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &Config) -> Result<Self, AppError> {
        let img = image::open(&config.image)?.to_rgb8();
        let size = [img.width() as usize, img.height() as usize];
        let pixels = img
            .pixels()
            .map(|&image::Rgb([r, g, b])| Color32::from_rgb(r, g, b))
            .collect();

        let texture = cc.egui_ctx.load_texture(
            "image",
            ColorImage { size, pixels },
            TextureOptions {
                magnification: egui::TextureFilter::Nearest,
                ..Default::default()
            },
        );
        let source = ImageSource::Texture(SizedTexture::from_handle(&texture));

        let state = SegmenterState::new(size, config.editor_options())?;
        log::info!(
            "segmenting {} ({}x{})",
            config.image.display(),
            size[0],
            size[1]
        );

        Ok(Self {
            state,
            texture,
            source,
        })
    }

    fn menu_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Class:");
            let current = self.state.editor.current_class().clone();
            let labels: Vec<ClassLabel> = self.state.editor.class_labels().cloned().collect();
            let mut selected = current.clone();
            egui::ComboBox::from_id_salt("current_class")
                .selected_text(current.to_string())
                .show_ui(ui, |ui| {
                    for label in labels {
                        let text = label.to_string();
                        ui.selectable_value(&mut selected, label, text);
                    }
                });
            if selected != current {
                if let Err(e) = self.state.editor.set_current_class(selected) {
                    log::warn!("{e}");
                }
            }

            let color = self
                .state
                .editor
                .class_color(self.state.editor.current_class_index());
            let (swatch, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), Sense::hover());
            ui.painter().rect_filled(swatch, 2.0, color);

            let mut erasing = self.state.editor.erasing();
            ui.checkbox(&mut erasing, "Erase");
            self.state.editor.set_erasing(erasing);
        });
    }
}

impl eframe::App for SegmenterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            ui.heading("Image segmenter");
            self.menu_ui(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let sources =
                iter::once(self.source.clone()).chain(self.state.editor.sources(ui.ctx()));
            if let InnerResponse {
                inner: Some(interaction),
                response,
            } = self
                .state
                .surface
                .ui(ui, sources, Some(Sense::click_and_drag()))
            {
                let painter =
                    SurfacePainter::new(ui.painter().with_clip_rect(response.rect), &interaction);
                let cursor_image_pos = interaction.cursor_image_pos;
                self.state
                    .handle_interaction(&response, &painter, cursor_image_pos, ui.ctx());
            }
        });
    }
}

use std::path::Path;

mod app;
mod config;

fn main() -> eframe::Result {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => match load_config(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(2);
            }
        },
        None => config::Config::default(),
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(config.window_size),
        ..Default::default()
    };
    eframe::run_native(
        "Image segmenter",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::SegmenterApp::new(cc, &config)?))),
    )
}

fn load_config(path: &Path) -> Result<config::Config, app::AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

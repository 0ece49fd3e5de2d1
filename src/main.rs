mod app;
mod config;
mod ui;

use app::BrainTrainApp;
use config::UserConfig;
use eframe::egui;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::{self, File};

fn init_logging(level: LevelFilter) {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(file) = open_log_file() {
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }
    if let Err(e) = CombinedLogger::init(loggers) {
        eprintln!("Failed to initialise logging: {}", e);
    }
}

fn open_log_file() -> Option<File> {
    let dir = dirs::data_local_dir()?.join("brain-train");
    fs::create_dir_all(&dir).ok()?;
    File::create(dir.join("brain-train.log")).ok()
}

fn main() -> Result<(), eframe::Error> {
    let config = UserConfig::load();
    init_logging(config.level_filter());
    log::info!("Config loaded from {}", UserConfig::path().display());
    log::debug!("Sound cue: background music looping");

    let options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(config.window_width, config.window_height)),
        ..Default::default()
    };

    eframe::run_native(
        "Brain Training",
        options,
        Box::new(move |cc| {
            if config.dark_mode {
                cc.egui_ctx.set_visuals(egui::Visuals::dark());
            } else {
                cc.egui_ctx.set_visuals(egui::Visuals::light());
            }
            Box::new(BrainTrainApp::new(cc, config))
        }),
    )
}

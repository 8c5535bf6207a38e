use clap::Parser;
use classification_pipeline::main::{ClassificationPipeline, Waker};
use classifier_screen::main::ClassifierScreen;
use cli::{Cli, Command};
use config::Config;
use device_display::impl_console::DeviceDisplayConsole;
use image_classifier::impl_fake::ImageClassifierFake;
use image_classifier::impl_tract_onnx::ImageClassifierTractOnnx;
use image_classifier::interface::{ClassifierError, ImageClassifier};
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use photo::load::load_photo_or_missing;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

mod classification_pipeline;
mod classifier_screen;
mod cli;
mod config;
mod device_display;
mod image_classifier;
mod library;
mod photo;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    // Nothing works without a model.
    let image_classifier = match load_classifier(&config, logger.clone()) {
        Ok(image_classifier) => image_classifier,
        Err(err) => {
            let _ = logger.error(&format!("Failed to load classifier: {}", err));
            eprintln!("Failed to load classifier: {}", err);
            std::process::exit(1);
        }
    };

    let pipeline = ClassificationPipeline::new(image_classifier, logger.clone());

    match cli.command.unwrap_or(Command::Gui) {
        Command::Gui => device_display::impl_gui::run(config, logger, pipeline)?,
        Command::Classify { paths } => classify_paths(config, logger, pipeline, paths),
    }

    Ok(())
}

fn load_classifier(
    config: &Config,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Result<Arc<dyn ImageClassifier + Send + Sync>, ClassifierError> {
    if config.use_fake_classifier {
        return Ok(Arc::new(ImageClassifierFake::new(logger)));
    }

    let _ = logger.info(&format!(
        "Loading model {}",
        config.model.onnx_model_path
    ));
    let image_classifier = ImageClassifierTractOnnx::new(config.model.clone())?;
    Ok(Arc::new(image_classifier))
}

fn classify_paths(
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    pipeline: ClassificationPipeline,
    paths: Vec<PathBuf>,
) {
    let waker: Waker = Arc::new(|| {});
    let display = Arc::new(Mutex::new(DeviceDisplayConsole::new()));
    let mut screen = ClassifierScreen::new(config, logger.clone(), pipeline, display, waker);

    for path in paths {
        let (photo, err) = load_photo_or_missing(&path);
        if let Some(err) = err {
            let _ = logger.error(&err.to_string());
        }
        screen.pick_photo(photo);
        screen.wait_for_pending();
    }
}

use crate::classification_pipeline::main::{ClassificationPipeline, Waker};
use crate::classifier_screen::main::ClassifierScreen;
use crate::config::Config;
use crate::device_display::interface::DeviceDisplay;
use crate::device_display::rounded_panel::rounded_panel;
use crate::library::logger::interface::Logger;
use crate::photo::load::load_photo_or_missing;
use image::DynamicImage;
use std::error::Error;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

const PREVIEW_MAX_SIDE: u32 = 512;

#[derive(Default)]
struct DisplayBuffer {
    status: String,
    preview: Option<egui::ColorImage>,
    preview_generation: u64,
}

/// Shares its buffer with the window; the window reads it on every frame.
#[derive(Clone, Default)]
pub struct DeviceDisplayGui {
    buffer: Arc<Mutex<DisplayBuffer>>,
}

impl DeviceDisplayGui {
    pub fn new() -> Self {
        Self::default()
    }

    fn buffer(&self) -> MutexGuard<'_, DisplayBuffer> {
        self.buffer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn show_status(&mut self, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.buffer().status = text.to_string();
        Ok(())
    }

    fn show_preview(&mut self, image: &DynamicImage) -> Result<(), Box<dyn Error + Send + Sync>> {
        let rgba = image.thumbnail(PREVIEW_MAX_SIDE, PREVIEW_MAX_SIDE).to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());

        let mut buffer = self.buffer();
        buffer.preview = Some(color_image);
        buffer.preview_generation += 1;
        Ok(())
    }

    fn clear_preview(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut buffer = self.buffer();
        buffer.preview = None;
        buffer.preview_generation += 1;
        Ok(())
    }
}

struct ClassifierWindow {
    screen: ClassifierScreen,
    display: DeviceDisplayGui,
    logger: Arc<dyn Logger + Send + Sync>,
    corner_radius: f32,
    path_input: String,
    texture: Option<egui::TextureHandle>,
    texture_generation: u64,
}

impl ClassifierWindow {
    fn open(&mut self, path: PathBuf) {
        let (photo, err) = load_photo_or_missing(&path);
        if let Some(err) = err {
            let _ = self.logger.error(&err.to_string());
        }
        self.screen.pick_photo(photo);
    }

    fn sync_texture(&mut self, ctx: &egui::Context) {
        let mut buffer = self.display.buffer();
        if buffer.preview_generation == self.texture_generation {
            return;
        }
        self.texture_generation = buffer.preview_generation;
        self.texture = buffer
            .preview
            .take()
            .map(|image| ctx.load_texture("photo-preview", image, egui::TextureOptions::LINEAR));
    }
}

impl eframe::App for ClassifierWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        for path in dropped {
            self.open(path);
        }

        self.screen.pump();
        self.sync_texture(ctx);

        let status = self.display.buffer().status.clone();
        let mut requested = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Photo:");
                let input = ui.text_edit_singleline(&mut self.path_input);
                let submitted = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if (ui.button("Classify").clicked() || submitted) && !self.path_input.trim().is_empty() {
                    requested = Some(PathBuf::from(self.path_input.trim()));
                }
            });
            ui.label("or drop a photo onto this window");
            ui.add_space(8.0);

            if let Some(texture) = &self.texture {
                ui.add(egui::Image::new(texture).max_size(egui::vec2(
                    ui.available_width(),
                    ui.available_height() * 0.7,
                )));
                ui.add_space(8.0);
            }

            rounded_panel(ui, self.corner_radius, |ui| {
                ui.set_width(ui.available_width());
                ui.label(egui::RichText::new(status).size(18.0));
            });
        });

        if let Some(path) = requested {
            self.open(path);
        }
    }
}

/// Runs the window on the calling thread until it is closed.
pub fn run(
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    pipeline: ClassificationPipeline,
) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Animal Classifier",
        options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            let waker: Waker = Arc::new(move || ctx.request_repaint());

            let display = DeviceDisplayGui::new();
            let corner_radius = config.corner_radius;
            let screen = ClassifierScreen::new(
                config,
                logger.clone(),
                pipeline,
                Arc::new(Mutex::new(display.clone())),
                waker,
            );

            Box::new(ClassifierWindow {
                screen,
                display,
                logger: logger.with_namespace("window"),
                corner_radius,
                path_input: String::new(),
                texture: None,
                texture_generation: 0,
            })
        }),
    )
}

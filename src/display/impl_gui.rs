use crate::display::interface::ResultDisplay;
use crate::pipeline::main::Pipeline;
use crate::pipeline::render::PREDICTING_MESSAGE;
use crate::preprocess::image::ImageHandle;
use eframe::egui;
use std::error::Error;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Message slot shared between the pipeline (writer) and the window (reader).
#[derive(Clone, Default)]
pub struct ResultDisplayGui {
    message: Arc<Mutex<String>>,
}

impl ResultDisplayGui {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&self) -> String {
        self.message
            .lock()
            .map(|message| message.clone())
            .unwrap_or_default()
    }

    /// Opens the window and blocks until it is closed.
    pub fn run(&self, pipeline: Pipeline, image_path: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([520.0, 560.0])
                .with_resizable(true),
            ..Default::default()
        };

        let window = ClassifierWindow {
            pipeline,
            display: self.clone(),
            path: image_path
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
            preview_path: None,
            preview: None,
            pending: None,
        };

        eframe::run_native(
            "Street Condition",
            options,
            Box::new(|_cc| Box::new(window)),
        )
        .map_err(|e| e.to_string())?;

        Ok(())
    }
}

impl ResultDisplay for ResultDisplayGui {
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.message
            .lock()
            .map_err(|_| "display lock poisoned")?
            .clear();
        Ok(())
    }

    fn write_message(&mut self, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        *self.message.lock().map_err(|_| "display lock poisoned")? = text.to_string();
        Ok(())
    }
}

struct ClassifierWindow {
    pipeline: Pipeline,
    display: ResultDisplayGui,
    path: String,
    preview_path: Option<String>,
    preview: Option<egui::TextureHandle>,
    pending: Option<JoinHandle<()>>,
}

impl ClassifierWindow {
    fn is_predicting(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Reloads the preview when the selected path changed.
    fn refresh_preview(&mut self, ctx: &egui::Context) {
        let path = self.path.trim().to_string();
        if self.preview_path.as_deref() == Some(path.as_str()) {
            return;
        }

        self.preview_path = Some(path.clone());
        self.preview = None;
        self.pipeline.clear_result();

        if path.is_empty() {
            return;
        }

        if let Ok(image) = ImageHandle::Path(PathBuf::from(&path)).decode() {
            let rgba = image.to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
            self.preview =
                Some(ctx.load_texture("preview", color_image, egui::TextureOptions::default()));
        }
    }

    fn start_prediction(&mut self) {
        let path = self.path.trim();
        if path.is_empty() {
            self.pipeline.prompt_for_image();
            return;
        }

        let pipeline = self.pipeline.clone();
        let image = ImageHandle::Path(PathBuf::from(path));

        self.pending = Some(thread::spawn(move || {
            let _ = pipeline.predict(image);
        }));
    }
}

impl eframe::App for ClassifierWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.refresh_preview(ctx);
        let predicting = self.is_predicting();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Street condition");
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label("Image:");
                ui.text_edit_singleline(&mut self.path);
            });

            if let Some(texture) = &self.preview {
                ui.add(
                    egui::Image::from_texture((texture.id(), texture.size_vec2()))
                        .max_size(egui::vec2(480.0, 360.0)),
                );
            }

            ui.add_space(8.0);
            if ui
                .add_enabled(!predicting, egui::Button::new("Predict"))
                .clicked()
            {
                self.start_prediction();
            }

            ui.add_space(8.0);
            let message = if predicting && self.display.message().is_empty() {
                PREDICTING_MESSAGE.to_string()
            } else {
                self.display.message()
            };
            ui.label(egui::RichText::new(message).size(16.0));
        });

        if predicting {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

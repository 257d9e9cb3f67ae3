use crate::classifier::impl_fake::{FakeOutput, ModelLoaderFake};
use crate::classifier::interface::ModelLoader;
use crate::config::Config;
use crate::display::impl_fake::ResultDisplayFake;
use crate::library::logger::{impl_console::LoggerConsole, interface::Logger};
use crate::pipeline::main::Pipeline;
use crate::preprocess::image::ImageHandle;
use image::{DynamicImage, ImageBuffer, Rgb};
use std::sync::{Arc, Mutex};

pub struct Fixture {
    pub model_loader: Arc<ModelLoaderFake>,
    pub display: ResultDisplayFake,
    pub pipeline: Pipeline,
}

impl Fixture {
    pub fn new(output: FakeOutput) -> Self {
        let logger: Arc<dyn Logger + Send + Sync> =
            Arc::new(LoggerConsole::new(Config::default().logger_timezone));
        let model_loader = Arc::new(ModelLoaderFake::new(output, logger));
        let (display, pipeline) = Self::pipeline_with_loader(model_loader.clone());

        Self {
            model_loader,
            display,
            pipeline,
        }
    }

    /// Pipeline over an arbitrary loader, for loaders other than the fake.
    pub fn pipeline_with_loader(
        model_loader: Arc<dyn ModelLoader>,
    ) -> (ResultDisplayFake, Pipeline) {
        let config = Config::default();
        let logger: Arc<dyn Logger + Send + Sync> =
            Arc::new(LoggerConsole::new(config.logger_timezone));
        let display = ResultDisplayFake::new();
        let pipeline = Pipeline::new(
            config,
            logger,
            model_loader,
            Arc::new(Mutex::new(display.clone())),
        );

        (display, pipeline)
    }

    pub fn street_image() -> ImageHandle {
        let image = ImageBuffer::from_fn(640, 480, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 90])
        });
        ImageHandle::Decoded(DynamicImage::ImageRgb8(image))
    }
}

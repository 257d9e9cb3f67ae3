use clap::Parser;
use classifier::decision::PredictionResult;
use classifier::impl_cached::ModelLoaderCached;
use classifier::impl_fake::{FakeOutput, ModelLoaderFake};
use classifier::impl_tract_onnx::ModelLoaderTractOnnx;
use classifier::interface::ModelLoader;
use config::Config;
use display::impl_console::ResultDisplayConsole;
use display::impl_gui::ResultDisplayGui;
use error::PipelineError;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use pipeline::main::Pipeline;
use preprocess::image::ImageHandle;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

mod classifier;
mod config;
mod display;
mod error;
mod library;
mod pipeline;
mod preprocess;
mod tensor;

#[derive(Parser)]
#[command(name = "street-condition")]
#[command(about = "Classify the condition of a street from a photograph")]
struct Args {
    /// Photograph of the street to classify
    image: Option<PathBuf>,

    /// Path to the ONNX model artifact
    #[arg(long)]
    model: Option<PathBuf>,

    /// Load the model once and reuse it for every prediction
    #[arg(long)]
    cache_model: bool,

    /// Open a window instead of printing to the console
    #[arg(long)]
    gui: bool,

    /// Use a model that returns random scores
    #[arg(long)]
    fake_model: bool,
}

/// A low-confidence outcome is still a successful run.
fn exit_code(result: &Result<PredictionResult, PipelineError>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = Config::default();
    if let Some(model) = args.model {
        config.model_path = model;
    }
    config.cache_model = args.cache_model;

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let mut model_loader: Arc<dyn ModelLoader> = if args.fake_model {
        Arc::new(ModelLoaderFake::new(FakeOutput::Random, logger.clone()))
    } else {
        Arc::new(ModelLoaderTractOnnx::new(
            config.model_path.clone(),
            logger.clone(),
        ))
    };
    if config.cache_model {
        model_loader = Arc::new(ModelLoaderCached::new(model_loader, logger.clone()));
    }

    if args.gui {
        let display = ResultDisplayGui::new();
        let pipeline = Pipeline::new(
            config,
            logger,
            model_loader,
            Arc::new(Mutex::new(display.clone())),
        );
        display.run(pipeline, args.image)?;
        return Ok(ExitCode::SUCCESS);
    }

    let display = Arc::new(Mutex::new(ResultDisplayConsole::new()));
    let pipeline = Pipeline::new(config, logger, model_loader, display);

    match args.image {
        // failures are already logged and rendered
        Some(path) => Ok(exit_code(&pipeline.predict(ImageHandle::Path(path)))),
        None => {
            pipeline.prompt_for_image();
            Ok(ExitCode::FAILURE)
        }
    }
}

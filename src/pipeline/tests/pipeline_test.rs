use crate::classifier::decision::{Condition, PredictionResult};
use crate::classifier::impl_fake::FakeOutput;
use crate::classifier::impl_tract_onnx::ModelLoaderTractOnnx;
use crate::config::Config;
use crate::library::logger::impl_console::LoggerConsole;
use crate::error::PipelineError;
use crate::pipeline::render::{FAILURE_MESSAGE, NO_IMAGE_MESSAGE, PREDICTING_MESSAGE};
use crate::pipeline::tests::fixture::Fixture;
use crate::preprocess::image::ImageHandle;
use std::path::PathBuf;
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn test_confident_prediction_end_to_end() {
    let f = Fixture::new(FakeOutput::Scores(vec![0.1, 0.8, 0.1]));

    let result = f.pipeline.predict(Fixture::street_image()).unwrap();

    assert_eq!(
        result,
        PredictionResult::Confident {
            condition: Condition::ModerateDeterioration,
            score: 0.8,
        }
    );
    assert_eq!(
        f.display.messages(),
        vec![
            PREDICTING_MESSAGE.to_string(),
            "Detected condition: Moderate Deterioration (80.00% probability)".to_string(),
        ]
    );
    assert_eq!(f.pipeline.ledger.live(), 0);
}

#[test]
fn test_low_confidence_prediction_end_to_end() {
    let f = Fixture::new(FakeOutput::Scores(vec![0.34, 0.33, 0.33]));

    let result = f.pipeline.predict(Fixture::street_image()).unwrap();

    assert_eq!(result, PredictionResult::LowConfidence { max_score: 0.34 });
    let message = f.display.last_message().unwrap();
    assert!(message.contains("sufficient confidence"));
    assert!(message.contains("34.00%"));
}

#[test]
fn test_unreachable_model_renders_generic_failure() {
    let f = Fixture::new(FakeOutput::Unavailable);

    let result = f.pipeline.predict(Fixture::street_image());

    assert!(matches!(result, Err(PipelineError::ModelUnavailable(_))));
    assert_eq!(f.display.last_message().unwrap(), FAILURE_MESSAGE);
    assert_eq!(f.pipeline.ledger.live(), 0);
}

#[test]
fn test_missing_model_artifact_renders_generic_failure() {
    let logger = Arc::new(LoggerConsole::new(Config::default().logger_timezone));
    let loader = Arc::new(ModelLoaderTractOnnx::new(
        PathBuf::from("./no/such/model.onnx"),
        logger,
    ));
    let (display, pipeline) = Fixture::pipeline_with_loader(loader);

    let result = pipeline.predict(Fixture::street_image());

    assert!(matches!(result, Err(PipelineError::ModelUnavailable(_))));
    assert_eq!(display.last_message().unwrap(), FAILURE_MESSAGE);
    assert_eq!(pipeline.ledger.live(), 0);
}

#[test]
fn test_panicking_model_renders_generic_failure() {
    let f = Fixture::new(FakeOutput::Panic);
    let pipeline = f.pipeline.clone();
    let (result_sender, result_receiver) = channel();

    thread::spawn(move || {
        let _ = result_sender.send(pipeline.predict(Fixture::street_image()));
    });
    let result = result_receiver
        .recv_timeout(Duration::from_secs(10))
        .expect("predict did not return after the model panicked");

    assert!(matches!(result, Err(PipelineError::InferenceFailure(_))));
    assert_eq!(f.display.last_message().unwrap(), FAILURE_MESSAGE);
    assert_eq!(f.pipeline.ledger.live(), 0);
}

#[test]
fn test_invalid_image_renders_generic_failure() {
    let f = Fixture::new(FakeOutput::Scores(vec![0.1, 0.8, 0.1]));

    let result = f
        .pipeline
        .predict(ImageHandle::Path(PathBuf::from("./missing/street.jpg")));

    assert!(matches!(result, Err(PipelineError::InvalidImage(_))));
    assert_eq!(f.display.last_message().unwrap(), FAILURE_MESSAGE);
    assert_eq!(f.model_loader.load_count(), 0);
}

#[test]
fn test_inference_failure_renders_generic_failure() {
    let f = Fixture::new(FakeOutput::InferenceError);

    let result = f.pipeline.predict(Fixture::street_image());

    assert!(matches!(result, Err(PipelineError::InferenceFailure(_))));
    assert_eq!(f.display.last_message().unwrap(), FAILURE_MESSAGE);
    assert_eq!(f.pipeline.ledger.live(), 0);
}

#[test]
fn test_no_tensors_leak_across_repeated_predictions() {
    let ok = Fixture::new(FakeOutput::Random);
    let unavailable = Fixture::new(FakeOutput::Unavailable);
    let failing = Fixture::new(FakeOutput::InferenceError);
    let wrong_length = Fixture::new(FakeOutput::Scores(vec![0.5, 0.5]));

    for _ in 0..5 {
        assert!(ok.pipeline.predict(Fixture::street_image()).is_ok());
        assert!(unavailable.pipeline.predict(Fixture::street_image()).is_err());
        assert!(failing.pipeline.predict(Fixture::street_image()).is_err());
        assert!(wrong_length.pipeline.predict(Fixture::street_image()).is_err());
    }

    assert_eq!(ok.pipeline.ledger.live(), 0);
    assert_eq!(unavailable.pipeline.ledger.live(), 0);
    assert_eq!(failing.pipeline.ledger.live(), 0);
    assert_eq!(wrong_length.pipeline.ledger.live(), 0);
}

#[test]
fn test_model_is_loaded_per_prediction_by_default() {
    let f = Fixture::new(FakeOutput::Scores(vec![0.9, 0.05, 0.05]));

    f.pipeline.predict(Fixture::street_image()).unwrap();
    f.pipeline.predict(Fixture::street_image()).unwrap();

    assert_eq!(f.model_loader.load_count(), 2);
}

#[test]
fn test_prompt_and_clear() {
    let f = Fixture::new(FakeOutput::Random);

    f.pipeline.prompt_for_image();
    assert_eq!(f.display.last_message().unwrap(), NO_IMAGE_MESSAGE);

    f.pipeline.clear_result();
    assert_eq!(f.display.last_message().unwrap(), "");
}

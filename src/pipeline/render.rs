use crate::classifier::decision::PredictionResult;
use crate::display::interface::ResultDisplay;
use crate::pipeline::core::State;
use crate::pipeline::main::Pipeline;
use std::error::Error;

pub const NO_IMAGE_MESSAGE: &str = "Please select an image to predict.";
pub const PREDICTING_MESSAGE: &str = "Predicting...";
pub const FAILURE_MESSAGE: &str = "Prediction failed. Check the logs for details.";

pub fn render_message(result: &PredictionResult) -> String {
    match result {
        PredictionResult::Confident { condition, score } => format!(
            "Detected condition: {} ({:.2}% probability)",
            condition.label(),
            score * 100.0
        ),
        PredictionResult::LowConfidence { max_score } => format!(
            "Could not determine the condition with sufficient confidence (max probability: {:.2}%).",
            max_score * 100.0
        ),
    }
}

impl Pipeline {
    pub(super) fn with_display<F>(&self, f: F) -> Result<(), Box<dyn Error + Send + Sync>>
    where
        F: FnOnce(&mut dyn ResultDisplay) -> Result<(), Box<dyn Error + Send + Sync>>,
    {
        let mut display = self.display.lock().map_err(|_| "display lock poisoned")?;
        f(&mut *display)
    }

    pub fn render(&self, state: &State) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.with_display(|display| match state {
            State::Preprocessing => display.write_message(PREDICTING_MESSAGE),
            State::Done { result } => display.write_message(&render_message(result)),
            State::Errored { .. } => display.write_message(FAILURE_MESSAGE),
            State::Idle | State::ModelLoading { .. } | State::Inferring | State::Deciding => Ok(()),
        })
    }

    pub fn render_prompt(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.with_display(|display| display.write_message(NO_IMAGE_MESSAGE))
    }
}

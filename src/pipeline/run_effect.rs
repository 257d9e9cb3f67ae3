use crate::error::PipelineError;
use crate::pipeline::core::{Effect, Event};
use crate::pipeline::main::Pipeline;
use crate::preprocess::image::preprocess;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::Sender;

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|reason| reason.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

impl Pipeline {
    /// Executes one effect and reports exactly one event, even when the step
    /// panics. Tensors the effect consumed are dropped before the event is sent.
    pub fn run_effect(&self, effect: Effect, event_sender: Sender<Event>) {
        let _ = self.logger.info(&format!("Running effect: {:?}", effect));

        let on_panic: fn(String) -> Event = match &effect {
            Effect::Preprocess { .. } => {
                |reason| Event::PreprocessDone(Err(PipelineError::InvalidImage(reason)))
            }
            Effect::LoadModel => {
                |reason| Event::ModelLoadDone(Err(PipelineError::ModelUnavailable(reason)))
            }
            Effect::Infer { .. } => {
                |reason| Event::InferenceDone(Err(PipelineError::InferenceFailure(reason)))
            }
            Effect::Decide { .. } => {
                |reason| Event::DecideDone(Err(PipelineError::InferenceFailure(reason)))
            }
        };

        // unwinding drops the tensors the effect owned
        let event = panic::catch_unwind(AssertUnwindSafe(|| self.run_step(effect)))
            .unwrap_or_else(|payload| {
                let reason = format!("step panicked: {}", panic_reason(payload.as_ref()));
                let _ = self.logger.error(&reason);
                on_panic(reason)
            });

        // a closed channel means the caller stopped waiting; the event and
        // any tensor inside it are dropped with the send error
        if event_sender.send(event).is_err() {
            let _ = self.logger.info("Prediction abandoned by caller");
        }
    }

    fn run_step(&self, effect: Effect) -> Event {
        match effect {
            Effect::Preprocess { image } => Event::PreprocessDone(preprocess(&image, &self.ledger)),
            Effect::LoadModel => {
                let _ = self.logger.info(&format!(
                    "Acquiring model {}",
                    self.config.model_path.display()
                ));
                Event::ModelLoadDone(self.invoker.acquire_model())
            }
            Effect::Infer { model, input } => {
                Event::InferenceDone(self.invoker.infer(model.as_ref(), input))
            }
            Effect::Decide { output } => Event::DecideDone(self.invoker.decide(output)),
        }
    }
}

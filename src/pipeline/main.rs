use crate::classifier::decision::PredictionResult;
use crate::classifier::interface::ModelLoader;
use crate::classifier::invoker::ClassifierInvoker;
use crate::config::Config;
use crate::display::interface::ResultDisplay;
use crate::error::PipelineError;
use crate::library::logger::interface::Logger;
use crate::pipeline::core::{init, transition, Effect, Event, State};
use crate::preprocess::image::ImageHandle;
use crate::tensor::TensorLedger;
use std::sync::mpsc::{channel, Sender};
use std::sync::{Arc, Mutex};
use std::time::Instant;

#[derive(Clone)]
pub struct Pipeline {
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub display: Arc<Mutex<dyn ResultDisplay + Send + Sync>>,
    pub invoker: ClassifierInvoker,
    pub ledger: TensorLedger,
}

impl Pipeline {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        model_loader: Arc<dyn ModelLoader>,
        display: Arc<Mutex<dyn ResultDisplay + Send + Sync>>,
    ) -> Self {
        let ledger = TensorLedger::new();
        let invoker = ClassifierInvoker::new(
            model_loader,
            ledger.clone(),
            config.confidence_threshold,
            logger.clone(),
        );

        Self {
            config,
            logger: logger.with_namespace("pipeline"),
            display,
            invoker,
            ledger,
        }
    }

    fn spawn_effects(&self, effects: Vec<Effect>, event_sender: &Sender<Event>) {
        for effect in effects {
            let self_clone = self.clone();
            let event_sender = event_sender.clone();
            std::thread::spawn(move || self_clone.run_effect(effect, event_sender));
        }
    }

    /// Runs one prediction to completion. Each step executes on its own
    /// thread; this call blocks until the outcome is known.
    pub fn predict(&self, image: ImageHandle) -> Result<PredictionResult, PipelineError> {
        let started = Instant::now();
        let (event_sender, event_receiver) = channel();
        let (mut state, effects) = init();

        self.spawn_effects(effects, &event_sender);
        let _ = event_sender.send(Event::PredictRequested { image });

        loop {
            let event = event_receiver.recv().map_err(|e| {
                PipelineError::InferenceFailure(format!("pipeline channel closed: {}", e))
            })?;

            let _ = self
                .logger
                .info(&format!("state: {} event: {:?}", state.name(), event));

            let (new_state, effects) = transition(state, event);
            state = new_state;

            let _ = self.logger.info(&format!(
                "new state: {} effects: {:?}",
                state.name(),
                effects
            ));

            if let Err(e) = self.render(&state) {
                let _ = self.logger.error(&format!("Failed to render: {}", e));
            }

            match &state {
                State::Done { result } => {
                    let _ = self
                        .logger
                        .info(&format!("Prediction finished in {:?}", started.elapsed()));
                    return Ok(*result);
                }
                State::Errored { error } => {
                    let _ = self.logger.error(&format!(
                        "Prediction failed [{}]: {}",
                        error.error_code(),
                        error
                    ));
                    return Err(error.clone());
                }
                _ => self.spawn_effects(effects, &event_sender),
            }
        }
    }

    /// Called by the UI when predict is pressed with no image selected.
    pub fn prompt_for_image(&self) {
        if let Err(e) = self.render_prompt() {
            let _ = self.logger.error(&format!("Failed to render: {}", e));
        }
    }

    /// Called by the UI when the selected image changes.
    pub fn clear_result(&self) {
        if let Err(e) = self.with_display(|display| display.clear()) {
            let _ = self.logger.error(&format!("Failed to clear display: {}", e));
        }
    }
}

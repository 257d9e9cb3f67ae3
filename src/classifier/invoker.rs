use crate::classifier::decision::{decide, PredictionResult};
use crate::classifier::interface::{Model, ModelLoader};
use crate::error::PipelineError;
use crate::library::logger::interface::Logger;
use crate::tensor::{ScopedTensor, TensorLedger};
use std::sync::Arc;
use std::time::Instant;

/// Model acquisition, forward pass and decision, each usable as its own step.
///
/// Every step takes ownership of the tensors it consumes, so they are
/// released when the step returns, whether it succeeded or not.
#[derive(Clone)]
pub struct ClassifierInvoker {
    model_loader: Arc<dyn ModelLoader>,
    ledger: TensorLedger,
    confidence_threshold: f32,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ClassifierInvoker {
    pub fn new(
        model_loader: Arc<dyn ModelLoader>,
        ledger: TensorLedger,
        confidence_threshold: f32,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            model_loader,
            ledger,
            confidence_threshold,
            logger: logger.with_namespace("classifier"),
        }
    }

    pub fn acquire_model(&self) -> Result<Arc<dyn Model>, PipelineError> {
        self.model_loader.load()
    }

    pub fn infer(
        &self,
        model: &dyn Model,
        input: ScopedTensor,
    ) -> Result<ScopedTensor, PipelineError> {
        let started = Instant::now();
        let output = model.run(&input, &self.ledger);
        drop(input);

        let _ = self
            .logger
            .info(&format!("Forward pass took {:?}", started.elapsed()));

        output
    }

    pub fn decide(&self, output: ScopedTensor) -> Result<PredictionResult, PipelineError> {
        let scores = output.as_f32_slice()?;
        let _ = self.logger.info(&format!("Scores: {:?}", scores));

        decide(scores, self.confidence_threshold)
    }

    /// Synchronous load, forward pass and decision on the calling thread.
    /// The pipeline runs the same steps one effect at a time instead.
    #[allow(dead_code)]
    pub fn predict(&self, input: ScopedTensor) -> Result<PredictionResult, PipelineError> {
        let model = self.acquire_model()?;
        let output = self.infer(model.as_ref(), input)?;
        self.decide(output)
    }
}

use crate::classifier::decision::NUM_CLASSES;
use crate::classifier::interface::{Model, ModelLoader};
use crate::error::PipelineError;
use crate::library::logger::interface::Logger;
use crate::preprocess::image::INPUT_SIZE;
use crate::tensor::{ScopedTensor, TensorLedger};
use rand::distr::{Distribution, Uniform};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tract_onnx::prelude::*;

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub enum FakeOutput {
    Scores(Vec<f32>),
    Random,
    Unavailable,
    InferenceError,
    Panic,
}

pub struct ModelLoaderFake {
    output: FakeOutput,
    logger: Arc<dyn Logger + Send + Sync>,
    load_count: AtomicUsize,
}

impl ModelLoaderFake {
    pub fn new(output: FakeOutput, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            output,
            logger: logger.with_namespace("model_loader").with_namespace("fake"),
            load_count: AtomicUsize::new(0),
        }
    }

    #[allow(dead_code)]
    pub fn load_count(&self) -> usize {
        self.load_count.load(Ordering::SeqCst)
    }
}

impl ModelLoader for ModelLoaderFake {
    fn load(&self) -> Result<Arc<dyn Model>, PipelineError> {
        self.load_count.fetch_add(1, Ordering::SeqCst);
        let _ = self.logger.info("Loading fake model...");

        match self.output {
            FakeOutput::Unavailable => Err(PipelineError::ModelUnavailable(
                "fake model is unreachable".to_string(),
            )),
            _ => Ok(Arc::new(ModelFake {
                output: self.output.clone(),
            })),
        }
    }
}

#[derive(Debug)]
pub struct ModelFake {
    output: FakeOutput,
}

fn random_scores() -> Result<Vec<f32>, PipelineError> {
    let mut rng = rand::rng();
    let dist = Uniform::new(0.0f32, 1.0)
        .map_err(|e| PipelineError::InferenceFailure(e.to_string()))?;

    let raw: Vec<f32> = (0..NUM_CLASSES).map(|_| dist.sample(&mut rng)).collect();
    let total: f32 = raw.iter().sum::<f32>().max(f32::EPSILON);

    Ok(raw.iter().map(|v| v / total).collect())
}

impl Model for ModelFake {
    fn run(
        &self,
        input: &ScopedTensor,
        ledger: &TensorLedger,
    ) -> Result<ScopedTensor, PipelineError> {
        let size = INPUT_SIZE as usize;
        if input.shape() != [1, size, size, 3].as_slice() {
            return Err(PipelineError::InferenceFailure(format!(
                "shape mismatch: expected [1, {}, {}, 3], got {:?}",
                size,
                size,
                input.shape()
            )));
        }

        let scores = match &self.output {
            FakeOutput::Scores(scores) => scores.clone(),
            FakeOutput::Random => random_scores()?,
            FakeOutput::InferenceError | FakeOutput::Unavailable => {
                return Err(PipelineError::InferenceFailure(
                    "fake model failed during the forward pass".to_string(),
                ))
            }
            FakeOutput::Panic => panic!("fake model crashed during the forward pass"),
        };

        let tensor = Tensor::from_shape(&[1, scores.len()], &scores)
            .map_err(|e| PipelineError::InferenceFailure(e.to_string()))?;

        Ok(ledger.track(tensor))
    }
}

use crate::classifier::interface::{Model, ModelLoader};
use crate::error::PipelineError;
use crate::library::logger::interface::Logger;
use crate::preprocess::image::INPUT_SIZE;
use crate::tensor::{ScopedTensor, TensorLedger};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tract_onnx::prelude::*;

type Plan = TypedRunnableModel<TypedModel>;

pub struct ModelLoaderTractOnnx {
    model_path: PathBuf,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ModelLoaderTractOnnx {
    pub fn new(model_path: PathBuf, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            model_path,
            logger: logger.with_namespace("model_loader"),
        }
    }
}

fn build_plan(model_path: &Path) -> TractResult<Plan> {
    let size = INPUT_SIZE as usize;
    let plan = tract_onnx::onnx()
        .model_for_path(model_path)?
        .with_input_fact(0, f32::fact([1, size, size, 3]).into())?
        .into_optimized()?
        .into_runnable()?;
    Ok(plan)
}

impl ModelLoader for ModelLoaderTractOnnx {
    fn load(&self) -> Result<Arc<dyn Model>, PipelineError> {
        let _ = self
            .logger
            .info(&format!("Loading model from {}", self.model_path.display()));

        if !self.model_path.exists() {
            return Err(PipelineError::ModelUnavailable(format!(
                "model not found: {}",
                self.model_path.display()
            )));
        }

        let plan = build_plan(&self.model_path).map_err(|e| {
            PipelineError::ModelUnavailable(format!("{}: {}", self.model_path.display(), e))
        })?;

        let _ = self.logger.info("Model loaded");

        Ok(Arc::new(ModelTractOnnx {
            plan,
            model_path: self.model_path.clone(),
        }))
    }
}

pub struct ModelTractOnnx {
    plan: Plan,
    model_path: PathBuf,
}

impl fmt::Debug for ModelTractOnnx {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ModelTractOnnx({})", self.model_path.display())
    }
}

impl Model for ModelTractOnnx {
    fn run(
        &self,
        input: &ScopedTensor,
        ledger: &TensorLedger,
    ) -> Result<ScopedTensor, PipelineError> {
        let outputs = self
            .plan
            .run(tvec!(input.tensor().clone().into_tvalue()))
            .map_err(|e| PipelineError::InferenceFailure(e.to_string()))?;

        let output = outputs
            .into_iter()
            .next()
            .ok_or_else(|| PipelineError::InferenceFailure("model has no outputs".to_string()))?;

        Ok(ledger.track(output.into_tensor()))
    }
}

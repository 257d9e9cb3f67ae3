use crate::classifier::interface::{Model, ModelLoader};
use crate::error::PipelineError;
use crate::library::logger::interface::Logger;
use std::sync::{Arc, Mutex};

/// Loads the wrapped model once and hands out the same instance afterwards.
/// Failed loads are not cached.
pub struct ModelLoaderCached {
    inner: Arc<dyn ModelLoader>,
    cached: Mutex<Option<Arc<dyn Model>>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ModelLoaderCached {
    pub fn new(inner: Arc<dyn ModelLoader>, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            inner,
            cached: Mutex::new(None),
            logger: logger.with_namespace("model_cache"),
        }
    }
}

impl ModelLoader for ModelLoaderCached {
    fn load(&self) -> Result<Arc<dyn Model>, PipelineError> {
        let mut cached = self
            .cached
            .lock()
            .map_err(|_| PipelineError::ModelUnavailable("model cache lock poisoned".to_string()))?;

        if let Some(model) = cached.as_ref() {
            let _ = self.logger.info("Reusing cached model");
            return Ok(Arc::clone(model));
        }

        let model = self.inner.load()?;
        *cached = Some(Arc::clone(&model));
        Ok(model)
    }
}

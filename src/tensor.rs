use crate::error::PipelineError;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tract_onnx::prelude::*;

/// Counts the tensors handed out by one pipeline that have not been dropped yet.
///
/// Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct TensorLedger {
    live: Arc<AtomicUsize>,
}

impl TensorLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&self, tensor: Tensor) -> ScopedTensor {
        self.live.fetch_add(1, Ordering::SeqCst);
        ScopedTensor {
            tensor,
            live: Arc::clone(&self.live),
        }
    }

    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

/// A tensor owned by exactly one invocation. Dropping it releases the
/// backing memory and its ledger entry.
pub struct ScopedTensor {
    tensor: Tensor,
    live: Arc<AtomicUsize>,
}

impl ScopedTensor {
    pub fn shape(&self) -> &[usize] {
        self.tensor.shape()
    }

    pub fn datum_type(&self) -> DatumType {
        self.tensor.datum_type()
    }

    pub fn tensor(&self) -> &Tensor {
        &self.tensor
    }

    pub fn as_f32_slice(&self) -> Result<&[f32], PipelineError> {
        self.tensor
            .as_slice::<f32>()
            .map_err(|e| PipelineError::InferenceFailure(e.to_string()))
    }
}

impl Drop for ScopedTensor {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

impl fmt::Debug for ScopedTensor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ScopedTensor({:?}, {:?})", self.datum_type(), self.shape())
    }
}

use crate::error::PipelineError;
use crate::tensor::{ScopedTensor, TensorLedger};
use std::fmt::Debug;
use std::sync::Arc;

pub trait Model: Debug + Send + Sync {
    /// Runs a forward pass. The returned tensor is tracked by `ledger`.
    fn run(&self, input: &ScopedTensor, ledger: &TensorLedger)
        -> Result<ScopedTensor, PipelineError>;
}

pub trait ModelLoader: Send + Sync {
    fn load(&self) -> Result<Arc<dyn Model>, PipelineError>;
}

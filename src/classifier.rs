pub mod decision;
pub mod impl_cached;
pub mod impl_fake;
pub mod impl_tract_onnx;
pub mod interface;
pub mod invoker;

//! Pipeline stages, in execution order: classify, matte, crop, resize,
//! sharpen. `pipeline` chains them.
pub mod classify;
pub mod crop;
pub mod matte;
pub mod pipeline;
pub mod resize;
pub mod sharpen;

pub mod progress;
pub mod sampler;

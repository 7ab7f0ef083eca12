// core/mod.rs
pub mod compiler;
pub mod shard_planner;
pub mod batch;
pub mod launch_service;
pub mod quantization_service;

// Ré-exports pour faciliter l'import
pub use compiler::{CliOverrides, CommandCompiler};
pub use batch::{BatchExecutor, BatchReport};
pub use launch_service::LaunchService;
pub use quantization_service::{BatchPlan, QuantizationService, QuantizeOptions};

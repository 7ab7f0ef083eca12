// utils/mod.rs
pub mod args;
pub mod config;
pub mod logging;

// Ré-exports pour faciliter l'import
pub use args::normalize_legacy_flags;
pub use config::{BuildVariant, LauncherConfig};
pub use logging::setup_tracing;

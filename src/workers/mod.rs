//! # Workers Module
//!
//! Workers exécutant les jobs de quantification:
//! - `quantization_worker.rs`: un job à la fois, appel du binaire `quantize`
//!   puis suppression éventuelle du fichier f16
//!
//! Le pool et la barrière de fin de lot sont dans `core::batch`.

pub mod quantization_worker;

pub use quantization_worker::QuantizationWorker;

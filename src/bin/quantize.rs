use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use llama_launcher::core::batch::default_parallelism;
use llama_launcher::core::quantization_service::quantize_binary_name;
use llama_launcher::core::{QuantizationService, QuantizeOptions};
use llama_launcher::domain::JobStatus;
use llama_launcher::domain::ModelId;
use llama_launcher::infrastructure::ProcessInvoker;
use llama_launcher::utils::setup_tracing;

/// Quantifie les modèles donnés en appliquant le binaire `quantize` à chaque shard f16
#[derive(Parser, Debug)]
#[command(name = "llama-quantize", version, about)]
struct Cli {
    /// The models to quantize.
    #[arg(required = true, value_enum)]
    models: Vec<ModelId>,

    /// Remove the f16 model after quantizing it.
    #[arg(short = 'r', long = "remove-16")]
    remove_f16: bool,

    /// Specify the directory where the models are located.
    #[arg(short = 'm', long = "models-path", default_value = "./models")]
    models_path: PathBuf,

    /// Specify the path to the "quantize" script.
    #[arg(short = 'q', long = "quantize-script-path")]
    quantize_script_path: Option<PathBuf>,

    /// Specify the number of parallel quantization tasks
    #[arg(short = 't', long = "threads", default_value_t = default_parallelism())]
    threads: usize,
}

impl Cli {
    fn options(self) -> QuantizeOptions {
        QuantizeOptions {
            models: self.models,
            remove_f16: self.remove_f16,
            models_path: self.models_path,
            quantize_binary: self
                .quantize_script_path
                .unwrap_or_else(|| PathBuf::from(".").join(quantize_binary_name())),
            threads: self.threads,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_tracing();

    let options = Cli::parse().options();
    debug!("🔧 Options: {:?}", options);

    let service = QuantizationService::new(Arc::new(ProcessInvoker::new()));
    let interrupt = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    let result = service.run_until(&options, interrupt).await;

    match result {
        Ok(report) => {
            if let Ok(json) = serde_json::to_string(&report) {
                debug!(report = %json, "rapport du lot");
            }
            if report.interrupted {
                warn!(
                    "⏹️  Quantification interrompue: {} job(s) terminé(s), {} ignoré(s)",
                    report.count(JobStatus::Completed),
                    report.count(JobStatus::Skipped)
                );
            } else {
                info!("✅ Tous les modèles ont été quantifiés avec succès.");
            }
            ExitCode::SUCCESS
        }
        // Un job tué par l'interruption ne rend pas la sortie en échec
        Err(e) if service.is_interrupted() => {
            warn!("⏹️  Quantification interrompue: {}", e);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("❌ Une erreur est survenue lors de la quantification des modèles: {}", e);
            ExitCode::FAILURE
        }
    }
}

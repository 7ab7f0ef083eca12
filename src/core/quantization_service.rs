// core/quantization_service.rs
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::batch::{BatchExecutor, BatchReport};
use crate::core::shard_planner;
use crate::domain::jobs::QuantizationJob;
use crate::domain::model::ModelId;
use crate::infrastructure::error::{missing_file, AppResult};
use crate::infrastructure::process::Invoker;
use crate::utils::config::executable_name;
use crate::workers::quantization_worker::QuantizationWorker;

/// Paramètres d'un lot de quantification
#[derive(Debug, Clone)]
pub struct QuantizeOptions {
    pub models: Vec<ModelId>,
    pub remove_f16: bool,
    pub models_path: PathBuf,
    pub quantize_binary: PathBuf,
    pub threads: usize,
}

/// Nom du binaire quantize selon la plateforme
pub fn quantize_binary_name() -> String {
    match std::env::consts::OS {
        "linux" | "macos" | "windows" => {}
        other => warn!("⚠️  Plateforme inconnue ({}), système de type UNIX supposé", other),
    }
    executable_name("quantize")
}

/// Lot prêt à exécuter: binaire résolu et un job par shard
#[derive(Debug, Clone)]
pub struct BatchPlan {
    pub quantize_binary: PathBuf,
    pub jobs: Vec<QuantizationJob>,
}

/// Orchestration d'un lot: vérifications, planification puis exécution
pub struct QuantizationService {
    invoker: Arc<dyn Invoker>,
    shutdown: Arc<AtomicBool>,
}

impl QuantizationService {
    pub fn new(invoker: Arc<dyn Invoker>) -> Self {
        Self {
            invoker,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Vérifie les prérequis et construit un job par shard, avant tout travail
    pub fn prepare(&self, options: &QuantizeOptions) -> AppResult<BatchPlan> {
        // Chemin absolu: un nom nu ne doit pas être cherché dans le PATH
        let quantize_binary = absolute(&options.quantize_binary)?;
        if !quantize_binary.is_file() {
            return Err(missing_file(
                quantize_binary,
                "utilisez --quantize-script-path pour indiquer un autre emplacement",
            ));
        }

        let models_path = absolute(&options.models_path)?;
        let shards = shard_planner::plan_all(&models_path, &options.models)?;

        let jobs: Vec<QuantizationJob> = shards
            .iter()
            .enumerate()
            .map(|(i, shard)| QuantizationJob::from_shard(i + 1, shard, options.remove_f16))
            .collect();

        info!("📋 {} job(s) planifié(s) dans {}", jobs.len(), models_path.display());
        Ok(BatchPlan {
            quantize_binary,
            jobs,
        })
    }

    pub async fn run(&self, options: &QuantizeOptions) -> AppResult<BatchReport> {
        let plan = self.prepare(options)?;

        let worker = QuantizationWorker::new(self.invoker.clone(), plan.quantize_binary);
        let executor = BatchExecutor::new(worker, options.threads).with_shutdown(self.shutdown.clone());

        executor.run(plan.jobs).await?.into_result()
    }

    /// Exécute le lot jusqu'à la barrière de fin, même si `interrupt` se résout en cours de route.
    ///
    /// À l'interruption, le drapeau d'arrêt est levé: les jobs pas encore démarrés sont
    /// marqués ignorés, ceux en cours vont à leur terme.
    pub async fn run_until<F>(&self, options: &QuantizeOptions, interrupt: F) -> AppResult<BatchReport>
    where
        F: Future<Output = ()>,
    {
        let run = self.run(options);
        tokio::pin!(run);

        tokio::select! {
            result = &mut run => return result,
            _ = interrupt => {
                self.shutdown.store(true, Ordering::SeqCst);
                warn!("⏹️  Interruption demandée, attente des jobs en cours");
            }
        }

        run.await
    }

    pub fn is_interrupted(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }
}

fn absolute(path: &Path) -> AppResult<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

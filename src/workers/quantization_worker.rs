use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::domain::jobs::{JobOutcome, QuantizationJob};
use crate::infrastructure::error::{AppError, AppResult};
use crate::infrastructure::process::Invoker;

/// Worker exécutant un job de quantification à la fois
#[derive(Clone)]
pub struct QuantizationWorker {
    invoker: Arc<dyn Invoker>,
    quantize_binary: PathBuf,
}

impl QuantizationWorker {
    pub fn new(invoker: Arc<dyn Invoker>, quantize_binary: PathBuf) -> Self {
        Self {
            invoker,
            quantize_binary,
        }
    }

    /// Traite un seul job: quantification puis suppression éventuelle du f16
    #[instrument(skip_all, fields(job = job.index, model = %job.model, source = %job.source.display()))]
    pub async fn process_single_job(&self, job: &QuantizationJob) -> AppResult<()> {
        info!("⚙️  Quantification de {}", job.source.display());

        self.invoker
            .run(&job.invocation(&self.quantize_binary))
            .await
            .map_err(|cause| AppError::Job {
                index: job.index,
                source_path: job.source.clone(),
                cause: Box::new(cause),
            })?;

        if job.remove_source {
            tokio::fs::remove_file(&job.source)
                .await
                .map_err(|e| AppError::Job {
                    index: job.index,
                    source_path: job.source.clone(),
                    cause: Box::new(AppError::Io(e)),
                })?;
            debug!("🗑️  Fichier f16 supprimé: {}", job.source.display());
        }

        info!("✅ Modèle quantifié: {}", job.destination.display());
        Ok(())
    }

    /// Traite un job et capture son résultat au lieu de le propager
    pub async fn run_to_outcome(&self, job: &QuantizationJob) -> JobOutcome {
        let started = Instant::now();
        let outcome = JobOutcome::queued(job);

        match self.process_single_job(job).await {
            Ok(()) => outcome.complete(started.elapsed().as_millis() as u64),
            Err(e) => {
                warn!("❌ {}", e);
                outcome.fail(e.to_string(), started.elapsed().as_millis() as u64)
            }
        }
    }
}

//! # Exécution par lots
//!
//! Lance un job de quantification par shard, soit séquentiellement soit via
//! un pool de taille fixe.
//!
//! ## Contrat d'échec
//! - **Séquentiel** (`parallelism <= 1`): le premier job en échec interrompt le
//!   lot et son erreur est propagée; les jobs suivants ne démarrent jamais.
//! - **Parallèle**: tous les jobs sont soumis d'emblée, la barrière de fin
//!   attend chacun d'eux et le rapport recense chaque résultat. Un seul échec
//!   suffit à rendre le lot en échec.
//!
//! Un drapeau d'arrêt partagé empêche le démarrage de nouveaux jobs après une
//! interruption; les processus déjà lancés ne sont pas tués.

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::domain::jobs::{JobOutcome, JobStatus, QuantizationJob};
use crate::infrastructure::error::{AppError, AppResult, JobFailure};
use crate::workers::quantization_worker::QuantizationWorker;

/// Nombre de workers par défaut: min(4, CPU disponibles)
pub fn default_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(4)
}

/// Bilan d'un lot après la barrière de fin
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<JobOutcome>,
    pub parallelism: usize,
    pub interrupted: bool,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn count(&self, status: JobStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &JobOutcome> {
        self.outcomes.iter().filter(|o| o.status == JobStatus::Failed)
    }

    pub fn is_success(&self) -> bool {
        self.count(JobStatus::Failed) == 0
    }

    /// `BatchFailed`, nommant chaque job en échec, si au moins un job a échoué
    pub fn into_result(self) -> AppResult<Self> {
        let failures: Vec<JobFailure> = self
            .failures()
            .map(|o| JobFailure {
                index: o.index,
                source_path: o.source.clone(),
                reason: o.error_message.clone().unwrap_or_else(|| "erreur inconnue".to_string()),
            })
            .collect();

        if failures.is_empty() {
            Ok(self)
        } else {
            Err(AppError::BatchFailed {
                total: self.total(),
                failures,
            })
        }
    }
}

/// Exécuteur de lots de quantification
pub struct BatchExecutor {
    worker: QuantizationWorker,
    parallelism: usize,
    shutdown: Arc<AtomicBool>,
}

impl BatchExecutor {
    pub fn new(worker: QuantizationWorker, parallelism: usize) -> Self {
        Self {
            worker,
            parallelism,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Drapeau levé par le gestionnaire d'interruption
    pub fn with_shutdown(mut self, shutdown: Arc<AtomicBool>) -> Self {
        self.shutdown = shutdown;
        self
    }

    pub async fn run(&self, jobs: Vec<QuantizationJob>) -> AppResult<BatchReport> {
        let started_at = Utc::now();
        let started = Instant::now();
        // Jamais plus de workers que de jobs
        let workers = self.parallelism.clamp(1, jobs.len().max(1));
        info!("🚀 Lot de {} job(s), {} worker(s)", jobs.len(), workers);

        let outcomes = if self.parallelism <= 1 {
            self.run_sequential(jobs).await?
        } else {
            self.run_pooled(jobs, workers).await
        };

        let report = BatchReport {
            interrupted: self.is_shutdown(),
            outcomes,
            parallelism: workers,
            started_at,
            duration_ms: started.elapsed().as_millis() as u64,
        };

        info!(
            "📊 Lot terminé: {} réussi(s), {} échec(s), {} ignoré(s)",
            report.count(JobStatus::Completed),
            report.count(JobStatus::Failed),
            report.count(JobStatus::Skipped)
        );
        for failure in report.failures() {
            error!(
                "❌ Job #{} ({}): {}",
                failure.index,
                failure.source.display(),
                failure.error_message.as_deref().unwrap_or("erreur inconnue")
            );
        }

        Ok(report)
    }

    fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    async fn run_sequential(&self, jobs: Vec<QuantizationJob>) -> AppResult<Vec<JobOutcome>> {
        let mut outcomes = Vec::with_capacity(jobs.len());

        for job in &jobs {
            if self.is_shutdown() {
                outcomes.push(JobOutcome::queued(job).skip());
                continue;
            }

            let started = Instant::now();
            // Le premier échec interrompt tout le lot
            self.worker.process_single_job(job).await?;
            outcomes.push(JobOutcome::queued(job).complete(started.elapsed().as_millis() as u64));
        }

        Ok(outcomes)
    }

    async fn run_pooled(&self, jobs: Vec<QuantizationJob>, workers: usize) -> Vec<JobOutcome> {
        let permits = Arc::new(Semaphore::new(workers));
        let mut handles = Vec::with_capacity(jobs.len());

        for job in jobs {
            let permits = permits.clone();
            let worker = self.worker.clone();
            let shutdown = self.shutdown.clone();
            let pending = JobOutcome::queued(&job);

            let handle = tokio::spawn(async move {
                let Ok(_permit) = permits.acquire_owned().await else {
                    return JobOutcome::queued(&job).skip();
                };
                if shutdown.load(Ordering::SeqCst) {
                    return JobOutcome::queued(&job).skip();
                }
                worker.run_to_outcome(&job).await
            });
            handles.push((pending, handle));
        }

        let (pending, handles): (Vec<_>, Vec<_>) = handles.into_iter().unzip();

        // Barrière: attend la fin de chaque job, qu'il réussisse ou non
        join_all(handles)
            .await
            .into_iter()
            .zip(pending)
            .map(|(result, pending)| match result {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("⚠️  Tâche du job #{} interrompue: {}", pending.index, e);
                    pending.fail(AppError::TaskJoin(e).to_string(), 0)
                }
            })
            .collect()
    }
}

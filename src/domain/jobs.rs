use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::command::Invocation;
use super::model::{ModelId, ModelShard};

/// Marqueur du format source dans les noms de fichiers
pub const SOURCE_FORMAT_TAG: &str = "f16";
/// Marqueur du format quantifié
pub const TARGET_FORMAT_TAG: &str = "q4_0";
/// Sélecteur de méthode passé au binaire quantize (2 = q4_0)
pub const QUANTIZATION_METHOD_SELECTOR: &str = "2";

/// Statut d'un job de quantification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Queued,
    Completed,
    Failed,
    /// Jamais démarré (lot interrompu ou abandonné)
    Skipped,
}

/// Job de quantification d'un shard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuantizationJob {
    /// Position du job dans le lot (à partir de 1)
    pub index: usize,
    pub model: ModelId,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub remove_source: bool,
}

impl QuantizationJob {
    pub fn from_shard(index: usize, shard: &ModelShard, remove_source: bool) -> Self {
        Self {
            index,
            model: shard.model,
            source: shard.path.clone(),
            destination: quantized_path(&shard.path),
            remove_source,
        }
    }

    /// `quantize <source> <destination> 2`
    pub fn invocation(&self, quantize_binary: &Path) -> Invocation {
        Invocation::new(
            quantize_binary.to_path_buf(),
            vec![
                self.source.to_string_lossy().into_owned(),
                self.destination.to_string_lossy().into_owned(),
                QUANTIZATION_METHOD_SELECTOR.to_string(),
            ],
        )
    }
}

/// Remplace `f16` par `q4_0` dans le nom de fichier, le répertoire reste intact
pub fn quantized_path(source: &Path) -> PathBuf {
    match source.file_name() {
        Some(name) => {
            let renamed = name
                .to_string_lossy()
                .replace(SOURCE_FORMAT_TAG, TARGET_FORMAT_TAG);
            source.with_file_name(renamed)
        }
        None => source.to_path_buf(),
    }
}

/// Résultat d'un job après la barrière de fin de lot
#[derive(Debug, Clone, Serialize)]
pub struct JobOutcome {
    pub index: usize,
    pub model: ModelId,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub status: JobStatus,
    /// Message d'erreur si le job a échoué
    pub error_message: Option<String>,
    pub duration_ms: u64,
    pub finished_at: Option<DateTime<Utc>>,
}

impl JobOutcome {
    pub fn queued(job: &QuantizationJob) -> Self {
        Self {
            index: job.index,
            model: job.model,
            source: job.source.clone(),
            destination: job.destination.clone(),
            status: JobStatus::Queued,
            error_message: None,
            duration_ms: 0,
            finished_at: None,
        }
    }

    /// Marque le job comme complété
    pub fn complete(mut self, duration_ms: u64) -> Self {
        self.status = JobStatus::Completed;
        self.duration_ms = duration_ms;
        self.finished_at = Some(Utc::now());
        self
    }

    /// Marque le job comme échoué avec un message d'erreur
    pub fn fail(mut self, error_message: String, duration_ms: u64) -> Self {
        self.status = JobStatus::Failed;
        self.error_message = Some(error_message);
        self.duration_ms = duration_ms;
        self.finished_at = Some(Utc::now());
        self
    }

    pub fn skip(mut self) -> Self {
        self.status = JobStatus::Skipped;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ShardPart;

    #[test]
    fn test_quantized_path_only_touches_file_name() {
        let source = Path::new("/data/f16-models/7B/ggml-model-f16.bin.1");
        assert_eq!(
            quantized_path(source),
            Path::new("/data/f16-models/7B/ggml-model-q4_0.bin.1")
        );
    }

    #[test]
    fn test_job_invocation_arguments() {
        let shard = ModelShard {
            model: ModelId::B7,
            part: ShardPart::Base,
            path: PathBuf::from("/models/7B/ggml-model-f16.bin"),
        };
        let job = QuantizationJob::from_shard(1, &shard, true);
        let invocation = job.invocation(Path::new("/opt/quantize"));

        assert_eq!(invocation.program, Path::new("/opt/quantize"));
        assert_eq!(
            invocation.args,
            vec![
                "/models/7B/ggml-model-f16.bin",
                "/models/7B/ggml-model-q4_0.bin",
                "2"
            ]
        );
        assert!(job.remove_source);
    }

    #[test]
    fn test_outcome_transitions() {
        let shard = ModelShard {
            model: ModelId::B13,
            part: ShardPart::Numbered(0),
            path: PathBuf::from("m/13B/ggml-model-f16.bin.0"),
        };
        let job = QuantizationJob::from_shard(2, &shard, false);

        let done = JobOutcome::queued(&job).complete(120);
        assert_eq!(done.status, JobStatus::Completed);
        assert!(done.finished_at.is_some());

        let failed = JobOutcome::queued(&job).fail("exit 1".to_string(), 5);
        assert_eq!(failed.status, JobStatus::Failed);
        assert_eq!(failed.error_message.as_deref(), Some("exit 1"));

        assert_eq!(JobOutcome::queued(&job).skip().status, JobStatus::Skipped);
    }
}

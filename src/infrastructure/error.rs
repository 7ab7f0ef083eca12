use std::path::PathBuf;

/// Type de résultat standard pour l'application
pub type AppResult<T> = Result<T, AppError>;

/// Erreurs principales de l'application
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Profil absent, illisible ou mal formé
    #[error("Impossible de lire le profil {}: {reason}", .path.display())]
    ConfigRead { path: PathBuf, reason: String },

    /// Le processus externe a échoué (code de sortie non nul ou lancement impossible)
    #[error("{}", describe_execution(.command, .exit_code, .reason))]
    Execution {
        command: String,
        exit_code: Option<i32>,
        reason: Option<String>,
    },

    /// Fichier requis absent (shard de base, binaire quantize)
    #[error("Fichier introuvable: {}{}", .path.display(), describe_hint(.hint))]
    MissingFile { path: PathBuf, hint: Option<String> },

    /// Échec d'un job de quantification au sein d'un lot
    #[error("Job #{index} ({}) en échec: {cause}", .source_path.display())]
    Job {
        index: usize,
        source_path: PathBuf,
        cause: Box<AppError>,
    },

    /// Au moins un job du lot a échoué
    #[error("{}/{total} jobs de quantification en échec: {}", .failures.len(), describe_failures(.failures))]
    BatchFailed {
        total: usize,
        failures: Vec<JobFailure>,
    },

    /// Valeur de configuration invalide
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// Job en échec au sein d'un lot parallèle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFailure {
    pub index: usize,
    pub source_path: PathBuf,
    pub reason: String,
}

fn describe_failures(failures: &[JobFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("job #{} ({}): {}", f.index, f.source_path.display(), f.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

fn describe_hint(hint: &Option<String>) -> String {
    hint.as_ref().map(|h| format!(" ({})", h)).unwrap_or_default()
}

fn describe_execution(command: &str, exit_code: &Option<i32>, reason: &Option<String>) -> String {
    match (exit_code, reason) {
        (Some(code), _) => format!("La commande `{}` a échoué avec le code {}", command, code),
        (None, Some(reason)) => format!("Impossible d'exécuter `{}`: {}", command, reason),
        (None, None) => format!("La commande `{}` a été interrompue par un signal", command),
    }
}

// Helper functions pour créer des erreurs courantes
pub fn config_read<P: Into<PathBuf>, T: Into<String>>(path: P, reason: T) -> AppError {
    AppError::ConfigRead {
        path: path.into(),
        reason: reason.into(),
    }
}

pub fn missing_file<P: Into<PathBuf>, T: Into<String>>(path: P, hint: T) -> AppError {
    AppError::MissingFile {
        path: path.into(),
        hint: Some(hint.into()),
    }
}

pub fn configuration_error<T: Into<String>>(message: T) -> AppError {
    AppError::Configuration(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_message_includes_command_and_code() {
        let err = AppError::Execution {
            command: "./bin/Release/main --seed 42".to_string(),
            exit_code: Some(3),
            reason: None,
        };
        let msg = err.to_string();
        assert!(msg.contains("./bin/Release/main --seed 42"));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_missing_file_hint() {
        let err = missing_file("/opt/quantize", "utilisez --quantize-script-path");
        assert!(err.to_string().contains("--quantize-script-path"));
    }

    #[test]
    fn test_job_error_wraps_cause() {
        let err = AppError::Job {
            index: 2,
            source_path: PathBuf::from("models/7B/ggml-model-f16.bin.1"),
            cause: Box::new(AppError::Execution {
                command: "quantize".to_string(),
                exit_code: Some(1),
                reason: None,
            }),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Job #2"));
        assert!(msg.contains("ggml-model-f16.bin.1"));
    }

    #[test]
    fn test_batch_failure_names_each_job() {
        let err = AppError::BatchFailed {
            total: 5,
            failures: vec![
                JobFailure {
                    index: 2,
                    source_path: PathBuf::from("models/7B/ggml-model-f16.bin.1"),
                    reason: "code 7".to_string(),
                },
                JobFailure {
                    index: 4,
                    source_path: PathBuf::from("models/7B/ggml-model-f16.bin.3"),
                    reason: "code 1".to_string(),
                },
            ],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("2/5 jobs"));
        assert!(msg.contains("job #2 (models/7B/ggml-model-f16.bin.1): code 7"));
        assert!(msg.contains("job #4 (models/7B/ggml-model-f16.bin.3)"));
    }
}

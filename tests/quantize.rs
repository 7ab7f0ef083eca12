#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::tempdir;

use llama_launcher::core::{QuantizationService, QuantizeOptions};
use llama_launcher::domain::ModelId;
use llama_launcher::infrastructure::ProcessInvoker;
use llama_launcher::AppError;

/// Faux binaire quantize: copie la source vers la destination, échoue sur les shards `.1`
fn fake_quantize(root: &Path) -> PathBuf {
    let script = root.join("quantize");
    fs::write(
        &script,
        "#!/bin/sh\n\
         case \"$1\" in *.bin.1) exit 7 ;; esac\n\
         [ \"$3\" = \"2\" ] || exit 9\n\
         cp \"$1\" \"$2\"\n",
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    script
}

fn model_dir(root: &Path, model: &str, files: &[&str]) -> PathBuf {
    let dir = root.join("models").join(model);
    fs::create_dir_all(&dir).unwrap();
    for file in files {
        fs::write(dir.join(file), b"f16 weights").unwrap();
    }
    dir
}

fn options(root: &Path, models: Vec<ModelId>, remove_f16: bool, threads: usize) -> QuantizeOptions {
    QuantizeOptions {
        models,
        remove_f16,
        models_path: root.join("models"),
        quantize_binary: fake_quantize(root),
        threads,
    }
}

#[tokio::test]
async fn quantizes_every_shard_and_removes_sources() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    let dir = model_dir(root, "7B", &["ggml-model-f16.bin", "ggml-model-f16.bin.0"]);

    let service = QuantizationService::new(Arc::new(ProcessInvoker::new()));
    let report = service
        .run(&options(root, vec![ModelId::B7], true, 2))
        .await
        .unwrap();

    assert!(report.is_success());
    assert_eq!(report.total(), 2);
    assert!(dir.join("ggml-model-q4_0.bin").is_file());
    assert!(dir.join("ggml-model-q4_0.bin.0").is_file());
    assert!(!dir.join("ggml-model-f16.bin").exists());
    assert!(!dir.join("ggml-model-f16.bin.0").exists());
}

#[tokio::test]
async fn pooled_batch_runs_remaining_jobs_after_a_failure() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    let dir = model_dir(
        root,
        "13B",
        &["ggml-model-f16.bin", "ggml-model-f16.bin.1", "ggml-model-f16.bin.2"],
    );

    let service = QuantizationService::new(Arc::new(ProcessInvoker::new()));
    let result = service.run(&options(root, vec![ModelId::B13], false, 3)).await;

    let err = result.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("job #2"));
    assert!(message.contains("ggml-model-f16.bin.1"));
    match err {
        AppError::BatchFailed { total, failures } => {
            assert_eq!(total, 3);
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].index, 2);
            assert_eq!(failures[0].source_path, dir.join("ggml-model-f16.bin.1"));
            assert!(failures[0].reason.contains("code 7"));
        }
        other => panic!("BatchFailed attendu, obtenu {:?}", other),
    }
    assert!(dir.join("ggml-model-q4_0.bin").is_file());
    assert!(dir.join("ggml-model-q4_0.bin.2").is_file());
    assert!(!dir.join("ggml-model-q4_0.bin.1").exists());
    // Sans --remove-16 les sources restent en place
    assert!(dir.join("ggml-model-f16.bin").is_file());
}

#[tokio::test]
async fn sequential_batch_stops_at_first_failure() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    let dir = model_dir(
        root,
        "30B",
        &["ggml-model-f16.bin", "ggml-model-f16.bin.1", "ggml-model-f16.bin.2"],
    );

    let service = QuantizationService::new(Arc::new(ProcessInvoker::new()));
    let result = service.run(&options(root, vec![ModelId::B30], true, 1)).await;

    match result {
        Err(AppError::Job { index, cause, .. }) => {
            assert_eq!(index, 2);
            assert!(matches!(*cause, AppError::Execution { exit_code: Some(7), .. }));
        }
        other => panic!("échec du job 2 attendu, obtenu {:?}", other),
    }
    assert!(dir.join("ggml-model-q4_0.bin").is_file());
    assert!(!dir.join("ggml-model-f16.bin").exists());
    assert!(dir.join("ggml-model-f16.bin.1").is_file());
    assert!(!dir.join("ggml-model-q4_0.bin.2").exists());
}

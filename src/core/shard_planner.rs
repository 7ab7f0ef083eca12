use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::domain::model::{ModelId, ModelShard, ShardPart, BASE_SHARD_FILENAME};
use crate::infrastructure::error::{missing_file, AppResult};

/// Liste les shards f16 d'un modèle: base d'abord, puis parties numérotées croissantes
pub fn plan(models_path: &Path, model: ModelId) -> AppResult<Vec<ModelShard>> {
    let model_dir = models_path.join(model.as_str());
    let base = model_dir.join(BASE_SHARD_FILENAME);

    if !base.is_file() {
        return Err(missing_file(
            base,
            "utilisez --models-path si les modèles sont stockés ailleurs",
        ));
    }

    let mut shards = Vec::new();
    for entry in fs::read_dir(&model_dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(part) = file_name.to_str().and_then(ShardPart::classify) else {
            continue;
        };
        if !entry.file_type()?.is_file() {
            debug!("⏭️  {:?} ignoré (pas un fichier)", entry.path());
            continue;
        }
        shards.push(ModelShard {
            model,
            part,
            path: entry.path(),
        });
    }

    shards.sort();
    info!("🔍 {} shard(s) trouvé(s) pour le modèle {}", shards.len(), model);

    Ok(shards)
}

/// Planifie tous les modèles demandés avant tout travail
pub fn plan_all(models_path: &Path, models: &[ModelId]) -> AppResult<Vec<ModelShard>> {
    let mut all = Vec::new();
    for model in models {
        all.extend(plan(models_path, *model)?);
    }
    Ok(all)
}

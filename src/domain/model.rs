use clap::ValueEnum;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;

/// Nom du fichier de poids f16 de base (les parties suivent en `.0`, `.1`, ...)
pub const BASE_SHARD_FILENAME: &str = "ggml-model-f16.bin";

/// Tailles de modèles LLaMA quantifiables par lot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
pub enum ModelId {
    #[value(name = "7B")]
    #[serde(rename = "7B")]
    B7,
    #[value(name = "13B")]
    #[serde(rename = "13B")]
    B13,
    #[value(name = "30B")]
    #[serde(rename = "30B")]
    B30,
    #[value(name = "65B")]
    #[serde(rename = "65B")]
    B65,
}

impl ModelId {
    /// Nom du sous-répertoire du modèle
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::B7 => "7B",
            ModelId::B13 => "13B",
            ModelId::B30 => "30B",
            ModelId::B65 => "65B",
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position d'un fichier dans la série de shards
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ShardPart {
    /// `ggml-model-f16.bin`
    Base,
    /// `ggml-model-f16.bin.<n>`
    Numbered(u32),
    /// Tout autre suffixe partageant le préfixe
    Other(String),
}

impl ShardPart {
    /// Classe un nom de fichier par rapport au nom de base, `None` s'il ne partage pas le préfixe
    pub fn classify(file_name: &str) -> Option<Self> {
        let suffix = file_name.strip_prefix(BASE_SHARD_FILENAME)?;
        if suffix.is_empty() {
            return Some(ShardPart::Base);
        }
        match suffix.strip_prefix('.').and_then(|n| n.parse::<u32>().ok()) {
            Some(n) => Some(ShardPart::Numbered(n)),
            None => Some(ShardPart::Other(suffix.to_string())),
        }
    }
}

/// Fragment de poids f16 découvert sur disque
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelShard {
    pub model: ModelId,
    pub part: ShardPart,
    pub path: PathBuf,
}

impl PartialOrd for ModelShard {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ModelShard {
    fn cmp(&self, other: &Self) -> Ordering {
        self.part
            .cmp(&other.part)
            .then_with(|| self.path.cmp(&other.path))
    }
}

/// Familles de modèles reconnues par le lanceur (`-modelName`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelName {
    #[value(name = "alpaca")]
    Alpaca,
    #[value(name = "alpaca-lora")]
    AlpacaLora,
    #[value(name = "chatdoctor")]
    Chatdoctor,
    #[value(name = "codegen")]
    Codegen,
    #[value(name = "gpt-2")]
    Gpt2,
    #[value(name = "gpt4-x-alpaca-native")]
    Gpt4XAlpacaNative,
    #[value(name = "gpt4all")]
    Gpt4all,
    #[value(name = "llama")]
    Llama,
    #[value(name = "point-alpaca")]
    PointAlpaca,
    #[value(name = "vicuna")]
    Vicuna,
}

/// Tailles de paramètres (`-modelParams`), sous-répertoire du profil
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ModelParams {
    #[value(name = "117m")]
    M117,
    #[value(name = "2b")]
    B2,
    #[value(name = "6b")]
    B6,
    #[default]
    #[value(name = "7b")]
    B7,
    #[value(name = "13b")]
    B13,
    #[value(name = "30b")]
    B30,
    #[value(name = "65b")]
    B65,
}

/// Modèles de prompts fournis (`-promptFile`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PromptFile {
    #[value(name = "alpaca")]
    Alpaca,
    #[value(name = "cabrita")]
    Cabrita,
    #[value(name = "chat-13b")]
    Chat13b,
    #[value(name = "chat-with-bob")]
    ChatWithBob,
    #[value(name = "chatdoctor")]
    Chatdoctor,
    #[value(name = "codegen")]
    Codegen,
    #[value(name = "dan")]
    Dan,
    #[value(name = "reason-act")]
    ReasonAct,
    #[value(name = "vicuna")]
    Vicuna,
}

/// Nom CLI canonique d'une valeur `ValueEnum`
pub fn value_name<T: ValueEnum>(value: &T) -> String {
    value
        .to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_default()
}

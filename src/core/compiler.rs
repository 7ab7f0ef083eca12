//! # Compilation des commandes
//!
//! Transforme un profil chargé et les surcharges de la ligne de commande en
//! une [`Command`] prête à exécuter. La compilation est un pli pur sur le
//! registre des options: aucune E/S, même entrée, même commande.
//!
//! ## Précédence par option
//! - **Passthrough**: `--clé valeur`, ou `--clé` seul si la valeur est vide
//! - **Chemin joint**: valeur CLI (avec extension) sinon valeur du profil (sans extension)
//! - **Découpage conditionnel**: valeurs du profil séparées par des virgules,
//!   émises uniquement si la surcharge CLI correspondante est renseignée

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::domain::command::{ArgToken, Command, Mode};
use crate::domain::options::{CliOverride, OptionSpec, PathRoot, PathRule, Resolution, OPTION_REGISTRY};
use crate::domain::profile::Profile;
use crate::utils::config::LauncherConfig;

/// Valeurs fournies en ligne de commande
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub profile_name: String,
    pub model_params: String,
    pub model_name: Option<String>,
    pub lora_adapter: Option<String>,
    pub prompt_file: Option<String>,
    pub reverse_prompt: Option<String>,
    pub perplexity: bool,
}

impl CliOverrides {
    /// Valeur d'une surcharge, `None` si absente ou vide
    pub fn get(&self, key: CliOverride) -> Option<&str> {
        let value = match key {
            CliOverride::ModelName => self.model_name.as_deref(),
            CliOverride::LoraAdapter => self.lora_adapter.as_deref(),
            CliOverride::PromptFile => self.prompt_file.as_deref(),
            CliOverride::ReversePrompt => self.reverse_prompt.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }

    pub fn mode(&self) -> Mode {
        if self.perplexity {
            Mode::Perplexity
        } else {
            Mode::Inference
        }
    }
}

/// Compilateur de commandes lié aux conventions de chemins
#[derive(Debug, Clone)]
pub struct CommandCompiler {
    config: LauncherConfig,
}

impl CommandCompiler {
    pub fn new(config: LauncherConfig) -> Self {
        Self { config }
    }

    pub fn compile(&self, cli: &CliOverrides, profile: &Profile) -> Command {
        let mode = cli.mode();
        let (binary, prefix) = match mode {
            Mode::Perplexity => (
                self.config.perplexity_binary_path(),
                vec![ArgToken::new("--file", path_arg(&self.config.perplexity_dataset_path()))],
            ),
            Mode::Inference => (self.config.main_binary_path(), Vec::new()),
        };

        let tokens = OPTION_REGISTRY.iter().fold(prefix, |mut tokens, spec| {
            if let Some(value) = profile.get(spec.name) {
                let resolved = self.resolve(spec, value, cli);
                for token in &resolved {
                    debug!(
                        flag = %token.flag,
                        value = ?token.value,
                        description = spec.description,
                        "Ajout de l'option"
                    );
                }
                tokens.extend(resolved);
            }
            tokens
        });

        Command::new(mode, binary, tokens)
    }

    fn resolve(&self, spec: &OptionSpec, value: &str, cli: &CliOverrides) -> Vec<ArgToken> {
        match spec.resolution {
            Resolution::Passthrough if value.is_empty() => vec![ArgToken::switch(spec.flag())],
            Resolution::Passthrough => vec![ArgToken::new(spec.flag(), value)],
            Resolution::PathJoined(rule) => self
                .resolve_path(&rule, value, cli)
                .map(|path| vec![ArgToken::new(spec.flag(), path_arg(&path))])
                .unwrap_or_else(|| {
                    warn!("⚠️  Option '{}' vide sans surcharge CLI, ignorée", spec.name);
                    Vec::new()
                }),
            Resolution::GatedSplit { gate, separator } => match cli.get(gate) {
                Some(_) => value
                    .split(separator)
                    .map(str::trim)
                    .filter(|token| !token.is_empty())
                    .map(|token| ArgToken::new(spec.flag(), token))
                    .collect(),
                None => Vec::new(),
            },
        }
    }

    fn resolve_path(&self, rule: &PathRule, value: &str, cli: &CliOverrides) -> Option<PathBuf> {
        let root = self.root_dir(rule.root, cli);
        match (cli.get(rule.cli_override), rule.cli_extension) {
            (Some(name), Some(extension)) => Some(root.join(format!("{}.{}", name, extension))),
            (Some(name), None) => Some(root.join(name)),
            (None, _) if value.is_empty() => None,
            (None, _) => Some(root.join(value)),
        }
    }

    fn root_dir(&self, root: PathRoot, cli: &CliOverrides) -> PathBuf {
        match root {
            PathRoot::Models => self
                .config
                .models_dir
                .join(&cli.profile_name)
                .join(&cli.model_params),
            PathRoot::Loras => self.config.loras_dir.clone(),
            PathRoot::Prompts => self.config.prompts_dir.clone(),
        }
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

use llama_launcher::core::{CliOverrides, LaunchService};
use llama_launcher::domain::model::{value_name, ModelName, ModelParams, PromptFile};
use llama_launcher::infrastructure::ProcessInvoker;
use llama_launcher::utils::{normalize_legacy_flags, setup_tracing, LauncherConfig};

/// Lance llama.cpp avec un profil de configuration
#[derive(Parser, Debug)]
#[command(name = "llama-launcher", version, about)]
struct Cli {
    /// Model name
    #[arg(long = "modelName", value_enum)]
    model_name: Option<ModelName>,

    /// Model parameters
    #[arg(long = "modelParams", value_enum, default_value_t = ModelParams::B7)]
    model_params: ModelParams,

    /// Profile name
    #[arg(long = "profileName", default_value = "llama")]
    profile_name: String,

    /// Reverse prompt (active les reverse prompts du profil)
    #[arg(long = "reversePrompt")]
    reverse_prompt: Option<String>,

    /// Prompt
    #[arg(long = "promptFile", value_enum)]
    prompt_file: Option<PromptFile>,

    /// Perplexity flag
    #[arg(long = "perplexity")]
    perplexity: bool,

    /// Lora adapter name
    #[arg(long = "loraAdapter", default_value = "")]
    lora_adapter: String,
}

const LEGACY_FLAGS: &[&str] = &[
    "modelName",
    "modelParams",
    "profileName",
    "reversePrompt",
    "promptFile",
    "perplexity",
    "loraAdapter",
];

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            profile_name: self.profile_name.clone(),
            model_params: value_name(&self.model_params),
            model_name: self.model_name.as_ref().map(value_name),
            lora_adapter: Some(self.lora_adapter.clone()),
            prompt_file: self.prompt_file.as_ref().map(value_name),
            reverse_prompt: self.reverse_prompt.clone(),
            perplexity: self.perplexity,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialisation du logging
    setup_tracing();

    let cli = Cli::parse_from(normalize_legacy_flags(std::env::args_os(), LEGACY_FLAGS));

    // Chargement de la configuration
    let config = match LauncherConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Impossible de charger la configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let service = LaunchService::new(config, Arc::new(ProcessInvoker::interactive()));

    match service.launch(&cli.overrides()).await {
        Ok(_) => {
            info!("✅ Programme principal terminé");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

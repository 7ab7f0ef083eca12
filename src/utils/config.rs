// utils/config.rs
use crate::infrastructure::error::{configuration_error, AppResult};
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

/// Variante de build de llama.cpp (sous-répertoire de `bin/`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildVariant {
    Debug,
    Release,
}

impl BuildVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildVariant::Debug => "Debug",
            BuildVariant::Release => "Release",
        }
    }
}

impl std::str::FromStr for BuildVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Debug" | "debug" => Ok(BuildVariant::Debug),
            "Release" | "release" => Ok(BuildVariant::Release),
            other => Err(format!("variante de build inconnue: {}", other)),
        }
    }
}

/// Conventions de chemins et binaires utilisés par le lanceur
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    // Répertoires
    pub models_dir: PathBuf,
    pub loras_dir: PathBuf,
    pub profiles_dir: PathBuf,
    pub prompts_dir: PathBuf,
    pub datasets_dir: PathBuf,

    // Binaires llama.cpp
    pub bin_dir: PathBuf,
    pub build_variant: BuildVariant,
    pub main_binary: String,
    pub perplexity_binary: String,

    // Perplexité
    pub perplexity_dataset: String,
    pub perplexity_file: String,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from("./models"),
            loras_dir: PathBuf::from("./loras"),
            profiles_dir: PathBuf::from("./profiles"),
            prompts_dir: PathBuf::from("./prompts"),
            datasets_dir: PathBuf::from("./datasets"),
            bin_dir: PathBuf::from("./bin"),
            build_variant: BuildVariant::Release,
            main_binary: executable_name("main"),
            perplexity_binary: executable_name("perplexity"),
            perplexity_dataset: "wikitext-2-raw".to_string(),
            perplexity_file: "wiki.test.raw".to_string(),
        }
    }
}

impl LauncherConfig {
    /// Charger la configuration depuis les variables d'environnement
    pub fn from_env() -> AppResult<Self> {
        // Charger le fichier .env si présent
        let _ = dotenv().ok();

        let defaults = Self::default();

        Ok(Self {
            models_dir: env_path("LLAMA_MODELS_DIR", defaults.models_dir),
            loras_dir: env_path("LLAMA_LORAS_DIR", defaults.loras_dir),
            profiles_dir: env_path("LLAMA_PROFILES_DIR", defaults.profiles_dir),
            prompts_dir: env_path("LLAMA_PROMPTS_DIR", defaults.prompts_dir),
            datasets_dir: env_path("LLAMA_DATASETS_DIR", defaults.datasets_dir),
            bin_dir: env_path("LLAMA_BIN_DIR", defaults.bin_dir),
            build_variant: match env::var("LLAMA_BUILD_VARIANT") {
                Ok(value) => value.parse().map_err(|e: String| {
                    configuration_error(format!("LLAMA_BUILD_VARIANT: {}", e))
                })?,
                Err(_) => defaults.build_variant,
            },
            main_binary: env::var("LLAMA_MAIN_BINARY").unwrap_or(defaults.main_binary),
            perplexity_binary: env::var("LLAMA_PERPLEXITY_BINARY")
                .unwrap_or(defaults.perplexity_binary),
            perplexity_dataset: env::var("LLAMA_PERPLEXITY_DATASET")
                .unwrap_or(defaults.perplexity_dataset),
            perplexity_file: env::var("LLAMA_PERPLEXITY_FILE").unwrap_or(defaults.perplexity_file),
        })
    }

    /// Répertoire contenant les binaires de la variante de build choisie
    pub fn binary_dir(&self) -> PathBuf {
        self.bin_dir.join(self.build_variant.as_str())
    }

    pub fn main_binary_path(&self) -> PathBuf {
        self.binary_dir().join(&self.main_binary)
    }

    pub fn perplexity_binary_path(&self) -> PathBuf {
        self.binary_dir().join(&self.perplexity_binary)
    }

    /// Jeu de données utilisé en mode perplexité
    pub fn perplexity_dataset_path(&self) -> PathBuf {
        self.datasets_dir
            .join(&self.perplexity_dataset)
            .join(&self.perplexity_file)
    }
}

fn env_path(key: &str, default: PathBuf) -> PathBuf {
    env::var_os(key).map(PathBuf::from).unwrap_or(default)
}

/// Ajoute le suffixe exécutable de la plateforme (`.exe` sous Windows)
pub fn executable_name(stem: &str) -> String {
    format!("{}{}", stem, env::consts::EXE_SUFFIX)
}

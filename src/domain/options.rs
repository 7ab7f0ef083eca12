//! # Registre des options
//!
//! Catalogue ordonné des clés de profil reconnues par le binaire d'inférence.
//! L'ordre du catalogue fixe l'ordre des arguments de la commande générée.
//! Chaque entrée porte sa règle de résolution entre profil, surcharge CLI
//! et conventions de chemins.

/// Surcharge fournie en ligne de commande
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliOverride {
    ModelName,
    LoraAdapter,
    PromptFile,
    ReversePrompt,
}

/// Répertoire conventionnel contre lequel une valeur est résolue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRoot {
    /// `<models>/<profil>/<paramètres>`
    Models,
    Loras,
    Prompts,
}

/// Règle d'un chemin joint à un répertoire, surchargeable en CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathRule {
    pub root: PathRoot,
    pub cli_override: CliOverride,
    /// Extension ajoutée à la seule valeur CLI (jamais à la valeur du profil)
    pub cli_extension: Option<&'static str>,
}

/// Stratégie de résolution d'une option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// `--nom valeur`; une valeur vide donne l'interrupteur seul `--nom`
    Passthrough,
    /// Valeur CLI prioritaire, sinon valeur du profil, jointe à un répertoire
    PathJoined(PathRule),
    /// Valeur du profil découpée, émise uniquement si la surcharge CLI est présente
    GatedSplit { gate: CliOverride, separator: char },
}

/// Entrée du catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub resolution: Resolution,
    pub description: &'static str,
}

impl OptionSpec {
    const fn passthrough(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            resolution: Resolution::Passthrough,
            description,
        }
    }

    pub fn flag(&self) -> String {
        format!("--{}", self.name)
    }
}

pub const OPTION_REGISTRY: &[OptionSpec] = &[
    OptionSpec::passthrough("interactive", "run in interactive mode"),
    OptionSpec::passthrough("interactive-first", "run in interactive mode and wait for input right away"),
    OptionSpec::passthrough("instruct", "run in instruction mode (use with Alpaca models)"),
    OptionSpec {
        name: "reverse-prompt",
        resolution: Resolution::GatedSplit {
            gate: CliOverride::ReversePrompt,
            separator: ',',
        },
        description: "poll user input upon seeing PROMPT (can be specified more than once)",
    },
    OptionSpec::passthrough("color", "colorise output to distinguish prompt and user input from generations"),
    OptionSpec::passthrough("seed", "RNG seed (default: -1, use random seed for <= 0)"),
    OptionSpec::passthrough("threads", "number of threads to use during computation"),
    OptionSpec::passthrough("prompt", "prompt to start generation with"),
    OptionSpec::passthrough("random-prompt", "start with a randomized prompt"),
    OptionSpec::passthrough("in-prefix", "string to prefix user inputs with"),
    OptionSpec {
        name: "file",
        resolution: Resolution::PathJoined(PathRule {
            root: PathRoot::Prompts,
            cli_override: CliOverride::PromptFile,
            cli_extension: Some("txt"),
        }),
        description: "prompt file to start generation",
    },
    OptionSpec::passthrough("n_predict", "number of tokens to predict (-1 = infinity)"),
    OptionSpec::passthrough("top_k", "top-k sampling"),
    OptionSpec::passthrough("top_p", "top-p sampling"),
    OptionSpec::passthrough("repeat_last_n", "last n tokens to consider for penalize"),
    OptionSpec::passthrough("repeat_penalty", "penalize repeat sequence of tokens"),
    OptionSpec::passthrough("ctx_size", "size of the prompt context"),
    OptionSpec::passthrough("ignore-eos", "ignore end of stream token and continue generating"),
    OptionSpec::passthrough("memory_f32", "use f32 instead of f16 for memory key+value"),
    OptionSpec::passthrough("temp", "temperature"),
    OptionSpec::passthrough("n_parts", "number of model parts (-1 = determine from dimensions)"),
    OptionSpec::passthrough("batch_size", "batch size for prompt processing"),
    OptionSpec::passthrough("perplexity", "compute perplexity over the prompt"),
    OptionSpec::passthrough("keep", "number of tokens to keep from the initial prompt"),
    OptionSpec::passthrough("mlock", "force system to keep model in RAM"),
    OptionSpec::passthrough("no-nmap", "do not memory-map model"),
    OptionSpec::passthrough("mtest", "compute maximum memory usage"),
    OptionSpec::passthrough("verbose-prompt", "print prompt before generation"),
    OptionSpec {
        name: "lora",
        resolution: Resolution::PathJoined(PathRule {
            root: PathRoot::Loras,
            cli_override: CliOverride::LoraAdapter,
            cli_extension: None,
        }),
        description: "apply LoRA adapter (implies --no-mmap)",
    },
    OptionSpec {
        name: "model",
        resolution: Resolution::PathJoined(PathRule {
            root: PathRoot::Models,
            cli_override: CliOverride::ModelName,
            cli_extension: Some("bin"),
        }),
        description: "model path",
    },
];

/// Recherche une option du catalogue par son nom
pub fn lookup(name: &str) -> Option<&'static OptionSpec> {
    OPTION_REGISTRY.iter().find(|spec| spec.name == name)
}

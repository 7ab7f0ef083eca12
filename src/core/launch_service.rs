// core/launch_service.rs
use std::sync::Arc;
use tracing::{error, info};

use crate::core::compiler::{CliOverrides, CommandCompiler};
use crate::domain::command::{Command, Mode};
use crate::infrastructure::error::AppResult;
use crate::infrastructure::process::Invoker;
use crate::infrastructure::profile_store::ProfileStore;
use crate::utils::config::LauncherConfig;

/// Chemin mono-commande: profil -> commande -> exécution
pub struct LaunchService {
    store: ProfileStore,
    compiler: CommandCompiler,
    invoker: Arc<dyn Invoker>,
}

impl LaunchService {
    pub fn new(config: LauncherConfig, invoker: Arc<dyn Invoker>) -> Self {
        Self {
            store: ProfileStore::new(config.profiles_dir.clone()),
            compiler: CommandCompiler::new(config),
            invoker,
        }
    }

    /// Charge le profil et compile la commande sans l'exécuter
    pub fn prepare(&self, cli: &CliOverrides) -> AppResult<Command> {
        let profile = self.store.load(&cli.profile_name)?;
        Ok(self.compiler.compile(cli, &profile))
    }

    /// Compile puis exécute la commande; un code de sortie non nul est une erreur
    pub async fn launch(&self, cli: &CliOverrides) -> AppResult<Command> {
        let command = self.prepare(cli)?;
        let invocation = command.to_invocation();

        match command.mode() {
            Mode::Perplexity => info!("📈 Mesure de perplexité avec le profil '{}'", cli.profile_name),
            Mode::Inference => info!("🦙 Inférence avec le profil '{}'", cli.profile_name),
        }

        if let Err(e) = self.invoker.run(&invocation).await {
            error!("❌ Erreur lors de l'exécution du programme principal: {}", invocation);
            return Err(e);
        }

        Ok(command)
    }
}

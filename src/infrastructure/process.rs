use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::domain::command::Invocation;
use crate::infrastructure::error::{AppError, AppResult};

/// Exécute un programme externe jusqu'à sa fin
#[async_trait]
pub trait Invoker: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> AppResult<()>;
}

/// Invoker réel basé sur `tokio::process`, sans interprétation shell
#[derive(Debug, Clone, Default)]
pub struct ProcessInvoker {
    /// Hérite de stdin (mode interactif du binaire d'inférence)
    interactive: bool,
}

impl ProcessInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interactive() -> Self {
        Self { interactive: true }
    }
}

#[async_trait]
impl Invoker for ProcessInvoker {
    async fn run(&self, invocation: &Invocation) -> AppResult<()> {
        let command_line = invocation.to_string();
        info!("▶️  {}", command_line);

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if self.interactive {
            command.stdin(Stdio::inherit());
        } else {
            command.stdin(Stdio::null());
        }

        let status = command.status().await.map_err(|e| {
            error!("❌ Lancement impossible de {}: {}", invocation.program.display(), e);
            AppError::Execution {
                command: command_line.clone(),
                exit_code: None,
                reason: Some(e.to_string()),
            }
        })?;

        if status.success() {
            debug!("✅ Terminé: {}", command_line);
            Ok(())
        } else {
            Err(AppError::Execution {
                command: command_line,
                exit_code: status.code(),
                reason: None,
            })
        }
    }
}

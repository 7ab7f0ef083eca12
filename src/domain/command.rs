use std::fmt;
use std::path::{Path, PathBuf};

/// Mode d'exécution: génération interactive ou mesure de perplexité
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Inference,
    Perplexity,
}

/// Argument typé `--flag [valeur]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgToken {
    pub flag: String,
    pub value: Option<String>,
}

impl ArgToken {
    pub fn new(flag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            flag: flag.into(),
            value: Some(value.into()),
        }
    }

    /// Interrupteur sans valeur (`--interactive`)
    pub fn switch(flag: impl Into<String>) -> Self {
        Self {
            flag: flag.into(),
            value: None,
        }
    }
}

/// Commande d'inférence compilée, immuable une fois construite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    mode: Mode,
    binary: PathBuf,
    tokens: Vec<ArgToken>,
}

impl Command {
    pub fn new(mode: Mode, binary: PathBuf, tokens: Vec<ArgToken>) -> Self {
        Self {
            mode,
            binary,
            tokens,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn tokens(&self) -> &[ArgToken] {
        &self.tokens
    }

    /// Valeurs associées à un flag, dans l'ordre d'émission
    pub fn values_of<'a>(&'a self, flag: &'a str) -> impl Iterator<Item = Option<&'a str>> + 'a {
        self.tokens
            .iter()
            .filter(move |t| t.flag == flag)
            .map(|t| t.value.as_deref())
    }

    /// Aplatit les jetons en arguments discrets pour le processus
    pub fn to_invocation(&self) -> Invocation {
        let args = self
            .tokens
            .iter()
            .flat_map(|t| std::iter::once(t.flag.clone()).chain(t.value.clone()))
            .collect();
        Invocation::new(self.binary.clone(), args)
    }
}

/// Programme externe et ses arguments, passés sans shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: PathBuf, args: Vec<String>) -> Self {
        Self { program, args }
    }
}

impl fmt::Display for Invocation {
    /// Ligne de commande lisible, pour les logs et messages d'erreur
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {:?}", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_flattens_tokens() {
        let command = Command::new(
            Mode::Inference,
            PathBuf::from("bin/Release/main"),
            vec![
                ArgToken::switch("--interactive"),
                ArgToken::new("--seed", "42"),
                ArgToken::new("--prompt", "Hello there"),
            ],
        );

        let invocation = command.to_invocation();
        assert_eq!(
            invocation.args,
            vec!["--interactive", "--seed", "42", "--prompt", "Hello there"]
        );
        assert_eq!(
            invocation.to_string(),
            "bin/Release/main --interactive --seed 42 --prompt \"Hello there\""
        );
    }

    #[test]
    fn test_values_of() {
        let command = Command::new(
            Mode::Inference,
            PathBuf::from("main"),
            vec![
                ArgToken::new("--reverse-prompt", "User:"),
                ArgToken::new("--seed", "1"),
                ArgToken::new("--reverse-prompt", "Bob:"),
            ],
        );
        let values: Vec<_> = command.values_of("--reverse-prompt").collect();
        assert_eq!(values, vec![Some("User:"), Some("Bob:")]);
    }
}

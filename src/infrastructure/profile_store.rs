use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::domain::profile::Profile;
use crate::infrastructure::error::{config_read, AppResult};

/// Accès aux profils `<nom>.ini` d'un répertoire
#[derive(Debug, Clone)]
pub struct ProfileStore {
    root: PathBuf,
}

impl ProfileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_of(&self, profile_name: &str) -> PathBuf {
        self.root.join(format!("{}.ini", profile_name))
    }

    /// Charge un profil complet; toute erreur de lecture ou de syntaxe est fatale
    pub fn load(&self, profile_name: &str) -> AppResult<Profile> {
        let path = self.path_of(profile_name);
        debug!("📄 Lecture du profil {:?}", path);

        let content = fs::read_to_string(&path).map_err(|e| config_read(&path, e.to_string()))?;
        let profile =
            Profile::parse(profile_name, &content).map_err(|e| config_read(&path, e.to_string()))?;

        info!("✅ Profil '{}' chargé ({} options)", profile_name, profile.len());
        for (key, value) in profile.iter() {
            debug!(key, value, "option du profil");
        }

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::error::AppError;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_profile() {
        let temp_dir = tempdir().unwrap();
        let mut file = File::create(temp_dir.path().join("alpaca.ini")).unwrap();
        writeln!(file, "# profil alpaca").unwrap();
        writeln!(file, "model = ggml-alpaca-7b-q4.bin").unwrap();
        writeln!(file, "instruct =").unwrap();

        let store = ProfileStore::new(temp_dir.path());
        let profile = store.load("alpaca").unwrap();

        assert_eq!(profile.name(), "alpaca");
        assert_eq!(profile.get("model"), Some("ggml-alpaca-7b-q4.bin"));
        assert_eq!(profile.get("instruct"), Some(""));
    }

    #[test]
    fn test_missing_profile_is_config_read_error() {
        let temp_dir = tempdir().unwrap();
        let store = ProfileStore::new(temp_dir.path());

        match store.load("absent") {
            Err(AppError::ConfigRead { path, .. }) => {
                assert_eq!(path, temp_dir.path().join("absent.ini"));
            }
            other => panic!("ConfigRead attendu, obtenu {:?}", other),
        }
    }

    #[test]
    fn test_malformed_profile_yields_no_mapping() {
        let temp_dir = tempdir().unwrap();
        fs::write(
            temp_dir.path().join("broken.ini"),
            "seed = 42\ninteractive\nthreads = 4\n",
        )
        .unwrap();

        let store = ProfileStore::new(temp_dir.path());
        let err = store.load("broken").unwrap_err();
        assert!(matches!(err, AppError::ConfigRead { .. }));
        assert!(err.to_string().contains("ligne 2"));
    }
}

//! # Domain Models Module
//!
//! Ce module contient les modèles de données du lanceur et du quantificateur.
//!
//! ## Structure
//! - `profile.rs`: Profil `clé = valeur` chargé depuis un fichier `.ini`
//! - `options.rs`: Registre ordonné des options et de leurs règles de résolution
//! - `command.rs`: Commande compilée et invocation de processus
//! - `model.rs`: Identifiants de modèles et shards f16
//! - `jobs.rs`: Jobs de quantification et leurs résultats
//!
//! ## Conventions
//! - Les types du domaine sont immuables une fois construits
//! - Les chemins restent des `PathBuf` jusqu'à la construction des arguments

pub mod profile;
pub mod options;
pub mod command;
pub mod model;
pub mod jobs;    // Note: un job par shard

// Ré-export des types principaux pour une utilisation facile
pub use profile::Profile;
pub use options::{OptionSpec, Resolution, OPTION_REGISTRY};
pub use command::{ArgToken, Command, Invocation, Mode};
pub use model::{ModelId, ModelShard};
pub use jobs::{JobOutcome, JobStatus, QuantizationJob};

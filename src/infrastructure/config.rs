//! Runtime configuration read from `PAWBOOK_*` environment variables.

use crate::domain::PetSeeding;
use envconfig::Envconfig;
use log::LevelFilter;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Envconfig, Debug, Clone)]
pub struct AppConfig {
    /// Directory holding `appointments.json` and `pets.json`
    #[envconfig(from = "PAWBOOK_DATA_DIR", default = ".pawbook")]
    pub data_dir: PathBuf,

    /// The terminal UI owns stdout, so logs go to a file
    #[envconfig(from = "PAWBOOK_LOG_FILE", default = "pawbook.log")]
    pub log_file: PathBuf,

    #[envconfig(from = "PAWBOOK_LOG_LEVEL", default = "info")]
    pub log_level: LevelFilter,

    /// "reset" or "seed-if-absent"
    #[envconfig(from = "PAWBOOK_PET_SEEDING", default = "reset")]
    pub pet_seeding: PetSeeding,

    #[envconfig(from = "PAWBOOK_EXPORT_FILE", default = "appointments.csv")]
    pub export_file: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::init_from_env()?)
    }

    /// Builds the configuration from an explicit set of variables instead of the process environment.
    pub fn from_vars(vars: HashMap<String, String>) -> anyhow::Result<Self> {
        Ok(Self::init_from_hashmap(&vars)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_vars(HashMap::new()).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".pawbook"));
        assert_eq!(config.log_file, PathBuf::from("pawbook.log"));
        assert_eq!(config.log_level, LevelFilter::Info);
        assert_eq!(config.pet_seeding, PetSeeding::ResetOnStart);
        assert_eq!(config.export_file, "appointments.csv");
    }

    #[test]
    fn test_overrides() {
        let vars = HashMap::from([
            ("PAWBOOK_DATA_DIR".to_string(), "/tmp/pawbook".to_string()),
            ("PAWBOOK_LOG_LEVEL".to_string(), "debug".to_string()),
            ("PAWBOOK_PET_SEEDING".to_string(), "seed-if-absent".to_string()),
        ]);
        let config = AppConfig::from_vars(vars).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/pawbook"));
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.pet_seeding, PetSeeding::SeedIfAbsent);
    }

    #[test]
    fn test_bad_seeding_policy_is_rejected() {
        let vars = HashMap::from([("PAWBOOK_PET_SEEDING".to_string(), "merge".to_string())]);
        assert!(AppConfig::from_vars(vars).is_err());
    }
}

use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use aerodesk_catalog::STORAGE_KEY;

use crate::seed::SeedSource;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub storage: StorageConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    File,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub path: PathBuf,
    pub key: String,
    #[serde(default)]
    pub quota_bytes: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// `none`, `bundled`, or a path to a JSON file.
    pub seed: String,
}

impl CatalogConfig {
    pub fn seed_source(&self) -> SeedSource {
        SeedSource::parse(&self.seed)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Config {
    /// Load layered settings from `config_dir`, picking the run mode from `RUN_MODE`.
    pub fn load(config_dir: &Path) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::load_with_mode(config_dir, &run_mode)
    }

    pub fn load_with_mode(config_dir: &Path, run_mode: &str) -> Result<Self, config::ConfigError> {
        Self::build(config_dir, run_mode, None)
    }

    /// `env` replaces the process environment when given.
    fn build(
        config_dir: &Path,
        run_mode: &str,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let file = |name: &str| config_dir.join(name).to_string_lossy().into_owned();

        let s = config::Config::builder()
            .set_default("storage.backend", "file")?
            .set_default("storage.path", "aerodesk-storage.json")?
            .set_default("storage.key", STORAGE_KEY)?
            .set_default("catalog.seed", "none")?
            .set_default("logging.filter", "aerodesk=info")?
            // Every file layer is optional; the defaults above are enough to run.
            .add_source(config::File::with_name(&file("default")).required(false))
            .add_source(config::File::with_name(&file(run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name(&file("local")).required(false))
            // Eg. `AERODESK_STORAGE__BACKEND=memory`
            .add_source(
                config::Environment::with_prefix("AERODESK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_files() {
        let dir = tempdir().unwrap();
        let config = Config::load_with_mode(dir.path(), "test").unwrap();

        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.key, STORAGE_KEY);
        assert_eq!(config.storage.quota_bytes, None);
        assert_eq!(config.catalog.seed_source(), SeedSource::None);
        assert_eq!(config.logging.filter, "aerodesk=info");
    }

    #[test]
    fn test_run_mode_file_overrides_default() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[storage]\nbackend = \"file\"\npath = \"flights.json\"\nquota_bytes = 5242880\n\n[catalog]\nseed = \"bundled\"\n",
        )
        .unwrap();
        fs::write(dir.path().join("test.toml"), "[storage]\nbackend = \"memory\"\n").unwrap();

        let config = Config::load_with_mode(dir.path(), "test").unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.path, PathBuf::from("flights.json"));
        assert_eq!(config.storage.quota_bytes, Some(5_242_880));
        assert_eq!(config.catalog.seed_source(), SeedSource::Bundled);
    }

    #[test]
    fn test_environment_overrides_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[storage]\nbackend = \"file\"\n").unwrap();
        let env = HashMap::from([
            ("AERODESK_STORAGE__BACKEND".to_string(), "memory".to_string()),
            ("AERODESK_STORAGE__QUOTA_BYTES".to_string(), "1024".to_string()),
            ("AERODESK_CATALOG__SEED".to_string(), "bundled".to_string()),
        ]);

        let config = Config::build(dir.path(), "test", Some(env)).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.quota_bytes, Some(1024));
        assert_eq!(config.catalog.seed_source(), SeedSource::Bundled);
    }
}

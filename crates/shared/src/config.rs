//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Blob storage configuration.
    #[serde(default)]
    pub storage: StorageSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Apply pending migrations when the server starts.
    #[serde(default)]
    pub auto_migrate: bool,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Blob storage configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct StorageSettings {
    /// Name of the table holding blob rows.
    #[serde(default = "default_table_name")]
    pub table_name: String,
    /// Path prefix under which stored blobs are served.
    #[serde(default = "default_download_path_prefix")]
    pub download_path_prefix: String,
}

impl StorageSettings {
    /// Default table name.
    pub const DEFAULT_TABLE_NAME: &'static str = "carrier_wave_files";
    /// Default download path prefix.
    pub const DEFAULT_DOWNLOAD_PATH_PREFIX: &'static str = "/files";
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            table_name: default_table_name(),
            download_path_prefix: default_download_path_prefix(),
        }
    }
}

fn default_table_name() -> String {
    StorageSettings::DEFAULT_TABLE_NAME.to_string()
}

fn default_download_path_prefix() -> String {
    StorageSettings::DEFAULT_DOWNLOAD_PATH_PREFIX.to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        layered_sources()?.try_deserialize()
    }
}

impl StorageSettings {
    /// Loads only the `storage` section from environment and config files.
    ///
    /// Unlike [`AppConfig::load`] this does not need a database URL, so tools
    /// that take their connection elsewhere still see the configured table.
    /// A missing section yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or the section is malformed.
    pub fn load() -> Result<Self, config::ConfigError> {
        match layered_sources()?.get::<Self>("storage") {
            Err(config::ConfigError::NotFound(_)) => Ok(Self::default()),
            result => result,
        }
    }
}

/// `config/default`, `config/{RUN_MODE}`, then `BLOBROW__*` variables.
fn layered_sources() -> Result<config::Config, config::ConfigError> {
    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

    config::Config::builder()
        .add_source(config::File::with_name("config/default").required(false))
        .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
        .add_source(config::Environment::with_prefix("BLOBROW").separator("__"))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_settings_defaults() {
        let settings = StorageSettings::default();
        assert_eq!(settings.table_name, "carrier_wave_files");
        assert_eq!(settings.download_path_prefix, "/files");
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("BLOBROW__SERVER__PORT", Some("9090")),
                ("BLOBROW__DATABASE__URL", Some("sqlite::memory:")),
                ("BLOBROW__STORAGE__TABLE_NAME", Some("custom_table_name")),
            ],
            || {
                let config = AppConfig::load().expect("config should load");
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.server.host, "0.0.0.0");
                assert_eq!(config.database.url, "sqlite::memory:");
                assert_eq!(config.database.max_connections, 10);
                assert!(!config.database.auto_migrate);
                assert_eq!(config.storage.table_name, "custom_table_name");
                assert_eq!(config.storage.download_path_prefix, "/files");
            },
        );
    }

    #[test]
    fn test_load_requires_database_url() {
        temp_env::with_vars(
            [
                ("BLOBROW__SERVER__PORT", Some("9090")),
                ("BLOBROW__DATABASE__URL", None::<&str>),
            ],
            || {
                assert!(AppConfig::load().is_err());
            },
        );
    }

    #[test]
    fn test_storage_settings_load_without_database_url() {
        temp_env::with_vars(
            [
                ("BLOBROW__DATABASE__URL", None::<&str>),
                ("DATABASE_URL", Some("postgres://localhost/blobs")),
                ("RUN_MODE", Some("production")),
                ("BLOBROW__STORAGE__TABLE_NAME", Some("custom_table_name")),
            ],
            || {
                assert!(AppConfig::load().is_err());

                let settings = StorageSettings::load().expect("storage settings should load");
                assert_eq!(settings.table_name, "custom_table_name");
                assert_eq!(settings.download_path_prefix, "/files");
            },
        );
    }

    #[test]
    fn test_storage_settings_load_defaults_when_unset() {
        temp_env::with_vars(
            [
                ("BLOBROW__STORAGE__TABLE_NAME", None::<&str>),
                ("BLOBROW__STORAGE__DOWNLOAD_PATH_PREFIX", None),
                ("BLOBROW__DATABASE__URL", None),
            ],
            || {
                let settings = StorageSettings::load().expect("storage settings should load");
                assert_eq!(settings, StorageSettings::default());
            },
        );
    }
}

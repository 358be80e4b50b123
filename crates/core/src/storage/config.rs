//! Storage configuration types.

use blobrow_shared::StorageSettings;

/// Storage provider configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Prefix joined with the identifier to build fallback download URLs.
    pub download_path_prefix: String,
}

impl StorageConfig {
    /// Default download path prefix.
    pub const DEFAULT_DOWNLOAD_PATH_PREFIX: &'static str =
        StorageSettings::DEFAULT_DOWNLOAD_PATH_PREFIX;

    /// Create a storage config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            download_path_prefix: Self::DEFAULT_DOWNLOAD_PATH_PREFIX.to_string(),
        }
    }

    /// Set the download path prefix.
    ///
    /// The prefix is normalized with [`normalize_path_prefix`].
    #[must_use]
    pub fn with_download_path_prefix(mut self, prefix: impl AsRef<str>) -> Self {
        self.download_path_prefix = normalize_path_prefix(prefix.as_ref());
        self
    }
}

/// Normalize a URL path prefix to `/segment[/segment..]` form.
///
/// A leading `/` is added and trailing ones are removed, so `files/` becomes
/// `/files`. A prefix of only slashes normalizes to the empty string, which
/// mounts downloads at the root.
#[must_use]
pub fn normalize_path_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&StorageSettings> for StorageConfig {
    fn from(settings: &StorageSettings) -> Self {
        Self::new().with_download_path_prefix(&settings.download_path_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_storage_config_defaults() {
        let config = StorageConfig::new();
        assert_eq!(config.download_path_prefix, "/files");
    }

    #[test]
    fn test_storage_config_from_settings() {
        let settings = StorageSettings {
            table_name: "custom_table_name".to_string(),
            download_path_prefix: "/downloads".to_string(),
        };
        let config = StorageConfig::from(&settings);
        assert_eq!(config.download_path_prefix, "/downloads");
    }

    #[rstest]
    #[case("/files", "/files")]
    #[case("files", "/files")]
    #[case("files/", "/files")]
    #[case("/media/blobs/", "/media/blobs")]
    #[case(" /files ", "/files")]
    #[case("/", "")]
    #[case("", "")]
    fn test_normalize_path_prefix(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_path_prefix(raw), expected);
    }

    #[test]
    fn test_settings_prefix_without_slash_is_normalized() {
        let settings = StorageSettings {
            download_path_prefix: "files".to_string(),
            ..StorageSettings::default()
        };
        let config = StorageConfig::from(&settings);
        assert_eq!(config.download_path_prefix, "/files");
    }
}

//! Application configuration.
//!
//! Settings are read from a `stay.toml` file and then overridden by
//! environment variables. Every section is optional:
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [site]
//! contact_phone = "+54 9 11 1234-5678"
//! utc_offset = "-03:00"
//!
//! [admin]
//! token = "change-me"
//!
//! [repository]
//! type = "local"
//! seed_file = "seed/bookings.json"
//! ```

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::db::RepositoryType;

/// Configuration file name searched for by [`AppConfig::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "stay.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub site: SiteSettings,
    pub admin: AdminSettings,
    pub repository: RepositorySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Public-facing site settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Owner's WhatsApp number. Booking requests fail while this is unset.
    pub contact_phone: Option<String>,
    /// Offset in which stored timestamps are read as calendar days. Defaults to UTC.
    #[serde(with = "offset_format")]
    pub utc_offset: FixedOffset,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            contact_phone: None,
            utc_offset: utc(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSettings {
    /// Bearer token for `/v1/admin`. Admin routes refuse every request while unset.
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositorySettings {
    #[serde(rename = "type")]
    pub repo_type: String,
    /// JSON array of booking records loaded at startup.
    pub seed_file: Option<PathBuf>,
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: "local".to_string(),
            seed_file: None,
        }
    }
}

impl RepositorySettings {
    pub fn repository_type(&self) -> Result<RepositoryType, ConfigError> {
        self.repo_type.parse().map_err(|message| ConfigError::Invalid {
            key: "repository.type".to_string(),
            message,
        })
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Search standard locations for `stay.toml`.
    ///
    /// Returns `Ok(None)` when no file exists in any of them.
    pub fn from_default_location() -> Result<Option<Self>, ConfigError> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Loading configuration from {}", path.display());
                return Self::from_file(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// Full startup configuration.
    ///
    /// Reads the file named by `STAY_CONFIG`, or the default location, or
    /// falls back to defaults; then applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("STAY_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::from_default_location()?.unwrap_or_default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `HOST`, `PORT`, `ADMIN_TOKEN`, `CONTACT_PHONE`,
    /// `SITE_UTC_OFFSET` and `SEED_FILE` overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::Invalid {
                key: "PORT".to_string(),
                message: format!("{:?} is not a port number", port),
            })?;
        }
        if let Some(token) = lookup("ADMIN_TOKEN") {
            self.admin.token = non_empty(token);
        }
        if let Some(phone) = lookup("CONTACT_PHONE") {
            self.site.contact_phone = non_empty(phone);
        }
        if let Some(offset) = lookup("SITE_UTC_OFFSET") {
            self.site.utc_offset =
                offset_format::parse(&offset).map_err(|message| ConfigError::Invalid {
                    key: "SITE_UTC_OFFSET".to_string(),
                    message,
                })?;
        }
        if let Some(seed) = lookup("SEED_FILE") {
            self.repository.seed_file = non_empty(seed).map(PathBuf::from);
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn utc() -> FixedOffset {
    chrono::Offset::fix(&chrono::Utc)
}

/// `"+HH:MM"` / `"-HH:MM"` offsets, `"Z"` or `"UTC"` for zero.
mod offset_format {
    use chrono::FixedOffset;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(value: &str) -> Result<FixedOffset, String> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("z") || value.eq_ignore_ascii_case("utc") {
            return Ok(super::utc());
        }
        value
            .parse::<FixedOffset>()
            .map_err(|e| format!("{:?} is not a UTC offset: {}", value, e))
    }

    pub fn serialize<S: Serializer>(offset: &FixedOffset, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(offset)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<FixedOffset, D::Error> {
        let value = String::deserialize(deserializer)?;
        parse(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.site.utc_offset.local_minus_utc(), 0);
        assert_eq!(config.admin.token, None);
        assert_eq!(
            config.repository.repository_type().unwrap(),
            RepositoryType::Local
        );
    }

    #[test]
    fn test_parse_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[site]
contact_phone = "5491112345678"
utc_offset = "+01:00"

[admin]
token = "secret"
"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.site.contact_phone.as_deref(), Some("5491112345678"));
        assert_eq!(config.site.utc_offset.local_minus_utc(), 3600);
        assert_eq!(config.admin.token.as_deref(), Some("secret"));
        assert_eq!(config.server, ServerSettings::default());
    }

    #[test]
    fn test_bad_offset_rejected() {
        let err = toml::from_str::<AppConfig>("[site]\nutc_offset = \"tomorrow\"").unwrap_err();
        assert!(err.to_string().contains("tomorrow"));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            AppConfig::from_file("/nonexistent/stay.toml"),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(lookup(&[
                ("PORT", "3000"),
                ("ADMIN_TOKEN", "t0k3n"),
                ("SITE_UTC_OFFSET", "-03:00"),
                ("SEED_FILE", "seed.json"),
                ("CONTACT_PHONE", "   "),
            ]))
            .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.admin.token.as_deref(), Some("t0k3n"));
        assert_eq!(config.site.utc_offset.local_minus_utc(), -3 * 3600);
        assert_eq!(config.repository.seed_file, Some(PathBuf::from("seed.json")));
        assert_eq!(config.site.contact_phone, None);

        let err = config.apply_overrides(lookup(&[("PORT", "eighty")]));
        assert!(matches!(err, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_unknown_repository_type() {
        let settings = RepositorySettings {
            repo_type: "firestore".to_string(),
            seed_file: None,
        };
        assert!(settings.repository_type().is_err());
    }
}

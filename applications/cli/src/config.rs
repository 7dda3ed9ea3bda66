/// CLI configuration
use anyhow::Context;
use condo_core::{User, UserRole};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_remote")]
    pub remote: RemoteSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_session")]
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteSettings {
    /// Collection endpoint of the document store
    #[serde(default = "default_store_url")]
    pub store_url: String,

    /// Public-address lookup for suggestion metadata
    #[serde(default = "default_lookup_enabled")]
    pub lookup_enabled: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Directory for the document-id and session-mirror files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionSettings {
    #[serde(default = "default_role")]
    pub role: UserRole,

    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default)]
    pub condo_key: String,

    /// Required for residents, ignored for the administrator
    #[serde(default)]
    pub house_id: Option<String>,
}

impl CliConfig {
    /// Load configuration from `condo.toml` and `CONDO_`-prefixed
    /// environment variables.
    ///
    /// Sections are separated with a double underscore so snake_case
    /// field names stay intact, e.g. `CONDO_REMOTE__STORE_URL` lands at
    /// `remote.store_url`.
    pub fn load() -> anyhow::Result<Self> {
        let mut settings = config::Config::builder();

        let config_path = PathBuf::from("condo.toml");
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("CONDO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        settings
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }

    /// The session user described by the configuration.
    pub fn user(&self) -> User {
        User {
            role: self.session.role,
            username: self.session.username.clone(),
            condo_key: self.session.condo_key.clone(),
            house_id: self.session.house_id.clone(),
        }
    }
}

// Default values
fn default_remote() -> RemoteSettings {
    RemoteSettings {
        store_url: default_store_url(),
        lookup_enabled: default_lookup_enabled(),
    }
}

fn default_store_url() -> String {
    "https://jsonblob.com/api/jsonBlob".to_string()
}

fn default_lookup_enabled() -> bool {
    true
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        data_dir: default_data_dir(),
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_session() -> SessionSettings {
    SessionSettings {
        role: default_role(),
        username: default_username(),
        condo_key: String::new(),
        house_id: None,
    }
}

fn default_role() -> UserRole {
    UserRole::Admin
}

fn default_username() -> String {
    "Admin".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            remote: default_remote(),
            storage: default_storage(),
            session: default_session(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test so the process environment is not mutated concurrently.
    #[test]
    fn env_overrides_reach_snake_case_fields() {
        let config = CliConfig::load().unwrap();
        assert_eq!(config.remote.store_url, default_store_url());
        assert_eq!(config.session.role, UserRole::Admin);

        std::env::set_var("CONDO_REMOTE__STORE_URL", "http://override.example");
        std::env::set_var("CONDO_SESSION__CONDO_KEY", "Admin1");

        let config = CliConfig::load().unwrap();
        assert_eq!(config.remote.store_url, "http://override.example");
        assert_eq!(config.session.condo_key, "Admin1");

        std::env::remove_var("CONDO_REMOTE__STORE_URL");
        std::env::remove_var("CONDO_SESSION__CONDO_KEY");
    }
}

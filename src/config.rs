use crate::process::{InspectorBackend, ServiceIdentity};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub inspector: InspectorBackend,
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub display_name: String,
    pub process_name: String,
    pub executable: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inspector: InspectorBackend::default(),
            service: ServiceConfig::default(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            display_name: "Redis".to_string(),
            process_name: default_process_name().to_string(),
            executable: default_process_name().to_string(),
        }
    }
}

#[cfg(windows)]
fn default_process_name() -> &'static str {
    "redis-server.exe"
}

#[cfg(not(windows))]
fn default_process_name() -> &'static str {
    "redis-server"
}

impl Config {
    pub fn load() -> Self {
        let paths = [
            dirs::config_dir().map(|p| p.join("redisctl/config.toml")),
            dirs::home_dir().map(|p| p.join(".redisctl.toml")),
            Some(PathBuf::from("redisctl.toml")),
        ];

        for path in paths.into_iter().flatten() {
            if path.exists() {
                match Self::from_path(&path) {
                    Ok(config) => return config,
                    Err(err) => {
                        tracing::warn!(path = %path.display(), %err, "ignoring unreadable config");
                    }
                }
            }
        }

        Config::default()
    }

    pub fn from_path(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// The immutable service identity this process will manage.
    pub fn identity(&self) -> ServiceIdentity {
        ServiceIdentity {
            display_name: self.service.display_name.clone(),
            process_name: self.service.process_name.clone(),
            executable: PathBuf::from(&self.service.executable),
        }
    }
}

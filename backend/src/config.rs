//! # Application Configuration
//!
//! Settings are layered, later layers winning:
//!
//! 1. built-in defaults
//! 2. `capsule_config.yaml` in the data directory, if present
//! 3. `CAPSULE_*` environment variables
//! 4. command-line flags
//!
//! The data directory itself can only come from a flag, the environment or
//! the default, since the YAML file lives inside it.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::storage::CsvConnection;

pub const CONFIG_FILE: &str = "capsule_config.yaml";

pub const ENV_DATA_DIR: &str = "CAPSULE_DATA_DIR";
pub const ENV_BIND_ADDR: &str = "CAPSULE_BIND_ADDR";
pub const ENV_FRONTEND_ORIGIN: &str = "CAPSULE_FRONTEND_ORIGIN";
pub const ENV_BIRTH_DATE: &str = "CAPSULE_BIRTH_DATE";
pub const ENV_DIST_DIR: &str = "CAPSULE_DIST_DIR";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_FRONTEND_ORIGIN: &str = "http://localhost:8080";
const DEFAULT_BIRTH_DATE: &str = "2024-02-20";
const DEFAULT_DIST_DIR: &str = "frontend/dist";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
    /// Origin allowed by CORS
    pub frontend_origin: String,
    /// Birth date the countdown is synthesized from
    pub birth_date: NaiveDate,
    /// Static frontend bundle served for non-API paths
    pub dist_dir: PathBuf,
}

/// Values from the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub bind_addr: Option<SocketAddr>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    bind_addr: Option<String>,
    frontend_origin: Option<String>,
    birth_date: Option<String>,
    dist_dir: Option<PathBuf>,
}

fn parse_bind_addr(value: &str) -> Result<SocketAddr> {
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid bind address '{}'", value))
}

fn parse_birth_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid birth date '{}': expected YYYY-MM-DD", value))
}

impl AppConfig {
    pub fn defaults(data_dir: PathBuf) -> Result<Self> {
        Ok(Self {
            data_dir,
            bind_addr: parse_bind_addr(DEFAULT_BIND_ADDR)?,
            frontend_origin: DEFAULT_FRONTEND_ORIGIN.to_string(),
            birth_date: parse_birth_date(DEFAULT_BIRTH_DATE)?,
            dist_dir: PathBuf::from(DEFAULT_DIST_DIR),
        })
    }

    /// Resolve the configuration from the process environment
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve the configuration with `env` standing in for the process
    /// environment
    pub fn resolve<F>(overrides: &ConfigOverrides, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match overrides.data_dir.clone() {
            Some(dir) => dir,
            None => match env(ENV_DATA_DIR).filter(|value| !value.trim().is_empty()) {
                Some(dir) => PathBuf::from(dir),
                None => CsvConnection::default_data_directory()?,
            },
        };

        let mut config = Self::defaults(data_dir)?;
        config.apply_file()?;
        config.apply_env(&env)?;

        if let Some(bind_addr) = overrides.bind_addr {
            config.bind_addr = bind_addr;
        }

        Ok(config)
    }

    pub fn config_file_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    fn apply_file(&mut self) -> Result<()> {
        let path = self.config_file_path();
        if !path.exists() {
            return Ok(());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file: FileConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());

        if let Some(bind_addr) = file.bind_addr {
            self.bind_addr = parse_bind_addr(&bind_addr)?;
        }
        if let Some(origin) = file.frontend_origin {
            self.frontend_origin = origin;
        }
        if let Some(birth_date) = file.birth_date {
            self.birth_date = parse_birth_date(&birth_date)?;
        }
        if let Some(dist_dir) = file.dist_dir {
            self.dist_dir = self.relative_to_data_dir(&dist_dir);
        }
        Ok(())
    }

    fn apply_env<F>(&mut self, env: &F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        if let Some(bind_addr) = lookup(ENV_BIND_ADDR) {
            self.bind_addr = parse_bind_addr(&bind_addr)?;
        }
        if let Some(origin) = lookup(ENV_FRONTEND_ORIGIN) {
            self.frontend_origin = origin;
        }
        if let Some(birth_date) = lookup(ENV_BIRTH_DATE) {
            self.birth_date = parse_birth_date(&birth_date)?;
        }
        if let Some(dist_dir) = lookup(ENV_DIST_DIR) {
            self.dist_dir = PathBuf::from(dist_dir);
        }
        Ok(())
    }

    /// Relative paths in the YAML file are relative to the data directory
    fn relative_to_data_dir(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn overrides_for(dir: &TempDir) -> ConfigOverrides {
        ConfigOverrides {
            data_dir: Some(dir.path().to_path_buf()),
            bind_addr: None,
        }
    }

    #[test]
    fn test_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::resolve(&overrides_for(&dir), env_from(&[])).unwrap();

        assert_eq!(config.data_dir, dir.path());
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(config.frontend_origin, "http://localhost:8080");
        assert_eq!(config.birth_date, NaiveDate::from_ymd_opt(2024, 2, 20).unwrap());
        assert_eq!(config.dist_dir, PathBuf::from("frontend/dist"));
    }

    #[test]
    fn test_yaml_then_env_then_flags() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "bind_addr: 127.0.0.1:4000\nbirth_date: 2023-07-04\nfrontend_origin: http://capsule.local\ndist_dir: web\n",
        )
        .unwrap();

        let config = AppConfig::resolve(&overrides_for(&dir), env_from(&[])).unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:4000");
        assert_eq!(config.birth_date, NaiveDate::from_ymd_opt(2023, 7, 4).unwrap());
        assert_eq!(config.frontend_origin, "http://capsule.local");
        assert_eq!(config.dist_dir, dir.path().join("web"));

        let env = env_from(&[(ENV_BIND_ADDR, "127.0.0.1:5000"), (ENV_BIRTH_DATE, "2022-01-02")]);
        let config = AppConfig::resolve(&overrides_for(&dir), env).unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:5000");
        assert_eq!(config.birth_date, NaiveDate::from_ymd_opt(2022, 1, 2).unwrap());
        assert_eq!(config.frontend_origin, "http://capsule.local");

        let mut overrides = overrides_for(&dir);
        overrides.bind_addr = Some("127.0.0.1:6000".parse().unwrap());
        let env = env_from(&[(ENV_BIND_ADDR, "127.0.0.1:5000")]);
        let config = AppConfig::resolve(&overrides, env).unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:6000");
    }

    #[test]
    fn test_data_dir_from_env() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_string_lossy().to_string();
        let env = env_from(&[(ENV_DATA_DIR, path.as_str())]);

        let config = AppConfig::resolve(&ConfigOverrides::default(), env).unwrap();
        assert_eq!(config.data_dir, dir.path());
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let dir = TempDir::new().unwrap();
        let env = env_from(&[(ENV_BIRTH_DATE, "20/02/2024")]);
        assert!(AppConfig::resolve(&overrides_for(&dir), env).is_err());

        fs::write(dir.path().join(CONFIG_FILE), "colour: blue\n").unwrap();
        assert!(AppConfig::resolve(&overrides_for(&dir), env_from(&[])).is_err());
    }
}

use async_once_cell::OnceCell;
use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde_derive::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use super::{util, CLI_NAME};

lazy_static! {
    pub static ref SETTINGS: Arc<OnceCell<Settings>> = Arc::new(OnceCell::new());
}

static DEFAULT_DB_FILE: &str = "catalog.db";
static DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Settings global store is uninitialized")]
    Uninitialized,

    #[error("Could not locate program directories")]
    NoProjectDirs,

    #[error("Could not convert path to string: {0:?}")]
    Path(PathBuf),

    #[error("Could not create the data directory: {0}")]
    DataDir(#[from] io::Error),

    #[error("Invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub db: String,

    #[serde(default)]
    pub pool: Pool,
}

/// Connection pool tuning. Timeouts are in seconds, an idle timeout or max
/// lifetime of 0 disables it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_timeout")]
    pub connect_timeout: u64,
    #[serde(default = "default_timeout")]
    pub acquire_timeout: u64,
    #[serde(default = "default_timeout")]
    pub idle_timeout: u64,
    #[serde(default = "default_timeout")]
    pub max_lifetime: u64,
    #[serde(default = "default_true")]
    pub sqlx_logging: bool,
}

fn default_max_connections() -> u32 {
    100
}

fn default_min_connections() -> u32 {
    5
}

fn default_timeout() -> u64 {
    8
}

fn default_true() -> bool {
    true
}

impl Default for Pool {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout: default_timeout(),
            acquire_timeout: default_timeout(),
            idle_timeout: default_timeout(),
            max_lifetime: default_timeout(),
            sqlx_logging: default_true(),
        }
    }
}

impl Pool {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout)
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        Some(self.idle_timeout)
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
    }

    pub fn max_lifetime(&self) -> Option<Duration> {
        Some(self.max_lifetime)
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "github", CLI_NAME)
}

fn get_data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn load(path: Option<PathBuf>) -> Result<Settings, SettingsError> {
    let path = match path {
        Some(path) => path,
        None => project_dirs()
            .ok_or(SettingsError::NoProjectDirs)?
            .config_dir()
            .join(DEFAULT_CONFIG_FILE),
    };
    tracing::info! {?path, "Loading config file"};
    let content = fs::read_to_string(&path).unwrap_or_else(|_| "".to_string());
    let mut set = parse(content.as_str())?;
    set = generate_default(set)?;
    tracing::trace! {settings = ?set, "Loaded settings"};
    Ok(set)
}

pub fn parse(content: &str) -> Result<Settings, SettingsError> {
    Ok(toml::from_str(content)?)
}

pub fn generate_default(mut set: Settings) -> Result<Settings, SettingsError> {
    if set.db == String::default() {
        let dir = get_data_dir();
        util::mkdirp(&dir)?;
        set.db = format!(
            "sqlite://{}?mode=rwc",
            util::path_to_str(&dir.join(DEFAULT_DB_FILE))?
        );
    }
    Ok(set)
}

pub fn to_string(set: &Settings) -> Result<String, SettingsError> {
    Ok(toml::to_string(set)?)
}

pub fn get_settings() -> Result<&'static Settings, SettingsError> {
    SETTINGS.get().ok_or(SettingsError::Uninitialized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_yields_defaults() {
        let set = parse("").unwrap();
        assert_eq!(set.db, "");
        assert_eq!(set.pool, Pool::default());
        assert_eq!(set.pool.max_connections, 100);
        assert_eq!(set.pool.idle_timeout(), Some(Duration::from_secs(8)));
    }

    #[test]
    fn partial_pool_keeps_other_defaults() {
        let set = parse(
            r#"
db = "sqlite::memory:"

[pool]
max_connections = 1
sqlx_logging = false
"#,
        )
        .unwrap();
        assert_eq!(set.db, "sqlite::memory:");
        assert_eq!(set.pool.max_connections, 1);
        assert_eq!(set.pool.min_connections, 5);
        assert!(!set.pool.sqlx_logging);
        assert_eq!(set.pool.acquire_timeout(), Duration::from_secs(8));
    }

    #[test]
    fn invalid_file_is_rejected() {
        assert!(matches!(
            parse("pool = 3"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn load_reads_given_file_and_keeps_db() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "db = \"postgres://localhost/catalog\"").unwrap();
        let set = load(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(set.db, "postgres://localhost/catalog");
        assert_eq!(set.pool, Pool::default());
    }

    #[test]
    fn zero_disables_idle_timeout() {
        let set = Settings {
            db: "sqlite://catalog.db?mode=rwc".to_string(),
            pool: Pool {
                idle_timeout: 0,
                ..Pool::default()
            },
        };
        let parsed = parse(&to_string(&set).unwrap()).unwrap();
        assert_eq!(parsed, set);
        assert_eq!(parsed.pool.idle_timeout(), None);
        assert_eq!(parsed.pool.max_lifetime(), Some(Duration::from_secs(8)));
    }
}

use crate::core::seed::DEFAULT_ROSTER_SIZE;
use crate::ui::messages::warning;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: String,
    /// Workers generated on first start, when the database holds no roster.
    pub seed_roster_size: usize,
    /// An absence longer than this is flagged in `roster` and `dashboard`.
    pub alert_threshold_minutes: u64,
    pub shift_start: String,
    pub shift_duration_hours: u32,
    /// Team used by `register` when `--team` is omitted.
    pub default_team: String,
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            seed_roster_size: DEFAULT_ROSTER_SIZE,
            alert_threshold_minutes: 15,
            shift_start: "06:00".to_string(),
            shift_duration_hours: 8,
            default_team: "A".to_string(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("shiftguard")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".shiftguard")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("shiftguard.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("shiftguard.sqlite")
    }

    pub fn alert_threshold_secs(&self) -> u64 {
        self.alert_threshold_minutes * 60
    }

    /// Load configuration from file, or return defaults if not found.
    /// An unreadable or malformed file also yields defaults, with a warning.
    pub fn load() -> Self {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Config::default();
        }

        let parsed = fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| {
                serde_yaml::from_str::<Config>(&content).map_err(|e| e.to_string())
            });

        match parsed {
            Ok(cfg) => cfg,
            Err(e) => {
                warning(format!(
                    "Ignoring configuration file {}: {e}",
                    path.display()
                ));
                Config::default()
            }
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> io::Result<PathBuf> {
        let dir = Self::config_dir();

        // A custom path is used as given, the same way `--db` is for every
        // other command.
        let db_path = custom_db
            .map(PathBuf::from)
            .unwrap_or_else(Self::database_file);

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&config).map_err(io::Error::other)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        Ok(db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_conf(name: &str, content: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("{name}_shiftguard.conf"));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn missing_fields_take_defaults() {
        let path = temp_conf("cfg_partial", "database: /tmp/x.sqlite\nalert_threshold_minutes: 5\n");
        let cfg = Config::load_from(&path);

        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.alert_threshold_secs(), 300);
        assert_eq!(cfg.seed_roster_size, 66);
        assert_eq!(cfg.default_team, "A");
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let path = temp_conf("cfg_broken", "seed_roster_size: [not a number\n");
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn missing_file_is_default() {
        let path = env::temp_dir().join("cfg_does_not_exist_shiftguard.conf");
        fs::remove_file(&path).ok();
        assert_eq!(Config::load_from(&path), Config::default());
    }
}

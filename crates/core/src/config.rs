//! Runtime settings
//!
//! Resolution order for each path: explicit value, then environment
//! variable, then a default under `~/.jdict`.

use std::path::{Path, PathBuf};

pub const DB_ENV: &str = "JDICT_DB";
pub const LOG_DIR_ENV: &str = "JDICT_LOG_DIR";
pub const DEFAULT_HOME_DIR: &str = ".jdict";
pub const DEFAULT_DB_FILE: &str = "jdict.db";
pub const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
}

impl Settings {
    pub fn resolve(db_override: Option<PathBuf>) -> Self {
        Self::resolve_with(db_override, |name| std::env::var(name).ok())
    }

    pub fn resolve_with(
        db_override: Option<PathBuf>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let base = base_dir();
        let db_path = db_override
            .or_else(|| env(DB_ENV).map(PathBuf::from))
            .unwrap_or_else(|| base.join(DEFAULT_DB_FILE));
        let log_dir = env(LOG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| base.join(DEFAULT_LOG_DIR));

        Self { db_path, log_dir }
    }
}

fn base_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(DEFAULT_HOME_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let settings =
            Settings::resolve_with(Some(PathBuf::from("/tmp/a.db")), |name| match name {
                DB_ENV => Some("/tmp/env.db".to_string()),
                LOG_DIR_ENV => Some("/var/log/jdict".to_string()),
                _ => None,
            });
        assert_eq!(settings.db_path, PathBuf::from("/tmp/a.db"));
        assert_eq!(settings.log_dir, PathBuf::from("/var/log/jdict"));
    }

    #[test]
    fn test_env_overrides_default() {
        let settings = Settings::resolve_with(None, |name| match name {
            DB_ENV => Some("/data/jdict.db".to_string()),
            _ => None,
        });
        assert_eq!(settings.db_path, PathBuf::from("/data/jdict.db"));
        assert!(settings.log_dir.ends_with(Path::new(".jdict/logs")));
    }

    #[test]
    fn test_defaults_live_under_home() {
        let settings = Settings::resolve_with(None, |_| None);
        assert!(settings.db_path.ends_with(Path::new(".jdict/jdict.db")));
    }
}

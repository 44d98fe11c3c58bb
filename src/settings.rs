//! Handles the application settings via a config file and environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

/// Contains the application settings.
///
/// The application settings are read from an optional TOML config file. Settings specified in
/// the config file can be overwritten by environment variables. To do so, set an environment
/// variable with the prefix `SCHOOL_PORTAL_` followed by the field names you want to set.
/// Fields are separated by an underscore `_`.
/// ```text
/// SCHOOL_PORTAL_<field>_<field-of-field>...
/// ```
/// # Example
///
/// set the `backend.url` field:
/// ```text
/// SCHOOL_PORTAL_BACKEND_URL=https://portal.example.org
/// ```
/// # Note
/// Fields set via environment variables do not affect the underlying config file.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub backend: Backend,
    pub storage: Storage,
    #[serde(default)]
    pub output: Output,
}

impl Settings {
    /// Creates a new Settings instance from the provided TOML file.
    ///
    /// A missing file is not an error, every setting has a default.
    pub fn load(file_name: &Path) -> Result<Self, ConfigError> {
        let mut cfg = Config::new();

        cfg.set_default("backend.url", "http://localhost:5000")?;
        cfg.set_default("storage.path", ".school-portal/storage.json")?;

        cfg.merge(File::from(file_name).required(false))?;

        let env = Environment::with_prefix("SCHOOL_PORTAL").separator("_");

        cfg.merge(env)?;

        cfg.try_into()
    }
}

/// The portal backend
#[derive(Debug, Clone, Deserialize)]
pub struct Backend {
    /// Base URL of the REST API, also the entry page unauthenticated users are sent to
    pub url: Url,
}

/// Client-local storage of the session
#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
    pub path: PathBuf,
}

/// Where rendered page regions go
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Output {
    /// One `<region>.html` file per region, stdout if unset
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;
    use std::fs;

    #[test]
    #[serial]
    fn defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();

        let settings = Settings::load(&dir.path().join("missing.toml")).unwrap();

        assert_eq!(settings.backend.url.as_str(), "http://localhost:5000/");
        assert_eq!(
            settings.storage.path,
            PathBuf::from(".school-portal/storage.json")
        );
        assert_eq!(settings.output.dir, None);
    }

    #[test]
    #[serial]
    fn file_and_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[backend]\nurl = \"http://portal.lycee.test\"\n\n[output]\ndir = \"out\"\n",
        )
        .unwrap();

        std::env::set_var("SCHOOL_PORTAL_STORAGE_PATH", "/tmp/portal.json");
        let settings = Settings::load(&path);
        std::env::remove_var("SCHOOL_PORTAL_STORAGE_PATH");
        let settings = settings.unwrap();

        assert_eq!(settings.backend.url.as_str(), "http://portal.lycee.test/");
        assert_eq!(settings.storage.path, PathBuf::from("/tmp/portal.json"));
        assert_eq!(settings.output.dir, Some(PathBuf::from("out")));
    }
}

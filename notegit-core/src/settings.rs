//! YAML settings file.
//!
//! # Storage layout
//!
//! ```text
//! ~/.notegit/
//!   config.yaml   (created by `notegit config init`)
//! ```
//!
//! # API pattern
//!
//! Every function has two forms:
//! - `fn_at(path: &Path)` — explicit file path; used in tests with `TempDir`
//! - `fn()` — derives the path from `dirs::home_dir()`, delegates to `_at`
//!
//! Tests must NEVER call the no-arg wrappers; always use `_at`.
//!
//! Settings are re-read from disk at the start of every orchestration run and
//! never cached in memory across runs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

fn default_true() -> bool {
    true
}

fn default_interval() -> u64 {
    5
}

fn default_git_path() -> PathBuf {
    PathBuf::from("git")
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:41184".to_string()
}

/// Everything the export-then-sync pipeline reads from persistent settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Remote repository URL, e.g. `git@github.com:user/repo.git`.
    /// With no remote configured the local repository is init-ed in place and
    /// pushes are skipped.
    #[serde(default)]
    pub repo_url: Option<String>,

    /// Path to the git executable.
    #[serde(default = "default_git_path")]
    pub git_path: PathBuf,

    /// Branch to commit to and push.
    #[serde(default)]
    pub branch: String,

    /// Absolute path of the local export directory.
    #[serde(default)]
    pub local_path: PathBuf,

    /// When false, run outcomes are written to the log only.
    #[serde(default = "default_true")]
    pub enable_notifications: bool,

    /// Minutes between scheduled runs.
    #[serde(default = "default_interval")]
    pub sync_interval_minutes: u64,

    /// Base URL of the host note store's data API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// API token for the host note store.
    #[serde(default)]
    pub api_token: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            repo_url: None,
            git_path: default_git_path(),
            branch: String::new(),
            local_path: PathBuf::new(),
            enable_notifications: true,
            sync_interval_minutes: default_interval(),
            api_base_url: default_api_base_url(),
            api_token: String::new(),
        }
    }
}

impl Settings {
    /// Pre-run guard: both the branch and the local export directory must be
    /// configured before any filesystem or subprocess work happens.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.branch.trim().is_empty() {
            return Err(CoreError::Incomplete("branch is not set"));
        }
        if self.local_path.as_os_str().is_empty() {
            return Err(CoreError::Incomplete("local_path is not set"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// `<home>/.notegit/config.yaml` — pure, no I/O.
pub fn settings_path_at(home: &Path) -> PathBuf {
    home.join(".notegit").join("config.yaml")
}

/// `settings_path_at` convenience wrapper.
pub fn settings_path() -> Result<PathBuf, CoreError> {
    Ok(settings_path_at(&home()?))
}

fn home() -> Result<PathBuf, CoreError> {
    dirs::home_dir().ok_or(CoreError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Load / save / init
// ---------------------------------------------------------------------------

/// Load settings from an explicit file path.
///
/// Returns `CoreError::SettingsNotFound` if absent,
/// `CoreError::Parse` (with path + line context) if malformed YAML.
pub fn load_at(path: &Path) -> Result<Settings, CoreError> {
    if !path.exists() {
        return Err(CoreError::SettingsNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(|e| CoreError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// `load_at` convenience wrapper for `~/.notegit/config.yaml`.
pub fn load() -> Result<Settings, CoreError> {
    load_at(&settings_path()?)
}

/// Save settings to an explicit file path, creating parent directories.
pub fn save_at(path: &Path, settings: &Settings) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let yaml = serde_yaml::to_string(settings)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// `save_at` convenience wrapper.
pub fn save(settings: &Settings) -> Result<(), CoreError> {
    save_at(&settings_path()?, settings)
}

/// Write a default settings file if none exists yet. Returns the path and
/// whether a new file was created.
pub fn init_at(path: &Path) -> Result<bool, CoreError> {
    if path.exists() {
        return Ok(false);
    }
    save_at(path, &Settings::default())?;
    Ok(true)
}

/// `init_at` convenience wrapper.
pub fn init() -> Result<(PathBuf, bool), CoreError> {
    let path = settings_path()?;
    let created = init_at(&path)?;
    Ok((path, created))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_path(dir: &TempDir) -> PathBuf {
        settings_path_at(dir.path())
    }

    #[test]
    fn save_then_load_roundtrip() {
        let home = TempDir::new().expect("home");
        let path = config_path(&home);
        let settings = Settings {
            repo_url: Some("git@github.com:user/notes.git".to_string()),
            branch: "main".to_string(),
            local_path: PathBuf::from("/tmp/notes-export"),
            ..Settings::default()
        };
        save_at(&path, &settings).expect("save");
        let loaded = load_at(&path).expect("load");
        assert_eq!(loaded, settings);
    }

    #[test]
    fn load_missing_file_is_settings_not_found() {
        let home = TempDir::new().expect("home");
        let err = load_at(&config_path(&home)).expect_err("should fail");
        assert!(matches!(err, CoreError::SettingsNotFound { .. }));
    }

    #[test]
    fn load_malformed_yaml_reports_path() {
        let home = TempDir::new().expect("home");
        let path = config_path(&home);
        std::fs::create_dir_all(path.parent().unwrap()).expect("mkdir");
        std::fs::write(&path, "branch: [unclosed").expect("write");
        let err = load_at(&path).expect_err("should fail");
        match err {
            CoreError::Parse { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let home = TempDir::new().expect("home");
        let path = config_path(&home);
        std::fs::create_dir_all(path.parent().unwrap()).expect("mkdir");
        std::fs::write(&path, "branch: main\nlocal_path: /tmp/x\n").expect("write");
        let loaded = load_at(&path).expect("load");
        assert!(loaded.enable_notifications);
        assert_eq!(loaded.sync_interval_minutes, 5);
        assert_eq!(loaded.git_path, PathBuf::from("git"));
        assert_eq!(loaded.api_base_url, "http://127.0.0.1:41184");
        assert!(loaded.repo_url.is_none());
    }

    #[test]
    fn init_creates_once() {
        let home = TempDir::new().expect("home");
        let path = config_path(&home);
        assert!(init_at(&path).expect("first init"));
        assert!(!init_at(&path).expect("second init"));
    }

    #[test]
    fn validate_rejects_missing_branch_and_path() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_err());

        settings.branch = "main".to_string();
        assert!(settings.validate().is_err());

        settings.local_path = PathBuf::from("/tmp/notes");
        assert!(settings.validate().is_ok());
    }
}

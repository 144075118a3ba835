//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.cpkg/config.toml` - User-wide defaults
//! - Project: `.cpkg/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. An explicit
//! `--config` file replaces both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default host component of package roots.
pub const DEFAULT_HOST: &str = "github.com";

/// Default organization component of package roots.
pub const DEFAULT_ORGANIZATION: &str = "jurgen-kluft";

/// Default separator between root components.
pub const DEFAULT_SEPARATOR: &str = "\\";

/// Generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Package root naming convention
    pub naming: NamingConfig,

    /// Which generator steps run
    pub generate: GenerateConfig,
}

/// Naming convention for package roots: `<host><sep><organization><sep><name>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Repository host (e.g., github.com)
    pub host: Option<String>,

    /// Organization or user owning the repositories
    pub organization: Option<String>,

    /// Separator placed between components
    pub separator: Option<String>,
}

impl NamingConfig {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn organization(&self) -> &str {
        self.organization.as_deref().unwrap_or(DEFAULT_ORGANIZATION)
    }

    pub fn separator(&self) -> &str {
        self.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR)
    }

    /// Root path of the package with the given name.
    pub fn package_root(&self, name: &str) -> String {
        let sep = self.separator();
        format!("{}{sep}{}{sep}{}", self.host(), self.organization(), name)
    }
}

/// Auxiliary generator steps. All default to enabled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    pub gitignore: Option<bool>,
    pub embedded: Option<bool>,
    pub clang_format: Option<bool>,
}

impl GenerateConfig {
    pub fn gitignore(&self) -> bool {
        self.gitignore.unwrap_or(true)
    }

    pub fn embedded(&self) -> bool {
        self.embedded.unwrap_or(true)
    }

    pub fn clang_format(&self) -> bool {
        self.clang_format.unwrap_or(true)
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.naming.host.is_some() {
            self.naming.host = other.naming.host;
        }
        if other.naming.organization.is_some() {
            self.naming.organization = other.naming.organization;
        }
        if other.naming.separator.is_some() {
            self.naming.separator = other.naming.separator;
        }

        if other.generate.gitignore.is_some() {
            self.generate.gitignore = other.generate.gitignore;
        }
        if other.generate.embedded.is_some() {
            self.generate.embedded = other.generate.embedded;
        }
        if other.generate.clang_format.is_some() {
            self.generate.clang_format = other.generate.clang_format;
        }
    }

    /// Resolve the configuration for a run started in `cwd`.
    ///
    /// An explicit path must exist and parse; the implicit locations fall
    /// back to defaults.
    pub fn discover(cwd: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let project_path = project_config_path(cwd);
        let config = match global_config_path() {
            Some(global_path) => load_config(&global_path, &project_path),
            None => Self::load_or_default(&project_path),
        };
        Ok(config)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.cpkg/config.toml)
/// 2. Global config (~/.cpkg/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global config directory (~/.cpkg).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".cpkg"))
}

/// Get the global config path (~/.cpkg/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.cpkg/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".cpkg").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.naming.host(), "github.com");
        assert_eq!(config.naming.organization(), "jurgen-kluft");
        assert_eq!(config.naming.separator(), "\\");
        assert!(config.generate.gitignore());
        assert!(config.generate.embedded());
        assert!(config.generate.clang_format());
    }

    #[test]
    fn test_package_root() {
        let naming = NamingConfig::default();
        assert_eq!(naming.package_root("crtti"), "github.com\\jurgen-kluft\\crtti");

        let naming = NamingConfig {
            host: Some("gitlab.com".to_string()),
            organization: None,
            separator: Some("/".to_string()),
        };
        assert_eq!(naming.package_root("crttr"), "gitlab.com/jurgen-kluft/crttr");
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[naming]
organization = "someone"
separator = "/"

[generate]
clang_format = false
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.naming.organization(), "someone");
        assert_eq!(config.naming.host(), "github.com");
        assert_eq!(config.naming.package_root("crtti"), "github.com/someone/crtti");
        assert!(!config.generate.clang_format());
        assert!(config.generate.gitignore());
    }

    #[test]
    fn test_config_load_rejects_garbage() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[naming\nhost = ").unwrap();

        assert!(Config::load(&config_path).is_err());
        assert!(Config::load_or_default(&config_path).naming.host.is_none());
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.naming.host = Some("github.com".to_string());
        base.naming.organization = Some("base-org".to_string());
        base.generate.embedded = Some(false);

        let mut override_cfg = Config::default();
        override_cfg.naming.organization = Some("project-org".to_string());

        base.merge(override_cfg);

        assert_eq!(base.naming.organization(), "project-org");
        assert_eq!(base.naming.host(), "github.com");
        assert!(!base.generate.embedded()); // Not overridden
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            r#"
[naming]
host = "git.example.org"
organization = "global-org"
"#,
        )
        .unwrap();
        std::fs::write(
            &project_path,
            r#"
[naming]
organization = "project-org"
"#,
        )
        .unwrap();

        let config = load_config(&global_path, &project_path);
        assert_eq!(config.naming.host(), "git.example.org");
        assert_eq!(config.naming.organization(), "project-org");
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing.toml");
        assert!(Config::discover(tmp.path(), Some(&missing)).is_err());

        let explicit = tmp.path().join("explicit.toml");
        std::fs::write(&explicit, "[generate]\ngitignore = false\n").unwrap();
        let config = Config::discover(tmp.path(), Some(&explicit)).unwrap();
        assert!(!config.generate.gitignore());
    }

    #[test]
    fn test_discover_project_config() {
        let tmp = TempDir::new().unwrap();
        let project_path = project_config_path(tmp.path());
        std::fs::create_dir_all(project_path.parent().unwrap()).unwrap();
        std::fs::write(&project_path, "[naming]\norganization = \"local\"\n").unwrap();

        let config = Config::discover(tmp.path(), None).unwrap();
        assert_eq!(config.naming.organization(), "local");
    }
}

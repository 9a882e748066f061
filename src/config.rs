//! `apidoc.toml`: which documentation pages document which components.
//!
//! ```toml
//! manifest = "custom-elements.json"
//! docs_dir = "docs/components"
//! root_class = "LitElement"
//!
//! [docs]
//! "button.md" = ["src/button/filled-button.ts", "src/button/outlined-*.ts"]
//! ```
//!
//! `manifest` and `docs_dir` resolve against the directory holding the config
//! file. Entrypoints are module paths as they appear in the manifest.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "apidoc.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("configuration error: {0}")]
    Validation(String),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default = "default_manifest")]
    manifest: PathBuf,
    #[serde(default = "default_docs_dir")]
    docs_dir: PathBuf,
    #[serde(default = "default_root_class")]
    root_class: String,
    #[serde(default = "default_max_depth")]
    max_depth: usize,
    #[serde(default)]
    docs: BTreeMap<String, Vec<String>>,
}

fn default_manifest() -> PathBuf {
    PathBuf::from("custom-elements.json")
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("docs/components")
}

fn default_root_class() -> String {
    "LitElement".to_owned()
}

fn default_max_depth() -> usize {
    32
}

/// Resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute path of the custom elements manifest.
    pub manifest: PathBuf,
    /// Absolute path of the documentation directory.
    pub docs_dir: PathBuf,
    pub root_class: String,
    pub max_depth: usize,
    /// Documentation file name → entrypoint paths or glob patterns, sorted by
    /// file name.
    pub docs: BTreeMap<String, Vec<String>>,
}

impl Config {
    /// Load from `explicit`, or search for `apidoc.toml` in the current
    /// directory and its parents.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) if path.is_file() => path.to_path_buf(),
            Some(path) => return Err(ConfigError::NotFound(path.to_path_buf())),
            None => Self::discover()
                .ok_or_else(|| ConfigError::NotFound(PathBuf::from(CONFIG_FILENAME)))?,
        };
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let root = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Self::from_toml(&content, &root)
    }

    /// Parse and validate configuration text rooted at `root`.
    pub fn from_toml(content: &str, root: &Path) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        let config = Self {
            manifest: root.join(raw.manifest),
            docs_dir: root.join(raw.docs_dir),
            root_class: raw.root_class,
            max_depth: raw.max_depth,
            docs: raw.docs,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.root_class.trim().is_empty() {
            return Err(ConfigError::Validation("root_class cannot be empty".into()));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::Validation("max_depth must be at least 1".into()));
        }
        if self.docs.is_empty() {
            return Err(ConfigError::Validation(
                "[docs] must map at least one documentation file".into(),
            ));
        }
        for (file, entrypoints) in &self.docs {
            if entrypoints.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "docs.\"{file}\" lists no entrypoints"
                )));
            }
            for pattern in entrypoints {
                glob::Pattern::new(pattern).map_err(|e| {
                    ConfigError::Validation(format!(
                        "docs.\"{file}\": invalid entrypoint pattern `{pattern}`: {e}"
                    ))
                })?;
            }
        }
        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let config = Config::from_toml(
            "[docs]\n\"switch.md\" = [\"src/switch/switch.ts\"]\n",
            Path::new("/pkg"),
        )
        .unwrap();
        assert_eq!(config.manifest, PathBuf::from("/pkg/custom-elements.json"));
        assert_eq!(config.docs_dir, PathBuf::from("/pkg/docs/components"));
        assert_eq!(config.root_class, "LitElement");
        assert_eq!(config.max_depth, 32);
        assert_eq!(config.docs["switch.md"], ["src/switch/switch.ts"]);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let toml = r#"
            manifest = "build/manifest.json"
            docs_dir = "site/api"
            root_class = "ReactiveElement"
            max_depth = 4

            [docs]
            "button.md" = ["src/button/*.ts"]
            "chips.md" = ["src/chips/chip.ts", "src/chips/chip-set.ts"]
        "#;
        let config = Config::from_toml(toml, Path::new("pkg")).unwrap();
        assert_eq!(config.manifest, PathBuf::from("pkg/build/manifest.json"));
        assert_eq!(config.docs_dir, PathBuf::from("pkg/site/api"));
        assert_eq!(config.root_class, "ReactiveElement");
        assert_eq!(config.max_depth, 4);
        let files: Vec<&str> = config.docs.keys().map(String::as_str).collect();
        assert_eq!(files, ["button.md", "chips.md"]);
    }

    #[test]
    fn empty_docs_is_rejected() {
        let err = Config::from_toml("root_class = \"LitElement\"\n", Path::new(".")).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn empty_entrypoint_list_is_rejected() {
        let err = Config::from_toml("[docs]\n\"a.md\" = []\n", Path::new(".")).unwrap_err();
        assert!(err.to_string().contains("lists no entrypoints"));
    }

    #[test]
    fn zero_depth_is_rejected() {
        let toml = "max_depth = 0\n[docs]\n\"a.md\" = [\"a.ts\"]\n";
        let err = Config::from_toml(toml, Path::new(".")).unwrap_err();
        assert!(err.to_string().contains("max_depth"));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let toml = "[docs]\n\"a.md\" = [\"src/[a.ts\"]\n";
        let err = Config::from_toml(toml, Path::new(".")).unwrap_err();
        assert!(err.to_string().contains("invalid entrypoint pattern"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml = "manifets = \"x.json\"\n[docs]\n\"a.md\" = [\"a.ts\"]\n";
        let err = Config::from_toml(toml, Path::new(".")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/apidoc.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}

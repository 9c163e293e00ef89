//! Site configuration module.
//!
//! Handles loading, validating, and merging `site.toml`. The file is optional:
//! stock defaults describe the conventional project layout, and a user file
//! only needs the keys it wants to change.
//!
//! ## Config File Location
//!
//! `site.toml` lives in the project root, next to the directories it names:
//!
//! ```text
//! my-site/
//! ├── site.toml         # optional
//! ├── template.html     # page template with {{ Title }} and {{ Content }}
//! ├── content/          # markdown sources
//! │   ├── index.md
//! │   └── blog/
//! │       └── first.md
//! └── static/           # copied verbatim into the output root
//!     └── index.css
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [paths]
//! content = "content"
//! static = "static"
//! template = "template.html"
//! output = "public"
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Relative paths are resolved against the project root. Unknown keys are
//! rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in the project root.
pub const CONFIG_FILE: &str = "site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Input and output locations.
    pub paths: PathsConfig,
    /// Parallel page generation settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let paths = [
            ("paths.content", &self.paths.content),
            ("paths.static", &self.paths.static_dir),
            ("paths.template", &self.paths.template),
            ("paths.output", &self.paths.output),
        ];
        for (key, value) in paths {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if self.paths.output == self.paths.content || self.paths.output == self.paths.static_dir {
            return Err(ConfigError::Validation(
                "paths.output must differ from paths.content and paths.static".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Where the site's inputs live and where output goes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Markdown source tree.
    pub content: String,
    /// Static assets, copied verbatim to the output root.
    #[serde(rename = "static")]
    pub static_dir: String,
    /// HTML template containing `{{ Title }}` and `{{ Content }}`.
    pub template: String,
    /// Generated site root. Wiped and recreated on every build.
    pub output: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content: "content".to_string(),
            static_dir: "static".to_string(),
            template: "template.html".to_string(),
            output: "public".to_string(),
        }
    }
}

impl PathsConfig {
    /// Resolve every path against the project root.
    pub fn resolve(&self, root: &Path) -> SitePaths {
        SitePaths {
            content: root.join(&self.content),
            static_dir: root.join(&self.static_dir),
            template: root.join(&self.template),
            output: root.join(&self.output),
        }
    }
}

/// Concrete filesystem locations for one build.
#[derive(Debug, Clone, PartialEq)]
pub struct SitePaths {
    pub content: PathBuf,
    pub static_dir: PathBuf,
    pub template: PathBuf,
    pub output: PathBuf,
}

/// Paths given on the command line, taking precedence over `site.toml`.
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    pub content: Option<PathBuf>,
    pub static_dir: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl SitePaths {
    /// Replace paths with any overrides, resolved against the project root
    /// like config values are.
    pub fn with_overrides(self, root: &Path, overrides: &PathOverrides) -> SitePaths {
        let pick = |over: &Option<PathBuf>, resolved: PathBuf| {
            over.as_ref().map_or(resolved, |p| root.join(p))
        };
        SitePaths {
            content: pick(&overrides.content, self.content),
            static_dir: pick(&overrides.static_dir, self.static_dir),
            template: pick(&overrides.template, self.template),
            output: pick(&overrides.output, self.output),
        }
    }

    /// Reject an output directory that is, or contains, an input directory,
    /// since every build deletes the output directory first.
    ///
    /// Paths are compared after normalization, so `./content`, `content` and
    /// the absolute form all name the same directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let output = normalize_path(&self.output);
        let inputs = [("content", &self.content), ("static", &self.static_dir)];
        for (name, input) in inputs {
            if normalize_path(input).starts_with(&output) {
                return Err(ConfigError::Validation(format!(
                    "output directory {} would delete the {name} directory {}",
                    self.output.display(),
                    input.display()
                )));
            }
        }
        Ok(())
    }
}

/// Absolute form of `path` with `.` and `..` removed and symlinks resolved
/// as far as the path exists on disk.
fn normalize_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let lexical = lexical_normalize(&absolute);
    for existing in lexical.ancestors() {
        if let Ok(canonical) = existing.canonicalize() {
            let rest = lexical.strip_prefix(existing).unwrap_or(Path::new(""));
            return canonical.join(rest);
        }
    }
    lexical
}

fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of pages converted at once.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
pub fn load_raw_config(config_path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(config_path)?;
    Ok(toml::from_str(&content)?)
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `site.toml` from the project root, falling back to stock defaults
/// when the file does not exist.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    let overlay = if config_path.exists() {
        Some(load_raw_config(&config_path)?)
    } else {
        None
    };
    resolve_config(stock_defaults_value(), overlay)
}

/// Load an explicitly named config file. Unlike [`load_config`], a missing
/// file is an error.
pub fn load_config_file(config_path: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = load_raw_config(config_path)?;
    resolve_config(stock_defaults_value(), Some(overlay))
}

/// Returns a fully-commented stock `site.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# mdpress Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Relative paths are resolved against the project root (--root, default:
# the current directory), also when this file is passed with --config.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Paths
# ---------------------------------------------------------------------------
[paths]
# Markdown sources. Every .md file becomes an .html page at the same
# relative location under the output directory.
content = "content"

# Static assets (CSS, images, fonts), copied verbatim to the output root.
static = "static"

# Page template. {{ Title }} is replaced with the document's first "# " heading,
# {{ Content }} with the converted HTML.
template = "template.html"

# Generated site. Deleted and recreated on every build.
output = "public"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum pages converted in parallel.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

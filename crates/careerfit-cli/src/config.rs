//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level careerfit configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerfitConfig {
    /// Catalog file to use instead of the built-in catalog.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// Output directory for saved reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Format for saved reports: json, markdown, all.
    #[serde(default = "default_report_format")]
    pub report_format: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./careerfit-results")
}
fn default_report_format() -> String {
    "json".to_string()
}

impl Default for CareerfitConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            output_dir: default_output_dir(),
            report_format: default_report_format(),
        }
    }
}

impl CareerfitConfig {
    /// Apply `CAREERFIT_*` overrides, then expand `${VAR}` in path values.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(catalog) = var("CAREERFIT_CATALOG").filter(|v| !v.is_empty()) {
            self.catalog = Some(PathBuf::from(catalog));
        }
        if let Some(dir) = var("CAREERFIT_OUTPUT_DIR").filter(|v| !v.is_empty()) {
            self.output_dir = PathBuf::from(dir);
        }

        let expand = |p: &Path| PathBuf::from(resolve_env_vars(&p.to_string_lossy(), &var));
        self.catalog = self.catalog.as_deref().map(&expand);
        self.output_dir = expand(&self.output_dir);
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied through verbatim, so a value that itself
/// contains `${...}` is not expanded again.
fn resolve_env_vars(s: &str, var: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        result.push_str(&var(&rest[start + 2..start + end]).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `careerfit.toml` in the current directory
/// 2. `~/.config/careerfit/config.toml`
///
/// Environment variable overrides: `CAREERFIT_CATALOG`, `CAREERFIT_OUTPUT_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<CareerfitConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("careerfit.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<CareerfitConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => CareerfitConfig::default(),
    };

    config.apply_overrides(|name| std::env::var(name).ok());
    tracing::debug!(?config, "loaded configuration");

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("careerfit"))
}

//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result, ResultExt};
use std::path::{Path, PathBuf};

/// File names searched for in each directory, in order
const CANDIDATES: [&str; 3] = [".dpd.toml", "dpd.toml", ".config/dpd.toml"];

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed settings
    pub schema: ConfigSchema,
    /// File the settings came from, if any
    pub path: Option<PathBuf>,
    /// Directory relative settings are resolved against
    pub base_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from an explicit path, a discovered file, or defaults
    ///
    /// Without an explicit path, `start` and then each of its ancestors is
    /// searched; the nearest directory holding a config file wins.
    pub fn load(path: Option<&Path>, start: &Path) -> Result<Self> {
        let found = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some((
                p.parent().map(Path::to_path_buf).unwrap_or_default(),
                p.to_path_buf(),
            )),
            None => find_config_upwards(start),
        };

        let Some((base_dir, config_path)) = found else {
            tracing::debug!(start = %start.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        };

        let schema = load_config_file(&config_path)?;
        tracing::debug!(path = %config_path.display(), "configuration loaded");

        Ok(Self {
            schema,
            path: Some(config_path),
            base_dir: Some(base_dir),
        })
    }

    /// Configured project root, resolved against `cwd` and the config location
    pub fn project_root(&self, cwd: &Path) -> Option<PathBuf> {
        let root = self.schema.project.root.as_ref()?;
        let base = match &self.base_dir {
            Some(dir) => cwd.join(dir),
            None => cwd.to_path_buf(),
        };
        Some(base.join(root))
    }
}

/// Find configuration file in standard locations under `dir`
fn find_config_file(dir: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|c| dir.join(c))
        .find(|p| p.is_file())
}

/// Search `start` and its ancestors, returning the directory and the file found
fn find_config_upwards(start: &Path) -> Option<(PathBuf, PathBuf)> {
    start
        .ancestors()
        .find_map(|dir| find_config_file(dir).map(|file| (dir.to_path_buf(), file)))
}

/// Load, parse and validate a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::new(
            ErrorCode::ConfigError,
            format!("Failed to read config file {}: {}", path.display(), e),
        )
        .with_source(e)
    })?;

    let schema = toml::from_str::<ConfigSchema>(&content)
        .map_err(Error::from)
        .context(format!("While loading {}", path.display()))?;

    schema
        .validate()
        .context(format!("While loading {}", path.display()))?;

    Ok(schema)
}

//! Locating the configuration file.
//!
//! Candidates are checked in order: explicit path, next to the executable, the hidden directory
//! in the user's home, then the current working directory. When none exists, the default
//! document is written into the home directory location and used.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, bail, Context, Result};
use tracing::{debug, info, instrument};

use crate::utils::dir::application_default_path;

use super::{document::ConfigDocument, Configuration};

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Directories that may hold a configuration file.
#[derive(Debug, Clone, Default)]
pub struct ConfigLocations {
    pub explicit: Option<PathBuf>,
    pub executable_dir: Option<PathBuf>,
    /// Hidden per-user directory. Also where the default document is written.
    pub user_dir: Option<PathBuf>,
    pub working_dir: Option<PathBuf>,
}

impl ConfigLocations {
    /// Locations for the running process. Missing directories are skipped, not fatal.
    pub fn from_environment(explicit: Option<PathBuf>) -> Self {
        Self {
            explicit,
            executable_dir: env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf)),
            user_dir: application_default_path().ok(),
            working_dir: env::current_dir().ok(),
        }
    }

    /// Implicit candidate files in priority order.
    pub fn candidates(&self) -> Vec<PathBuf> {
        [&self.executable_dir, &self.user_dir, &self.working_dir]
            .into_iter()
            .flatten()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .collect()
    }

    pub fn fallback(&self) -> Option<PathBuf> {
        self.user_dir.as_ref().map(|dir| dir.join(CONFIG_FILE_NAME))
    }
}

/// Configuration together with where it came from.
#[derive(Debug)]
pub struct ResolvedConfig {
    pub path: PathBuf,
    pub configuration: Configuration,
    /// The file didn't exist and was created from defaults.
    pub created: bool,
}

#[instrument]
pub fn resolve(locations: &ConfigLocations) -> Result<ResolvedConfig> {
    if let Some(explicit) = &locations.explicit {
        if !explicit.is_file() {
            bail!("Configuration file {} doesn't exist", explicit.display());
        }
        return load(explicit).map(|configuration| ResolvedConfig {
            path: explicit.clone(),
            configuration,
            created: false,
        });
    }

    for candidate in locations.candidates() {
        if candidate.is_file() {
            debug!("Using configuration {}", candidate.display());
            return load(&candidate).map(|configuration| ResolvedConfig {
                path: candidate,
                configuration,
                created: false,
            });
        }
        debug!("No configuration at {}", candidate.display());
    }

    let fallback = locations
        .fallback()
        .ok_or_else(|| anyhow!("No configuration found and no home directory to create one in"))?;
    let configuration = write_default(&fallback)?;
    info!("Created default configuration at {}", fallback.display());
    Ok(ResolvedConfig {
        path: fallback,
        configuration,
        created: true,
    })
}

pub fn load(path: &Path) -> Result<Configuration> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration {}", path.display()))?;
    let document = ConfigDocument::from_toml(&content)
        .with_context(|| format!("Failed to parse configuration {}", path.display()))?;
    Configuration::try_from(document)
        .with_context(|| format!("Invalid configuration {}", path.display()))
}

fn write_default(path: &Path) -> Result<Configuration> {
    let document = ConfigDocument::default();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, document.to_toml()?)
        .with_context(|| format!("Failed to write default configuration {}", path.display()))?;
    Configuration::try_from(document)
}

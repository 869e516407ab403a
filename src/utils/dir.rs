use std::{io, path::PathBuf};

use anyhow::{anyhow, Result};

const APPLICATION_DIR_NAME: &str = ".workbar";

/// Hidden per-user directory holding the fallback configuration and the logs.
pub fn application_default_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(APPLICATION_DIR_NAME))
        .ok_or_else(|| anyhow!("Couldn't determine the home directory of the current user"))
}

pub fn create_application_default_path() -> Result<PathBuf> {
    let path = application_default_path()?;

    match std::fs::create_dir_all(&path) {
        Ok(_) => Ok(path),
        Err(v) if v.kind() == io::ErrorKind::AlreadyExists => Ok(path),
        Err(v) => Err(v.into()),
    }
}

//! Cross-Platform Path Utilities
//!
//! Functions for resolving application directories across platforms.
//! Handles ~/.reqforge/ and its handler spec directory.

use std::path::PathBuf;

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the ReqForge directory (~/.reqforge/)
pub fn reqforge_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".reqforge"))
}

/// Get the config file path (~/.reqforge/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(reqforge_dir()?.join("config.json"))
}

/// Get the synthesized handler spec directory (~/.reqforge/handlers/)
pub fn handlers_dir() -> AppResult<PathBuf> {
    Ok(reqforge_dir()?.join("handlers"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &PathBuf) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the ReqForge directory, creating if it doesn't exist
pub fn ensure_reqforge_dir() -> AppResult<PathBuf> {
    let path = reqforge_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}

/// Get the handlers directory, creating if it doesn't exist
pub fn ensure_handlers_dir() -> AppResult<PathBuf> {
    let path = handlers_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}

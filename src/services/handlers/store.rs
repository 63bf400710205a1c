//! Handler Spec Store
//!
//! Persists synthesized handler specs as JSON files so a process restart
//! rediscovers them via catalog scan. One file per handler, named after
//! the domain (`<name>.json`).

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use reqforge_core::{HandlerDescriptor, HandlerSpec};

use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::ensure_dir;

/// File-backed store for synthesized handler specs.
#[derive(Debug, Clone)]
pub struct HandlerStore {
    dir: PathBuf,
}

impl HandlerStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Scan the store directory for persisted specs, metadata only.
    ///
    /// Broken entries are logged and skipped; a broken file never aborts
    /// the scan. Results are sorted by name so scan order is deterministic.
    pub fn scan(&self) -> Vec<HandlerDescriptor> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(), // no store directory yet
        };

        let mut descriptors: Vec<HandlerDescriptor> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| match self.load(&path) {
                Ok(spec) => Some(HandlerDescriptor {
                    name: spec.name.clone(),
                    loaded: false,
                    priority_score: spec.priority,
                    custom_created: spec.custom_created,
                    creation_cost: spec.creation_cost,
                    created_at: spec.created_at.clone(),
                    source_path: Some(path),
                }),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping broken handler spec");
                    None
                }
            })
            .collect();

        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(count = descriptors.len(), dir = %self.dir.display(), "scanned handler store");
        descriptors
    }

    /// Load and validate a spec file.
    pub fn load(&self, path: &Path) -> AppResult<HandlerSpec> {
        let content = fs::read_to_string(path)?;
        let spec: HandlerSpec = serde_json::from_str(&content)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Persist a spec, returning the file path it was written to.
    pub fn save(&self, spec: &HandlerSpec) -> AppResult<PathBuf> {
        spec.validate()?;
        ensure_dir(&self.dir)?;
        let path = self.dir.join(format!("{}.json", spec.name));
        let content = serde_json::to_string_pretty(spec)?;
        fs::write(&path, content)
            .map_err(|e| AppError::store(format!("write {}: {}", path.display(), e)))?;
        debug!(handler = %spec.name, path = %path.display(), "persisted handler spec");
        Ok(path)
    }
}

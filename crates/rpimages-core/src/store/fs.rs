//! Filesystem-backed pack store.

use super::traits::{AssetCopy, PackStore};
use crate::allocator::OverrideTable;
use crate::collector::VariantModel;
use crate::config::{PackConfig, PathsConfig};
use crate::metadata::{atomic_read_json, atomic_write_json};
use crate::summary::SummaryTable;
use crate::{PackError, Result};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Reads and writes the resource pack layout described by a [`PackConfig`].
#[derive(Debug, Clone)]
pub struct FsPackStore {
    config: PackConfig,
}

impl FsPackStore {
    pub fn new(config: PackConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PackConfig {
        &self.config
    }

    /// Destination of the texture for `key` in `group`.
    pub fn texture_path(&self, group: &str, key: &str) -> PathBuf {
        self.config
            .textures_dir()
            .join(group)
            .join(format!("{}.{}", key, PathsConfig::TEXTURE_EXTENSION))
    }

    /// Destination of the generated model for `key` in `group`.
    pub fn payload_path(&self, group: &str, key: &str) -> PathBuf {
        self.config
            .models_dir()
            .join(group)
            .join(format!("{}.{}", key, PathsConfig::MODEL_EXTENSION))
    }
}

impl PackStore for FsPackStore {
    fn load_table(&self, identity: &str) -> Result<Option<OverrideTable>> {
        let path = self.config.item_model_path(identity);
        let corrupt = |message: String| PackError::CorruptTable {
            identity: identity.to_string(),
            path: path.clone(),
            message,
        };

        let value: Option<Value> = atomic_read_json(&path).map_err(|e| match e {
            PackError::Json { message, .. } => corrupt(message),
            other => other,
        })?;

        match value {
            Some(value) => {
                let table =
                    OverrideTable::from_value(value, &self.config.namespace).map_err(corrupt)?;
                debug!(
                    "Loaded {} ({} slots)",
                    path.display(),
                    table.len()
                );
                Ok(Some(table))
            }
            None => Ok(None),
        }
    }

    fn save_table(&self, identity: &str, table: &OverrideTable) -> Result<()> {
        let path = self.config.item_model_path(identity);
        atomic_write_json(&path, &table.to_value(), self.config.keep_backup)?;
        info!(" - Updated item model: {}", path.display());
        Ok(())
    }

    fn copy_asset(&self, group: &str, key: &str) -> Result<AssetCopy> {
        let source = self.config.source_texture_path(group, key);
        if !source.is_file() {
            warn!("Texture not found: {}", source.display());
            return Ok(AssetCopy::Missing);
        }

        let dest = self.texture_path(group, key);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| PackError::io_with_path(e, parent))?;
        }
        fs::copy(&source, &dest).map_err(|e| PackError::io_with_path(e, &dest))?;
        info!(" - Copied texture: {}", dest.display());
        Ok(AssetCopy::Copied)
    }

    fn write_payload(&self, group: &str, key: &str, model: &VariantModel) -> Result<()> {
        let path = self.payload_path(group, key);
        atomic_write_json(&path, model, false)?;
        info!(" - Saved model: {}", path.display());
        Ok(())
    }

    fn write_summary(&self, summary: &SummaryTable) -> Result<()> {
        atomic_write_json(&self.config.summary_path, summary, false)?;
        info!("Key info saved to: {}", self.config.summary_path.display());
        Ok(())
    }
}

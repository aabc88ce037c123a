//! Centralized configuration for the pack builder.
//!
//! Static layout constants live on unit structs; the per-run settings live on
//! [`PackConfig`].

use crate::{PackError, Result};
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Resource pack directory layout.
pub struct PathsConfig;

impl PathsConfig {
    pub const ASSETS_DIR_NAME: &'static str = "assets";
    pub const TEXTURES_DIR_NAME: &'static str = "textures";
    pub const MODELS_DIR_NAME: &'static str = "models";
    pub const ITEM_DIR_NAME: &'static str = "item";
    /// Sub-path under `textures/` and `models/` holding generated variants.
    pub const CATEGORY: &'static str = "custom/items";
    pub const META_FILE_NAME: &'static str = "meta.json";
    pub const META_STEM: &'static str = "meta";
    pub const TEXTURE_EXTENSION: &'static str = "png";
    pub const MODEL_EXTENSION: &'static str = "json";
}

/// Fixed model payload values.
pub struct ModelConfig;

impl ModelConfig {
    pub const VANILLA_NAMESPACE: &'static str = "minecraft";
    /// Parent of every generated variant model.
    pub const GENERATED_PARENT: &'static str = "minecraft:item/generated";
    /// Parent of a freshly created item override table.
    pub const ITEM_PARENT: &'static str = "item/generated";
    pub const TEXTURE_LAYER: &'static str = "layer0";
    pub const PREDICATE_KEY: &'static str = "custom_model_data";
}

/// Defaults matching the layout the pack scripts were written against.
pub struct Defaults;

impl Defaults {
    pub const PACK_ROOT: &'static str = "../..";
    pub const SOURCE_DIR: &'static str = "./images";
    pub const NAMESPACE: &'static str = "rpimages";
    pub const SUMMARY_PATH: &'static str = "./key_info.json";
}

/// Valid resource location namespace.
static NAMESPACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_.\-]+$").expect("valid namespace regex"));

/// Settings for one pack build run.
#[derive(Debug, Clone)]
pub struct PackConfig {
    /// Root of the resource pack (contains `assets/`).
    pub pack_root: PathBuf,
    /// Folder of group subdirectories with source images.
    pub source_dir: PathBuf,
    /// Pack namespace; also the key of the allocation table in item models.
    pub namespace: String,
    /// Where the group → short name → slot summary is written.
    pub summary_path: PathBuf,
    /// Discard persisted override tables and start every identity from 1.
    pub force: bool,
    /// Keep a `.json.bak` copy of each overwritten override table.
    pub keep_backup: bool,
    /// Collect and allocate in memory only.
    pub dry_run: bool,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            pack_root: PathBuf::from(Defaults::PACK_ROOT),
            source_dir: PathBuf::from(Defaults::SOURCE_DIR),
            namespace: Defaults::NAMESPACE.to_string(),
            summary_path: PathBuf::from(Defaults::SUMMARY_PATH),
            force: false,
            keep_backup: false,
            dry_run: false,
        }
    }
}

impl PackConfig {
    /// Config rooted at `pack_root`, reading groups from `source_dir`.
    pub fn new(pack_root: impl Into<PathBuf>, source_dir: impl Into<PathBuf>) -> Self {
        Self {
            pack_root: pack_root.into(),
            source_dir: source_dir.into(),
            ..Self::default()
        }
    }

    /// Check the namespace and that the pack root exists.
    pub fn validate(&self) -> Result<()> {
        if !NAMESPACE_PATTERN.is_match(&self.namespace) {
            return Err(PackError::Validation {
                field: "namespace".to_string(),
                message: format!(
                    "'{}' is not a valid resource namespace (expected [a-z0-9_.-]+)",
                    self.namespace
                ),
            });
        }
        if !self.pack_root.is_dir() {
            return Err(PackError::PackRootMissing(self.pack_root.clone()));
        }
        Ok(())
    }

    /// `assets/<namespace>/textures/custom/items`
    pub fn textures_dir(&self) -> PathBuf {
        self.namespace_assets()
            .join(PathsConfig::TEXTURES_DIR_NAME)
            .join(PathsConfig::CATEGORY)
    }

    /// `assets/<namespace>/models/custom/items`
    pub fn models_dir(&self) -> PathBuf {
        self.namespace_assets()
            .join(PathsConfig::MODELS_DIR_NAME)
            .join(PathsConfig::CATEGORY)
    }

    /// `assets/minecraft/models/item`, where override tables live.
    pub fn item_models_dir(&self) -> PathBuf {
        self.pack_root
            .join(PathsConfig::ASSETS_DIR_NAME)
            .join(ModelConfig::VANILLA_NAMESPACE)
            .join(PathsConfig::MODELS_DIR_NAME)
            .join(PathsConfig::ITEM_DIR_NAME)
    }

    /// Path of the override table for `identity`.
    pub fn item_model_path(&self, identity: &str) -> PathBuf {
        self.item_models_dir()
            .join(format!("{}.{}", identity, PathsConfig::MODEL_EXTENSION))
    }

    /// Source image for `key` in `group`.
    pub fn source_texture_path(&self, group: &str, key: &str) -> PathBuf {
        self.source_dir
            .join(group)
            .join(format!("{}.{}", key, PathsConfig::TEXTURE_EXTENSION))
    }

    /// Fully-qualified resource name of a discovered variant.
    pub fn resource_name(&self, group: &str, key: &str) -> String {
        format!("{}:{}/{}/{}", self.namespace, PathsConfig::CATEGORY, group, key)
    }

    fn namespace_assets(&self) -> PathBuf {
        self.pack_root
            .join(PathsConfig::ASSETS_DIR_NAME)
            .join(&self.namespace)
    }
}

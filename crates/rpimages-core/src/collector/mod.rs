//! Group discovery from the source image folder.
//!
//! The source folder holds one subdirectory per group:
//!
//! ```text
//! images/
//!   gems/
//!     meta.json      {"item": "emerald", "vanilla": ["item/diamond"]}
//!     ruby.png
//!     sapphire.png
//! ```
//!
//! Each group becomes a [`Group`] whose resource names are the descriptor's
//! vanilla entries followed by one `rpimages:custom/items/<group>/<key>` per
//! file. Groups without a usable descriptor are skipped with a warning.

mod descriptor;

pub use descriptor::{read_descriptor, GroupDescriptor};

use crate::config::{ModelConfig, PackConfig, PathsConfig};
use crate::{PackError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Generated item model for one discovered variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantModel {
    pub parent: String,
    pub textures: IndexMap<String, String>,
}

impl VariantModel {
    /// Model that renders `resource_name` as its single texture layer.
    pub fn from_texture(resource_name: &str) -> Self {
        let mut textures = IndexMap::new();
        textures.insert(
            ModelConfig::TEXTURE_LAYER.to_string(),
            resource_name.to_string(),
        );
        Self {
            parent: ModelConfig::GENERATED_PARENT.to_string(),
            textures,
        }
    }
}

/// A variant backed by a file in the group folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// File stem, unique within the group.
    pub key: String,
    pub resource_name: String,
    pub model: VariantModel,
}

/// A named set of variants sharing one identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub identity: String,
    /// Vanilla entries first, then discovered variants, no duplicates.
    pub resource_names: Vec<String>,
    /// Discovered variants by key, in discovery order.
    pub variants: IndexMap<String, Variant>,
}

/// A group folder left out of the run.
#[derive(Debug, Clone)]
pub struct SkippedGroup {
    pub name: String,
    pub reason: String,
}

/// Result of scanning the source folder.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub groups: Vec<Group>,
    pub skipped: Vec<SkippedGroup>,
}

/// Subdirectory names of `root`, sorted by name.
pub fn list_group_directories(root: &Path) -> Result<Vec<String>> {
    if !root.is_dir() {
        return Err(PackError::SourceMissing(root.to_path_buf()));
    }
    Ok(list_entries(root, |entry| entry.file_type().is_dir()))
}

/// Regular file names directly inside `dir`, sorted by name.
pub fn list_files(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Err(PackError::NotADirectory(dir.to_path_buf()));
    }
    Ok(list_entries(dir, |entry| entry.file_type().is_file()))
}

fn list_entries(dir: &Path, keep: impl Fn(&walkdir::DirEntry) -> bool) -> Vec<String> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| keep(e))
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .collect()
}

/// Scans the source folder into groups.
pub struct GroupCollector<'a> {
    config: &'a PackConfig,
}

impl<'a> GroupCollector<'a> {
    pub fn new(config: &'a PackConfig) -> Self {
        Self { config }
    }

    /// Collect every group under the source folder.
    ///
    /// Fails only if the source folder itself is missing.
    pub fn collect(&self) -> Result<Collection> {
        let root = &self.config.source_dir;
        let mut collection = Collection::default();

        for name in list_group_directories(root)? {
            let dir = root.join(&name);
            let files = list_files(&dir)?;
            if files.is_empty() {
                debug!("Skipping empty folder {}", dir.display());
                continue;
            }

            match self.collect_group(&name, &dir, &files) {
                Ok(group) => {
                    info!(
                        "Found group {} ({} variants, item {})",
                        group.name,
                        group.variants.len(),
                        group.identity
                    );
                    collection.groups.push(group);
                }
                Err(e) if e.is_group_local() => {
                    warn!("{}", e);
                    collection.skipped.push(SkippedGroup {
                        name,
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(collection)
    }

    fn collect_group(&self, name: &str, dir: &Path, files: &[String]) -> Result<Group> {
        let descriptor = read_descriptor(name, &dir.join(PathsConfig::META_FILE_NAME))?;

        let mut resource_names = Vec::new();
        for extra in descriptor.extra_resources {
            if !resource_names.contains(&extra) {
                resource_names.push(extra);
            }
        }

        let mut variants: IndexMap<String, Variant> = IndexMap::new();
        for file in files {
            let key = file_stem(file);
            if key == PathsConfig::META_STEM {
                continue;
            }
            if variants.contains_key(&key) {
                debug!("{}/{} shares key '{}' with another file", name, file, key);
                continue;
            }

            let resource_name = self.config.resource_name(name, &key);
            if !resource_names.contains(&resource_name) {
                resource_names.push(resource_name.clone());
            }
            variants.insert(
                key.clone(),
                Variant {
                    model: VariantModel::from_texture(&resource_name),
                    key,
                    resource_name,
                },
            );
        }

        Ok(Group {
            name: name.to_string(),
            identity: descriptor.identity,
            resource_names,
            variants,
        })
    }
}

/// File name without its final extension.
fn file_stem(file: &str) -> String {
    PathBuf::from(file)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file)
        .to_string()
}

/// Final `/` segment of a resource name.
pub fn short_name(resource_name: &str) -> &str {
    resource_name.rsplit('/').next().unwrap_or(resource_name)
}

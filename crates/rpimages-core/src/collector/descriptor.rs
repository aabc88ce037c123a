//! Per-group `meta.json` descriptor.
//!
//! ```json
//! { "item": "stone", "vanilla": ["item/coal"] }
//! ```
//!
//! `item` is the base item the group decorates and is required. `vanilla`
//! lists existing textures to include ahead of the group's own images.

use crate::{PackError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
struct RawDescriptor {
    #[serde(default)]
    item: Option<String>,
    #[serde(default)]
    vanilla: Option<Vec<String>>,
}

/// Validated group descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDescriptor {
    pub identity: String,
    pub extra_resources: Vec<String>,
}

/// Read the descriptor of `group` at `path`.
pub fn read_descriptor(group: &str, path: &Path) -> Result<GroupDescriptor> {
    if !path.is_file() {
        return Err(PackError::DescriptorMissing {
            group: group.to_string(),
            path: path.to_path_buf(),
        });
    }

    let contents = fs::read_to_string(path).map_err(|e| PackError::DescriptorInvalid {
        group: group.to_string(),
        message: format!("failed to read {}: {}", path.display(), e),
    })?;
    let raw: RawDescriptor =
        serde_json::from_str(&contents).map_err(|e| PackError::DescriptorInvalid {
            group: group.to_string(),
            message: e.to_string(),
        })?;

    let identity = raw
        .item
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .ok_or_else(|| PackError::IdentityMissing {
            group: group.to_string(),
        })?;

    Ok(GroupDescriptor {
        identity,
        extra_resources: raw.vanilla.unwrap_or_default(),
    })
}

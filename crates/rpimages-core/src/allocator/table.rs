//! Typed view of a persisted item override table.
//!
//! An item model in `assets/minecraft/models/item/<identity>.json` carries the
//! vanilla model fields, an `overrides` list of `custom_model_data`
//! predicates and an allocation map keyed by the pack namespace:
//!
//! ```json
//! {
//!     "parent": "item/generated",
//!     "textures": { "layer0": "minecraft:item/stone" },
//!     "overrides": [
//!         { "predicate": { "custom_model_data": 1 }, "model": "rpimages:custom/items/gems/ruby" }
//!     ],
//!     "rpimages": { "rpimages:custom/items/gems/ruby": 1 }
//! }
//! ```
//!
//! Every field other than `overrides` and the allocation map is passed
//! through verbatim and keeps its position in the file.

use super::slots::SlotAllocator;
use crate::config::ModelConfig;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

const OVERRIDES_KEY: &str = "overrides";

/// One `custom_model_data` override entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideRecord {
    pub predicate: Map<String, Value>,
    pub model: String,
    /// Fields other tools may have added to the entry.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OverrideRecord {
    pub fn new(slot: u32, model: impl Into<String>) -> Self {
        let mut predicate = Map::new();
        predicate.insert(ModelConfig::PREDICATE_KEY.to_string(), json!(slot));
        Self {
            predicate,
            model: model.into(),
            extra: Map::new(),
        }
    }

    /// The `custom_model_data` value, if this entry has one.
    pub fn slot(&self) -> Option<u32> {
        self.predicate
            .get(ModelConfig::PREDICATE_KEY)
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
    }
}

/// Override table for one identity.
#[derive(Debug, Clone)]
pub struct OverrideTable {
    /// Full document, including placeholder positions for the typed fields.
    content: Map<String, Value>,
    slot_key: String,
    overrides: Vec<OverrideRecord>,
    slots: IndexMap<String, u32>,
    allocator: SlotAllocator,
    dirty: bool,
}

impl OverrideTable {
    /// Fresh table for an identity with no persisted overrides yet.
    pub fn fresh(identity: &str, slot_key: &str) -> Self {
        let mut textures = Map::new();
        textures.insert(
            ModelConfig::TEXTURE_LAYER.to_string(),
            json!(format!("{}:item/{}", ModelConfig::VANILLA_NAMESPACE, identity)),
        );

        let mut content = Map::new();
        content.insert("parent".to_string(), json!(ModelConfig::ITEM_PARENT));
        content.insert("textures".to_string(), Value::Object(textures));
        content.insert(OVERRIDES_KEY.to_string(), Value::Array(Vec::new()));
        content.insert(slot_key.to_string(), Value::Object(Map::new()));

        Self {
            content,
            slot_key: slot_key.to_string(),
            overrides: Vec::new(),
            slots: IndexMap::new(),
            allocator: SlotAllocator::new(),
            dirty: false,
        }
    }

    /// Parse a persisted document.
    ///
    /// Missing `overrides` or allocation map are treated as empty. Anything
    /// that would break slot uniqueness is rejected with a description.
    pub fn from_value(value: Value, slot_key: &str) -> std::result::Result<Self, String> {
        let Value::Object(content) = value else {
            return Err("item model root is not a JSON object".to_string());
        };

        let overrides: Vec<OverrideRecord> = match content.get(OVERRIDES_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(v) => serde_json::from_value(v.clone())
                .map_err(|e| format!("invalid '{}' list: {}", OVERRIDES_KEY, e))?,
        };

        let slots: IndexMap<String, u32> = match content.get(slot_key) {
            None | Some(Value::Null) => IndexMap::new(),
            Some(v) => serde_json::from_value(v.clone())
                .map_err(|e| format!("invalid '{}' allocation map: {}", slot_key, e))?,
        };

        let mut allocator = SlotAllocator::new();
        for (name, &slot) in &slots {
            if slot == 0 {
                return Err(format!("slot for '{}' must be positive", name));
            }
            if !allocator.mark_used(slot) {
                return Err(format!("slot {} is assigned more than once", slot));
            }
        }

        Ok(Self {
            content,
            slot_key: slot_key.to_string(),
            overrides,
            slots,
            allocator,
            dirty: false,
        })
    }

    /// Full document, typed fields written back in place.
    pub fn to_value(&self) -> Value {
        let mut content = self.content.clone();
        content.insert(
            OVERRIDES_KEY.to_string(),
            serde_json::to_value(&self.overrides).unwrap_or_else(|_| Value::Array(Vec::new())),
        );
        let slots: Map<String, Value> = self
            .slots
            .iter()
            .map(|(name, slot)| (name.clone(), json!(slot)))
            .collect();
        content.insert(self.slot_key.clone(), Value::Object(slots));
        Value::Object(content)
    }

    /// Pass-through fields (everything except overrides and allocations).
    pub fn base_content(&self) -> Map<String, Value> {
        self.content
            .iter()
            .filter(|(k, _)| k.as_str() != OVERRIDES_KEY && **k != self.slot_key)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn slot(&self, resource_name: &str) -> Option<u32> {
        self.slots.get(resource_name).copied()
    }

    pub fn contains(&self, resource_name: &str) -> bool {
        self.slots.contains_key(resource_name)
    }

    pub fn slots(&self) -> &IndexMap<String, u32> {
        &self.slots
    }

    pub fn overrides(&self) -> &[OverrideRecord] {
        &self.overrides
    }

    /// Names from `candidates` without a slot yet, in order, each once.
    pub fn pending<'a>(&self, candidates: &'a [String]) -> Vec<&'a str> {
        let mut seen = std::collections::HashSet::new();
        candidates
            .iter()
            .map(String::as_str)
            .filter(|name| !self.contains(name) && seen.insert(*name))
            .collect()
    }

    /// Give `resource_name` the lowest free slot and append its override.
    ///
    /// A name that already has a slot keeps it.
    pub fn allocate(&mut self, resource_name: &str) -> u32 {
        if let Some(slot) = self.slot(resource_name) {
            return slot;
        }
        let slot = self.allocator.allocate();
        self.slots.insert(resource_name.to_string(), slot);
        self.overrides.push(OverrideRecord::new(slot, resource_name));
        self.dirty = true;
        slot
    }

    /// Whether anything was allocated since load.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fresh_table_shape() {
        let table = OverrideTable::fresh("stone", "rpimages");
        assert_eq!(
            table.to_value(),
            json!({
                "parent": "item/generated",
                "textures": { "layer0": "minecraft:item/stone" },
                "overrides": [],
                "rpimages": {}
            })
        );
        assert!(!table.is_dirty());
    }

    #[test]
    fn test_allocation_appends_overrides_in_order() {
        let mut table = OverrideTable::fresh("stone", "rpimages");
        for name in ["x", "y", "z"] {
            table.allocate(name);
        }

        assert_eq!(table.slot("x"), Some(1));
        assert_eq!(table.slot("y"), Some(2));
        assert_eq!(table.slot("z"), Some(3));
        let order: Vec<(u32, &str)> = table
            .overrides()
            .iter()
            .map(|r| (r.slot().unwrap(), r.model.as_str()))
            .collect();
        assert_eq!(order, vec![(1, "x"), (2, "y"), (3, "z")]);
        assert!(table.is_dirty());
    }

    #[test]
    fn test_loaded_table_fills_gap() {
        let value = json!({
            "parent": "item/generated",
            "overrides": [
                { "predicate": { "custom_model_data": 1 }, "model": "a" },
                { "predicate": { "custom_model_data": 3 }, "model": "b" }
            ],
            "rpimages": { "a": 1, "b": 3 }
        });
        let mut table = OverrideTable::from_value(value, "rpimages").unwrap();
        assert_eq!(table.allocate("c"), 2);
        assert_eq!(table.slot("a"), Some(1));
        assert_eq!(table.slot("b"), Some(3));
        assert_eq!(table.overrides().len(), 3);
    }

    #[test]
    fn test_allocate_existing_name_is_noop() {
        let value = json!({ "rpimages": { "a": 4 } });
        let mut table = OverrideTable::from_value(value, "rpimages").unwrap();
        assert_eq!(table.allocate("a"), 4);
        assert!(!table.is_dirty());
        assert!(table.overrides().is_empty());
    }

    #[test]
    fn test_pending_preserves_order_and_dedups() {
        let value = json!({ "rpimages": { "x": 1, "y": 2 } });
        let table = OverrideTable::from_value(value, "rpimages").unwrap();
        let candidates = names(&["x", "z", "y", "w", "z"]);
        assert_eq!(table.pending(&candidates), vec!["z", "w"]);
    }

    #[test]
    fn test_pass_through_fields_keep_position() {
        let value = json!({
            "parent": "item/handheld",
            "overrides": [],
            "rpimages": {},
            "display": { "head": { "scale": [1, 1, 1] } }
        });
        let mut table = OverrideTable::from_value(value, "rpimages").unwrap();
        table.allocate("gem");

        let out = table.to_value();
        let keys: Vec<&String> = out.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["parent", "overrides", "rpimages", "display"]);
        assert_eq!(out["display"]["head"]["scale"], json!([1, 1, 1]));
        assert_eq!(out["rpimages"]["gem"], json!(1));
    }

    #[test]
    fn test_missing_sections_are_added() {
        let value = json!({ "parent": "item/generated" });
        let mut table = OverrideTable::from_value(value, "rpimages").unwrap();
        table.allocate("gem");

        let out = table.to_value();
        assert_eq!(
            out["overrides"],
            json!([{ "predicate": { "custom_model_data": 1 }, "model": "gem" }])
        );
        assert_eq!(out["rpimages"], json!({ "gem": 1 }));
    }

    #[test]
    fn test_foreign_override_fields_survive() {
        let value = json!({
            "overrides": [
                { "predicate": { "pulling": 1 }, "model": "item/bow_pulling_0" }
            ]
        });
        let mut table = OverrideTable::from_value(value, "rpimages").unwrap();
        table.allocate("gem");
        let out = table.to_value();
        assert_eq!(out["overrides"][0]["predicate"], json!({ "pulling": 1 }));
        assert_eq!(out["overrides"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_rejects_non_object_root() {
        assert!(OverrideTable::from_value(json!([1, 2]), "rpimages").is_err());
    }

    #[test]
    fn test_rejects_duplicate_slots() {
        let value = json!({ "rpimages": { "a": 2, "b": 2 } });
        let err = OverrideTable::from_value(value, "rpimages").unwrap_err();
        assert!(err.contains("more than once"));
    }

    #[test]
    fn test_rejects_non_positive_slots() {
        assert!(OverrideTable::from_value(json!({ "rpimages": { "a": 0 } }), "rpimages").is_err());
        assert!(OverrideTable::from_value(json!({ "rpimages": { "a": -1 } }), "rpimages").is_err());
        assert!(
            OverrideTable::from_value(json!({ "rpimages": { "a": "one" } }), "rpimages").is_err()
        );
    }

    #[test]
    fn test_base_content_excludes_typed_fields() {
        let table = OverrideTable::fresh("stone", "rpimages");
        let base = table.base_content();
        assert_eq!(base.len(), 2);
        assert!(base.contains_key("parent"));
        assert!(base.contains_key("textures"));
    }
}

//! Key summary: group → item and short name → slot.
//!
//! ```json
//! {
//!     "gems": { "item": "emerald", "diamond": 1, "ruby": 2 }
//! }
//! ```

use crate::allocator::OverrideTable;
use crate::collector::{short_name, Group};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Reserved key holding the group's identity.
const ITEM_KEY: &str = "item";

/// Summary row for one group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub item: String,
    #[serde(flatten)]
    pub slots: IndexMap<String, u32>,
}

impl SummaryEntry {
    pub fn new(item: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            slots: IndexMap::new(),
        }
    }

    /// Record `slot` under the short name of `resource_name`.
    ///
    /// Returns `false` if the name can't be recorded because it would shadow
    /// the `item` key.
    pub fn record(&mut self, resource_name: &str, slot: u32) -> bool {
        let name = short_name(resource_name);
        if name == ITEM_KEY {
            warn!(
                "Resource {} can't be listed in the key summary: '{}' is reserved",
                resource_name, ITEM_KEY
            );
            return false;
        }
        if let Some(previous) = self.slots.insert(name.to_string(), slot) {
            if previous != slot {
                warn!(
                    "Short name '{}' is shared by several resources; summary keeps slot {}",
                    name, slot
                );
            }
        }
        true
    }
}

/// Summary for a whole run, in group processing order.
pub type SummaryTable = IndexMap<String, SummaryEntry>;

/// Summary row for `group` from the current state of its table.
pub fn summarize_group(group: &Group, table: &OverrideTable) -> SummaryEntry {
    let mut entry = SummaryEntry::new(&group.identity);
    for resource_name in &group.resource_names {
        match table.slot(resource_name) {
            Some(slot) => {
                entry.record(resource_name, slot);
            }
            None => warn!("{} has no slot in the {} table", resource_name, group.identity),
        }
    }
    entry
}

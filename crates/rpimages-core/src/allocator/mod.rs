//! Slot allocation and override table merging.
//!
//! Each identity owns one [`OverrideTable`]; slot values are unique within a
//! table and start at 1. Merging a group into its table only ever adds
//! entries: names that already have a slot keep it.

mod slots;
mod table;

pub use slots::SlotAllocator;
pub use table::{OverrideRecord, OverrideTable};

/// A slot handed out during a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub resource_name: String,
    pub slot: u32,
}

/// Allocate slots for every name in `resource_names` missing from `table`.
///
/// Allocation follows the order of `resource_names`. Returns the new
/// allocations; an empty result means the table is unchanged.
pub fn merge_names(table: &mut OverrideTable, resource_names: &[String]) -> Vec<Allocation> {
    table
        .pending(resource_names)
        .into_iter()
        .map(|name| Allocation {
            resource_name: name.to_string(),
            slot: table.allocate(name),
        })
        .collect()
}

//! Storage seam between the merge pipeline and the resource pack.

use crate::allocator::OverrideTable;
use crate::collector::VariantModel;
use crate::summary::SummaryTable;
use crate::Result;

/// Outcome of copying one texture into the pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCopy {
    Copied,
    /// The source image did not exist; nothing was written.
    Missing,
}

/// Everything the pipeline reads from or writes to the pack.
pub trait PackStore {
    /// Load the override table for `identity`, or `None` if there is none.
    ///
    /// A table that exists but cannot be parsed is an error, never `None`.
    fn load_table(&self, identity: &str) -> Result<Option<OverrideTable>>;

    /// Persist the full table for `identity`.
    fn save_table(&self, identity: &str, table: &OverrideTable) -> Result<()>;

    /// Copy the source image of `key` in `group` into the pack, overwriting.
    fn copy_asset(&self, group: &str, key: &str) -> Result<AssetCopy>;

    /// Write the generated model of `key` in `group`, overwriting.
    fn write_payload(&self, group: &str, key: &str, model: &VariantModel) -> Result<()>;

    /// Write the run summary.
    fn write_summary(&self, summary: &SummaryTable) -> Result<()>;
}

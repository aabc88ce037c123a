//! RpImages Core - custom model data allocation for a Minecraft resource pack.
//!
//! Source images are organised in group folders, each decorating one vanilla
//! item. This crate gives every image a stable `custom_model_data` slot on
//! that item, merges new slots into the item's override model without ever
//! renumbering existing ones, and writes the textures, generated models and a
//! key summary into the pack.
//!
//! # Example
//!
//! ```rust,no_run
//! use rpimages_core::{PackBuilder, PackConfig};
//!
//! fn main() -> rpimages_core::Result<()> {
//!     let config = PackConfig::new("../..", "./images");
//!     let report = PackBuilder::new(config).run()?;
//!     println!("Allocated {} new slots", report.total_allocated());
//!     Ok(())
//! }
//! ```

pub mod allocator;
pub mod collector;
pub mod config;
pub mod error;
pub mod metadata;
pub mod pipeline;
pub mod store;
pub mod summary;

pub use allocator::{merge_names, Allocation, OverrideRecord, OverrideTable, SlotAllocator};
pub use collector::{Collection, Group, GroupCollector, SkippedGroup, Variant, VariantModel};
pub use config::PackConfig;
pub use error::{PackError, Result};
pub use pipeline::{GroupReport, PackBuilder, RunReport};
pub use store::{AssetCopy, FsPackStore, PackStore};
pub use summary::{SummaryEntry, SummaryTable};

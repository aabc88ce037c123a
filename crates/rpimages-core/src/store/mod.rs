//! Pack storage.
//!
//! [`PackStore`] is the seam the pipeline writes through; [`FsPackStore`]
//! implements it on a resource pack directory.

mod fs;
mod traits;

pub use fs::FsPackStore;
pub use traits::{AssetCopy, PackStore};

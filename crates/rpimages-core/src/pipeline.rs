//! Full pack build: collect groups, merge slots, write assets and summary.
//!
//! Groups are processed one after another. For each group:
//!
//! 1. Load the identity's override table (or start a fresh one)
//! 2. Allocate slots for names the table doesn't know yet
//! 3. Persist the table if anything was allocated
//! 4. Copy textures and write generated models for every discovered variant
//! 5. Record the group's slots in the summary
//!
//! A corrupt table or an I/O failure stops the run. Tables persisted before
//! the failure stay valid, and a re-run picks up where it stopped.

use crate::allocator::{merge_names, Allocation, OverrideTable};
use crate::collector::{Collection, Group, GroupCollector, SkippedGroup};
use crate::config::PackConfig;
use crate::store::{AssetCopy, FsPackStore, PackStore};
use crate::summary::{summarize_group, SummaryTable};
use crate::Result;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// What happened to one group.
#[derive(Debug, Clone, Default)]
pub struct GroupReport {
    pub name: String,
    pub identity: String,
    pub allocated: Vec<Allocation>,
    /// Table persisted (in a dry run: would have been).
    pub table_written: bool,
    pub textures_copied: usize,
    pub missing_textures: Vec<String>,
    pub models_written: usize,
}

/// Outcome of a full run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub groups: Vec<GroupReport>,
    pub skipped: Vec<SkippedGroup>,
    pub summary: SummaryTable,
    pub dry_run: bool,
}

impl RunReport {
    pub fn total_allocated(&self) -> usize {
        self.groups.iter().map(|g| g.allocated.len()).sum()
    }

    pub fn tables_written(&self) -> usize {
        self.groups.iter().filter(|g| g.table_written).count()
    }

    pub fn missing_textures(&self) -> usize {
        self.groups.iter().map(|g| g.missing_textures.len()).sum()
    }
}

/// Runs the pack build against a [`PackStore`].
pub struct PackBuilder<S: PackStore> {
    config: PackConfig,
    store: S,
}

impl PackBuilder<FsPackStore> {
    /// Builder writing to the pack directory named in `config`.
    pub fn new(config: PackConfig) -> Self {
        let store = FsPackStore::new(config.clone());
        Self { config, store }
    }
}

impl<S: PackStore> PackBuilder<S> {
    pub fn with_store(config: PackConfig, store: S) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &PackConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate the config, collect groups and process them.
    pub fn run(&self) -> Result<RunReport> {
        self.config.validate()?;
        info!("Pack root found: {}", self.config.pack_root.display());

        if self.config.force {
            warn!("Force mode enabled. Previous model data will not be kept.");
        }
        if self.config.dry_run {
            info!("Dry run: nothing will be written");
        }

        let collection = GroupCollector::new(&self.config).collect()?;
        self.process(collection)
    }

    /// Process already collected groups and write the summary.
    pub fn process(&self, collection: Collection) -> Result<RunReport> {
        let mut report = RunReport {
            skipped: collection.skipped,
            dry_run: self.config.dry_run,
            ..RunReport::default()
        };

        // Tables touched this run, by identity. Groups sharing an identity
        // share one slot space.
        let mut tables: HashMap<String, OverrideTable> = HashMap::new();

        for group in &collection.groups {
            let group_report = self.process_group(group, &mut tables, &mut report.summary)?;
            report.groups.push(group_report);
        }

        if self.config.dry_run {
            info!(
                "Dry run complete: {} slots would be allocated across {} tables",
                report.total_allocated(),
                report.tables_written()
            );
        } else {
            self.store.write_summary(&report.summary)?;
        }

        Ok(report)
    }

    fn process_group(
        &self,
        group: &Group,
        tables: &mut HashMap<String, OverrideTable>,
        summary: &mut SummaryTable,
    ) -> Result<GroupReport> {
        info!("Saving group: {}", group.name);
        info!(
            " - Item: {} -> {}",
            group.identity,
            self.config.item_model_path(&group.identity).display()
        );

        let mut report = GroupReport {
            name: group.name.clone(),
            identity: group.identity.clone(),
            ..GroupReport::default()
        };

        let table = match tables.entry(group.identity.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(self.load_or_init(&group.identity)?),
        };

        report.allocated = merge_names(table, &group.resource_names);
        for allocation in &report.allocated {
            debug!(
                " - Slot {} -> {}",
                allocation.slot, allocation.resource_name
            );
        }

        if table.is_dirty() {
            if !self.config.dry_run {
                self.store.save_table(&group.identity, table)?;
            }
            table.mark_clean();
            report.table_written = true;
        } else {
            debug!(" - No new resources for {}", group.identity);
        }

        if !self.config.dry_run {
            for variant in group.variants.values() {
                match self.store.copy_asset(&group.name, &variant.key)? {
                    AssetCopy::Copied => report.textures_copied += 1,
                    AssetCopy::Missing => report.missing_textures.push(variant.key.clone()),
                }
            }
            for variant in group.variants.values() {
                self.store
                    .write_payload(&group.name, &variant.key, &variant.model)?;
                report.models_written += 1;
            }
        }

        summary.insert(group.name.clone(), summarize_group(group, table));
        Ok(report)
    }

    fn load_or_init(&self, identity: &str) -> Result<OverrideTable> {
        if self.config.force {
            return Ok(OverrideTable::fresh(identity, &self.config.namespace));
        }
        match self.store.load_table(identity)? {
            Some(table) => Ok(table),
            None => {
                debug!("No override table for {}, starting fresh", identity);
                Ok(OverrideTable::fresh(identity, &self.config.namespace))
            }
        }
    }
}

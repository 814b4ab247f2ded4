//! Manifest assembly API.
//!
//! Provides high-level interface for turning an [`ExportLayout`] into a
//! [`Manifest`] by scanning headers under a project root.

use crate::config::{ExportLayout, GroupLayout, SectionLayout};
use crate::extract::extract_exports;
use crate::manifest::{Manifest, Section};
use crate::{Error, ExclusionSet};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info, warn};

/// Assembles manifests from headers found relative to a project root
#[derive(Debug, Clone)]
pub struct Assembler {
    root: Utf8PathBuf,
}

impl Assembler {
    /// Create an assembler resolving every layout path against `root`
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Resolve a layout path against the project root
    pub fn resolve(&self, path: &Utf8Path) -> Utf8PathBuf {
        self.root.join(path)
    }

    /// Build the exclusion set for one scanned group
    pub fn exclusions(&self, group: &GroupLayout) -> Result<ExclusionSet, Error> {
        ExclusionSet::from_sources(&self.root, &group.exclude_sources, &group.exclude_symbols)
    }

    /// Scan one group's headers into a manifest section
    pub fn scan_group(&self, group: &GroupLayout) -> Result<Section, Error> {
        let exclusions = self.exclusions(group)?;
        debug!(
            "{}: {} excluded symbols from {} sources",
            group.comment,
            exclusions.len(),
            group.exclude_sources.len()
        );

        let symbols = extract_exports(&self.resolve(&group.headers), &exclusions)?;
        if symbols.is_empty() {
            warn!("{}: no exports found in {}", group.comment, group.headers);
        } else {
            debug!("{}: {} exports", group.comment, symbols.len());
        }

        Ok(Section::new(group.comment.clone(), symbols))
    }

    /// Assemble the full manifest. Any unreadable input aborts the whole run.
    pub fn assemble(&self, layout: &ExportLayout) -> Result<Manifest, Error> {
        let mut manifest = Manifest::new(layout.library.clone(), layout.generator.clone());

        for section in &layout.sections {
            let section = match section {
                SectionLayout::Scanned(group) => self.scan_group(group)?,
                SectionLayout::Static(list) => {
                    Section::new(list.comment.clone(), list.symbols.clone())
                }
            };
            manifest.push_section(section);
        }

        info!(
            "Assembled {} with {} exports in {} sections",
            manifest.library(),
            manifest.symbol_count(),
            manifest.sections().len()
        );

        Ok(manifest)
    }
}

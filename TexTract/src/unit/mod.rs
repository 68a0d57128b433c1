//! Source unit index
//!
//! Every input archive is scanned once into a [`SourceUnit`]: namespace
//! indexes, the joined texture set, name catalogs, animation cycles and
//! switch pairs.

mod catalog;
mod scan;
mod source_unit;

pub use catalog::{AnimationCycles, Catalog, SwitchMap};
pub use scan::{DirectoryScan, Namespace, scan_directory};
pub use source_unit::SourceUnit;

/// Which optional tables a scan reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Read ANIMATED and build animation cycles
    pub animated: bool,
    /// Read SWITCHES and build the switch map
    pub switches: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            animated: true,
            switches: true,
        }
    }
}

//! Per-archive index built once before extraction

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use super::ScanOptions;
use super::catalog::{AnimationCycles, Catalog, SwitchMap};
use super::scan::{DirectoryScan, scan_directory};
use crate::error::{Error, Result};
use crate::formats::{
    AnimatedKind, AnimatedTable, PatchNames, SwitchTable, TextureFormat, TextureList, TextureSet, default_animated,
    detect_format, name_key,
};
use crate::wad::{Archive, WadFile};

/// An opened archive and everything extraction needs to know about it.
///
/// Immutable once built.
#[derive(Debug)]
pub struct SourceUnit<A: Archive = WadFile> {
    label: String,
    archive: A,
    /// Name key -> entry index
    patch_index: HashMap<String, usize>,
    flat_index: HashMap<String, usize>,
    namespace_texture_index: HashMap<String, usize>,
    texture_set: TextureSet,
    texture_format: TextureFormat,
    /// Name keys of TEXTURE1 entries, kept only when TEXTURE2 exists
    texture1_names: Option<HashSet<String>>,
    texture_catalog: Catalog,
    flat_catalog: Catalog,
    texture_cycles: AnimationCycles,
    flat_cycles: AnimationCycles,
    switch_map: SwitchMap,
    animated: AnimatedTable,
    switches: SwitchTable,
}

impl<A: Archive> SourceUnit<A> {
    /// Index `archive`.
    ///
    /// `label` names the archive in logs and errors.
    ///
    /// # Errors
    /// Fails on an unterminated namespace, a texture lump without its
    /// counterpart, or an undecodable PNAMES/TEXTUREx. A broken ANIMATED or
    /// SWITCHES is logged and ignored.
    pub fn build(archive: A, label: impl Into<String>, options: &ScanOptions) -> Result<Self> {
        let label = label.into();
        info!("Scanning {label}");

        let scan = scan_directory(&archive, &label)?;
        debug!(
            "{label}: {} patches, {} flats, {} namespace textures",
            scan.patches.len(),
            scan.flats.len(),
            scan.textures.len()
        );

        let (texture_set, texture_format, texture1_names) = read_textures(&archive, &label, &scan)?;

        let texture_catalog = Catalog::from_names(
            texture_set
                .names()
                .map(name_key)
                .chain(scan.textures.keys().cloned()),
        );
        let flat_catalog = Catalog::from_names(scan.flats.keys().cloned());

        let mut unit = Self {
            label,
            archive,
            patch_index: scan.patches,
            flat_index: scan.flats,
            namespace_texture_index: scan.textures,
            texture_set,
            texture_format,
            texture1_names,
            texture_catalog,
            flat_catalog,
            texture_cycles: AnimationCycles::default(),
            flat_cycles: AnimationCycles::default(),
            switch_map: SwitchMap::default(),
            animated: AnimatedTable::new(),
            switches: SwitchTable::new(),
        };

        if options.animated {
            unit.animated = unit.read_optional(scan.animated, "ANIMATED", AnimatedTable::decode);
            unit.index_animations();
        }
        if options.switches {
            unit.switches = unit.read_optional(scan.switches, "SWITCHES", SwitchTable::decode);
            unit.switch_map = SwitchMap::from_entries(&unit.switches.entries);
        }

        Ok(unit)
    }

    fn read_optional<T: Default>(&self, index: Option<usize>, record: &str, decode: fn(&[u8]) -> Result<T>) -> T {
        let Some(index) = index else {
            return T::default();
        };
        match self.archive.entry_data(index).and_then(|data| decode(&data)) {
            Ok(table) => {
                debug!("{}: read {record}", self.label);
                table
            }
            Err(e) => {
                warn!("{}: ignoring {record}: {e}", self.label);
                T::default()
            }
        }
    }

    fn index_animations(&mut self) {
        let own = self.animated.entries.iter();
        for entry in own.chain(default_animated().iter()) {
            match entry.kind {
                AnimatedKind::Texture => self.texture_cycles.add(&self.texture_catalog, entry),
                AnimatedKind::Flat => self.flat_cycles.add(&self.flat_catalog, entry),
            };
        }
        debug!(
            "{}: {} texture cycles, {} flat cycles",
            self.label,
            self.texture_cycles.len(),
            self.flat_cycles.len()
        );
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn archive(&self) -> &A {
        &self.archive
    }

    #[must_use]
    pub fn patch_entry(&self, name: &str) -> Option<usize> {
        self.patch_index.get(&name_key(name)).copied()
    }

    #[must_use]
    pub fn has_patch(&self, name: &str) -> bool {
        self.patch_index.contains_key(&name_key(name))
    }

    #[must_use]
    pub fn flat_entry(&self, name: &str) -> Option<usize> {
        self.flat_index.get(&name_key(name)).copied()
    }

    #[must_use]
    pub fn has_flat(&self, name: &str) -> bool {
        self.flat_index.contains_key(&name_key(name))
    }

    #[must_use]
    pub fn namespace_texture_entry(&self, name: &str) -> Option<usize> {
        self.namespace_texture_index.get(&name_key(name)).copied()
    }

    #[must_use]
    pub fn texture_set(&self) -> &TextureSet {
        &self.texture_set
    }

    #[must_use]
    pub fn texture_format(&self) -> TextureFormat {
        self.texture_format
    }

    #[must_use]
    pub fn has_texture2(&self) -> bool {
        self.texture1_names.is_some()
    }

    /// Name keys of the TEXTURE1 entries when the archive also has TEXTURE2
    #[must_use]
    pub fn texture1_names(&self) -> Option<&HashSet<String>> {
        self.texture1_names.as_ref()
    }

    #[must_use]
    pub fn texture_catalog(&self) -> &Catalog {
        &self.texture_catalog
    }

    #[must_use]
    pub fn flat_catalog(&self) -> &Catalog {
        &self.flat_catalog
    }

    #[must_use]
    pub fn texture_cycle(&self, name: &str) -> Option<&[String]> {
        self.texture_cycles.get(name)
    }

    #[must_use]
    pub fn flat_cycle(&self, name: &str) -> Option<&[String]> {
        self.flat_cycles.get(name)
    }

    #[must_use]
    pub fn switch_map(&self) -> &SwitchMap {
        &self.switch_map
    }

    /// The archive's own ANIMATED table
    #[must_use]
    pub fn animated(&self) -> &AnimatedTable {
        &self.animated
    }

    /// The archive's own SWITCHES table
    #[must_use]
    pub fn switches(&self) -> &SwitchTable {
        &self.switches
    }
}

type TextureLumps = (TextureSet, TextureFormat, Option<HashSet<String>>);

fn missing(label: &str, message: &str) -> Error {
    Error::MissingDependency {
        archive: label.to_string(),
        message: message.to_string(),
    }
}

fn read_textures<A: Archive>(archive: &A, label: &str, scan: &DirectoryScan) -> Result<TextureLumps> {
    let (texture1, pnames) = match (scan.texture1, scan.texture2, scan.pnames) {
        (None, None, None) => return Ok((TextureSet::new(), TextureFormat::default(), None)),
        (None, Some(_), _) => return Err(missing(label, "TEXTURE2 without TEXTURE1")),
        (Some(_), _, None) => return Err(missing(label, "TEXTUREx without PNAMES")),
        (None, None, Some(_)) => return Err(missing(label, "PNAMES without TEXTUREx")),
        (Some(texture1), _, Some(pnames)) => (texture1, pnames),
    };

    let data = archive.entry_data(texture1)?;
    let format = detect_format(&data)?;
    let list1 = TextureList::decode_as(&data, format)?;
    info!("{label}: {} entries in TEXTURE1 ({})", list1.len(), format.as_str());

    let list2 = match scan.texture2 {
        Some(index) => {
            let list = TextureList::decode(&archive.entry_data(index)?)?;
            info!("{label}: {} entries in TEXTURE2", list.len());
            Some(list)
        }
        None => None,
    };

    let patch_names = PatchNames::decode(&archive.entry_data(pnames)?)?;
    info!("{label}: {} entries in PNAMES", patch_names.len());

    let texture1_names = list2
        .as_ref()
        .map(|_| list1.entries.iter().map(|e| name_key(&e.name)).collect());
    let set = TextureSet::from_lists(&patch_names, &list1, list2.as_ref())?;
    Ok((set, format, texture1_names))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{AnimatedEntry, SwitchEntry};
    use crate::test_support::{WadBuilder, texture};
    use pretty_assertions::assert_eq;

    fn build(wad: WadFile) -> Result<SourceUnit> {
        SourceUnit::build(wad, "test.wad", &ScanOptions::default())
    }

    #[test]
    fn test_textures_and_namespaces() {
        let wad = WadBuilder::new()
            .textures(TextureFormat::Standard, vec![texture("A", &["P1", "P2"]), texture("B", &["P2"])])
            .patches(&["P1", "P2"])
            .flats(&["FLOOR0_1"])
            .range("TX_START", "TX_END", &["HITEX"])
            .build();
        let unit = build(wad).unwrap();

        assert_eq!(unit.texture_set().len(), 2);
        assert!(unit.has_patch("p2"));
        assert!(unit.has_flat("FLOOR0_1"));
        assert!(unit.namespace_texture_entry("HITEX").is_some());
        assert!(!unit.has_texture2());
        let catalog: Vec<_> = unit.texture_catalog().iter().collect();
        assert_eq!(catalog, vec!["A", "B", "HITEX"]);
    }

    #[test]
    fn test_reduced_format_detected() {
        let wad = WadBuilder::new()
            .textures(TextureFormat::Reduced, vec![texture("STRIFE1", &["P1"])])
            .build();
        let unit = build(wad).unwrap();
        assert_eq!(unit.texture_format(), TextureFormat::Reduced);
        assert_eq!(unit.texture_set().get("STRIFE1").unwrap().patches[0].patch_name, "P1");
    }

    #[test]
    fn test_missing_dependencies() {
        let pnames_only = WadBuilder::new().lump("PNAMES", &0i32.to_le_bytes()).build();
        assert!(matches!(build(pnames_only), Err(Error::MissingDependency { .. })));

        let texture2_only = WadBuilder::new().lump("TEXTURE2", &0i32.to_le_bytes()).build();
        assert!(matches!(build(texture2_only), Err(Error::MissingDependency { .. })));

        let no_pnames = WadBuilder::new().lump("TEXTURE1", &0i32.to_le_bytes()).build();
        assert!(matches!(build(no_pnames), Err(Error::MissingDependency { .. })));
    }

    #[test]
    fn test_animation_cycles_from_own_table() {
        let names = ["WALL01", "WALL02", "WALL03", "WALL04", "WALL05"];
        let textures = names.iter().map(|n| texture(n, &["P1"])).collect();
        let table = AnimatedTable {
            entries: vec![AnimatedEntry::texture("WALL01", "WALL05", 8)],
        };
        let wad = WadBuilder::new()
            .textures(TextureFormat::Standard, textures)
            .animated(&table)
            .build();
        let unit = build(wad).unwrap();

        assert_eq!(unit.texture_cycle("WALL03").unwrap(), names);
        assert_eq!(unit.animated().len(), 1);
    }

    #[test]
    fn test_default_flat_cycles_without_own_table() {
        let wad = WadBuilder::new().flats(&["NUKAGE1", "NUKAGE2", "NUKAGE3"]).build();
        let unit = build(wad).unwrap();
        assert_eq!(unit.flat_cycle("nukage2").unwrap(), ["NUKAGE1", "NUKAGE2", "NUKAGE3"]);
        assert!(unit.animated().is_empty());
    }

    #[test]
    fn test_disabled_tables_are_not_read() {
        let switches = SwitchTable {
            entries: vec![SwitchEntry::new("SWOFF1", "SWON1", 1)],
        };
        let wad = WadBuilder::new()
            .flats(&["NUKAGE1", "NUKAGE3"])
            .switches(&switches)
            .build();
        let options = ScanOptions {
            animated: false,
            switches: false,
        };
        let unit = SourceUnit::build(wad, "test.wad", &options).unwrap();
        assert!(unit.flat_cycle("NUKAGE1").is_none());
        assert!(unit.switch_map().is_empty());
    }

    #[test]
    fn test_malformed_switches_ignored() {
        let wad = WadBuilder::new().lump("SWITCHES", &[1, 2, 3]).build();
        let unit = build(wad).unwrap();
        assert!(unit.switches().is_empty());
    }

    #[test]
    fn test_texture2_membership() {
        let mut set = TextureSet::new();
        set.insert(texture("A", &["P1"]));
        set.insert(texture("B", &["P1"]));
        let tex1: HashSet<String> = ["A".to_string()].into_iter().collect();
        let exported = set.export(TextureFormat::Standard, Some(&tex1));

        let wad = WadBuilder::new()
            .lump("TEXTURE1", &exported.texture1.encode())
            .lump("TEXTURE2", &exported.texture2.unwrap().encode())
            .lump("PNAMES", &exported.patch_names.encode())
            .build();
        let unit = build(wad).unwrap();
        assert!(unit.has_texture2());
        assert!(unit.texture1_names().unwrap().contains("A"));
        assert_eq!(unit.texture_set().len(), 2);
    }
}

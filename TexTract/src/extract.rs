//! Extraction and table merge
//!
//! Walks an expanded request against the patch units and collects
//! everything the output needs into an [`ExportSet`]: texture definitions,
//! the raw patch, flat and namespace texture lumps they depend on, and the
//! ANIMATED and SWITCHES entries that still apply.

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::error::Result;
use crate::formats::{AnimatedKind, AnimatedTable, SwitchTable, TextureSet, name_key};
use crate::request::ExtractionRequest;
use crate::resolver::PriorityResolver;
use crate::unit::{ScanOptions, SourceUnit};
use crate::wad::{Archive, Lump};

/// Named lumps, unique by case-folded name, first write wins
#[derive(Debug, Clone, Default)]
pub struct LumpCollection {
    lumps: IndexMap<String, Lump>,
}

impl LumpCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.lumps.contains_key(&name_key(name))
    }

    /// Insert unless the name is taken. Returns whether it was inserted.
    pub fn insert(&mut self, lump: Lump) -> bool {
        let key = name_key(&lump.name);
        if self.lumps.contains_key(&key) {
            return false;
        }
        self.lumps.insert(key, lump);
        true
    }

    /// Copy entry `index` of `unit` under `name` unless the name is taken
    fn copy_from<A: Archive>(&mut self, unit: &SourceUnit<A>, name: &str, index: usize) -> Result<bool> {
        if self.contains(name) {
            return Ok(false);
        }
        let data = unit.archive().entry_data(index)?;
        debug!("Copying {name} from {}", unit.label());
        Ok(self.insert(Lump::new(name_key(name), data)))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Lump> {
        self.lumps.get(&name_key(name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lumps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lumps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lump> {
        self.lumps.values()
    }

    /// Sort by name
    pub fn sort(&mut self) {
        self.lumps.sort_keys();
    }

    pub fn into_lumps(self) -> Vec<Lump> {
        self.lumps.into_values().collect()
    }
}

/// Everything that goes into the output archive
#[derive(Debug, Clone, Default)]
pub struct ExportSet {
    pub textures: TextureSet,
    pub patches: LumpCollection,
    pub flats: LumpCollection,
    pub namespace_textures: LumpCollection,
    pub animated: AnimatedTable,
    pub switches: SwitchTable,
}

impl ExportSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing texture set
    #[must_use]
    pub fn with_textures(textures: TextureSet) -> Self {
        Self {
            textures,
            ..Self::default()
        }
    }
}

/// Pulls requested resources out of the patch units
pub struct Extractor<'a, A: Archive> {
    resolver: &'a PriorityResolver<A>,
    options: ScanOptions,
}

impl<'a, A: Archive> Extractor<'a, A> {
    pub fn new(resolver: &'a PriorityResolver<A>, options: ScanOptions) -> Self {
        Self { resolver, options }
    }

    /// Extract every name of an expanded request into `export`, then merge
    /// the ANIMATED and SWITCHES entries that refer to what was extracted.
    pub fn extract(&self, request: &ExtractionRequest, export: &mut ExportSet) -> Result<()> {
        info!("Extracting {} textures", request.textures.len());
        for name in &request.textures {
            self.extract_texture(name, export)?;
        }

        info!("Extracting {} flats", request.flats.len());
        for name in &request.flats {
            self.extract_flat(name, export)?;
        }

        if self.options.animated {
            self.merge_animated(export);
        }
        if self.options.switches {
            self.merge_switches(export);
        }
        Ok(())
    }

    fn extract_texture(&self, name: &str, export: &mut ExportSet) -> Result<()> {
        if let Some(unit) = self.resolver.find_texture(name) {
            let Some(texture) = unit.texture_set().get(name) else {
                return Ok(());
            };

            let mut found_patch = false;
            for placement in &texture.patches {
                if let Some(index) = unit.patch_entry(&placement.patch_name) {
                    found_patch = true;
                    export.patches.copy_from(unit, &placement.patch_name, index)?;
                }
            }

            if found_patch || !export.textures.contains(name) {
                debug!("Adding texture {name} from {}", unit.label());
                export.textures.insert(texture.clone());
            }
        } else if let Some(unit) = self.resolver.find_namespace_texture(name) {
            if let Some(index) = unit.namespace_texture_entry(name) {
                export.namespace_textures.copy_from(unit, name, index)?;
            }
        } else {
            debug!("Texture {name} not found in any patch WAD, skipping");
        }
        Ok(())
    }

    fn extract_flat(&self, name: &str, export: &mut ExportSet) -> Result<()> {
        match self.resolver.find_flat(name) {
            Some(unit) => {
                if let Some(index) = unit.flat_entry(name) {
                    export.flats.copy_from(unit, name, index)?;
                }
            }
            None => debug!("Flat {name} not found in any patch WAD, skipping"),
        }
        Ok(())
    }

    fn merge_animated(&self, export: &mut ExportSet) {
        let base = self.resolver.base();
        for unit in self.resolver.units() {
            for entry in unit.animated().iter() {
                let keep = match entry.kind {
                    AnimatedKind::Texture => export.textures.contains(&entry.first_name),
                    AnimatedKind::Flat => {
                        export.flats.contains(&entry.first_name) || base.has_flat(&entry.first_name)
                    }
                };
                if keep && export.animated.add_unique(entry.clone()) {
                    debug!("Keeping ANIMATED {} -> {} from {}", entry.first_name, entry.last_name, unit.label());
                }
            }
        }
    }

    fn merge_switches(&self, export: &mut ExportSet) {
        for unit in self.resolver.units() {
            for entry in unit.switches().iter() {
                let keep = export.textures.contains(&entry.off_name) || export.textures.contains(&entry.on_name);
                if keep && export.switches.add_unique(entry.clone()) {
                    debug!("Keeping SWITCHES {} / {} from {}", entry.off_name, entry.on_name, unit.label());
                }
            }
        }
    }
}

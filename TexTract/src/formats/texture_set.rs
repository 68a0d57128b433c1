//! Name-resolved texture definitions
//!
//! A [`TextureSet`] is what TEXTURE1/TEXTURE2 and PNAMES describe together:
//! every patch reference is a patch name rather than a table index. Sets are
//! built from raw lists with [`TextureSet::from_lists`] and turned back into
//! lumps with [`TextureSet::export`], which rebuilds PNAMES from scratch.

use std::cmp::Ordering;
use std::collections::HashSet;

use indexmap::IndexMap;

use super::common::name_key;
use super::pnames::PatchNames;
use super::texture_list::{PatchRecord, TextureEntry, TextureFormat, TextureList};
use crate::error::{Error, Result};

/// A patch placed inside a texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchPlacement {
    pub patch_name: String,
    pub origin_x: i16,
    pub origin_y: i16,
}

impl PatchPlacement {
    #[must_use]
    pub fn new(patch_name: impl Into<String>, origin_x: i16, origin_y: i16) -> Self {
        Self {
            patch_name: patch_name.into(),
            origin_x,
            origin_y,
        }
    }
}

/// A composite wall texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureDefinition {
    pub name: String,
    pub width: u16,
    pub height: u16,
    pub patches: Vec<PatchPlacement>,
}

impl TextureDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, width: u16, height: u16) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            patches: Vec::new(),
        }
    }

    /// Builder-style patch append
    #[must_use]
    pub fn with_patch(mut self, patch_name: impl Into<String>, origin_x: i16, origin_y: i16) -> Self {
        self.patches.push(PatchPlacement::new(patch_name, origin_x, origin_y));
        self
    }
}

/// Lumps produced by [`TextureSet::export`]
#[derive(Debug, Clone)]
pub struct ExportedTextures {
    pub patch_names: PatchNames,
    pub texture1: TextureList,
    /// Present only when a split was requested
    pub texture2: Option<TextureList>,
}

/// Ordered, case-insensitively unique collection of texture definitions
#[derive(Debug, Clone, Default)]
pub struct TextureSet {
    /// Name key -> definition
    textures: IndexMap<String, TextureDefinition>,
}

impl TextureSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Join one or two raw texture lists against a patch name table.
    ///
    /// Entries of the second list replace same-named entries of the first.
    ///
    /// # Errors
    /// Returns [`Error::MalformedRecord`] if a patch index is outside `patch_names`.
    pub fn from_lists(
        patch_names: &PatchNames,
        texture1: &TextureList,
        texture2: Option<&TextureList>,
    ) -> Result<Self> {
        let mut set = Self::new();
        for entry in texture1.entries.iter().chain(texture2.into_iter().flat_map(|l| l.entries.iter())) {
            set.insert(resolve_entry(patch_names, entry)?);
        }
        Ok(set)
    }

    /// Insert a definition, replacing any existing one with the same name.
    ///
    /// Returns the replaced definition. A replaced texture keeps its position.
    pub fn insert(&mut self, texture: TextureDefinition) -> Option<TextureDefinition> {
        self.textures.insert(name_key(&texture.name), texture)
    }

    pub fn remove(&mut self, name: &str) -> Option<TextureDefinition> {
        self.textures.shift_remove(&name_key(name))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TextureDefinition> {
        self.textures.get(&name_key(name))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.textures.contains_key(&name_key(name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextureDefinition> {
        self.textures.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.textures.values().map(|t| t.name.as_str())
    }

    /// Reorder the set with a comparator over definitions
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&TextureDefinition, &TextureDefinition) -> Ordering,
    {
        self.textures.sort_by(|_, a, _, b| compare(a, b));
    }

    /// Convert back to raw lumps.
    ///
    /// PNAMES is regenerated by collecting patch names in first-seen order.
    /// With `texture1_names`, textures whose name is in that set go to
    /// TEXTURE1 and all others to TEXTURE2; without it everything goes to
    /// TEXTURE1 and no TEXTURE2 is produced. Keys in `texture1_names` must be
    /// [`name_key`] folded.
    #[must_use]
    pub fn export(&self, format: TextureFormat, texture1_names: Option<&HashSet<String>>) -> ExportedTextures {
        let mut patch_names = PatchNames::new();
        let mut texture1 = TextureList::new(format);
        let mut texture2 = texture1_names.map(|_| TextureList::new(format));

        for texture in self.textures.values() {
            let patches = texture
                .patches
                .iter()
                .map(|p| {
                    let index = patch_names.add_unique(&p.patch_name);
                    PatchRecord::new(p.origin_x, p.origin_y, index as i16)
                })
                .collect();

            let entry = TextureEntry {
                name: texture.name.clone(),
                flags: 0,
                width: texture.width,
                height: texture.height,
                column_directory: 0,
                patches,
            };

            match (&mut texture2, texture1_names) {
                (Some(list2), Some(names)) if !names.contains(&name_key(&texture.name)) => {
                    list2.entries.push(entry);
                }
                _ => texture1.entries.push(entry),
            }
        }

        ExportedTextures {
            patch_names,
            texture1,
            texture2,
        }
    }
}

fn resolve_entry(patch_names: &PatchNames, entry: &TextureEntry) -> Result<TextureDefinition> {
    let mut texture = TextureDefinition::new(entry.name.clone(), entry.width, entry.height);
    for record in &entry.patches {
        let patch_name = usize::try_from(record.patch)
            .ok()
            .and_then(|i| patch_names.get(i))
            .ok_or_else(|| {
                Error::malformed(
                    "TEXTUREx",
                    format!(
                        "texture {} references patch #{} but PNAMES has {} entries",
                        entry.name,
                        record.patch,
                        patch_names.len()
                    ),
                )
            })?;
        texture
            .patches
            .push(PatchPlacement::new(patch_name, record.origin_x, record.origin_y));
    }
    Ok(texture)
}

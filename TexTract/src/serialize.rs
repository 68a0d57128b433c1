//! Output serializer
//!
//! Writes an [`ExportSet`] through the [`Archive`] trait. Table lumps that
//! already exist in the target are replaced in place; everything else is
//! appended, so unrelated entries of an existing archive are left alone.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::info;

use crate::error::Result;
use crate::extract::{ExportSet, LumpCollection};
use crate::formats::{TextureFormat, compare_names, is_null_texture};
use crate::wad::{Archive, Lump};

/// Texture order with the null texture pinned first.
///
/// TEXTURE1 index 0 is never drawn, so whatever sits there must be a
/// placeholder.
#[derive(Debug, Clone, Default)]
pub struct TextureOrdering {
    null_texture: Option<String>,
}

impl TextureOrdering {
    /// With `None`, any of the stock placeholder names counts as the null texture
    #[must_use]
    pub fn new(null_texture: Option<&str>) -> Self {
        Self {
            null_texture: null_texture.map(str::to_string),
        }
    }

    #[must_use]
    pub fn is_null(&self, name: &str) -> bool {
        match &self.null_texture {
            Some(null) => null.eq_ignore_ascii_case(name),
            None => is_null_texture(name),
        }
    }

    #[must_use]
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match (self.is_null(a), self.is_null(b)) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => compare_names(a, b),
        }
    }
}

/// How the output texture lumps are shaped
#[derive(Debug, Clone, Default)]
pub struct OutputLayout {
    /// Wire variant of TEXTURE1/TEXTURE2
    pub format: TextureFormat,
    /// TEXTURE1 membership; `Some` means a TEXTURE2 is written too
    pub texture1_names: Option<HashSet<String>>,
    pub ordering: TextureOrdering,
    pub write_animated: bool,
    pub write_switches: bool,
}

/// Sort `export` and write it into `archive`
pub fn write_export<A: Archive>(archive: &mut A, mut export: ExportSet, layout: &OutputLayout) -> Result<()> {
    info!("Sorting entries");
    export
        .textures
        .sort_by(|a, b| layout.ordering.compare(&a.name, &b.name));
    export.patches.sort();
    export.flats.sort();
    export.namespace_textures.sort();

    info!("Writing entries");
    let exported = export.textures.export(layout.format, layout.texture1_names.as_ref());
    replace_or_append(archive, "TEXTURE1", exported.texture1.encode())?;
    if let Some(texture2) = exported.texture2 {
        replace_or_append(archive, "TEXTURE2", texture2.encode())?;
    }
    replace_or_append(archive, "PNAMES", exported.patch_names.encode())?;

    if layout.write_animated && !export.animated.is_empty() {
        replace_or_append(archive, "ANIMATED", export.animated.encode())?;
    }
    if layout.write_switches && !export.switches.is_empty() {
        replace_or_append(archive, "SWITCHES", export.switches.encode())?;
    }

    append_range(archive, "PP", export.patches)?;
    append_range(archive, "FF", export.flats)?;
    append_range(archive, "TX", export.namespace_textures)?;
    Ok(())
}

fn replace_or_append<A: Archive>(archive: &mut A, name: &str, data: Vec<u8>) -> Result<()> {
    match archive.index_of(name) {
        Some(index) => archive.replace_entry(index, data),
        None => archive.append_entries(vec![Lump::new(name, data)]),
    }
}

/// Append `<prefix>_START`, the lumps, `<prefix>_END`; nothing when empty
fn append_range<A: Archive>(archive: &mut A, prefix: &str, lumps: LumpCollection) -> Result<()> {
    if lumps.is_empty() {
        return Ok(());
    }
    let mut entries = Vec::with_capacity(lumps.len() + 2);
    entries.push(Lump::marker(format!("{prefix}_START")));
    entries.extend(lumps.into_lumps());
    entries.push(Lump::marker(format!("{prefix}_END")));
    archive.append_entries(entries)
}

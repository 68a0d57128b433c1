//! Builders for in-memory test archives

use crate::formats::{AnimatedTable, SwitchTable, TextureDefinition, TextureFormat, TextureSet};
use crate::wad::WadFile;

/// Assembles a WAD lump by lump
#[derive(Default)]
pub struct WadBuilder {
    wad: WadFile,
}

impl WadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lump(mut self, name: &str, data: &[u8]) -> Self {
        self.wad.push(name, data.to_vec());
        self
    }

    pub fn marker(self, name: &str) -> Self {
        self.lump(name, &[])
    }

    /// TEXTURE1 and PNAMES for `textures`
    pub fn textures(self, format: TextureFormat, textures: Vec<TextureDefinition>) -> Self {
        let mut set = TextureSet::new();
        for texture in textures {
            set.insert(texture);
        }
        let exported = set.export(format, None);
        self.lump("TEXTURE1", &exported.texture1.encode())
            .lump("PNAMES", &exported.patch_names.encode())
    }

    /// A `P_START`..`P_END` range whose payloads are the patch names
    pub fn patches(self, names: &[&str]) -> Self {
        self.range("P_START", "P_END", names)
    }

    pub fn flats(self, names: &[&str]) -> Self {
        self.range("F_START", "F_END", names)
    }

    pub fn range(self, start: &str, end: &str, names: &[&str]) -> Self {
        let mut builder = self.marker(start);
        for name in names {
            builder = builder.lump(name, name.as_bytes());
        }
        builder.marker(end)
    }

    pub fn animated(self, table: &AnimatedTable) -> Self {
        self.lump("ANIMATED", &table.encode())
    }

    pub fn switches(self, table: &SwitchTable) -> Self {
        self.lump("SWITCHES", &table.encode())
    }

    pub fn build(self) -> WadFile {
        self.wad
    }
}

/// A 64x64 texture made of `patches`, each at the origin
pub fn texture(name: &str, patches: &[&str]) -> TextureDefinition {
    patches
        .iter()
        .fold(TextureDefinition::new(name, 64, 64), |t, p| t.with_patch(*p, 0, 0))
}

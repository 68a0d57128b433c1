//! TEXTURE1/TEXTURE2 lumps: raw texture definition lists
//!
//! Two wire variants exist. The standard one (Doom, Heretic, Hexen) carries
//! an unused column directory pointer per texture and two unused fields per
//! patch; the reduced one (Strife) drops them. The variant is a property of
//! the whole list and is detected from the bytes of its first entry.
//!
//! Entries here keep patch references as PNAMES indices; see
//! [`TextureSet`](super::TextureSet) for the name-resolved view.

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use super::common::{NAME_LENGTH, put_name, read_name};
use crate::error::{Error, Result};

const RECORD: &str = "TEXTUREx";

/// Wire variant of a texture list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureFormat {
    /// 22-byte texture header, 10-byte patch records
    #[default]
    Standard,
    /// 18-byte texture header, 6-byte patch records
    Reduced,
}

impl TextureFormat {
    /// Size of a texture header, up to and including the patch count
    #[must_use]
    pub fn header_size(self) -> usize {
        match self {
            TextureFormat::Standard => 22,
            TextureFormat::Reduced => 18,
        }
    }

    /// Size of one patch record
    #[must_use]
    pub fn patch_size(self) -> usize {
        match self {
            TextureFormat::Standard => 10,
            TextureFormat::Reduced => 6,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TextureFormat::Standard => "standard",
            TextureFormat::Reduced => "reduced",
        }
    }

    /// Offset of the patch count inside a texture header
    fn patch_count_offset(self) -> usize {
        self.header_size() - 2
    }
}

/// One patch record of a raw texture entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchRecord {
    pub origin_x: i16,
    pub origin_y: i16,
    /// Index into PNAMES
    pub patch: i16,
    /// Unused by engines; only stored by the standard variant
    pub step_dir: i16,
    /// Unused by engines; only stored by the standard variant
    pub colormap: i16,
}

impl PatchRecord {
    /// Record with the conventional values for the unused fields.
    #[must_use]
    pub fn new(origin_x: i16, origin_y: i16, patch: i16) -> Self {
        Self {
            origin_x,
            origin_y,
            patch,
            step_dir: 1,
            colormap: 0,
        }
    }
}

/// One raw texture entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureEntry {
    pub name: String,
    /// Flags word (masked flag in Doom, flags and scale in Strife)
    pub flags: i32,
    pub width: u16,
    pub height: u16,
    /// Unused column directory pointer; only stored by the standard variant
    pub column_directory: i32,
    pub patches: Vec<PatchRecord>,
}

/// A decoded TEXTURE1/TEXTURE2 lump
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextureList {
    pub format: TextureFormat,
    pub entries: Vec<TextureEntry>,
}

impl TextureList {
    #[must_use]
    pub fn new(format: TextureFormat) -> Self {
        Self {
            format,
            entries: Vec::new(),
        }
    }

    /// Parse a texture list, sniffing the wire variant first
    ///
    /// # Errors
    /// Returns [`Error::MalformedRecord`] if an offset, count or entry runs past the data.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let format = detect_format(data)?;
        Self::decode_as(data, format)
    }

    /// Parse a texture list in a known wire variant
    ///
    /// # Errors
    /// Returns [`Error::MalformedRecord`] if an offset, count or entry runs past the data.
    pub fn decode_as(data: &[u8], format: TextureFormat) -> Result<Self> {
        let offsets = read_offsets(data)?;
        let mut entries = Vec::with_capacity(offsets.len());

        for (i, &offset) in offsets.iter().enumerate() {
            let entry = read_entry(data, offset, format)
                .map_err(|_| Error::malformed(RECORD, format!("texture #{i} at offset {offset} is truncated")))?;
            entries.push(entry);
        }

        Ok(Self { format, entries })
    }

    /// Serialize to lump bytes in this list's wire variant
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let format = self.format;
        let count = self.entries.len();
        let mut out = Vec::new();

        out.extend_from_slice(&(count as i32).to_le_bytes());

        // Offset table, then entries laid out back to back
        let mut offset = 4 + 4 * count;
        for entry in &self.entries {
            out.extend_from_slice(&(offset as i32).to_le_bytes());
            offset += format.header_size() + format.patch_size() * entry.patches.len();
        }

        for entry in &self.entries {
            put_name(&mut out, &entry.name, NAME_LENGTH);
            out.extend_from_slice(&entry.flags.to_le_bytes());
            out.extend_from_slice(&entry.width.to_le_bytes());
            out.extend_from_slice(&entry.height.to_le_bytes());
            if format == TextureFormat::Standard {
                out.extend_from_slice(&entry.column_directory.to_le_bytes());
            }
            out.extend_from_slice(&(entry.patches.len() as i16).to_le_bytes());

            for patch in &entry.patches {
                out.extend_from_slice(&patch.origin_x.to_le_bytes());
                out.extend_from_slice(&patch.origin_y.to_le_bytes());
                out.extend_from_slice(&patch.patch.to_le_bytes());
                if format == TextureFormat::Standard {
                    out.extend_from_slice(&patch.step_dir.to_le_bytes());
                    out.extend_from_slice(&patch.colormap.to_le_bytes());
                }
            }
        }

        out
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Guess the wire variant of a texture list from its first entry.
///
/// The end of the first entry is computed under both layouts and compared
/// with where the next entry starts (or the end of the lump for a single
/// entry). A reduced list read as standard picks up a patch origin as its
/// patch count, so its computed end lands somewhere implausible. When both
/// layouts line up, standard wins. When neither does, the first layout that
/// at least fits inside the lump is used.
///
/// # Errors
/// Returns [`Error::MalformedRecord`] if the offset table itself is truncated.
pub fn detect_format(data: &[u8]) -> Result<TextureFormat> {
    let offsets = read_offsets(data)?;
    let Some(&first) = offsets.first() else {
        return Ok(TextureFormat::Standard);
    };
    let boundary = offsets.get(1).copied().unwrap_or(data.len());

    let standard_end = entry_end(data, first, TextureFormat::Standard);
    let reduced_end = entry_end(data, first, TextureFormat::Reduced);

    let format = if standard_end == Some(boundary) {
        TextureFormat::Standard
    } else if reduced_end == Some(boundary) {
        TextureFormat::Reduced
    } else if standard_end.is_some_and(|end| end <= data.len()) {
        TextureFormat::Standard
    } else if reduced_end.is_some_and(|end| end <= data.len()) {
        TextureFormat::Reduced
    } else {
        TextureFormat::Standard
    };

    Ok(format)
}

/// Where an entry starting at `offset` would end under `format`
fn entry_end(data: &[u8], offset: usize, format: TextureFormat) -> Option<usize> {
    let count_at = offset + format.patch_count_offset();
    let bytes = data.get(count_at..count_at + 2)?;
    let count = i16::from_le_bytes([bytes[0], bytes[1]]);
    let count = usize::try_from(count).ok()?;
    Some(offset + format.header_size() + count * format.patch_size())
}

fn read_offsets(data: &[u8]) -> Result<Vec<usize>> {
    let mut cursor = Cursor::new(data);
    let count = cursor
        .read_i32::<LittleEndian>()
        .map_err(|_| Error::malformed(RECORD, "missing entry count"))?;
    let count = usize::try_from(count)
        .map_err(|_| Error::malformed(RECORD, format!("negative entry count {count}")))?;

    if 4 + count.saturating_mul(4) > data.len() {
        return Err(Error::malformed(
            RECORD,
            format!("offset table for {count} textures runs past the lump end"),
        ));
    }

    let mut offsets = Vec::with_capacity(count);
    for i in 0..count {
        let offset = cursor.read_i32::<LittleEndian>()?;
        let offset = usize::try_from(offset)
            .ok()
            .filter(|&o| o < data.len())
            .ok_or_else(|| Error::malformed(RECORD, format!("texture #{i} offset {offset} out of range")))?;
        offsets.push(offset);
    }
    Ok(offsets)
}

fn read_entry(data: &[u8], offset: usize, format: TextureFormat) -> std::io::Result<TextureEntry> {
    let mut cursor = Cursor::new(&data[offset..]);

    let name = read_name(&mut cursor, NAME_LENGTH)?;
    let flags = cursor.read_i32::<LittleEndian>()?;
    let width = cursor.read_u16::<LittleEndian>()?;
    let height = cursor.read_u16::<LittleEndian>()?;
    let column_directory = match format {
        TextureFormat::Standard => cursor.read_i32::<LittleEndian>()?,
        TextureFormat::Reduced => 0,
    };
    let patch_count = cursor.read_i16::<LittleEndian>()?.max(0) as usize;

    let mut patches = Vec::with_capacity(patch_count);
    for _ in 0..patch_count {
        let origin_x = cursor.read_i16::<LittleEndian>()?;
        let origin_y = cursor.read_i16::<LittleEndian>()?;
        let patch = cursor.read_i16::<LittleEndian>()?;
        let (step_dir, colormap) = match format {
            TextureFormat::Standard => (
                cursor.read_i16::<LittleEndian>()?,
                cursor.read_i16::<LittleEndian>()?,
            ),
            TextureFormat::Reduced => (1, 0),
        };
        patches.push(PatchRecord {
            origin_x,
            origin_y,
            patch,
            step_dir,
            colormap,
        });
    }

    Ok(TextureEntry {
        name,
        flags,
        width,
        height,
        column_directory,
        patches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample(format: TextureFormat) -> TextureList {
        TextureList {
            format,
            entries: vec![
                TextureEntry {
                    name: "STARTAN3".into(),
                    flags: 0,
                    width: 128,
                    height: 128,
                    column_directory: 0,
                    patches: vec![PatchRecord::new(0, 0, 0), PatchRecord::new(64, 0, 1)],
                },
                TextureEntry {
                    name: "DOOR3".into(),
                    flags: 0,
                    width: 64,
                    height: 72,
                    column_directory: 0,
                    patches: vec![PatchRecord::new(0, -8, 2)],
                },
            ],
        }
    }

    #[test]
    fn test_standard_round_trip() {
        let list = sample(TextureFormat::Standard);
        let bytes = list.encode();
        assert_eq!(detect_format(&bytes).unwrap(), TextureFormat::Standard);

        let decoded = TextureList::decode(&bytes).unwrap();
        assert_eq!(decoded, list);
        assert_eq!(decoded.encode(), bytes);
    }

    #[test]
    fn test_reduced_round_trip() {
        let list = sample(TextureFormat::Reduced);
        let bytes = list.encode();
        assert_eq!(detect_format(&bytes).unwrap(), TextureFormat::Reduced);

        let decoded = TextureList::decode(&bytes).unwrap();
        assert_eq!(decoded, list);
        assert_eq!(decoded.encode(), bytes);
    }

    #[test]
    fn test_decode_is_stable_after_normalization() {
        // Non-default unused fields survive a decode/encode/decode pass
        let mut list = sample(TextureFormat::Standard);
        list.entries[0].column_directory = 0x1234;
        list.entries[0].patches[0].colormap = 7;
        let first = TextureList::decode(&list.encode()).unwrap();
        let second = TextureList::decode(&first.encode()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_entry_reduced_detected() {
        let mut list = sample(TextureFormat::Reduced);
        list.entries.truncate(1);
        let bytes = list.encode();
        assert_eq!(detect_format(&bytes).unwrap(), TextureFormat::Reduced);
    }

    #[test]
    fn test_ambiguous_entry_detected_as_standard() {
        // column directory 4 read as a reduced patch count gives the same end
        let mut list = sample(TextureFormat::Standard);
        list.entries.truncate(1);
        list.entries[0].column_directory = 4;
        let bytes = list.encode();

        let first = 8; // count and one offset
        assert_eq!(entry_end(&bytes, first, TextureFormat::Standard), Some(bytes.len()));
        assert_eq!(entry_end(&bytes, first, TextureFormat::Reduced), Some(bytes.len()));
        assert_eq!(detect_format(&bytes).unwrap(), TextureFormat::Standard);
        assert_eq!(TextureList::decode(&bytes).unwrap(), list);
    }

    #[test]
    fn test_empty_list() {
        let bytes = TextureList::new(TextureFormat::Standard).encode();
        assert_eq!(bytes, 0i32.to_le_bytes());
        assert!(TextureList::decode(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_truncated_entry() {
        let mut bytes = sample(TextureFormat::Standard).encode();
        bytes.truncate(bytes.len() - 4);
        assert!(matches!(
            TextureList::decode_as(&bytes, TextureFormat::Standard),
            Err(Error::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_offset_table_past_end() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&10i32.to_le_bytes());
        bytes.extend_from_slice(&8i32.to_le_bytes());
        assert!(matches!(
            TextureList::decode(&bytes),
            Err(Error::MalformedRecord { .. })
        ));
    }
}

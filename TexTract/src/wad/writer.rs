//! WAD file writer
//!
//! Layout: header, lump payloads back to back, then the directory.

use std::io::Write;

use super::{DIRECTORY_ENTRY_SIZE, HEADER_SIZE, Lump, WadKind};
use crate::error::Result;
use crate::formats::common::put_name;
use crate::formats::NAME_LENGTH;

/// Serializes lumps into a WAD image
pub struct WadWriter<'a> {
    kind: WadKind,
    lumps: &'a [Lump],
}

impl<'a> WadWriter<'a> {
    pub fn new(kind: WadKind, lumps: &'a [Lump]) -> Self {
        Self { kind, lumps }
    }

    /// Build the complete file image
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let payload: usize = self.lumps.iter().map(|l| l.data.len()).sum();
        let directory_offset = HEADER_SIZE + payload;
        let mut out = Vec::with_capacity(directory_offset + self.lumps.len() * DIRECTORY_ENTRY_SIZE);

        out.extend_from_slice(&self.kind.magic());
        out.extend_from_slice(&(self.lumps.len() as i32).to_le_bytes());
        out.extend_from_slice(&(directory_offset as i32).to_le_bytes());

        let mut positions = Vec::with_capacity(self.lumps.len());
        for lump in self.lumps {
            positions.push(out.len());
            out.extend_from_slice(&lump.data);
        }

        for (lump, position) in self.lumps.iter().zip(positions) {
            out.extend_from_slice(&(position as i32).to_le_bytes());
            out.extend_from_slice(&(lump.data.len() as i32).to_le_bytes());
            put_name(&mut out, &lump.name, NAME_LENGTH);
        }
        out
    }

    /// Write the image to `writer`
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

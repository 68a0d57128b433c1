//! ANIMATED lump (Boom format)
//!
//! Each 23-byte record declares a texture or flat animation running from
//! one name to another in directory order. The lump ends with a full
//! record whose type byte is `0xFF`.

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use super::common::{compare_names, put_name, read_name};
use crate::error::{Error, Result};

const RECORD: &str = "ANIMATED";

/// Size of one record
pub const ANIMATED_RECORD_SIZE: usize = 23;

/// Width of the name fields (8 characters plus terminator)
const NAME_FIELD: usize = 9;

/// Type byte ending the table
const TERMINATOR: u8 = 0xFF;

const TYPE_TEXTURE: u8 = 0x01;
const TYPE_DECALS: u8 = 0x02;

/// What an animation cycles through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimatedKind {
    Flat,
    Texture,
}

/// One animation declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimatedEntry {
    pub kind: AnimatedKind,
    pub first_name: String,
    pub last_name: String,
    /// Tics each frame is shown
    pub ticks: i32,
    /// Whether decals may be placed on it (textures only)
    pub allows_decals: bool,
}

impl AnimatedEntry {
    #[must_use]
    pub fn texture(first_name: impl Into<String>, last_name: impl Into<String>, ticks: i32) -> Self {
        Self {
            kind: AnimatedKind::Texture,
            first_name: first_name.into(),
            last_name: last_name.into(),
            ticks,
            allows_decals: false,
        }
    }

    #[must_use]
    pub fn flat(first_name: impl Into<String>, last_name: impl Into<String>, ticks: i32) -> Self {
        Self {
            kind: AnimatedKind::Flat,
            first_name: first_name.into(),
            last_name: last_name.into(),
            ticks,
            allows_decals: false,
        }
    }

    #[must_use]
    pub fn is_texture(&self) -> bool {
        self.kind == AnimatedKind::Texture
    }

    /// Same kind and endpoints, ignoring timing and case
    #[must_use]
    pub fn same_cycle(&self, other: &AnimatedEntry) -> bool {
        self.kind == other.kind
            && compare_names(&self.first_name, &other.first_name).is_eq()
            && compare_names(&self.last_name, &other.last_name).is_eq()
    }

    fn type_byte(&self) -> u8 {
        match self.kind {
            AnimatedKind::Flat => 0,
            AnimatedKind::Texture if self.allows_decals => TYPE_TEXTURE | TYPE_DECALS,
            AnimatedKind::Texture => TYPE_TEXTURE,
        }
    }
}

/// A decoded ANIMATED lump
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimatedTable {
    pub entries: Vec<AnimatedEntry>,
}

impl AnimatedTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an ANIMATED lump.
    ///
    /// Reading stops at the terminator; a lump that ends cleanly on a record
    /// boundary without one is accepted.
    ///
    /// # Errors
    /// Returns [`Error::MalformedRecord`] if a record is cut short.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut table = Self::new();
        let mut cursor = Cursor::new(data);
        let mut offset = 0usize;

        while offset < data.len() {
            if data[offset] == TERMINATOR {
                break;
            }
            if offset + ANIMATED_RECORD_SIZE > data.len() {
                return Err(Error::malformed(
                    RECORD,
                    format!("record at offset {offset} is truncated"),
                ));
            }

            let type_byte = cursor.read_u8()?;
            let last_name = read_name(&mut cursor, NAME_FIELD)?;
            let first_name = read_name(&mut cursor, NAME_FIELD)?;
            let ticks = cursor.read_i32::<LittleEndian>()?;

            let kind = if type_byte & TYPE_TEXTURE != 0 {
                AnimatedKind::Texture
            } else {
                AnimatedKind::Flat
            };
            table.entries.push(AnimatedEntry {
                kind,
                first_name,
                last_name,
                ticks,
                allows_decals: kind == AnimatedKind::Texture && type_byte & TYPE_DECALS != 0,
            });
            offset += ANIMATED_RECORD_SIZE;
        }

        Ok(table)
    }

    /// Serialize to lump bytes, terminator included
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity((self.entries.len() + 1) * ANIMATED_RECORD_SIZE);
        for entry in &self.entries {
            out.push(entry.type_byte());
            put_name(&mut out, &entry.last_name, NAME_FIELD);
            put_name(&mut out, &entry.first_name, NAME_FIELD);
            out.extend_from_slice(&entry.ticks.to_le_bytes());
        }
        out.push(TERMINATOR);
        out.resize(out.len() + ANIMATED_RECORD_SIZE - 1, 0);
        out
    }

    /// Add an entry unless one with the same kind and endpoints is present.
    ///
    /// Returns whether the entry was added.
    pub fn add_unique(&mut self, entry: AnimatedEntry) -> bool {
        if self.entries.iter().any(|e| e.same_cycle(&entry)) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnimatedEntry> {
        self.entries.iter()
    }
}

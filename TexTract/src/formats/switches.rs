//! SWITCHES lump (Boom format)
//!
//! 20-byte records pairing a switch's off texture with its on texture.
//! A record with game id 0 ends the table.

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use super::common::{compare_names, put_name, read_name};
use crate::error::{Error, Result};

const RECORD: &str = "SWITCHES";

/// Size of one record
pub const SWITCH_RECORD_SIZE: usize = 20;

const NAME_FIELD: usize = 9;

/// One switch pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchEntry {
    pub off_name: String,
    pub on_name: String,
    /// 1 = shareware, 2 = registered, 3 = commercial
    pub game: u16,
}

impl SwitchEntry {
    #[must_use]
    pub fn new(off_name: impl Into<String>, on_name: impl Into<String>, game: u16) -> Self {
        Self {
            off_name: off_name.into(),
            on_name: on_name.into(),
            game,
        }
    }

    /// Same pair of names, ignoring game id and case
    #[must_use]
    pub fn same_pair(&self, other: &SwitchEntry) -> bool {
        compare_names(&self.off_name, &other.off_name).is_eq()
            && compare_names(&self.on_name, &other.on_name).is_eq()
    }
}

/// A decoded SWITCHES lump
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwitchTable {
    pub entries: Vec<SwitchEntry>,
}

impl SwitchTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a SWITCHES lump, stopping at the terminator or a clean end of data.
    ///
    /// # Errors
    /// Returns [`Error::MalformedRecord`] if a record is cut short.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut table = Self::new();
        let mut cursor = Cursor::new(data);

        while (cursor.position() as usize) < data.len() {
            let offset = cursor.position() as usize;
            if offset + SWITCH_RECORD_SIZE > data.len() {
                return Err(Error::malformed(
                    RECORD,
                    format!("record at offset {offset} is truncated"),
                ));
            }

            let off_name = read_name(&mut cursor, NAME_FIELD)?;
            let on_name = read_name(&mut cursor, NAME_FIELD)?;
            let game = cursor.read_u16::<LittleEndian>()?;
            if game == 0 {
                break;
            }
            table.entries.push(SwitchEntry::new(off_name, on_name, game));
        }

        Ok(table)
    }

    /// Serialize to lump bytes, terminator record included
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity((self.entries.len() + 1) * SWITCH_RECORD_SIZE);
        for entry in &self.entries {
            put_name(&mut out, &entry.off_name, NAME_FIELD);
            put_name(&mut out, &entry.on_name, NAME_FIELD);
            out.extend_from_slice(&entry.game.to_le_bytes());
        }
        out.resize(out.len() + SWITCH_RECORD_SIZE, 0);
        out
    }

    /// Add an entry unless the same pair is present. Returns whether it was added.
    pub fn add_unique(&mut self, entry: SwitchEntry) -> bool {
        if self.entries.iter().any(|e| e.same_pair(&entry)) {
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

    pub fn iter(&self) -> impl Iterator<Item = &SwitchEntry> {
        self.entries.iter()
    }
}

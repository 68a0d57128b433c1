//! PNAMES lump: the patch name table
//!
//! Texture definitions reference patches by position in this table.

use std::collections::HashMap;
use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use super::common::{NAME_LENGTH, name_key, put_name, read_name};
use crate::error::{Error, Result};

const RECORD: &str = "PNAMES";

/// Ordered table of patch names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchNames {
    names: Vec<String>,
    /// Name key -> first position
    lookup: HashMap<String, usize>,
}

impl PatchNames {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a PNAMES lump
    ///
    /// # Errors
    /// Returns [`Error::MalformedRecord`] if the count is negative or runs past the data.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);
        let count = cursor
            .read_i32::<LittleEndian>()
            .map_err(|_| Error::malformed(RECORD, "missing entry count"))?;

        let count = usize::try_from(count)
            .map_err(|_| Error::malformed(RECORD, format!("negative entry count {count}")))?;
        let needed = count
            .checked_mul(NAME_LENGTH)
            .and_then(|n| n.checked_add(4))
            .ok_or_else(|| Error::malformed(RECORD, format!("entry count {count} too large")))?;
        if needed > data.len() {
            return Err(Error::malformed(
                RECORD,
                format!("{count} names need {needed} bytes, lump has {}", data.len()),
            ));
        }

        let mut table = Self::new();
        for _ in 0..count {
            let name = read_name(&mut cursor, NAME_LENGTH)?;
            table.push(name);
        }
        Ok(table)
    }

    /// Serialize to PNAMES lump bytes
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + self.names.len() * NAME_LENGTH);
        out.extend_from_slice(&(self.names.len() as i32).to_le_bytes());
        for name in &self.names {
            put_name(&mut out, name, NAME_LENGTH);
        }
        out
    }

    /// Append a name, even if it is already present.
    pub fn push(&mut self, name: impl Into<String>) -> usize {
        let name = name.into();
        let index = self.names.len();
        self.lookup.entry(name_key(&name)).or_insert(index);
        self.names.push(name);
        index
    }

    /// Position of `name`, adding it at the end if it is not present yet.
    pub fn add_unique(&mut self, name: &str) -> usize {
        match self.index_of(name) {
            Some(index) => index,
            None => self.push(name),
        }
    }

    /// First position of `name` (case-insensitive)
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.lookup.get(&name_key(name)).copied()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

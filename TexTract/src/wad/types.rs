//! WAD container types

use super::{IWAD_MAGIC, PWAD_MAGIC};

/// Archive flavour stored in the header magic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WadKind {
    /// Complete game data
    Iwad,
    /// Patch archive loaded on top of an IWAD
    #[default]
    Pwad,
}

impl WadKind {
    #[must_use]
    pub fn from_magic(magic: [u8; 4]) -> Option<Self> {
        match magic {
            IWAD_MAGIC => Some(Self::Iwad),
            PWAD_MAGIC => Some(Self::Pwad),
            _ => None,
        }
    }

    #[must_use]
    pub fn magic(self) -> [u8; 4] {
        match self {
            Self::Iwad => IWAD_MAGIC,
            Self::Pwad => PWAD_MAGIC,
        }
    }
}

/// WAD file header
#[derive(Debug, Clone, Copy)]
pub struct WadHeader {
    pub kind: WadKind,
    pub entry_count: usize,
    pub directory_offset: u64,
}

/// One directory record as stored on disk
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub name: String,
    pub offset: u64,
    pub size: usize,
}

/// Name and payload length of an archive entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: String,
    pub length: usize,
}

/// A named entry with its bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lump {
    pub name: String,
    pub data: Vec<u8>,
}

impl Lump {
    #[must_use]
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Zero-length namespace marker
    #[must_use]
    pub fn marker(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    #[must_use]
    pub fn info(&self) -> EntryInfo {
        EntryInfo {
            name: self.name.clone(),
            length: self.data.len(),
        }
    }
}

//! WAD archive container
//!
//! Extraction works against the [`Archive`] trait; [`WadFile`] is the
//! in-memory implementation used for both sources and output.

mod batch;
mod file;
mod reader;
mod types;
mod writer;

pub use batch::{expand_inputs, find_wad_files};
pub use file::WadFile;
pub use reader::WadReader;
pub use types::*;
pub use writer::WadWriter;

use crate::error::Result;

/// Header magic of a complete game archive
pub const IWAD_MAGIC: [u8; 4] = *b"IWAD";

/// Header magic of a patch archive
pub const PWAD_MAGIC: [u8; 4] = *b"PWAD";

/// Size of the file header
pub const HEADER_SIZE: usize = 12;

/// Size of one directory record
pub const DIRECTORY_ENTRY_SIZE: usize = 16;

/// An ordered collection of named entries.
///
/// Names compare case-insensitively; when several entries share a name,
/// lookups return the first one.
pub trait Archive {
    fn entry_count(&self) -> usize;

    /// Name and length of the entry at `index`
    fn entry_at(&self, index: usize) -> Result<EntryInfo>;

    /// Index of the first entry called `name`
    fn index_of(&self, name: &str) -> Option<usize>;

    fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Payload of the entry at `index`
    fn entry_data(&self, index: usize) -> Result<Vec<u8>>;

    /// Payload of the first entry called `name`
    fn read_named(&self, name: &str) -> Result<Option<Vec<u8>>> {
        self.index_of(name).map(|i| self.entry_data(i)).transpose()
    }

    /// Overwrite the payload of the entry at `index`, keeping its name and position
    fn replace_entry(&mut self, index: usize, data: Vec<u8>) -> Result<()>;

    /// Append entries in order at the end of the directory
    fn append_entries(&mut self, entries: Vec<Lump>) -> Result<()>;
}

//! In-memory WAD archive

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::reader::WadReader;
use super::writer::WadWriter;
use super::{Archive, EntryInfo, Lump, WadKind};
use crate::error::{Error, Result};
use crate::formats::name_key;

/// A WAD held entirely in memory.
///
/// Lookups by name are case-insensitive and return the first match.
#[derive(Debug, Clone, Default)]
pub struct WadFile {
    kind: WadKind,
    lumps: Vec<Lump>,
    /// Name key -> first index
    lookup: HashMap<String, usize>,
    path: Option<PathBuf>,
}

impl WadFile {
    /// An empty PWAD
    #[must_use]
    pub fn create() -> Self {
        Self::default()
    }

    /// Load an archive from disk
    ///
    /// # Errors
    /// Returns [`Error::NotAnArchive`] if the file is not a well-formed WAD,
    /// or an IO error if it cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut reader = WadReader::new(BufReader::new(file), path)?;
        let (kind, lumps) = reader.read_all()?;

        let mut wad = Self::from_lumps(kind, lumps);
        wad.path = Some(path.to_path_buf());
        Ok(wad)
    }

    /// Parse an archive image
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = WadReader::new(Cursor::new(data), "<memory>")?;
        let (kind, lumps) = reader.read_all()?;
        Ok(Self::from_lumps(kind, lumps))
    }

    #[must_use]
    pub fn from_lumps(kind: WadKind, lumps: Vec<Lump>) -> Self {
        let mut wad = Self {
            kind,
            lumps: Vec::with_capacity(lumps.len()),
            lookup: HashMap::new(),
            path: None,
        };
        wad.extend(lumps);
        wad
    }

    /// Serialize to a WAD image
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        WadWriter::new(self.kind, &self.lumps).to_bytes()
    }

    /// Write to `path`, replacing it atomically.
    ///
    /// The image goes to a temporary file next to the target which is then
    /// renamed over it, so the target is never left half written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir)?;
        WadWriter::new(self.kind, &self.lumps).write(temp.as_file_mut())?;
        temp.persist(path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }

    #[must_use]
    pub fn kind(&self) -> WadKind {
        self.kind
    }

    /// Where the archive was loaded from, if it came from disk
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn lumps(&self) -> &[Lump] {
        &self.lumps
    }

    /// Append a single lump
    pub fn push(&mut self, name: impl Into<String>, data: Vec<u8>) {
        self.extend([Lump::new(name, data)]);
    }

    fn extend(&mut self, lumps: impl IntoIterator<Item = Lump>) {
        for lump in lumps {
            let index = self.lumps.len();
            self.lookup.entry(name_key(&lump.name)).or_insert(index);
            self.lumps.push(lump);
        }
    }

    fn lump(&self, index: usize) -> Result<&Lump> {
        self.lumps.get(index).ok_or(Error::EntryOutOfRange {
            index,
            count: self.lumps.len(),
        })
    }
}

impl Archive for WadFile {
    fn entry_count(&self) -> usize {
        self.lumps.len()
    }

    fn entry_at(&self, index: usize) -> Result<EntryInfo> {
        self.lump(index).map(Lump::info)
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.lookup.get(&name_key(name)).copied()
    }

    fn entry_data(&self, index: usize) -> Result<Vec<u8>> {
        self.lump(index).map(|l| l.data.clone())
    }

    fn replace_entry(&mut self, index: usize, data: Vec<u8>) -> Result<()> {
        let count = self.lumps.len();
        let lump = self
            .lumps
            .get_mut(index)
            .ok_or(Error::EntryOutOfRange { index, count })?;
        lump.data = data;
        Ok(())
    }

    fn append_entries(&mut self, entries: Vec<Lump>) -> Result<()> {
        self.extend(entries);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample() -> WadFile {
        let mut wad = WadFile::create();
        wad.push("MAP01", vec![]);
        wad.push("things", vec![1, 2, 3, 4]);
        wad.push("THINGS", vec![9]);
        wad
    }

    #[test]
    fn test_lookup_first_match_case_insensitive() {
        let wad = sample();
        assert_eq!(wad.index_of("THINGS"), Some(1));
        assert!(wad.contains("map01"));
        assert_eq!(wad.read_named("Things").unwrap(), Some(vec![1, 2, 3, 4]));
        assert_eq!(wad.read_named("LINEDEFS").unwrap(), None);
    }

    #[test]
    fn test_bytes_round_trip() {
        let wad = sample();
        let loaded = WadFile::from_bytes(&wad.to_bytes()).unwrap();
        assert_eq!(loaded.kind(), WadKind::Pwad);
        assert_eq!(loaded.lumps(), wad.lumps());
    }

    #[test]
    fn test_replace_and_out_of_range() {
        let mut wad = sample();
        wad.replace_entry(0, vec![7]).unwrap();
        assert_eq!(wad.entry_at(0).unwrap().length, 1);
        assert!(matches!(
            wad.replace_entry(10, vec![]),
            Err(Error::EntryOutOfRange { index: 10, count: 3 })
        ));
    }

    #[test]
    fn test_save_and_open() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.wad");

        sample().save(&path).unwrap();
        let loaded = WadFile::open(&path).unwrap();
        assert_eq!(loaded.entry_count(), 3);
        assert_eq!(loaded.path(), Some(path.as_path()));
    }

    #[test]
    fn test_open_rejects_non_wad() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.wad");
        std::fs::write(&path, b"this is not a wad file").unwrap();
        assert!(matches!(WadFile::open(&path), Err(Error::NotAnArchive { .. })));
    }
}

//! WAD file reader

use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, ReadBytesExt};

use super::{DIRECTORY_ENTRY_SIZE, DirectoryEntry, HEADER_SIZE, Lump, WadHeader, WadKind};
use crate::error::{Error, Result};
use crate::formats::common::read_name;
use crate::formats::NAME_LENGTH;

/// Reads the header, directory and lump payloads of a WAD
pub struct WadReader<R: Read + Seek> {
    reader: R,
    /// Reported in errors
    path: PathBuf,
    length: u64,
}

impl<R: Read + Seek> WadReader<R> {
    /// Wrap a source; `path` is only used to label errors.
    pub fn new(mut reader: R, path: impl AsRef<Path>) -> Result<Self> {
        let length = reader.seek(SeekFrom::End(0))?;
        Ok(Self {
            reader,
            path: path.as_ref().to_path_buf(),
            length,
        })
    }

    fn not_an_archive(&self, reason: impl Into<String>) -> Error {
        Error::NotAnArchive {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }

    /// Read and validate the 12-byte header
    pub fn read_header(&mut self) -> Result<WadHeader> {
        if self.length < HEADER_SIZE as u64 {
            return Err(self.not_an_archive(format!("file is only {} bytes", self.length)));
        }
        self.reader.seek(SeekFrom::Start(0))?;

        let mut magic = [0u8; 4];
        self.reader.read_exact(&mut magic)?;
        let kind = WadKind::from_magic(magic)
            .ok_or_else(|| self.not_an_archive(format!("bad magic {:?}", String::from_utf8_lossy(&magic))))?;

        let count = self.reader.read_i32::<LittleEndian>()?;
        let offset = self.reader.read_i32::<LittleEndian>()?;
        let (Ok(entry_count), Ok(directory_offset)) = (usize::try_from(count), u64::try_from(offset)) else {
            return Err(self.not_an_archive(format!("negative directory fields ({count}, {offset})")));
        };

        let directory_end = directory_offset + (entry_count as u64) * DIRECTORY_ENTRY_SIZE as u64;
        if directory_end > self.length {
            return Err(self.not_an_archive(format!(
                "directory of {entry_count} entries at {directory_offset} runs past end of file"
            )));
        }

        Ok(WadHeader {
            kind,
            entry_count,
            directory_offset,
        })
    }

    /// Read the directory described by `header`
    pub fn read_directory(&mut self, header: &WadHeader) -> Result<Vec<DirectoryEntry>> {
        self.reader.seek(SeekFrom::Start(header.directory_offset))?;

        let mut entries = Vec::with_capacity(header.entry_count);
        for index in 0..header.entry_count {
            let filepos = self.reader.read_i32::<LittleEndian>()?;
            let size = self.reader.read_i32::<LittleEndian>()?;
            let name = read_name(&mut self.reader, NAME_LENGTH)?;

            let (Ok(offset), Ok(size)) = (u64::try_from(filepos), usize::try_from(size)) else {
                return Err(self.not_an_archive(format!("entry #{index} ({name}) has negative position or size")));
            };
            if size > 0 && offset + size as u64 > self.length {
                return Err(self.not_an_archive(format!("entry #{index} ({name}) runs past end of file")));
            }

            entries.push(DirectoryEntry { name, offset, size });
        }
        Ok(entries)
    }

    /// Read the payload of one directory entry
    pub fn read_entry(&mut self, entry: &DirectoryEntry) -> Result<Vec<u8>> {
        let mut data = vec![0u8; entry.size];
        if entry.size > 0 {
            self.reader.seek(SeekFrom::Start(entry.offset))?;
            self.reader.read_exact(&mut data)?;
        }
        Ok(data)
    }

    /// Read the whole archive into memory
    pub fn read_all(&mut self) -> Result<(WadKind, Vec<Lump>)> {
        let header = self.read_header()?;
        let directory = self.read_directory(&header)?;

        let mut lumps = Vec::with_capacity(directory.len());
        for entry in &directory {
            let data = self.read_entry(entry)?;
            lumps.push(Lump::new(entry.name.clone(), data));
        }
        Ok((header.kind, lumps))
    }
}

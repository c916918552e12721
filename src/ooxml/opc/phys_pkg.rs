//! Physical (ZIP) layer of an OPC package.
//!
//! Members are addressed by ZIP member name, i.e. a part name without its
//! leading slash.

use crate::ooxml::opc::error::{OpcError, Result};
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Read access to the members of a ZIP-based package held in memory.
pub struct PhysPkgReader {
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl PhysPkgReader {
    /// Open a package file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data)
    }

    /// Wrap owned package bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(data))?;
        Ok(Self { archive })
    }

    /// Decompressed content of a member.
    pub fn blob_for(&mut self, membername: &str) -> Result<Vec<u8>> {
        let mut file = match self.archive.by_name(membername) {
            Ok(file) => file,
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(OpcError::PartNotFound(membername.to_string()));
            },
            Err(e) => return Err(e.into()),
        };
        let mut buf = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Member names in archive order.
    pub fn member_names(&self) -> Vec<String> {
        self.archive.file_names().map(str::to_string).collect()
    }

    /// Check whether a member exists.
    pub fn contains(&self, membername: &str) -> bool {
        self.archive.index_for_name(membername).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }
}

/// Writes package members into an in-memory ZIP archive.
pub struct PhysPkgWriter {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
}

impl PhysPkgWriter {
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
        }
    }

    /// Add a member. Names must be unique within the archive.
    pub fn write(&mut self, membername: &str, data: &[u8]) -> Result<()> {
        self.zip.start_file(membername, self.options)?;
        self.zip.write_all(data)?;
        Ok(())
    }

    /// Finish the archive and return its bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let cursor = self.zip.finish()?;
        Ok(cursor.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy `data` member by member, passing each member through `rewrite`.
///
/// Used to edit the text of an existing package without touching its layout:
/// `rewrite` returns `Some(new_bytes)` to replace a member or `None` to copy it
/// unchanged.
pub fn rewrite_members<F>(data: Vec<u8>, mut rewrite: F) -> Result<Vec<u8>>
where
    F: FnMut(&str, &[u8]) -> Result<Option<Vec<u8>>>,
{
    let mut reader = PhysPkgReader::from_bytes(data)?;
    let mut writer = PhysPkgWriter::new();

    for name in reader.member_names() {
        if name.ends_with('/') {
            continue;
        }
        let blob = reader.blob_for(&name)?;
        match rewrite(&name, &blob)? {
            Some(replacement) => writer.write(&name, &replacement)?,
            None => writer.write(&name, &blob)?,
        }
    }

    writer.finish()
}

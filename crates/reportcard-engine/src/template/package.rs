//! Reading and rewriting the zip package of a word document.

use std::io::{Cursor, Read, Write};

use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

/// One part of the package, decompressed.
#[derive(Debug, Clone)]
pub(crate) struct PackageEntry {
    pub(crate) name: String,
    pub(crate) data: Vec<u8>,
    compression: CompressionMethod,
    last_modified: DateTime,
    is_dir: bool,
}

impl PackageEntry {
    fn options(&self) -> FileOptions {
        let compression = match self.compression {
            CompressionMethod::Stored => CompressionMethod::Stored,
            _ => CompressionMethod::Deflated,
        };

        FileOptions::default()
            .compression_method(compression)
            .last_modified_time(self.last_modified)
    }
}

/// Reads every entry of the package in archive order.
pub(crate) fn read_package(bytes: &[u8]) -> Result<Vec<PackageEntry>, String> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| format!("not a word document: {e}"))?;

    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut file = archive.by_index(index).map_err(|e| e.to_string())?;

        let mut data = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut data)
            .map_err(|e| format!("{}: {e}", file.name()))?;

        entries.push(PackageEntry {
            name: file.name().to_string(),
            data,
            compression: file.compression(),
            last_modified: file.last_modified(),
            is_dir: file.is_dir(),
        });
    }

    Ok(entries)
}

/// Writes `entries` back out, substituting `replacement` for the entry at
/// `replaced_index`. Entry order, compression method and timestamps are kept.
pub(crate) fn write_package(
    entries: &[PackageEntry],
    replaced_index: usize,
    replacement: &[u8],
) -> Result<Vec<u8>, String> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for (index, entry) in entries.iter().enumerate() {
        if entry.is_dir {
            writer
                .add_directory(entry.name.as_str(), entry.options())
                .map_err(|e| format!("{}: {e}", entry.name))?;
            continue;
        }

        let data = if index == replaced_index {
            replacement
        } else {
            entry.data.as_slice()
        };

        writer
            .start_file(entry.name.as_str(), entry.options())
            .map_err(|e| format!("{}: {e}", entry.name))?;
        writer
            .write_all(data)
            .map_err(|e| format!("{}: {e}", entry.name))?;
    }

    let cursor = writer.finish().map_err(|e| e.to_string())?;
    Ok(cursor.into_inner())
}

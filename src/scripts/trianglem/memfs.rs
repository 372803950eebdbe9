//! `script.memfs` index scanner.
//!
//! The index layout is undocumented. Paths are stored as null-terminated UTF-16LE strings,
//! each preceded by a 16-byte window holding two u32 values and a u16 prefix.
use super::error::ExtractError;
use crate::ext::io::*;
use crate::types::IndexEntry;
use std::io::{Seek, SeekFrom};

/// `/` in UTF-16LE
const PATH_DELIMITER: [u8; 2] = [0x2F, 0x00];
const PATH_TERMINATOR: [u8; 2] = [0x00, 0x00];
const METADATA_WINDOW: usize = 16;
const PATH_PREFIX_OFFSET: usize = 8;
/// Only paths naming one of these are kept, the rest are binary noise.
const CONTENT_EXTS: [&str; 3] = [".tat", ".json", ".armd"];

#[derive(Debug, Default)]
pub struct MemfsIndex {
    pub entries: Vec<IndexEntry>,
    /// Paths dropped because they start less than 16 bytes into the buffer
    pub discarded: usize,
}

impl MemfsIndex {
    /// Scans the whole index for path strings.
    pub fn scan(data: &[u8]) -> Self {
        let mut index = MemfsIndex::default();
        let mut reader = MemReaderRef::new(data);
        let mut cursor = 0;
        while let Some(found) = memchr::memmem::find(&data[cursor..], &PATH_DELIMITER) {
            let path_offset = cursor + found;
            let path_end = find_terminator(data, path_offset);
            // Never look at bytes of this candidate again.
            cursor = (path_end + PATH_TERMINATOR.len()).min(data.len());
            let path = match decode_path(&data[path_offset..path_end]) {
                Some(path) => path,
                None => continue,
            };
            match read_entry(&mut reader, path_offset, path) {
                Ok(entry) => index.entries.push(entry),
                Err(_) => index.discarded += 1,
            }
        }
        index
    }
}

/// Returns the offset of the `00 00` terminator, or where the scan ran out of whole code units.
fn find_terminator(data: &[u8], start: usize) -> usize {
    let mut end = start;
    while end + 1 < data.len() && data[end..end + 2] != PATH_TERMINATOR {
        end += 2;
    }
    end
}

fn decode_path(raw: &[u8]) -> Option<String> {
    let path = utf16string::WStr::<utf16string::LittleEndian>::from_utf16le(raw)
        .ok()?
        .to_utf8();
    if CONTENT_EXTS.iter().any(|ext| path.contains(ext)) {
        Some(path)
    } else {
        None
    }
}

fn read_entry(
    reader: &mut MemReaderRef,
    path_offset: usize,
    path: String,
) -> Result<IndexEntry, ExtractError> {
    let malformed = || ExtractError::MalformedIndexEntry { path_offset };
    let metadata_offset = path_offset.checked_sub(METADATA_WINDOW).ok_or_else(malformed)?;
    reader
        .seek(SeekFrom::Start(metadata_offset as u64))
        .map_err(|_| malformed())?;
    let value1 = reader.read_u32().map_err(|_| malformed())?;
    let value2 = reader.read_u32().map_err(|_| malformed())?;
    let path_prefix = reader
        .peek_u16_at(metadata_offset + PATH_PREFIX_OFFSET)
        .map_err(|_| malformed())?;
    Ok(IndexEntry {
        path,
        metadata_offset,
        value1,
        value2,
        path_prefix,
    })
}

//! Splits the decompressed membody into per-scene `.tat` segments.
//!
//! The membody has no file table. Each script starts with a scene marker such as
//! `[XXX_XX_XXX_TOP]` or `[GALLERY_SCENE_XXX_START]`, so a segment runs from one
//! scene marker to the next.
use super::marker::find_scene_marker;
use crate::types::{IndexEntry, LogicalSegment};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
pub const SCRIPT_EXT: &str = ".tat";

pub fn split_segments(payload: &[u8], entries: &[IndexEntry]) -> Vec<LogicalSegment> {
    let start = if payload.starts_with(UTF8_BOM) {
        UTF8_BOM.len()
    } else {
        0
    };
    let mut segments = Vec::new();
    let mut next_marker = find_scene_marker(payload, start);
    while let Some(opening) = next_marker {
        next_marker = find_scene_marker(payload, opening.end + 1);
        let end_offset = next_marker.as_ref().map_or(payload.len(), |m| m.start);
        let header_text = opening.full_text();
        segments.push(LogicalSegment {
            resolved_filename: resolve_filename(&header_text, entries),
            raw_bytes: payload[opening.start..end_offset].to_vec(),
            header_text,
            start_offset: opening.start,
            end_offset,
        });
    }
    segments
}

/// Maps a scene marker to a file name.
///
/// The first index path containing the marker's leading `_` token wins. Several paths
/// usually share a token, so this is only a best guess; the order must stay the index
/// scan order to keep output names stable.
pub fn resolve_filename(header_text: &str, entries: &[IndexEntry]) -> String {
    let scene_name = header_text.trim_matches(&['[', ']'][..]);
    let token = scene_name.split('_').next().unwrap_or_default();
    entries
        .iter()
        .find(|e| e.path.contains(token))
        .map(|e| e.path.trim_start_matches('/').to_string())
        .unwrap_or_else(|| format!("{}{}", scene_name, SCRIPT_EXT))
}

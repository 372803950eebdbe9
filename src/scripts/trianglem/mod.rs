//! TriangleM engine `script.memfs` / `script.membody` pairs.
pub mod error;
pub mod marker;
pub mod membody;
pub mod memfs;
pub mod split;
pub mod tat;

pub use error::ExtractError;

use crate::types::*;

/// Runs the whole extraction for one volume.
///
/// Only a broken membody fails the volume. Index candidates that cannot be read and
/// payloads without scene markers are reported as warnings.
pub fn extract_volume(
    name: &str,
    index_data: &[u8],
    body_data: Vec<u8>,
) -> Result<VolumeExtraction, ExtractError> {
    let index = memfs::MemfsIndex::scan(index_data);
    let body = membody::Membody::new(body_data)?;
    let payload = body.decompress()?;
    let segments = split::split_segments(&payload, &index.entries);
    if segments.is_empty() {
        eprintln!("Warning: {}: {}", name, ExtractError::NoScenesFound);
        crate::COUNTER.inc_warning();
    }
    let mut records = Vec::new();
    for segment in segments.iter() {
        let text = segment.text();
        let script = tat::TatScript::new(&text, &segment.resolved_filename);
        records.extend(script.extract_dialogue());
    }
    Ok(VolumeExtraction {
        name: name.to_string(),
        entries: index.entries,
        payload,
        segments,
        records,
        discarded: index.discarded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn utf16(s: &str) -> Vec<u8> {
        s.encode_utf16().flat_map(|c| c.to_le_bytes()).collect()
    }

    fn membody(text: &str) -> Vec<u8> {
        let mut data = b"RZ\x10\x00\x00\x00".to_vec();
        let mut e = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        e.write_all(text.as_bytes()).unwrap();
        data.extend(e.finish().unwrap());
        data
    }

    #[test]
    fn test_extract_volume() {
        let mut index = vec![0u8; 16];
        index.extend(utf16("/100_main/op_01.tat"));
        index.extend_from_slice(&[0, 0]);
        let text = "\u{feff}[op_01_TOP]\n｛ユウ｝\n「おはよう」<KW>\n[ed_01_END]\n空が青い。<KW>\n";
        let volume = extract_volume("fsroot", &index, membody(text)).unwrap();
        assert_eq!(volume.name, "fsroot");
        assert_eq!(volume.entries.len(), 1);
        assert_eq!(volume.discarded, 0);
        assert_eq!(volume.payload, text.as_bytes());
        assert_eq!(volume.segments.len(), 2);
        assert_eq!(volume.segments[0].resolved_filename, "100_main/op_01.tat");
        assert_eq!(volume.segments[1].resolved_filename, "ed_01_END.tat");
        assert_eq!(volume.records.len(), 2);
        assert_eq!(volume.records[0].speaker, "ユウ");
        assert_eq!(volume.records[0].scene, "[op_01_TOP]");
        assert_eq!(volume.records[1].file, "ed_01_END.tat");
        assert_eq!(volume.records[1].typ, DialogueType::Narrative);
        assert_eq!(volume.records[1].line, 2);
    }

    #[test]
    fn test_volume_without_scenes() {
        let volume = extract_volume("fsroot2", &[], membody("no markers")).unwrap();
        assert!(volume.segments.is_empty());
        assert!(volume.records.is_empty());
    }

    #[test]
    fn test_broken_membody() {
        assert!(matches!(
            extract_volume("bad", &[], b"PK".to_vec()),
            Err(ExtractError::HeaderMismatch(_))
        ));
    }
}

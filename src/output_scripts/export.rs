//! Writes everything extracted from a volume to an output directory.
use super::*;
use crate::types::*;
use crate::utils::files::*;
use anyhow::Result;
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const SEGMENT_DIR: &str = "tat_files";

fn write_bytes(path: &Path, data: &[u8]) -> Result<()> {
    make_sure_dir_exists(path)?;
    let mut f = write_file(path)?;
    f.write_all(data)?;
    f.flush()?;
    Ok(())
}

/// Exports a volume, returns the paths written.
pub fn export_volume(
    volume: &VolumeExtraction,
    output: &Path,
    config: &ExtraConfig,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    let name = &volume.name;

    if config.dump_payload {
        let path = output.join(format!("{}_decompressed.bin", name));
        write_bytes(&path, &volume.payload)?;
        written.push(path);
    }

    let path = output.join(format!("{}_files.json", name));
    write_bytes(&path, serde_json::to_string_pretty(&volume.entries)?.as_bytes())?;
    written.push(path);

    if config.dump_inspect {
        let path = output.join(format!("{}_inspect.txt", name));
        write_bytes(&path, inspect::dump(&volume.payload).as_bytes())?;
        written.push(path);
    }

    if config.dump_segments {
        let dir = output.join(SEGMENT_DIR);
        let mut seen = HashSet::new();
        for segment in volume.segments.iter() {
            let filename = sanitize_segment_name(&segment.resolved_filename);
            if !seen.insert(filename.clone()) {
                eprintln!(
                    "Warning: {} is produced by more than one scene, keeping {}",
                    filename, segment.header_text
                );
                crate::COUNTER.inc_warning();
            }
            let path = dir.join(&filename);
            write_bytes(&path, &segment.raw_bytes)?;
            written.push(path);
        }
    }

    let path = output.join(format!("{}_dialogue.json", name));
    write_bytes(&path, serde_json::to_string_pretty(&volume.records)?.as_bytes())?;
    written.push(path);

    if config.dump_template {
        let (suffix, text) = match config.template_type {
            TemplateType::Text => (
                "translation_template",
                template::TemplateDumper::dump(&volume.records),
            ),
            TemplateType::M3t => ("translation", m3t::M3tDumper::dump(&volume.records)),
        };
        let ext = config.template_type.as_ref();
        let path = output.join(format!("{}_{}.{}", name, suffix, ext));
        write_bytes(&path, text.as_bytes())?;
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volume() -> VolumeExtraction {
        let segment = |header: &str, name: &str, bytes: &[u8]| LogicalSegment {
            header_text: header.to_string(),
            start_offset: 0,
            end_offset: bytes.len(),
            raw_bytes: bytes.to_vec(),
            resolved_filename: name.to_string(),
        };
        VolumeExtraction {
            name: "fsroot".to_string(),
            entries: vec![IndexEntry {
                path: "/100_main/op.tat".to_string(),
                metadata_offset: 4,
                value1: 1,
                value2: 2,
                path_prefix: 0x3488,
            }],
            payload: b"[OP_TOP]first[OP_END]second".to_vec(),
            segments: vec![
                segment("[OP_TOP]", "100_main/op.tat", b"[OP_TOP]first"),
                segment("[OP_END]", "100_main/op.tat", b"[OP_END]second"),
            ],
            records: vec![DialogueRecord {
                file: "100_main/op.tat".to_string(),
                line: 2,
                speaker: "ユウ".to_string(),
                text: "おはよう".to_string(),
                full_line: "「おはよう」<KW>".to_string(),
                context: "｛ユウ｝".to_string(),
                scene: "[OP_TOP]".to_string(),
                typ: DialogueType::Dialogue,
            }],
            discarded: 0,
        }
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "trianglem_tool_export_{}_{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_export_volume() {
        let out = temp_dir("all");
        let written = export_volume(&volume(), &out, &ExtraConfig::default()).unwrap();
        assert_eq!(written.len(), 7);
        let files: serde_json::Value =
            serde_json::from_slice(&std::fs::read(out.join("fsroot_files.json")).unwrap())
                .unwrap();
        assert_eq!(files[0]["path"], "/100_main/op.tat");
        assert_eq!(files[0]["val1"], 1);
        assert_eq!(files[0]["path_prefix"], 0x3488);
        let dialogue: serde_json::Value = serde_json::from_slice(
            &std::fs::read(out.join("fsroot_dialogue.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(dialogue[0]["type"], "dialogue");
        assert_eq!(dialogue[0]["full_line"], "「おはよう」<KW>");
        // The later scene wins on a name clash.
        let segment = std::fs::read(out.join(SEGMENT_DIR).join("100_main_op.tat")).unwrap();
        assert_eq!(segment, b"[OP_END]second");
        let template =
            std::fs::read_to_string(out.join("fsroot_translation_template.txt")).unwrap();
        assert!(template.starts_with("=== Entry 1 ===\n"));
        assert_eq!(
            std::fs::read(out.join("fsroot_decompressed.bin")).unwrap(),
            volume().payload
        );
        let _ = std::fs::remove_dir_all(&out);
    }

    #[test]
    fn test_export_minimal() {
        let out = temp_dir("minimal");
        let config = ExtraConfig {
            template_type: TemplateType::M3t,
            dump_payload: false,
            dump_inspect: false,
            dump_segments: false,
            dump_template: true,
            quiet: true,
        };
        let written = export_volume(&volume(), &out, &config).unwrap();
        assert_eq!(written.len(), 3);
        let m3t = std::fs::read_to_string(out.join("fsroot_translation.m3t")).unwrap();
        assert!(m3t.starts_with("○ NAME: ユウ\n"));
        assert!(!out.join(SEGMENT_DIR).exists());
        let _ = std::fs::remove_dir_all(&out);
    }
}

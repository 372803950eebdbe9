//! Human readable translation template.
//!
//! ```text
//! === Entry 1 ===
//! File: 100_main/op_01.tat
//! Line: 3
//! Scene: [OP_01_TOP]
//! Speaker: ユウ
//! Context:
//! ｛ユウ｝
//!
//! Original Text:
//! おはよう
//!
//! Translation:
//! [ENTER TRANSLATION HERE]
//!
//! ------------------------------------------------------------
//! ```
use crate::types::DialogueRecord;

pub const TRANSLATION_PLACEHOLDER: &str = "[ENTER TRANSLATION HERE]";
const SEPARATOR_WIDTH: usize = 60;

pub struct TemplateDumper {}

impl TemplateDumper {
    pub fn dump(records: &[DialogueRecord]) -> String {
        let mut result = String::new();
        for (i, record) in records.iter().enumerate() {
            result.push_str(&format!("=== Entry {} ===\n", i + 1));
            result.push_str(&format!("File: {}\n", record.file));
            result.push_str(&format!("Line: {}\n", record.line));
            result.push_str(&format!("Scene: {}\n", record.scene));
            if !record.speaker.is_empty() {
                result.push_str(&format!("Speaker: {}\n", record.speaker));
            }
            result.push_str(&format!("Context:\n{}\n", record.context));
            result.push_str(&format!("\nOriginal Text:\n{}\n", record.text));
            result.push_str(&format!("\nTranslation:\n{}\n", TRANSLATION_PLACEHOLDER));
            result.push('\n');
            result.push_str(&"-".repeat(SEPARATOR_WIDTH));
            result.push_str("\n\n");
        }
        result
    }
}

#[test]
fn test_dump() {
    use crate::types::DialogueType;
    let records = vec![
        DialogueRecord {
            file: "op.tat".to_string(),
            line: 3,
            speaker: "ユウ".to_string(),
            text: "おはよう".to_string(),
            full_line: "「おはよう」<KW>".to_string(),
            context: "[OP_TOP]\n｛ユウ｝".to_string(),
            scene: "[OP_TOP]".to_string(),
            typ: DialogueType::Dialogue,
        },
        DialogueRecord {
            file: "op.tat".to_string(),
            line: 4,
            speaker: String::new(),
            text: "空が青い。".to_string(),
            full_line: "空が青い。<KW>".to_string(),
            context: String::new(),
            scene: "[OP_TOP]".to_string(),
            typ: DialogueType::Narrative,
        },
    ];
    let out = TemplateDumper::dump(&records);
    let separator = "-".repeat(SEPARATOR_WIDTH);
    let expected = format!(
        "=== Entry 1 ===\nFile: op.tat\nLine: 3\nScene: [OP_TOP]\nSpeaker: ユウ\n\
         Context:\n[OP_TOP]\n｛ユウ｝\n\nOriginal Text:\nおはよう\n\n\
         Translation:\n[ENTER TRANSLATION HERE]\n\n{sep}\n\n\
         === Entry 2 ===\nFile: op.tat\nLine: 4\nScene: [OP_TOP]\n\
         Context:\n\n\nOriginal Text:\n空が青い。\n\n\
         Translation:\n[ENTER TRANSLATION HERE]\n\n{sep}\n\n",
        sep = separator
    );
    assert_eq!(out, expected);
}

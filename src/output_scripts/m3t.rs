//! Translation template in the m3t text format.
//!
//! A simple m3t file example:
//! ```text
//! ○ NAME: Example
//!
//! ○ Original message
//! ● Translated message
//! ```
use crate::types::DialogueRecord;

pub struct M3tDumper {}

impl M3tDumper {
    /// Dumps the records in M3T format.
    pub fn dump(records: &[DialogueRecord]) -> String {
        let mut result = String::new();
        for record in records {
            if !record.speaker.is_empty() {
                result.push_str(&format!("○ NAME: {}\n\n", record.speaker));
            }
            result.push_str(&format!("○ {}\n", record.text.replace("\n", "\\n")));
            if record.is_narrative() {
                result.push_str("●\n\n");
            } else {
                result.push_str("● 「」\n\n");
            }
        }
        result
    }
}

#[test]
fn test_dump() {
    use crate::types::DialogueType;
    let record = |speaker: &str, text: &str, typ| DialogueRecord {
        file: "a.tat".to_string(),
        line: 1,
        speaker: speaker.to_string(),
        text: text.to_string(),
        full_line: String::new(),
        context: String::new(),
        scene: String::new(),
        typ,
    };
    let records = vec![
        record("ユウ", "おはよう", DialogueType::Dialogue),
        record("", "空が青い。", DialogueType::Narrative),
    ];
    assert_eq!(
        M3tDumper::dump(&records),
        "○ NAME: ユウ\n\n○ おはよう\n● 「」\n\n○ 空が青い。\n●\n\n"
    );
}

//! Dialogue extraction from `.tat` scripts.
//!
//! A `.tat` script looks like:
//! ```text
//! [OP_01_TOP]
//! // comment
//! ｛Speaker Name｝
//! 「Dialogue text」<KW><WinClear ON>
//! Narrative text.<KW>
//! ```
//! Extraction is best-effort: lines which do not look like speech or narration are skipped.
use super::marker::find_marker;
use crate::types::{DialogueRecord, DialogueType};

const SPEAKER_OPEN: char = '｛';
const SPEAKER_CLOSE: char = '｝';
const QUOTE_OPEN: char = '「';
const QUOTE_CLOSE: char = '」';
const COMMENT: &str = "//";
/// Inline commands removed from narrative text
const CONTROL_TAGS: [&str; 5] = [
    "<KW>",
    "<WinClear>",
    "<WinClear ON>",
    "<WinClear OFF>",
    "</n>",
];
/// Prefix of text wait commands such as `<TW30>`
const TEXT_WAIT_TAG: &str = "<TW";
const SCENE_SEARCH_LINES: usize = 20;
const CONTEXT_LINES: usize = 2;
const MIN_DIALOGUE_LEN: usize = 2;
const MIN_NARRATIVE_LEN: usize = 4;
const MAX_NARRATIVE_LEN: usize = 200;

/// Returns true if `c` is Hiragana, Katakana or a CJK unified ideograph.
pub fn is_japanese(c: char) -> bool {
    matches!(c, '\u{3040}'..='\u{309F}' | '\u{30A0}'..='\u{30FF}' | '\u{4E00}'..='\u{9FFF}')
}

pub fn has_japanese(s: &str) -> bool {
    s.chars().any(is_japanese)
}

/// What a single script line holds.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Speaker(&'a str),
    /// A line with both quote glyphs; `None` if nothing is enclosed between them.
    Quoted(Option<&'a str>),
    Narrative(String),
    Other,
}

impl<'a> Line<'a> {
    fn classify(line: &'a str) -> Self {
        if let Some(rest) = line.strip_prefix(SPEAKER_OPEN) {
            if let Some(end) = rest.find(SPEAKER_CLOSE) {
                return Line::Speaker(rest[..end].trim());
            }
        }
        if line.contains(QUOTE_OPEN) && line.contains(QUOTE_CLOSE) {
            return Line::Quoted(quoted_text(line));
        }
        if line.starts_with(COMMENT) || line.starts_with('<') || line.starts_with(SPEAKER_OPEN) {
            return Line::Other;
        }
        if !has_japanese(line) {
            return Line::Other;
        }
        let text = strip_control_tags(line);
        let text = text.trim();
        let len = text.chars().count();
        if (MIN_NARRATIVE_LEN..MAX_NARRATIVE_LEN).contains(&len)
            && has_japanese(text)
            && !text.starts_with('[')
        {
            Line::Narrative(text.to_string())
        } else {
            Line::Other
        }
    }
}

fn quoted_text(line: &str) -> Option<&str> {
    let start = line.find(QUOTE_OPEN)? + QUOTE_OPEN.len_utf8();
    let end = start + line[start..].find(QUOTE_CLOSE)?;
    Some(line[start..end].trim())
}

fn is_dialogue(text: &str) -> bool {
    has_japanese(text) && text.chars().count() >= MIN_DIALOGUE_LEN
}

/// Removes inline display commands from a line.
pub fn strip_control_tags(line: &str) -> String {
    let mut text = line.to_string();
    for tag in CONTROL_TAGS {
        text = text.replace(tag, "");
    }
    while let Some(start) = text.find(TEXT_WAIT_TAG) {
        let end = text[start..]
            .find('>')
            .map_or(start + TEXT_WAIT_TAG.len(), |p| start + p + 1);
        text.replace_range(start..end, "");
    }
    text
}

#[derive(Debug)]
pub struct TatScript<'a> {
    filename: &'a str,
    lines: Vec<&'a str>,
    scene: String,
}

impl<'a> TatScript<'a> {
    pub fn new(text: &'a str, filename: &'a str) -> Self {
        let lines: Vec<&str> = text.split('\n').collect();
        let scene = scene_header(&lines);
        TatScript {
            filename,
            lines,
            scene,
        }
    }

    /// Scene marker of this script, empty if none was found near the top.
    pub fn scene(&self) -> &str {
        &self.scene
    }

    pub fn extract_dialogue(&self) -> Vec<DialogueRecord> {
        let mut records = Vec::new();
        let mut speaker = String::new();
        for (index, line) in self.lines.iter().enumerate() {
            let line = line.trim_end();
            match Line::classify(line) {
                Line::Speaker(name) => speaker = name.to_string(),
                Line::Quoted(Some(text)) if is_dialogue(text) => {
                    let speaker = std::mem::take(&mut speaker);
                    records.push(self.record(
                        index,
                        line,
                        speaker,
                        text.to_string(),
                        DialogueType::Dialogue,
                    ));
                }
                Line::Narrative(text) => {
                    records.push(self.record(
                        index,
                        line,
                        String::new(),
                        text,
                        DialogueType::Narrative,
                    ));
                }
                Line::Quoted(_) | Line::Other => {}
            }
        }
        records
    }

    fn record(
        &self,
        index: usize,
        line: &str,
        speaker: String,
        text: String,
        typ: DialogueType,
    ) -> DialogueRecord {
        DialogueRecord {
            file: self.filename.to_string(),
            line: index + 1,
            speaker,
            text,
            full_line: line.to_string(),
            context: self.context(index),
            scene: self.scene.clone(),
            typ,
        }
    }

    /// Up to two nearest non-empty, non-comment lines before `index`, in file order.
    fn context(&self, index: usize) -> String {
        let mut context: Vec<&str> = self.lines[..index]
            .iter()
            .rev()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty() && !l.starts_with(COMMENT))
            .take(CONTEXT_LINES)
            .collect();
        context.reverse();
        context.join("\n")
    }
}

fn scene_header(lines: &[&str]) -> String {
    lines
        .iter()
        .take(SCENE_SEARCH_LINES)
        .filter(|l| l.starts_with('['))
        .find_map(|l| find_marker(l.as_bytes(), 0))
        .map(|m| m.full_text())
        .unwrap_or_default()
}

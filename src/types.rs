use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// A path found in the memfs index together with the 16 bytes preceding it.
///
/// `val1`, `val2` and `path_prefix` are recovered as-is. Their meaning is unknown,
/// so nothing in this crate relies on them.
pub struct IndexEntry {
    pub path: String,
    /// Offset of the metadata window (path offset - 16)
    pub metadata_offset: usize,
    #[serde(rename = "val1")]
    pub value1: u32,
    #[serde(rename = "val2")]
    pub value2: u32,
    pub path_prefix: u16,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A contiguous range of the decompressed membody that is believed to be one `.tat` file.
pub struct LogicalSegment {
    /// Scene marker which opens this segment, brackets included.
    pub header_text: String,
    pub start_offset: usize,
    pub end_offset: usize,
    pub raw_bytes: Vec<u8>,
    pub resolved_filename: String,
}

impl LogicalSegment {
    /// Segment bytes decoded as UTF-8, invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.raw_bytes).into_owned()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogueType {
    /// Quoted speech
    Dialogue,
    /// Narration outside of quotes
    Narrative,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueRecord {
    pub file: String,
    /// 1-based line number inside the segment
    pub line: usize,
    pub speaker: String,
    pub text: String,
    pub full_line: String,
    pub context: String,
    pub scene: String,
    #[serde(rename = "type")]
    pub typ: DialogueType,
}

impl DialogueRecord {
    pub fn is_narrative(&self) -> bool {
        matches!(self.typ, DialogueType::Narrative)
    }
}

#[derive(Debug)]
/// Everything extracted from one `fsroot*` volume.
pub struct VolumeExtraction {
    pub name: String,
    pub entries: Vec<IndexEntry>,
    pub payload: Vec<u8>,
    pub segments: Vec<LogicalSegment>,
    pub records: Vec<DialogueRecord>,
    /// Index candidates dropped because their metadata could not be recovered
    pub discarded: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq, PartialOrd, Ord)]
/// Translation template layout
pub enum TemplateType {
    /// Entry blocks with context and a translation slot
    Text,
    /// m3t text format
    M3t,
}

impl AsRef<str> for TemplateType {
    fn as_ref(&self) -> &str {
        match self {
            TemplateType::Text => "txt",
            TemplateType::M3t => "m3t",
        }
    }
}

/// Exporter switches collected from the command line.
pub struct ExtraConfig {
    pub template_type: TemplateType,
    pub dump_payload: bool,
    pub dump_inspect: bool,
    pub dump_segments: bool,
    pub dump_template: bool,
    pub quiet: bool,
}

impl Default for ExtraConfig {
    fn default() -> Self {
        ExtraConfig {
            template_type: TemplateType::Text,
            dump_payload: true,
            dump_inspect: true,
            dump_segments: true,
            dump_template: true,
            quiet: false,
        }
    }
}

pub enum ScriptResult {
    Ok,
    Ignored,
}

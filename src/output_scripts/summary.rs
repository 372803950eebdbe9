//! Aggregate counts for a processed volume, printed for human review.
use crate::types::*;
use std::collections::{BTreeMap, BTreeSet};

const ROOT_ROUTE: &str = "(root)";

#[derive(Debug, PartialEq, Eq)]
pub struct Summary {
    pub entries: usize,
    pub discarded: usize,
    pub segments: usize,
    /// Number of index paths per route (second path component)
    pub routes: BTreeMap<String, usize>,
    pub records: usize,
    pub with_speaker: usize,
    pub narrative: usize,
    pub speakers: BTreeSet<String>,
    /// Number of records per scene marker
    pub scenes: BTreeMap<String, usize>,
}

/// Route of an index path, e.g. `100_main` for `/100_main/op.tat`.
pub fn route_of(path: &str) -> &str {
    if path.contains('/') {
        path.split('/').nth(1).unwrap_or_default()
    } else {
        ROOT_ROUTE
    }
}

impl Summary {
    pub fn new(volume: &VolumeExtraction) -> Self {
        let mut routes = BTreeMap::new();
        for entry in volume.entries.iter() {
            *routes.entry(route_of(&entry.path).to_string()).or_insert(0) += 1;
        }
        let mut scenes = BTreeMap::new();
        let mut speakers = BTreeSet::new();
        for record in volume.records.iter() {
            *scenes.entry(record.scene.clone()).or_insert(0) += 1;
            if !record.speaker.is_empty() {
                speakers.insert(record.speaker.clone());
            }
        }
        Summary {
            entries: volume.entries.len(),
            discarded: volume.discarded,
            segments: volume.segments.len(),
            routes,
            records: volume.records.len(),
            with_speaker: volume.records.iter().filter(|r| !r.speaker.is_empty()).count(),
            narrative: volume.records.iter().filter(|r| r.is_narrative()).count(),
            speakers,
            scenes,
        }
    }

    /// Index entries for which no segment was found in this volume.
    pub fn entries_without_content(&self) -> usize {
        self.entries.saturating_sub(self.segments)
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== File Extraction Summary ===")?;
        writeln!(f, "Memfs index entries: {}", self.entries)?;
        writeln!(f, "Discarded index candidates: {}", self.discarded)?;
        writeln!(f, "Scenes with content: {}", self.segments)?;
        writeln!(
            f,
            "Index entries without content: {}",
            self.entries_without_content()
        )?;
        writeln!(f, "Routes in memfs index:")?;
        for (route, count) in self.routes.iter() {
            writeln!(f, "  {}/: {} files", route, count)?;
        }
        writeln!(f, "=== Dialogue Extraction Statistics ===")?;
        writeln!(f, "Total dialogue entries: {}", self.records)?;
        writeln!(f, "- With speaker names: {}", self.with_speaker)?;
        writeln!(f, "- Narrative text: {}", self.narrative)?;
        writeln!(f, "Unique scenes: {}", self.scenes.len())?;
        writeln!(f, "Unique speakers: {}", self.speakers.len())?;
        writeln!(f, "Scenes found:")?;
        for (scene, count) in self.scenes.iter() {
            writeln!(f, "  {}: {} dialogue lines", scene, count)?;
        }
        Ok(())
    }
}

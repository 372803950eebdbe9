//! Bracketed markers such as `[OP_01_TOP]` inside `.tat` text.

/// Suffixes which turn a marker into a scene boundary.
const SCENE_SUFFIXES: [&str; 3] = ["_TOP]", "_START]", "_END]"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BracketMarker {
    /// Text between the brackets
    pub text: String,
    /// Offset of `[`
    pub start: usize,
    /// Offset of `]` (inclusive)
    pub end: usize,
}

impl BracketMarker {
    /// The marker with its brackets.
    pub fn full_text(&self) -> String {
        format!("[{}]", self.text)
    }

    pub fn is_scene_boundary(&self) -> bool {
        is_scene_boundary(&self.full_text())
    }
}

/// Returns true if `marker` (brackets included) ends with a scene suffix.
pub fn is_scene_boundary(marker: &str) -> bool {
    SCENE_SUFFIXES.iter().any(|s| marker.ends_with(s))
}

/// Finds the first `[`...`]` pair at or after `from`.
pub fn find_marker(buf: &[u8], from: usize) -> Option<BracketMarker> {
    let start = from + memchr::memchr(b'[', buf.get(from..)?)?;
    let end = start + 1 + memchr::memchr(b']', &buf[start + 1..])?;
    Some(BracketMarker {
        text: String::from_utf8_lossy(&buf[start + 1..end]).into_owned(),
        start,
        end,
    })
}

/// Finds the first scene boundary marker at or after `from`.
///
/// Every `[` is tried as a marker opening, so a stray `[` before a real marker does not hide it.
pub fn find_scene_marker(buf: &[u8], from: usize) -> Option<BracketMarker> {
    let mut cursor = from;
    loop {
        // No `]` after this `[` means no later marker can close either.
        let marker = find_marker(buf, cursor)?;
        if marker.is_scene_boundary() {
            return Some(marker);
        }
        cursor = marker.start + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_marker() {
        let buf = b"abc[OP_01_TOP]def";
        let m = find_marker(buf, 0).unwrap();
        assert_eq!(m.text, "OP_01_TOP");
        assert_eq!(m.start, 3);
        assert_eq!(m.end, 13);
        assert_eq!(m.full_text(), "[OP_01_TOP]");
        assert!(find_marker(buf, 4).is_none());
        assert!(find_marker(buf, 100).is_none());
    }

    #[test]
    fn test_unclosed_marker() {
        assert!(find_marker(b"text [never closed", 0).is_none());
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let m = find_marker(b"[A\xffB]", 0).unwrap();
        assert_eq!(m.text, "A\u{fffd}B");
        assert_eq!(m.end, 4);
    }

    #[test]
    fn test_scene_boundary() {
        assert!(is_scene_boundary("[A_TOP]"));
        assert!(is_scene_boundary("[GALLERY_SCENE_01_START]"));
        assert!(is_scene_boundary("[B_END]"));
        assert!(!is_scene_boundary("[TOP]"));
        assert!(!is_scene_boundary("[A_TOP_X]"));
        assert!(!is_scene_boundary("[BGM01]"));
    }

    #[test]
    fn test_find_scene_marker_skips_content() {
        let buf = "[BGM01]「……」[CH_01_END]".as_bytes();
        let m = find_scene_marker(buf, 0).unwrap();
        assert_eq!(m.text, "CH_01_END");
        assert_eq!(&buf[m.start..=m.end], b"[CH_01_END]");
    }

    #[test]
    fn test_stray_bracket_before_marker() {
        let buf = b"x[y [A_TOP]";
        let m = find_scene_marker(buf, 0).unwrap();
        // The first `[` already closes at the scene suffix.
        assert_eq!(m.start, 1);
        assert_eq!(m.text, "y [A_TOP");
        assert!(find_scene_marker(b"[a][b]", 0).is_none());
    }
}

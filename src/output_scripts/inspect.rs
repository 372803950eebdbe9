//! Inspection dump of a decompressed payload: a hex preview and the Japanese strings found in it.

const PREVIEW_LEN: usize = 1000;
/// Scanning stops this many bytes before the end of the payload
const TAIL_GUARD: usize = 20;
const RULE_WIDTH: usize = 50;

/// Lead bytes of 3-byte UTF-8 sequences, where kana and kanji live
fn is_cjk_lead(b: u8) -> bool {
    b >= 0xE0
}

fn has_cjk(s: &str) -> bool {
    s.chars().any(|c| ('\u{3040}'..='\u{9FFF}').contains(&c))
}

/// Finds null-terminated UTF-8 runs that contain Japanese text.
pub fn find_strings(data: &[u8]) -> Vec<(usize, String)> {
    let mut result = Vec::new();
    let mut pos = 0;
    while pos + TAIL_GUARD < data.len() {
        if !is_cjk_lead(data[pos]) {
            pos += 1;
            continue;
        }
        let end = memchr::memchr(0, &data[pos..]).map_or(data.len(), |p| pos + p);
        if end - pos > 3 {
            match std::str::from_utf8(&data[pos..end]) {
                Ok(text) => {
                    if has_cjk(text) {
                        result.push((pos, text.to_string()));
                    }
                }
                Err(_) => {
                    pos += 1;
                    continue;
                }
            }
        }
        pos = end;
    }
    result
}

pub fn dump(data: &[u8]) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut result = String::new();
    result.push_str(&format!("First {} bytes of decompressed data:\n", PREVIEW_LEN));
    result.push_str(&format!("{}\n", rule));
    result.push_str(&hex::encode(&data[..data.len().min(PREVIEW_LEN)]));
    result.push('\n');
    result.push_str(&format!("{}\n", rule));
    result.push_str("\nPrintable strings:\n");
    for (pos, text) in find_strings(data) {
        result.push_str(&format!("0x{:06x}: {}\n", pos, text));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_strings() {
        let mut data = b"\x01\x02".to_vec();
        data.extend_from_slice("こんにちは".as_bytes());
        data.push(0);
        data.extend_from_slice(b"\xE3\x81\xFF\xFF\x00");
        data.extend_from_slice(&[0u8; 24]);
        let strings = find_strings(&data);
        assert_eq!(strings, vec![(2, "こんにちは".to_string())]);
    }

    #[test]
    fn test_tail_is_not_scanned() {
        let mut data = "終わり".as_bytes().to_vec();
        data.resize(TAIL_GUARD, 0);
        assert!(find_strings(&data).is_empty());
    }

    #[test]
    fn test_dump_layout() {
        let out = dump(&[0xAB; 1200]);
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("First 1000 bytes of decompressed data:"));
        assert_eq!(lines.next(), Some("=".repeat(RULE_WIDTH).as_str()));
        assert_eq!(lines.next().map(|l| l.len()), Some(2000));
        assert!(out.ends_with("\nPrintable strings:\n"));
    }
}

//! `script.membody` container: `RZ`, a few unknown bytes, then one deflate stream.
use super::error::ExtractError;
use flate2::read::{DeflateDecoder, ZlibDecoder};
use std::io::Read;

pub const MEMBODY_MAGIC: &[u8; 2] = b"RZ";
/// zlib headers for default and best compression
const ZLIB_HEADERS: [[u8; 2]; 2] = [[0x78, 0x9C], [0x78, 0xDA]];
const STREAM_SEARCH_END: usize = 100;

#[derive(Debug)]
pub struct Membody {
    data: Vec<u8>,
    compress_offset: usize,
}

impl Membody {
    pub fn new(data: Vec<u8>) -> Result<Self, ExtractError> {
        if !data.starts_with(MEMBODY_MAGIC) {
            let mut magic = [0u8; 2];
            for (dst, src) in magic.iter_mut().zip(data.iter()) {
                *dst = *src;
            }
            return Err(ExtractError::HeaderMismatch(magic));
        }
        let compress_offset = (MEMBODY_MAGIC.len()..STREAM_SEARCH_END.min(data.len()))
            .find(|&i| {
                data.get(i..i + 2)
                    .map_or(false, |w| ZLIB_HEADERS.iter().any(|h| h.as_slice() == w))
            })
            .ok_or(ExtractError::StreamNotFound)?;
        Ok(Membody {
            data,
            compress_offset,
        })
    }

    /// Offset of the zlib header inside the membody.
    pub fn compress_offset(&self) -> usize {
        self.compress_offset
    }

    pub fn compressed_len(&self) -> usize {
        self.data.len() - self.compress_offset
    }

    /// Inflates the stream, falling back to raw deflate if the zlib wrapper is rejected.
    pub fn decompress(&self) -> Result<Vec<u8>, ExtractError> {
        let stream = &self.data[self.compress_offset..];
        let mut result = Vec::new();
        let zlib = match ZlibDecoder::new(stream).read_to_end(&mut result) {
            Ok(_) => return Ok(result),
            Err(e) => e,
        };
        let mut result = Vec::new();
        match DeflateDecoder::new(stream).read_to_end(&mut result) {
            Ok(_) => Ok(result),
            Err(raw) => Err(ExtractError::DecompressionFailed { zlib, raw }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn zlib(data: &[u8], level: flate2::Compression) -> Vec<u8> {
        let mut e = flate2::write::ZlibEncoder::new(Vec::new(), level);
        e.write_all(data).unwrap();
        e.finish().unwrap()
    }

    #[test]
    fn test_header_mismatch() {
        for data in [b"PK\x78\x9c".to_vec(), b"R".to_vec(), Vec::new(), b"rz".to_vec()] {
            assert!(matches!(
                Membody::new(data),
                Err(ExtractError::HeaderMismatch(_))
            ));
        }
        match Membody::new(b"XZ\x78\x9c".to_vec()) {
            Err(ExtractError::HeaderMismatch(magic)) => assert_eq!(&magic, b"XZ"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_stream_not_found() {
        assert!(matches!(
            Membody::new(b"RZ".to_vec()),
            Err(ExtractError::StreamNotFound)
        ));
        let mut data = b"RZ".to_vec();
        data.resize(STREAM_SEARCH_END, 0);
        data.extend_from_slice(&[0x78, 0x9C]);
        assert!(matches!(
            Membody::new(data),
            Err(ExtractError::StreamNotFound)
        ));
        // Header split across the end of the buffer
        assert!(matches!(
            Membody::new(b"RZ\x00\x78".to_vec()),
            Err(ExtractError::StreamNotFound)
        ));
    }

    #[test]
    fn test_round_trip() {
        let original = "[OP_01_TOP]\n｛ユウ｝\n「おはよう」<KW>\n".repeat(50);
        for level in [flate2::Compression::default(), flate2::Compression::best()] {
            let mut data = b"RZ\x00\x01\x02\x03".to_vec();
            data.extend(zlib(original.as_bytes(), level));
            let body = Membody::new(data).unwrap();
            assert_eq!(body.compress_offset(), 6);
            assert_eq!(body.decompress().unwrap(), original.as_bytes());
        }
    }

    #[test]
    fn test_first_header_wins() {
        let mut data = b"RZ\x78\xDA".to_vec();
        data.extend(zlib(b"payload", flate2::Compression::default()));
        let body = Membody::new(data).unwrap();
        assert_eq!(body.compress_offset(), 2);
        // 78 DA followed by another zlib header is not a valid stream either way
        assert!(body.decompress().is_err());
    }

    #[test]
    fn test_raw_deflate_fallback() {
        // A stored raw deflate block whose first bytes look like a zlib header.
        let mut data = b"RZ".to_vec();
        data.extend_from_slice(&[0x78, 0x9C, 0x00, 0x63, 0xFF]);
        data.extend(std::iter::repeat(b'a').take(0x9C));
        data.extend_from_slice(&[0x01, 0x00, 0x00, 0xFF, 0xFF]);
        let body = Membody::new(data).unwrap();
        assert_eq!(body.decompress().unwrap(), vec![b'a'; 0x9C]);
    }

    #[test]
    fn test_decompression_failed() {
        let body = Membody::new(b"RZ\x78\x9C\xFF\xFF\xFF\xFF".to_vec()).unwrap();
        let err = body.decompress().unwrap_err();
        assert!(matches!(err, ExtractError::DecompressionFailed { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }
}

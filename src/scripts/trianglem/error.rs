#[derive(Debug)]
/// Errors raised while extracting a TriangleM volume.
pub enum ExtractError {
    /// The membody does not start with `RZ`.
    HeaderMismatch([u8; 2]),
    /// No zlib header in the first 100 bytes of the membody.
    StreamNotFound,
    /// Neither zlib nor raw deflate could decode the stream.
    DecompressionFailed {
        zlib: std::io::Error,
        raw: std::io::Error,
    },
    /// A path sits too close to the start of the memfs to recover its metadata.
    MalformedIndexEntry { path_offset: usize },
    /// The payload contains no scene marker.
    NoScenesFound,
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtractError::DecompressionFailed { zlib, .. } => Some(zlib),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::HeaderMismatch(magic) => {
                write!(f, "Invalid membody header: {:02x?}", magic)
            }
            ExtractError::StreamNotFound => write!(f, "Could not find deflate stream"),
            ExtractError::DecompressionFailed { zlib, raw } => {
                write!(f, "Failed to decompress: {} (raw deflate: {})", zlib, raw)
            }
            ExtractError::MalformedIndexEntry { path_offset } => write!(
                f,
                "Path at offset {:#x} has no room for a metadata window",
                path_offset
            ),
            ExtractError::NoScenesFound => write!(f, "No scene markers found"),
        }
    }
}

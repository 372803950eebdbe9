pub mod trianglem;

pub use trianglem::{ExtractError, extract_volume};

//! Output writers for extracted volumes.
pub mod export;
pub mod inspect;
pub mod m3t;
pub mod summary;
pub mod template;

pub use export::export_volume;

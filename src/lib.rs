//! A Rust library for extracting scripts and dialogue from TriangleM engine
//! `script.memfs` / `script.membody` pairs.
pub mod ext;
pub mod output_scripts;
pub mod scripts;
pub mod types;
pub mod utils;

lazy_static::lazy_static! {
    pub static ref COUNTER: utils::counter::Counter = utils::counter::Counter::new();
}

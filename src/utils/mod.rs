pub mod counter;
pub mod files;

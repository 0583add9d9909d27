//! Library aggregation
//!
//! Assembles every book of the device with its file name and annotations.

mod loader;

pub use loader::{load_book, load_library};

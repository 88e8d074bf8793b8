// src/model/mod.rs
//
// Passive data holders populated by the page parser. No parsing state
// lives here; entities expose setters and display formatting only.

pub mod disc;
pub mod dreamcast;

pub use disc::{Disc, DiscField, Track};
pub use dreamcast::{Dreamcast, MemoryFile};

// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod core;
pub mod model;

pub mod dump;
pub mod error;
pub mod file;
pub mod params;
pub mod parse;
pub mod progress;
pub mod runner;

// src/params.rs
use std::path::PathBuf;

pub const DEFAULT_OUT_DIR: &str = "dumps";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Parse the page and print what the server reports.
    Read,
    /// Parse the page and download selected resources.
    Dump,
}

/// Where the HTML comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Url(String),
}

#[derive(Clone, Debug)]
pub struct Params {
    pub command: Command,
    pub source: Option<Source>,      // required; validated after parsing
    pub out: PathBuf,                // output directory for dumps
    pub dump_bios: bool,
    pub dump_flash: bool,
    pub dump_syscalls: bool,
    pub dump_gdi: bool,
    pub dump_page: bool,
    pub dump_disc: bool,             // all tracks; excludes tracks_to_dump
    pub tracks_to_dump: Vec<usize>,  // individual 0-based track indices
}

impl Params {
    pub fn new(command: Command) -> Self {
        Self {
            command,
            source: None,
            out: PathBuf::from(DEFAULT_OUT_DIR),
            dump_bios: false,
            dump_flash: false,
            dump_syscalls: false,
            dump_gdi: false,
            dump_page: false,
            dump_disc: false,
            tracks_to_dump: Vec::new(),
        }
    }
}

// src/model/dreamcast.rs
//! Console memory-image download locations: httpd-ack serves the BIOS,
//! flash, and syscalls areas under fixed file names.

use std::fmt;

/// The three addressable memory images httpd-ack exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryFile {
    Bios,
    Flash,
    Syscalls,
}

impl MemoryFile {
    pub const ALL: [MemoryFile; 3] = [MemoryFile::Bios, MemoryFile::Flash, MemoryFile::Syscalls];

    /// Fixed basename the server uses for this image.
    pub fn basename(self) -> &'static str {
        match self {
            MemoryFile::Bios => "dc_bios.bin",
            MemoryFile::Flash => "dc_flash.bin",
            MemoryFile::Syscalls => "syscalls.bin",
        }
    }

    pub fn from_basename(basename: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.basename() == basename)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            MemoryFile::Bios => "BIOS",
            MemoryFile::Flash => "Flash",
            MemoryFile::Syscalls => "Syscalls",
        }
    }

    /// Address range on the console, for display only.
    pub fn address_range(self) -> &'static str {
        match self {
            MemoryFile::Bios => "0x00000000 - 0x001FFFFF",
            MemoryFile::Flash => "0x00200000 - 0x0021FFFF",
            MemoryFile::Syscalls => "0x8C000000 - 0x8C007FFF",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dreamcast {
    pub bios_url: Option<String>,
    pub flash_url: Option<String>,
    pub syscalls_url: Option<String>,
}

impl Dreamcast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(&self, file: MemoryFile) -> Option<&str> {
        match file {
            MemoryFile::Bios => self.bios_url.as_deref(),
            MemoryFile::Flash => self.flash_url.as_deref(),
            MemoryFile::Syscalls => self.syscalls_url.as_deref(),
        }
    }

    /// Set a download URL by the server's file basename.
    /// Returns false if the basename is not a known memory image (the
    /// `misc` table also lists the disc GDI; callers handle that).
    /// NOTE: URL before name — the link's href precedes its text in the
    /// page markup, so that is the order rows accumulate in.
    pub fn set_url_property(&mut self, url: &str, basename: &str) -> bool {
        let Some(file) = MemoryFile::from_basename(basename) else {
            return false;
        };
        let slot = match file {
            MemoryFile::Bios => &mut self.bios_url,
            MemoryFile::Flash => &mut self.flash_url,
            MemoryFile::Syscalls => &mut self.syscalls_url,
        };
        *slot = Some(s!(url));
        true
    }
}

impl fmt::Display for Dreamcast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name     | Memory Addresses        | File Name    | URL")?;
        write!(f, "-------- | ----------------------- | ------------ | ------------------")?;
        for file in MemoryFile::ALL {
            write!(
                f,
                "\n{:<8} | {} | {:<12} | {}",
                file.display_name(),
                file.address_range(),
                file.basename(),
                self.url(file).unwrap_or("None"),
            )?;
        }
        Ok(())
    }
}

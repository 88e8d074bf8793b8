// src/dump.rs
//! Downloads the resources a parsed status page points at. All URL and
//! path decisions happen before any network traffic, so a missing URL
//! fails fast with the name of the resource that was unavailable.

use std::path::{Path, PathBuf};

use crate::core::net;
use crate::error::{Error, Result};
use crate::file::{ensure_directory, file_name_from_url};
use crate::model::{Disc, Dreamcast, MemoryFile};
use crate::progress::Progress;

/// httpd-ack is a Dreamcast on the local network; small blocks keep the
/// progress feedback responsive.
pub const DOWNLOAD_BLOCK_SIZE: usize = 1024;

/// Name used when dumping the status page itself.
pub const PAGE_DUMP_FILENAME: &str = "httpd-ack.html";

/// Which resources `dump_multiple` should fetch.
#[derive(Debug, Clone, Default)]
pub struct DumpSelection {
    pub bios: bool,
    pub flash: bool,
    pub syscalls: bool,
    pub gdi: bool,
    pub page: bool,
    /// All disc tracks. Mutually exclusive with `tracks`.
    pub disc: bool,
    /// Individual 0-based track indices.
    pub tracks: Vec<usize>,
}

pub struct Dumper<'a> {
    disc: &'a Disc,
    dreamcast: &'a Dreamcast,
    server_url: &'a str,
    output_dir: PathBuf,
}

impl<'a> Dumper<'a> {
    pub fn new(
        disc: &'a Disc,
        dreamcast: &'a Dreamcast,
        server_url: &'a str,
        output_dir: PathBuf,
    ) -> Self {
        Dumper { disc, dreamcast, server_url, output_dir }
    }

    /// Absolute download URL: stored URLs are usually server-relative.
    pub fn resolve_url(&self, file_url: &str) -> String {
        if file_url.contains(self.server_url) {
            s!(file_url)
        } else {
            format!("{}/{}", self.server_url, file_url)
        }
    }

    /// Local target path for a resolved URL, honoring an override name.
    pub fn output_path(&self, file_url: &str, name_override: Option<&str>) -> PathBuf {
        let name = match name_override {
            Some(n) => s!(n),
            None => file_name_from_url(file_url),
        };
        self.output_dir.join(name)
    }

    fn require_url(url: Option<&str>, display_name: &str) -> Result<String> {
        match url {
            Some(u) if !u.is_empty() => Ok(s!(u)),
            _ => Err(Error::MissingUrl(s!(display_name))),
        }
    }

    fn dump_file(
        &self,
        file_url: &str,
        name_override: Option<&str>,
        mut progress: Option<&mut (dyn Progress + '_)>,
    ) -> Result<()> {
        let url = self.resolve_url(file_url);
        let out_file = self.output_path(&url, name_override);

        if !self.output_dir.exists() {
            logf!("Creating output directory at '{}'", self.output_dir.display());
        }
        ensure_directory(&self.output_dir)?;

        logf!("Dumping '{}' to '{}'", url, out_file.display());
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("Dumping '{}' to '{}'...", url, out_file.display()));
        }
        net::download(&url, &out_file, DOWNLOAD_BLOCK_SIZE, progress)?;
        Ok(())
    }

    fn dump_memory_file(
        &self,
        file: MemoryFile,
        progress: Option<&mut (dyn Progress + '_)>,
    ) -> Result<()> {
        let display = format!("Dreamcast {}", file.display_name());
        let url = Self::require_url(self.dreamcast.url(file), &display)?;
        self.dump_file(&url, None, progress)
    }

    pub fn dump_bios(&self, progress: Option<&mut (dyn Progress + '_)>) -> Result<()> {
        self.dump_memory_file(MemoryFile::Bios, progress)
    }

    pub fn dump_flash(&self, progress: Option<&mut (dyn Progress + '_)>) -> Result<()> {
        self.dump_memory_file(MemoryFile::Flash, progress)
    }

    pub fn dump_syscalls(&self, progress: Option<&mut (dyn Progress + '_)>) -> Result<()> {
        self.dump_memory_file(MemoryFile::Syscalls, progress)
    }

    pub fn dump_gdi(&self, progress: Option<&mut (dyn Progress + '_)>) -> Result<()> {
        let url = Self::require_url(self.disc.gdi_url.as_deref(), "Disc GDI")?;
        self.dump_file(&url, None, progress)
    }

    /// Save the status page itself alongside the dumped data.
    pub fn dump_page(&self, progress: Option<&mut (dyn Progress + '_)>) -> Result<()> {
        self.dump_file(self.server_url, Some(PAGE_DUMP_FILENAME), progress)
    }

    /// All tracks of the inserted disc, in page order.
    pub fn dump_disc(&self, mut progress: Option<&mut (dyn Progress + '_)>) -> Result<()> {
        for track in &self.disc.tracks {
            let url = Self::require_url(Some(&track.url), &track.name)?;
            self.dump_file(&url, None, progress.as_deref_mut())?;
        }
        Ok(())
    }

    /// One track by 0-based index, validated against the actual track count.
    pub fn dump_track(
        &self,
        track_index: usize,
        progress: Option<&mut (dyn Progress + '_)>,
    ) -> Result<()> {
        let Some(track) = self.disc.tracks.get(track_index) else {
            return Err(Error::BadTrackIndex {
                index: track_index,
                max: self.disc.tracks.len().saturating_sub(1),
            });
        };
        let url = Self::require_url(Some(&track.url), &track.name)?;
        self.dump_file(&url, None, progress)
    }

    pub fn dump_multiple(
        &self,
        sel: &DumpSelection,
        mut progress: Option<&mut (dyn Progress + '_)>,
    ) -> Result<()> {
        if sel.bios {
            self.dump_bios(progress.as_deref_mut())?;
        }
        if sel.flash {
            self.dump_flash(progress.as_deref_mut())?;
        }
        if sel.syscalls {
            self.dump_syscalls(progress.as_deref_mut())?;
        }
        if sel.gdi {
            self.dump_gdi(progress.as_deref_mut())?;
        }
        if sel.page {
            self.dump_page(progress.as_deref_mut())?;
        }

        // Full-disc and per-track dumping are mutually exclusive.
        if sel.disc {
            self.dump_disc(progress.as_deref_mut())?;
        } else {
            for &index in &sel.tracks {
                self.dump_track(index, progress.as_deref_mut())?;
            }
        }
        Ok(())
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

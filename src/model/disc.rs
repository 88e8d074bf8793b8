// src/model/disc.rs
//! Disc and track data as reported by an httpd-ack status page.

use std::fmt;

const UNKNOWN: &str = "Unknown";

/// One disc track row. Immutable once built; owned by its `Disc` in
/// page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub url: String,
    pub name: String,
    pub sector_start: u32,
    pub sector_end: u32,
    pub size: u64,
}

impl Track {
    pub fn new(url: String, name: String, sector_start: u32, sector_end: u32, size: u64) -> Self {
        Track { url, name, sector_start, sector_end, size }
    }

    pub fn table_header() -> &'static str {
        "Name         | Start Sector | End Sector | Size        | URL"
    }

    pub fn table_divider() -> &'static str {
        "------------ | ------------ | ---------- | ----------- | ---------------"
    }

    pub fn table_string(&self) -> String {
        format!(
            "{:<12} | {:<12} | {:<10} | {:<11} | {}",
            self.name, self.sector_start, self.sector_end, self.size, self.url
        )
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.table_string())
    }
}

/// The disc properties the `cd-rom` sub-table can set, keyed by the
/// page's display labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscField {
    Title,
    MediaId,
    MediaConfig,
    Region,
    PeripheralString,
    ProductNumber,
    Version,
    ReleaseDate,
    ManufacturerId,
    Toc,
}

/// Display label → field. Labels are case-sensitive, exactly as the page
/// prints them.
const DISC_LABELS: &[(&str, DiscField)] = &[
    ("Title", DiscField::Title),
    ("Media ID", DiscField::MediaId),
    ("Media Config", DiscField::MediaConfig),
    ("Regions", DiscField::Region),
    ("Peripheral String", DiscField::PeripheralString),
    ("Product Number", DiscField::ProductNumber),
    ("Version", DiscField::Version),
    ("Release Date", DiscField::ReleaseDate),
    ("Manufacturer ID", DiscField::ManufacturerId),
    ("TOC", DiscField::Toc),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disc {
    pub is_dreamcast_disc: bool,
    pub title: String,
    pub media_id: String,
    pub media_config: String,
    pub region: String,
    pub peripheral_string: String,
    pub product_number: String,
    pub version: String,
    pub release_date: String,
    pub manufacturer_id: String,
    pub toc: String,
    pub tracks: Vec<Track>,
    pub gdi_url: Option<String>,
}

impl Default for Disc {
    fn default() -> Self {
        Disc {
            is_dreamcast_disc: true,
            title: s!(UNKNOWN),
            media_id: s!(UNKNOWN),
            media_config: s!(UNKNOWN),
            region: s!(UNKNOWN),
            peripheral_string: s!(UNKNOWN),
            product_number: s!(UNKNOWN),
            version: s!(UNKNOWN),
            release_date: s!(UNKNOWN),
            manufacturer_id: s!(UNKNOWN),
            toc: s!(UNKNOWN),
            tracks: Vec::new(),
            gdi_url: None,
        }
    }
}

impl Disc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_track(&mut self, track: Track) {
        self.tracks.push(track);
    }

    fn field_mut(&mut self, field: DiscField) -> &mut String {
        match field {
            DiscField::Title => &mut self.title,
            DiscField::MediaId => &mut self.media_id,
            DiscField::MediaConfig => &mut self.media_config,
            DiscField::Region => &mut self.region,
            DiscField::PeripheralString => &mut self.peripheral_string,
            DiscField::ProductNumber => &mut self.product_number,
            DiscField::Version => &mut self.version,
            DiscField::ReleaseDate => &mut self.release_date,
            DiscField::ManufacturerId => &mut self.manufacturer_id,
            DiscField::Toc => &mut self.toc,
        }
    }

    /// Set a property by its page display label.
    /// Returns false if the label is unknown (the page prints rows the
    /// model doesn't track; callers ignore those).
    pub fn set_property(&mut self, display_label: &str, value: &str) -> bool {
        match DISC_LABELS.iter().find(|(l, _)| *l == display_label) {
            Some((_, field)) => {
                *self.field_mut(*field) = s!(value);
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for Disc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let disc_type = if self.is_dreamcast_disc { "Dreamcast" } else { "Non-Dreamcast" };
        writeln!(f, "Disc Type: {disc_type}")?;
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Media ID: {}", self.media_id)?;
        writeln!(f, "Media Config: {}", self.media_config)?;
        writeln!(f, "Region: {}", self.region)?;
        writeln!(f, "Peripheral String: {}", self.peripheral_string)?;
        writeln!(f, "Product Number: {}", self.product_number)?;
        writeln!(f, "Version: {}", self.version)?;
        writeln!(f, "Release Date: {}", self.release_date)?;
        writeln!(f, "Manufacturer ID: {}", self.manufacturer_id)?;
        writeln!(f, "Table of Contents: {}", self.toc)?;
        match &self.gdi_url {
            Some(url) => writeln!(f, "GDI URL: {url}")?,
            None => writeln!(f, "GDI: Not Available")?,
        }
        writeln!(f, "Tracks:")?;
        writeln!(f, "\t{}", Track::table_header())?;
        write!(f, "\t{}", Track::table_divider())?;
        for track in &self.tracks {
            write!(f, "\n\t{}", track.table_string())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_property_known_labels() {
        let mut disc = Disc::new();
        assert!(disc.set_property("Title", "Sonic Adventure"));
        assert!(disc.set_property("Regions", "USA, Europe"));
        assert!(disc.set_property("TOC", "0x1234"));
        assert_eq!(disc.title, "Sonic Adventure");
        assert_eq!(disc.region, "USA, Europe");
        assert_eq!(disc.toc, "0x1234");
    }

    #[test]
    fn set_property_unknown_label_is_ignored() {
        let mut disc = Disc::new();
        assert!(!disc.set_property("Hardware ID", "SEGA SEGAKATANA"));
        assert_eq!(disc, Disc::new());
    }

    #[test]
    fn labels_are_case_sensitive() {
        let mut disc = Disc::new();
        assert!(!disc.set_property("title", "x"));
        assert!(!disc.set_property("TITLE", "x"));
        assert_eq!(disc.title, "Unknown");
    }

    #[test]
    fn value_stored_verbatim() {
        let mut disc = Disc::new();
        disc.set_property("Peripheral String", "  spaced  value ");
        assert_eq!(disc.peripheral_string, "  spaced  value ");
    }

    #[test]
    fn display_marks_non_dreamcast() {
        let mut disc = Disc::new();
        disc.is_dreamcast_disc = false;
        let text = disc.to_string();
        assert!(text.starts_with("Disc Type: Non-Dreamcast"));
        assert!(text.contains("GDI: Not Available"));
    }
}

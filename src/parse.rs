// src/parse.rs
//! Knows how to read the httpd-ack status page, nothing else.
//!
//! The page is one outer `<table>` holding three logically separate
//! sub-tables (`cd-rom`, `track`, `misc`). Sub-tables are not nested
//! elements; they are announced by a highlighted header row whose first
//! cell names the section. Below the table, free text carries the server
//! version banner.
//!
//! The parser is a single forward pass over tokenizer events. All
//! transient state lives in one `Session`; entities come out as plain
//! values. No IO happens here.

use crate::core::html::{Event, Tokenizer, attr};
use crate::error::ParseError;
use crate::model::{Disc, Dreamcast, Track};

/// Everything extracted from one status page.
#[derive(Debug, Clone, Default)]
pub struct PageData {
    pub disc: Disc,
    pub dreamcast: Dreamcast,
    pub server_version: Option<String>,
}

/// Where we are relative to the one outer table. One-way street.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    BeforeTable,
    InsideTable,
    AfterTable,
}

/// Header rows carry this background color on the `<tr>` or its `<td>`s.
const HEADER_BGCOLOR: &str = "#CCCCCC";

const BANNER_PREFIX: &str = "httpd-ack v";
const BANNER_SUFFIX: &str = " server";

/// Single-cell row text marking a disc the server could not identify.
const NON_DREAMCAST_WARNING: &str = "Not Dreamcast disc";

/// Parse a whole status page. Structural mismatches (unknown sub-table,
/// malformed track row) abort; the partial result is not returned.
pub fn parse_page(doc: &str) -> Result<PageData, ParseError> {
    let mut session = Session::new();
    for event in Tokenizer::new(doc) {
        session.handle(event)?;
    }
    Ok(session.into_page_data())
}

struct Session {
    disc: Disc,
    dreamcast: Dreamcast,
    server_version: Option<String>,

    phase: Phase,
    /// Sticky for the row: set by `<tr>` or any of its `<td>`s.
    in_header_row: bool,
    in_cell: bool,
    /// Lowercased first-cell text of the last header row. Persists across
    /// rows until the next header row.
    subtable: Option<String>,
    /// 0-based index of the open cell; None = not inside a row.
    cell_index: Option<usize>,
    row_values: Vec<String>,
}

fn is_header_attrs(attrs: &[(String, String)]) -> bool {
    attr(attrs, "bgcolor") == Some(HEADER_BGCOLOR)
}

impl Session {
    fn new() -> Self {
        Session {
            disc: Disc::new(),
            dreamcast: Dreamcast::new(),
            server_version: None,
            phase: Phase::BeforeTable,
            in_header_row: false,
            in_cell: false,
            subtable: None,
            cell_index: None,
            row_values: Vec::new(),
        }
    }

    fn into_page_data(self) -> PageData {
        PageData {
            disc: self.disc,
            dreamcast: self.dreamcast,
            server_version: self.server_version,
        }
    }

    fn handle(&mut self, event: Event) -> Result<(), ParseError> {
        match event {
            Event::Open { name, attrs } => self.open_tag(&name, &attrs),
            Event::Close { name } => self.close_tag(&name),
            Event::Text(data) => {
                self.text(&data);
                Ok(())
            }
        }
    }

    fn open_tag(&mut self, name: &str, attrs: &[(String, String)]) -> Result<(), ParseError> {
        match name {
            "table" => {
                if self.phase == Phase::BeforeTable {
                    self.phase = Phase::InsideTable;
                }
                Ok(())
            }

            "tr" if self.phase == Phase::InsideTable => {
                // The page sometimes omits </tr>; a new row implicitly
                // ends the previous one.
                if self.cell_index.is_some() {
                    self.end_row()?;
                }
                self.in_header_row = is_header_attrs(attrs);
                self.cell_index = Some(0);
                self.row_values.clear();
                Ok(())
            }

            "td" if self.phase == Phase::InsideTable => {
                self.in_cell = true;
                self.in_header_row = self.in_header_row || is_header_attrs(attrs);
                Ok(())
            }

            "a" => {
                if self.in_cell {
                    if let Some(href) = attr(attrs, "href") {
                        self.row_values.push(s!(href));
                    }
                }
                Ok(())
            }

            _ => Ok(()),
        }
    }

    fn close_tag(&mut self, name: &str) -> Result<(), ParseError> {
        match name {
            "table" if self.phase == Phase::InsideTable => {
                // No row processing past this point. A row left open here
                // is dropped; the server always closes the final row.
                self.phase = Phase::AfterTable;
                self.cell_index = None;
                self.in_cell = false;
                Ok(())
            }

            "tr" if self.phase == Phase::InsideTable => self.end_row(),

            "td" if self.phase == Phase::InsideTable => {
                if let Some(i) = self.cell_index {
                    self.cell_index = Some(i + 1);
                }
                self.in_cell = false;
                Ok(())
            }

            _ => Ok(()),
        }
    }

    fn text(&mut self, data: &str) {
        match self.phase {
            Phase::BeforeTable => {}

            Phase::AfterTable => {
                // "httpd-ack v1.0 server" style banner
                if let Some(version) = data
                    .trim()
                    .strip_prefix(BANNER_PREFIX)
                    .and_then(|rest| rest.strip_suffix(BANNER_SUFFIX))
                {
                    self.server_version = Some(s!(version));
                }
            }

            Phase::InsideTable => {
                if self.cell_index.is_none() {
                    return; // between rows
                }
                if self.in_header_row {
                    // First header cell names the sub-table.
                    if self.cell_index == Some(0) {
                        let label = data.trim();
                        if !label.is_empty() {
                            self.subtable = Some(label.to_ascii_lowercase());
                        }
                    }
                    return;
                }
                // Markup indentation arrives as whitespace text nodes;
                // real cell content is stored untouched.
                if self.in_cell && !data.trim().is_empty() {
                    self.row_values.push(s!(data));
                }
            }
        }
    }

    /// Row commit, from `</tr>` or implicitly from the next `<tr>`.
    fn end_row(&mut self) -> Result<(), ParseError> {
        self.cell_index = None;
        self.in_cell = false;

        if self.in_header_row {
            // Header rows only set the sub-table identity.
            self.in_header_row = false;
            return Ok(());
        }

        let values = std::mem::take(&mut self.row_values);
        if values.is_empty() {
            return Ok(()); // incomplete row, nothing accumulated
        }

        match self.subtable.as_deref().unwrap_or("") {
            "cd-rom" => self.end_cd_rom_row(values),
            "track" => self.end_track_row(values),
            "misc" => {
                self.end_misc_row(values);
                Ok(())
            }
            other => Err(ParseError::UnknownSubTable(s!(other))),
        }
    }

    fn end_cd_rom_row(&mut self, values: Vec<String>) -> Result<(), ParseError> {
        if values.len() == 1 && values[0].contains(NON_DREAMCAST_WARNING) {
            self.disc.is_dreamcast_disc = false;
            return Ok(());
        }
        if values.len() >= 2 {
            // Unknown labels are expected; the page lists properties the
            // disc model does not track.
            let _ = self.disc.set_property(&values[0], &values[1]);
        }
        Ok(())
    }

    fn end_track_row(&mut self, values: Vec<String>) -> Result<(), ParseError> {
        if values.len() != 5 {
            return Err(ParseError::BadTrackRow(values.len()));
        }
        let sector_start = parse_number::<u32>("start sector", &values[2])?;
        let sector_end = parse_number::<u32>("end sector", &values[3])?;
        let size = parse_number::<u64>("size", &values[4])?;

        let mut values = values;
        let name = values.swap_remove(1);
        let url = values.swap_remove(0);
        self.disc
            .add_track(Track::new(url, name, sector_start, sector_end, size));
        Ok(())
    }

    fn end_misc_row(&mut self, values: Vec<String>) {
        // Console memory images first; anything else is the disc GDI.
        // Extra trailing cells (the size column) are ignored.
        let bound = values
            .get(1)
            .is_some_and(|basename| self.dreamcast.set_url_property(&values[0], basename));
        if !bound {
            self.disc.gdi_url = Some(values[0].clone());
        }
    }
}

fn parse_number<T: std::str::FromStr>(
    field: &'static str,
    value: &str,
) -> Result<T, ParseError> {
    value.trim().parse().map_err(|_| ParseError::BadTrackNumber {
        field,
        value: s!(value),
    })
}

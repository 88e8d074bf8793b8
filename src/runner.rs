// src/runner.rs
use std::fs;

use crate::core::net;
use crate::dump::{DumpSelection, Dumper};
use crate::error::{Error, Result};
use crate::params::{Command, Params, Source};
use crate::parse::{self, PageData};
use crate::progress::Progress;

/// Top-level: fetch the page, parse it, then read or dump.
pub fn run(params: &Params, progress: Option<&mut (dyn Progress + '_)>) -> Result<()> {
    let source = params
        .source
        .as_ref()
        .ok_or_else(|| Error::Usage(s!("No source given")))?;

    let (html, identity) = load_source(source)?;
    let data = parse::parse_page(&html)?;

    match params.command {
        Command::Read => print_page_data(&data),
        Command::Dump => dump(params, &data, &identity, progress)?,
    }
    Ok(())
}

/// Fetch the HTML plus the source identity dumps resolve URLs against.
fn load_source(source: &Source) -> Result<(String, String)> {
    match source {
        Source::File(path) => {
            if !path.exists() {
                return Err(Error::FileNotFound(path.clone()));
            }
            if path.is_dir() {
                return Err(Error::IsADirectory(path.clone()));
            }
            logf!("Reading httpd-ack data from file at '{}'", path.display());
            let html = fs::read_to_string(path)?;
            Ok((html, path.display().to_string()))
        }
        Source::Url(url) => {
            logf!("Reading httpd-ack data from server at '{url}'");
            let html = net::http_get(url)?;
            Ok((html, url.clone()))
        }
    }
}

fn print_page_data(data: &PageData) {
    println!("Disc Data:");
    println!("{}", data.disc);
    println!();
    println!("Dreamcast Data:");
    println!("{}", data.dreamcast);
    println!();
    println!(
        "Server version: {}",
        data.server_version.as_deref().unwrap_or("Unknown")
    );
}

fn dump(
    params: &Params,
    data: &PageData,
    server_url: &str,
    progress: Option<&mut (dyn Progress + '_)>,
) -> Result<()> {
    logf!("Dumping Dreamcast data via httpd-ack server at '{server_url}'");

    let dumper = Dumper::new(&data.disc, &data.dreamcast, server_url, params.out.clone());
    let selection = DumpSelection {
        bios: params.dump_bios,
        flash: params.dump_flash,
        syscalls: params.dump_syscalls,
        gdi: params.dump_gdi,
        page: params.dump_page,
        disc: params.dump_disc,
        tracks: params.tracks_to_dump.clone(),
    };
    dumper.dump_multiple(&selection, progress)
}

// src/cli.rs
use std::{env, path::PathBuf};

use crate::error::{Error, Result};
use crate::params::{Command, Params, Source};
use crate::progress::ConsoleProgress;
use crate::runner;

pub fn run() -> Result<()> {
    let params = parse_cli(env::args().skip(1))?;
    let mut progress = ConsoleProgress::new();
    runner::run(&params, Some(&mut progress))
}

fn usage(msg: impl Into<String>) -> Error {
    Error::Usage(msg.into())
}

pub fn parse_cli(mut args: impl Iterator<Item = String>) -> Result<Params> {
    let command = match args.next().as_deref() {
        Some("read") => Command::Read,
        Some("dump") => Command::Dump,
        Some("-h") | Some("--help") => {
            eprintln!(include_str!("cli_help.txt"));
            std::process::exit(0);
        }
        Some(other) => return Err(usage(format!("Unknown command: {}", other))),
        None => return Err(usage("Specify a command: read | dump")),
    };

    let mut params = Params::new(command);
    let mut file: Option<PathBuf> = None;
    let mut url: Option<String> = None;

    while let Some(a) = args.next() {
        match a.as_str() {
            "-u" | "--url" => {
                let v = args.next().ok_or_else(|| usage("Missing value for --url"))?;
                url = Some(v);
            }
            "-f" | "--file" if command == Command::Read => {
                let v = args.next().ok_or_else(|| usage("Missing value for --file"))?;
                file = Some(PathBuf::from(v));
            }
            "-o" | "--out" if command == Command::Dump => {
                let v = args.next().ok_or_else(|| usage("Missing output directory"))?;
                params.out = PathBuf::from(v);
            }
            "-b" | "--bios" if command == Command::Dump => params.dump_bios = true,
            "--flash" if command == Command::Dump => params.dump_flash = true,
            "-s" | "--syscalls" if command == Command::Dump => params.dump_syscalls = true,
            "-g" | "--gdi" if command == Command::Dump => params.dump_gdi = true,
            "-p" | "--page" if command == Command::Dump => params.dump_page = true,
            "-d" | "--disc" if command == Command::Dump => params.dump_disc = true,
            "-t" | "--track" if command == Command::Dump => {
                let v = args.next().ok_or_else(|| usage("Missing value for --track"))?;
                params.tracks_to_dump = parse_track_list(&v)?;
            }
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(usage(format!("Unknown arg: {}", a))),
        }
    }

    // Source rules: read takes exactly one of --file/--url; dump needs --url.
    params.source = match (file, url) {
        (Some(_), Some(_)) => {
            return Err(usage("--file and --url are mutually exclusive"));
        }
        (Some(f), None) => Some(Source::File(f)),
        (None, Some(u)) => Some(Source::Url(u)),
        (None, None) => {
            let what = if command == Command::Read { "--file or --url" } else { "--url" };
            return Err(usage(format!("Specify {}", what)));
        }
    };

    if params.dump_disc && !params.tracks_to_dump.is_empty() {
        return Err(usage("--disc and --track are mutually exclusive"));
    }

    Ok(params)
}

/// "0,2-4,7" → [0, 2, 3, 4, 7]
fn parse_track_list(s: &str) -> Result<Vec<usize>> {
    let parse = |part: &str| -> Result<usize> {
        part.trim()
            .parse()
            .map_err(|_| usage(format!("Invalid track index: {}", part.trim())))
    };

    let mut out = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if let Some(dash) = part.find('-') {
            let a = parse(&part[..dash])?;
            let b = parse(&part[dash + 1..])?;
            if a > b {
                return Err(usage(format!("Invalid range: {}", part)));
            }
            out.extend(a..=b);
        } else {
            out.push(parse(part)?);
        }
    }
    out.sort_unstable();
    out.dedup();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> std::vec::IntoIter<String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn read_from_file() {
        let p = parse_cli(args(&["read", "--file", "page.html"])).unwrap();
        assert_eq!(p.command, Command::Read);
        assert_eq!(p.source, Some(Source::File(PathBuf::from("page.html"))));
    }

    #[test]
    fn read_needs_exactly_one_source() {
        assert!(matches!(parse_cli(args(&["read"])), Err(Error::Usage(_))));
        assert!(matches!(
            parse_cli(args(&["read", "-f", "a.html", "-u", "http://dc"])),
            Err(Error::Usage(_))
        ));
    }

    #[test]
    fn dump_flags_and_tracks() {
        let p = parse_cli(args(&[
            "dump", "-u", "http://192.168.1.5", "-o", "rips", "--bios", "--track", "0,2-4",
        ]))
        .unwrap();
        assert_eq!(p.command, Command::Dump);
        assert_eq!(p.source, Some(Source::Url(s!("http://192.168.1.5"))));
        assert_eq!(p.out, PathBuf::from("rips"));
        assert!(p.dump_bios);
        assert_eq!(p.tracks_to_dump, vec![0, 2, 3, 4]);
    }

    #[test]
    fn dump_rejects_file_source() {
        assert!(matches!(
            parse_cli(args(&["dump", "--file", "page.html"])),
            Err(Error::Usage(_))
        ));
    }

    #[test]
    fn disc_and_track_are_exclusive() {
        assert!(matches!(
            parse_cli(args(&["dump", "-u", "http://dc", "--disc", "--track", "1"])),
            Err(Error::Usage(_))
        ));
    }

    #[test]
    fn track_list_parses_ranges_and_dedups() {
        assert_eq!(parse_track_list("3,1,1,5-7").unwrap(), vec![1, 3, 5, 6, 7]);
        assert!(parse_track_list("4-2").is_err());
        assert!(parse_track_list("x").is_err());
    }
}

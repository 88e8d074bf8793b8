// tests/dump_paths.rs
//
// Tests for the dumper's URL/path decisions and its fail-before-network
// behavior. Nothing here opens a socket: missing URLs and bad indices
// must error out before any connection is attempted.

use std::path::PathBuf;

use dcdump::dump::{DumpSelection, Dumper, PAGE_DUMP_FILENAME};
use dcdump::error::Error;
use dcdump::model::{Disc, Dreamcast, Track};
use dcdump::progress::Progress;

const SERVER: &str = "http://192.168.1.5";

fn dumper_for<'a>(disc: &'a Disc, dc: &'a Dreamcast, out: PathBuf) -> Dumper<'a> {
    Dumper::new(disc, dc, SERVER, out)
}

#[test]
fn relative_urls_get_server_prefix() {
    let disc = Disc::new();
    let dc = Dreamcast::new();
    let d = dumper_for(&disc, &dc, PathBuf::from("out"));

    assert_eq!(
        d.resolve_url("iso9660/track01.bin"),
        "http://192.168.1.5/iso9660/track01.bin"
    );
}

#[test]
fn absolute_urls_pass_through() {
    let disc = Disc::new();
    let dc = Dreamcast::new();
    let d = dumper_for(&disc, &dc, PathBuf::from("out"));

    assert_eq!(
        d.resolve_url("http://192.168.1.5/dc_bios.bin"),
        "http://192.168.1.5/dc_bios.bin"
    );
}

#[test]
fn output_path_derives_name_and_honors_override() {
    let disc = Disc::new();
    let dc = Dreamcast::new();
    let d = dumper_for(&disc, &dc, PathBuf::from("out"));

    assert_eq!(
        d.output_path("http://192.168.1.5/track01.bin?dump", None),
        PathBuf::from("out").join("track01.bin")
    );
    assert_eq!(
        d.output_path(SERVER, Some(PAGE_DUMP_FILENAME)),
        PathBuf::from("out").join("httpd-ack.html")
    );
}

#[test]
fn missing_urls_name_the_resource() {
    let disc = Disc::new();
    let dc = Dreamcast::new();
    let tmp = tempfile::tempdir().unwrap();
    let d = dumper_for(&disc, &dc, tmp.path().to_path_buf());

    match d.dump_bios(None).unwrap_err() {
        Error::MissingUrl(what) => assert_eq!(what, "Dreamcast BIOS"),
        other => panic!("expected MissingUrl, got {other:?}"),
    }
    match d.dump_gdi(None).unwrap_err() {
        Error::MissingUrl(what) => assert_eq!(what, "Disc GDI"),
        other => panic!("expected MissingUrl, got {other:?}"),
    }
    // and nothing was created in the output directory
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn track_index_validated_against_track_count() {
    let mut disc = Disc::new();
    disc.add_track(Track::new("track01.bin".into(), "data".into(), 0, 44849, 91_997_184));
    disc.add_track(Track::new("track02.raw".into(), "audio".into(), 44850, 45149, 705_600));
    let dc = Dreamcast::new();
    let d = dumper_for(&disc, &dc, PathBuf::from("out"));

    match d.dump_track(5, None).unwrap_err() {
        Error::BadTrackIndex { index, max } => {
            assert_eq!(index, 5);
            assert_eq!(max, 1);
        }
        other => panic!("expected BadTrackIndex, got {other:?}"),
    }
}

#[test]
fn empty_selection_is_a_no_op() {
    let disc = Disc::new();
    let dc = Dreamcast::new();
    let tmp = tempfile::tempdir().unwrap();
    let d = dumper_for(&disc, &dc, tmp.path().to_path_buf());

    d.dump_multiple(&DumpSelection::default(), None).unwrap();
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[derive(Default)]
struct RecordingProgress {
    files: Vec<String>,
    logs: usize,
}

impl Progress for RecordingProgress {
    fn log(&mut self, _msg: &str) {
        self.logs += 1;
    }

    fn file_started(&mut self, name: &str, _total_bytes: Option<u64>) {
        self.files.push(name.to_string());
    }
}

#[test]
fn one_progress_sink_serves_the_whole_run() {
    let disc = Disc::new();
    let dc = Dreamcast::new();
    let tmp = tempfile::tempdir().unwrap();
    let d = dumper_for(&disc, &dc, tmp.path().to_path_buf());

    // The sink is lent to every branch of dump_multiple in turn...
    let mut sink = RecordingProgress::default();
    d.dump_multiple(&DumpSelection::default(), Some(&mut sink))
        .unwrap();
    assert!(sink.files.is_empty());
    assert_eq!(sink.logs, 0);

    // ...and stays usable for follow-up calls afterwards.
    let err = d.dump_gdi(Some(&mut sink)).unwrap_err();
    assert!(matches!(err, Error::MissingUrl(_)));
    assert!(sink.files.is_empty());
}

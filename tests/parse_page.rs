// tests/parse_page.rs
//
// End-to-end parse of a full httpd-ack status page, with the quirks the
// real server emits: markup indentation, an unknown property row, a row
// whose </tr> is missing, and the version banner after the table.

use dcdump::parse::parse_page;

const PAGE: &str = r##"<html>
<head><title>httpd-ack</title></head>
<body>
<table border=1>
  <tr bgcolor="#CCCCCC"><td>CD-ROM</td><td>Info</td></tr>
  <tr><td>Hardware ID</td><td>SEGA SEGAKATANA</td></tr>
  <tr><td>Title</td><td>Sonic Adventure</td></tr>
  <tr><td>Regions</td><td>USA, Europe</td>
  <tr><td>Media ID</td><td>GD-ROM1/1</td></tr>
  <tr><td>Media Config</td><td>1/1</td></tr>
  <tr><td>Peripheral String</td><td>0799A10</td></tr>
  <tr><td>Product Number</td><td>MK-51000</td></tr>
  <tr><td>Version</td><td>V1.005</td></tr>
  <tr><td>Release Date</td><td>19981213</td></tr>
  <tr><td>Manufacturer ID</td><td>SEGA ENTERPRISES</td></tr>
  <tr><td>TOC</td><td>0x41000096</td></tr>
  <tr bgcolor="#CCCCCC"><td>Track</td><td>Start</td><td>End</td><td>Size</td></tr>
  <tr><td><a href="iso9660/track01.bin">data</a></td><td>0</td><td>44849</td><td>91997184</td></tr>
  <tr><td><a href="iso9660/track02.raw">audio</a></td><td>44850</td><td>45149</td><td>705600</td></tr>
  <tr bgcolor="#CCCCCC"><td>Misc</td><td>Size</td></tr>
  <tr><td><a href="http://192.168.1.5/dc_bios.bin">dc_bios.bin</a></td><td>2097152</td></tr>
  <tr><td><a href="http://192.168.1.5/dc_flash.bin">dc_flash.bin</a></td><td>131072</td></tr>
  <tr><td><a href="http://192.168.1.5/syscalls.bin">syscalls.bin</a></td><td>32768</td></tr>
  <tr><td><a href="http://192.168.1.5/default.gdi">default.gdi</a></td><td>82</td></tr>
</table>
httpd-ack v1.0 server
</body>
</html>
"##;

#[test]
fn full_page_round_trip() {
    let data = parse_page(PAGE).expect("page should parse");

    // cd-rom sub-table
    let disc = &data.disc;
    assert!(disc.is_dreamcast_disc);
    assert_eq!(disc.title, "Sonic Adventure");
    assert_eq!(disc.region, "USA, Europe"); // committed despite missing </tr>
    assert_eq!(disc.media_id, "GD-ROM1/1");
    assert_eq!(disc.media_config, "1/1");
    assert_eq!(disc.peripheral_string, "0799A10");
    assert_eq!(disc.product_number, "MK-51000");
    assert_eq!(disc.version, "V1.005");
    assert_eq!(disc.release_date, "19981213");
    assert_eq!(disc.manufacturer_id, "SEGA ENTERPRISES");
    assert_eq!(disc.toc, "0x41000096");

    // track sub-table, in encounter order
    assert_eq!(disc.tracks.len(), 2);
    assert_eq!(disc.tracks[0].url, "iso9660/track01.bin");
    assert_eq!(disc.tracks[0].name, "data");
    assert_eq!(disc.tracks[0].sector_start, 0);
    assert_eq!(disc.tracks[0].sector_end, 44849);
    assert_eq!(disc.tracks[0].size, 91_997_184);
    assert_eq!(disc.tracks[1].name, "audio");
    assert_eq!(disc.tracks[1].size, 705_600);

    // misc sub-table: console images by basename, leftover is the GDI
    let dc = &data.dreamcast;
    assert_eq!(dc.bios_url.as_deref(), Some("http://192.168.1.5/dc_bios.bin"));
    assert_eq!(dc.flash_url.as_deref(), Some("http://192.168.1.5/dc_flash.bin"));
    assert_eq!(dc.syscalls_url.as_deref(), Some("http://192.168.1.5/syscalls.bin"));
    assert_eq!(disc.gdi_url.as_deref(), Some("http://192.168.1.5/default.gdi"));

    assert_eq!(data.server_version.as_deref(), Some("1.0"));
}

#[test]
fn non_dreamcast_page() {
    let page = r##"<html><body><table>
  <tr bgcolor="#CCCCCC"><td>CD-ROM</td><td>Info</td></tr>
  <tr><td>WARNING: Not Dreamcast disc</td></tr>
</table>
httpd-ack v1.0 server
</body></html>"##;

    let data = parse_page(page).expect("warning page should parse");
    assert!(!data.disc.is_dreamcast_disc);
    assert_eq!(data.disc.title, "Unknown");
    assert!(data.disc.tracks.is_empty());
    assert_eq!(data.server_version.as_deref(), Some("1.0"));
}

#[test]
fn layout_drift_is_fatal() {
    let page = r##"<table>
  <tr bgcolor="#CCCCCC"><td>Downloads</td></tr>
  <tr><td><a href="x.bin">x.bin</a></td></tr>
</table>"##;

    assert!(parse_page(page).is_err());
}

// src/core/net.rs

// HTTP/1.0 GET over TCP (std-only). httpd-ack speaks plain HTTP and closes
// the connection after each response, so 1.0 semantics are all we need.

use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    net::TcpStream,
    path::Path,
    time::Duration,
};

use crate::error::{Error, Result};
use crate::progress::Progress;

const TIMEOUT_SECS: u64 = 15;
const HEADER_CHUNK: usize = 4096;

/// Split a URL into (host, port, path). Scheme optional; only http.
pub fn split_url(url: &str) -> (String, u16, String) {
    let rest = url.strip_prefix("http://").unwrap_or(url);
    let (authority, path) = match rest.find('/') {
        Some(i) => (&rest[..i], &rest[i..]),
        None => (rest, "/"),
    };
    let (host, port) = match authority.rsplit_once(':') {
        Some((h, p)) => (h, p.parse::<u16>().unwrap_or(80)),
        None => (authority, 80),
    };
    (host.to_string(), port, path.to_string())
}

fn connect(url: &str) -> Result<(TcpStream, String, String)> {
    let (host, port, path) = split_url(url);
    let wrap = |source| Error::Server { url: s!(url), source };

    let s = TcpStream::connect((host.as_str(), port)).map_err(wrap)?;
    s.set_read_timeout(Some(Duration::from_secs(TIMEOUT_SECS)))
        .map_err(wrap)?;
    s.set_write_timeout(Some(Duration::from_secs(TIMEOUT_SECS)))
        .map_err(wrap)?;
    Ok((s, host, path))
}

fn send_request(s: &mut TcpStream, url: &str, host: &str, path: &str) -> Result<()> {
    let req = format!(
        "GET {} HTTP/1.0\r\nHost: {}\r\nUser-Agent: dcdump/0.2\r\nConnection: close\r\n\r\n",
        path, host
    );
    let wrap = |source| Error::Server { url: s!(url), source };
    s.write_all(req.as_bytes()).map_err(wrap)?;
    s.flush().map_err(wrap)?;
    Ok(())
}

/// Read from the stream until the end of the response headers.
/// Returns (header text, leftover body bytes already read).
fn read_headers(s: &mut TcpStream, url: &str) -> Result<(String, Vec<u8>)> {
    let mut buf: Vec<u8> = Vec::with_capacity(HEADER_CHUNK);
    let mut chunk = [0u8; HEADER_CHUNK];

    loop {
        let n = s.read(&mut chunk).map_err(|source| Error::Server {
            url: s!(url),
            source,
        })?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(split) = find_header_end(&buf) {
            let headers = String::from_utf8_lossy(&buf[..split]).into_owned();
            let body = buf.split_off(split + 4);
            return Ok((headers, body));
        }
    }
    Err(Error::Http {
        status: s!("malformed response (no header terminator)"),
        url: s!(url),
    })
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn check_status(headers: &str, url: &str) -> Result<()> {
    let status = headers.split("\r\n").next().unwrap_or("");
    if !status.contains("200") {
        return Err(Error::Http {
            status: s!(status),
            url: s!(url),
        });
    }
    Ok(())
}

fn content_length(headers: &str) -> Option<u64> {
    for line in headers.split("\r\n") {
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                return value.trim().parse().ok();
            }
        }
    }
    None
}

/// Fetch a whole response body as text.
pub fn http_get(url: &str) -> Result<String> {
    let (mut s, host, path) = connect(url)?;
    send_request(&mut s, url, &host, &path)?;

    let (headers, mut body) = read_headers(&mut s, url)?;
    check_status(&headers, url)?;

    s.read_to_end(&mut body).map_err(|source| Error::Server {
        url: s!(url),
        source,
    })?;
    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// Stream a response body to `out_file` in `block_size`-byte reads,
/// reporting each block to `progress`. Returns the byte count written.
pub fn download(
    url: &str,
    out_file: &Path,
    block_size: usize,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<u64> {
    let (mut s, host, path) = connect(url)?;
    send_request(&mut s, url, &host, &path)?;

    let (headers, leftover) = read_headers(&mut s, url)?;
    check_status(&headers, url)?;

    let display_name = out_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| s!(url));
    if let Some(p) = progress.as_deref_mut() {
        p.file_started(&display_name, content_length(&headers));
    }

    let mut out = BufWriter::new(File::create(out_file)?);
    let mut written = 0u64;

    if !leftover.is_empty() {
        out.write_all(&leftover)?;
        written += leftover.len() as u64;
        if let Some(p) = progress.as_deref_mut() {
            p.bytes_received(leftover.len() as u64);
        }
    }

    let mut block = vec![0u8; block_size.max(1)];
    loop {
        let n = s.read(&mut block).map_err(|source| Error::Server {
            url: s!(url),
            source,
        })?;
        if n == 0 {
            break;
        }
        out.write_all(&block[..n])?;
        written += n as u64;
        if let Some(p) = progress.as_deref_mut() {
            p.bytes_received(n as u64);
        }
    }
    out.flush()?;

    if let Some(p) = progress.as_deref_mut() {
        p.file_done(&display_name);
    }
    Ok(written)
}

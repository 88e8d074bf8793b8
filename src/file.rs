// src/file.rs

use std::{fs, io, path::Path};

use crate::error::Result;

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::other(format!(
            "Path exists but is not a directory: {}",
            dir.display()
        ))
        .into());
    }
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Local file name for a download URL: last path segment, query stripped.
pub fn file_name_from_url(url: &str) -> String {
    let no_query = url.split('?').next().unwrap_or(url);
    let name = no_query.rsplit('/').next().unwrap_or(no_query);
    if name.is_empty() {
        s!("index.html")
    } else {
        s!(name)
    }
}

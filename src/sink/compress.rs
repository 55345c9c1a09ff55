//! Gzip for rotated archives.

use crate::error::Error;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Replaces `path` with `path.gz`. Returns the compressed file's path.
pub(super) fn compress_file(path: &Path) -> Result<PathBuf, Error> {
    let mut reader = BufReader::new(File::open(path)?);

    let mut gz_path = path.as_os_str().to_owned();
    gz_path.push(".gz");
    let gz_path = PathBuf::from(gz_path);

    let writer = BufWriter::new(File::create(&gz_path)?);
    let mut encoder = GzEncoder::new(writer, Compression::default());
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?.flush()?;

    // The .gz now holds all content.
    fs::remove_file(path)?;

    Ok(gz_path)
}

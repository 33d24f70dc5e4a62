//! Byte-for-byte comparison of files on the local filesystem.

use quizzer_traits::{FileComparer, InspectionError};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const CHUNK_SIZE: usize = 64 * 1024;

/// Compares labelmap files on disk.
///
/// Files of different length are reported as different without reading
/// their contents.
#[derive(Debug, Default)]
pub struct FilesystemComparer;

impl FilesystemComparer {
    pub fn new() -> Self {
        Self
    }

    fn open(path: &str) -> Result<(File, u64), InspectionError> {
        let file = File::open(Path::new(path)).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                InspectionError::NotFound(path.to_string())
            } else {
                InspectionError::Unreadable {
                    path: path.to_string(),
                    message: e.to_string(),
                }
            }
        })?;
        let len = file.metadata()?.len();
        Ok((file, len))
    }
}

impl FileComparer for FilesystemComparer {
    fn identical(&self, left: &str, right: &str) -> Result<bool, InspectionError> {
        let (left_file, left_len) = Self::open(left)?;
        let (right_file, right_len) = Self::open(right)?;
        if left_len != right_len {
            return Ok(false);
        }

        let mut a = BufReader::new(left_file);
        let mut b = BufReader::new(right_file);
        let mut buf_a = vec![0u8; CHUNK_SIZE];
        let mut buf_b = vec![0u8; CHUNK_SIZE];
        loop {
            let n = read_full(&mut a, &mut buf_a)?;
            let m = read_full(&mut b, &mut buf_b)?;
            if n != m || buf_a[..n] != buf_b[..m] {
                return Ok(false);
            }
            if n == 0 {
                return Ok(true);
            }
        }
    }

    fn name(&self) -> &'static str {
        "FilesystemComparer"
    }
}

/// Fills `buf` as far as the reader allows; returns the number of bytes read.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}

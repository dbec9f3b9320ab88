//! Reads the source file into memory.

use std::fs;
use std::io;
use std::path::Path;

use log::debug;

use crate::error::{ConvertError, Result};

/// Reads the whole file at `path` as UTF-8 text.
///
/// A missing file is reported as [`ConvertError::NotFound`]; every other
/// failure, including invalid UTF-8, as [`ConvertError::Read`].
pub fn load_source(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(text) => {
            debug!("read {} bytes from {}", text.len(), path.display());
            Ok(text)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Err(ConvertError::NotFound {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(ConvertError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

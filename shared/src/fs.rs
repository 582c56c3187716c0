//! Filesystem helpers shared across mdlforge tools.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Maximum allowed model size for reading into memory.
pub const MAX_MODEL_BYTES: u64 = 64 * 1024 * 1024; // 64 MiB

/// Read a file into memory with a size cap.
pub fn read_file_with_limit(path: &Path, max_bytes: u64) -> Result<Vec<u8>> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;
    let len = metadata.len();
    if len > max_bytes {
        anyhow::bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            len,
            max_bytes
        );
    }
    fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Sibling path used while a file is being written (`<name>.tmp`).
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("out"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `bytes` to `path` so that readers only ever see the old file or the
/// complete new one.
///
/// The data goes to a sibling temp file which is synced and then renamed over
/// `path`. On failure the temp file is removed and `path` is left untouched.
pub fn write_file_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp_path = temp_path_for(path);

    let written = (|| {
        let mut f = fs::File::create(&tmp_path)?;
        f.write_all(bytes)?;
        f.sync_all()
    })();
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    #[cfg(windows)]
    {
        if path.exists() {
            // Windows rename fails if destination exists.
            fs::remove_file(path)?;
        }
    }

    fs::rename(&tmp_path, path).inspect_err(|_| {
        let _ = fs::remove_file(&tmp_path);
    })
}

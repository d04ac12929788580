// src/fetch/extract.rs
use crate::error::FetchError;
use anyhow::anyhow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zip::result::ZipError;
use zip::ZipArchive;

/// Unpack every entry of `zip_path` into `out_dir`.
///
/// Blocking; callers on the async runtime go through `spawn_blocking`.
/// Entry names that would escape `out_dir` fail the extraction instead of
/// being written.
pub fn extract_zip(zip_path: &Path, out_dir: &Path) -> Result<(), FetchError> {
    fs::create_dir_all(out_dir).map_err(|e| io_failure(zip_path, e.into()))?;

    let file = fs::File::open(zip_path).map_err(|e| io_failure(zip_path, e.into()))?;
    let mut archive = ZipArchive::new(file).map_err(|e| classify(zip_path, e))?;

    for idx in 0..archive.len() {
        let mut entry = archive.by_index(idx).map_err(|e| classify(zip_path, e))?;
        let rel_path = entry
            .enclosed_name()
            .ok_or_else(|| io_failure(zip_path, anyhow!("entry {:?} escapes the output directory", entry.name())))?;
        let out_path = out_dir.join(rel_path);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(|e| io_failure(zip_path, e.into()))?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_failure(zip_path, e.into()))?;
        }
        let mut out_file = fs::File::create(&out_path).map_err(|e| io_failure(zip_path, e.into()))?;
        io::copy(&mut entry, &mut out_file).map_err(|e| io_failure(zip_path, e.into()))?;
        debug!(entry = %out_path.display(), "extracted");
    }

    Ok(())
}

/// Extract the archive and delete it afterwards. The archive is removed only
/// when every entry came out cleanly; on any failure it stays on disk for
/// inspection.
pub fn extract_and_remove(zip_path: &Path, out_dir: &Path) -> Result<(), FetchError> {
    extract_zip(zip_path, out_dir)?;
    fs::remove_file(zip_path).map_err(|e| io_failure(zip_path, e.into()))?;
    info!(path = %zip_path.display(), "extracted and removed archive");
    Ok(())
}

fn classify(zip_path: &Path, err: ZipError) -> FetchError {
    match err {
        ZipError::Io(io_err) => io_failure(zip_path, io_err.into()),
        other => FetchError::CorruptArchive {
            path: zip_path.to_path_buf(),
            source: other,
        },
    }
}

fn io_failure(zip_path: &Path, source: anyhow::Error) -> FetchError {
    FetchError::Extraction {
        path: zip_path.to_path_buf(),
        source,
    }
}

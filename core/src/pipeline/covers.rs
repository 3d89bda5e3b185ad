//! # Cover Enumeration
//!
//! Finds cover bitmaps for distribution: every regular `.bmp` file in the
//! covers directory, visited in file-name order so a run is reproducible
//! regardless of how the filesystem happens to order directory entries.
//! Covers that fail to load or cannot hold the required shadow bits are
//! skipped with a warning rather than aborting the scan — the directory
//! may legitimately hold a mix of sizes.

use std::path::{Path, PathBuf};

use crate::pipeline::PipelineError;
use crate::raster::{load_bmp, PixelGrid};
use crate::stego::lsb;

fn has_bmp_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("bmp"))
        .unwrap_or(false)
}

/// Regular `.bmp` files in `dir`, sorted by file name.
fn bmp_entries(dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_bmp_extension(path))
        .collect();
    entries.sort();
    Ok(entries)
}

/// Count the `.bmp` files in a directory. Backs the CLI's default for
/// the total share count.
pub fn count_bmp_files(dir: &Path) -> Result<usize, PipelineError> {
    Ok(bmp_entries(dir)?.len())
}

/// Load up to `n` covers from `dir` that can hold `required_bits` each.
///
/// Unreadable or undersized files are skipped with a warning. Finding
/// fewer than `n` suitable covers is an error.
pub fn load_covers(
    dir: &Path,
    n: usize,
    required_bits: usize,
) -> Result<Vec<(PathBuf, PixelGrid)>, PipelineError> {
    let mut covers = Vec::with_capacity(n);

    for path in bmp_entries(dir)? {
        if covers.len() == n {
            break;
        }

        let grid = match load_bmp(&path) {
            Ok(grid) => grid,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping unreadable cover");
                continue;
            }
        };

        let available = lsb::capacity_bits(&grid);
        if available < required_bits {
            tracing::warn!(
                path = %path.display(),
                available,
                required = required_bits,
                "skipping undersized cover"
            );
            continue;
        }

        covers.push((path, grid));
    }

    if covers.len() < n {
        return Err(PipelineError::NotEnoughCovers {
            found: covers.len(),
            needed: n,
        });
    }

    tracing::debug!(count = covers.len(), dir = %dir.display(), "covers loaded");
    Ok(covers)
}

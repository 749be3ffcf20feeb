//! Locate trace files on disk.

use crate::utils::config::TRACE_FILE_EXTENSION;
use ignore::WalkBuilder;
use log::{debug, warn};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Union of explicit files and every trace file found under `dirs`
///
/// **Public** - used by every batch command
///
/// Directories are searched recursively for `*.json`. Symbolic links are not
/// followed. The result is de-duplicated and sorted. Unreadable entries are
/// logged and skipped.
pub fn find_trace_files(files: &[PathBuf], dirs: &[PathBuf]) -> Vec<PathBuf> {
    let mut found: BTreeSet<PathBuf> = files.iter().cloned().collect();

    for dir in dirs {
        collect_trace_files(dir, &mut found);
    }

    debug!("Discovered {} trace files", found.len());
    found.into_iter().collect()
}

fn collect_trace_files(dir: &Path, found: &mut BTreeSet<PathBuf>) {
    // Build trees are often gitignored; search everything.
    let walker = WalkBuilder::new(dir)
        .standard_filters(false)
        .follow_links(false)
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Cannot search {}: {}", dir.display(), e);
                continue;
            }
        };

        let is_trace = entry.file_type().is_some_and(|ft| ft.is_file())
            && entry
                .path()
                .extension()
                .is_some_and(|ext| ext == TRACE_FILE_EXTENSION);
        if is_trace {
            found.insert(entry.into_path());
        }
    }
}

//! source.rs
//!
//! Local source collaborator: lists a repository tree and fetches
//! file contents on demand. Per-file failures are reported, never
//! propagated.

use std::path::Path;

use walkdir::WalkDir;

use crate::types::FileRecord;

const MAX_DEPTH: usize = 12;
const MAX_FILE_BYTES: u64 = 256 * 1024;

/* ============================================================
   Listing
   ============================================================ */

pub fn list_repository(root: &Path) -> Vec<FileRecord> {
    let mut out = Vec::new();

    for entry in WalkDir::new(root)
        .max_depth(MAX_DEPTH)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| !is_ignored_dir(e.path()))
    {
        let rel = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .replace('\\', "/");

        let name = entry.file_name().to_string_lossy().to_string();
        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);

        out.push(FileRecord::new(rel, name, size));
    }

    out
}

/* ============================================================
   Content fetch
   ============================================================ */

pub fn fetch_content(root: &Path, record: &FileRecord) -> Result<String, String> {
    if record.size > MAX_FILE_BYTES {
        return Err(format!("file too large ({} bytes)", record.size));
    }

    let bytes = std::fs::read(root.join(&record.path)).map_err(|e| e.to_string())?;

    // Lossy is fine: this content feeds heuristics, not a compiler.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/* ============================================================
   Helpers
   ============================================================ */

fn is_ignored_dir(path: &Path) -> bool {
    path.components().any(|c| {
        matches!(
            c.as_os_str().to_str(),
            Some("target")
                | Some("node_modules")
                | Some(".git")
                | Some(".venv")
                | Some("dist")
                | Some("build")
        )
    })
}

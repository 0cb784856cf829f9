//! testgen/select.rs
//!
//! Bounded, priority-ordered file selection. Structure detection
//! always sees the full classified set; the cap only limits what goes
//! on to deep content analysis.

use crate::detectors::{classifier, strategy, structure};
use crate::types::{FileCategory, FileRecord, ProjectStructure, TestStrategy};

#[derive(Debug)]
pub struct Selection {
    pub selected: Vec<FileRecord>,
    pub structure: ProjectStructure,
    pub strategy: TestStrategy,
    /// Count of files that survived classification at all.
    pub classified: usize,
}

/* ============================================================
   Public API
   ============================================================ */

pub fn select(files: &[FileRecord], max_files: usize) -> Selection {
    let classified: Vec<FileRecord> = files
        .iter()
        .filter_map(|f| {
            let c = classifier::classify(&f.path, &f.name);
            if !c.should_analyze {
                return None;
            }
            let mut r = f.clone();
            r.language = c.language;
            r.category = c.category;
            r.priority = c.priority;
            Some(r)
        })
        .collect();

    // Config and build files inform structure even when the cap
    // excludes them from deep analysis.
    let structure = structure::detect(&classified);
    let strategy = strategy::resolve(&structure);

    let mut candidates: Vec<FileRecord> = classified
        .iter()
        .filter(|f| is_candidate(f))
        .cloned()
        .collect();

    // Stable sort: ascending priority, sources ahead of configs,
    // input order breaks remaining ties.
    candidates.sort_by_key(|f| (f.priority, category_rank(f.category)));
    candidates.truncate(max_files);

    // Existing tests carry convention signal; backfill up to the cap.
    if candidates.len() < max_files {
        let mut tests: Vec<FileRecord> = classified
            .iter()
            .filter(|f| f.category == FileCategory::Test)
            .cloned()
            .collect();
        tests.sort_by_key(|f| f.priority);

        for t in tests {
            if candidates.len() >= max_files {
                break;
            }
            candidates.push(t);
        }
    }

    Selection {
        selected: candidates,
        structure,
        strategy,
        classified: classified.len(),
    }
}

/* ============================================================
   Helpers
   ============================================================ */

fn is_candidate(f: &FileRecord) -> bool {
    match f.category {
        FileCategory::Source => true,
        FileCategory::Config => f.priority <= 2,
        _ => false,
    }
}

fn category_rank(c: FileCategory) -> u8 {
    match c {
        FileCategory::Source => 0,
        FileCategory::Config => 1,
        _ => 2,
    }
}

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::state::data::{CandidateFile, FileKind};

/// Walk every configured root and classify the files found below it.
///
/// Runs once at startup. Produces an in-memory candidate list and never
/// touches the catalog itself; unsupported extensions are simply dropped.
pub fn scan(roots: &[PathBuf]) -> Vec<CandidateFile> {
    let mut candidates = Vec::new();

    for root in roots {
        println!("🔍 Scanning folder: {}", root.display());
        scan_root(root, &mut candidates);
    }

    println!("📦 Scan found {} media files", candidates.len());
    candidates
}

/// Walk one root directory, appending every supported media file
fn scan_root(root: &Path, candidates: &mut Vec<CandidateFile>) {
    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        // Only process files (not directories)
        if !path.is_file() {
            continue;
        }

        if let Some(candidate) = classify(path) {
            candidates.push(candidate);
        }
    }
}

/// Classify a single file by extension.
/// Returns None for anything the browser does not index.
fn classify(path: &Path) -> Option<CandidateFile> {
    let ext = match path.extension() {
        Some(extension) => format!(".{}", extension.to_string_lossy().to_lowercase()),
        None => return None,
    };

    let kind = FileKind::from_ext(&ext)?;

    let name = path.file_name()?.to_string_lossy().to_string();

    let size = match path.metadata() {
        Ok(metadata) => metadata.len(),
        Err(e) => {
            eprintln!("⚠️  Skipping {} (cannot read metadata: {})", path.display(), e);
            return None;
        }
    };

    Some(CandidateFile {
        name,
        path: path.to_string_lossy().to_string(),
        ext,
        size,
        kind,
    })
}

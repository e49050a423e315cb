use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use serde::{Deserialize, Serialize};

use crate::file_id::FileId;
use crate::CoreResult;

/// Bump when `CoreResult`'s serialized shape changes incompatibly.
pub const CACHE_VERSION: u32 = 1;

pub const CACHE_DIR: &str = ".compgraph";
pub const CACHE_FILE: &str = "result.bin";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileMeta {
    pub mtime_secs: u64,
    pub size: u64,
}

/// On-disk envelope for a cached `CoreResult`, keyed by a snapshot of each
/// analyzed file's mtime/size so callers can decide whether the cache is
/// still fresh before trusting it. This thin wrapper lives outside the
/// analysis core itself — `analyze` never reads or writes it.
#[derive(Serialize, Deserialize)]
pub struct CacheEnvelope {
    pub version: u32,
    pub project_root: PathBuf,
    pub file_mtimes: HashMap<FileId, FileMeta>,
    pub serialized_result: Vec<u8>,
}

pub fn cache_path(project_root: &Path) -> PathBuf {
    project_root.join(CACHE_DIR).join(CACHE_FILE)
}

fn collect_file_mtimes(result: &CoreResult) -> HashMap<FileId, FileMeta> {
    let mut mtimes = HashMap::new();
    for node in result.graph.nodes_sorted() {
        if let Ok(metadata) = std::fs::metadata(&node.id) {
            let mtime_secs = metadata
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_secs())
                .unwrap_or(0);
            mtimes.insert(
                node.id.clone(),
                FileMeta {
                    mtime_secs,
                    size: metadata.len(),
                },
            );
        }
    }
    mtimes
}

/// Save the serialized JSON result to disk atomically: write to a temp file
/// in the cache directory, then rename into place.
pub fn save_cache(project_root: &Path, result: &CoreResult, serialized_json: &[u8]) -> anyhow::Result<()> {
    let cache_dir = project_root.join(CACHE_DIR);
    std::fs::create_dir_all(&cache_dir)?;

    let envelope = CacheEnvelope {
        version: CACHE_VERSION,
        project_root: project_root.to_path_buf(),
        file_mtimes: collect_file_mtimes(result),
        serialized_result: serialized_json.to_vec(),
    };

    let target = cache_path(project_root);
    let mut tmp = tempfile::NamedTempFile::new_in(&cache_dir)?;
    bincode::serde::encode_into_std_write(&envelope, &mut tmp, bincode::config::standard())?;
    tmp.as_file().flush()?;
    tmp.persist(&target)?;
    Ok(())
}

/// Load a cache envelope if present and still matching the project's current
/// on-disk file metadata exactly. Any mismatch, missing file, or version skew
/// is treated as a cold cache, never as an error.
pub fn load_cache_if_fresh(project_root: &Path, current_files: &[FileId]) -> Option<Vec<u8>> {
    let path = cache_path(project_root);
    let bytes = std::fs::read(&path).ok()?;
    let (envelope, _): (CacheEnvelope, usize) =
        bincode::serde::decode_from_slice(&bytes, bincode::config::standard()).ok()?;

    if envelope.version != CACHE_VERSION || envelope.project_root != project_root {
        return None;
    }

    if envelope.file_mtimes.len() != current_files.len() {
        return None;
    }

    for file in current_files {
        let Some(cached_meta) = envelope.file_mtimes.get(file) else {
            return None;
        };
        let Ok(metadata) = std::fs::metadata(file) else {
            return None;
        };
        let mtime_secs = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs())
            .unwrap_or(0);
        if cached_meta.mtime_secs != mtime_secs || cached_meta.size != metadata.len() {
            return None;
        }
    }

    Some(envelope.serialized_result)
}

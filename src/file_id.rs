use std::path::{Path, PathBuf};

/// Canonical absolute path with symlinks resolved, used as both the
/// import-resolution key and the graph node identity.
///
/// Two `FileId`s compare equal iff they name the same inode-equivalent path —
/// `PathBuf`'s `Eq`/`Hash`/`Ord` give us that for free once every path has been
/// run through [`canonicalize`].
pub type FileId = PathBuf;

/// Canonicalize `path` into a `FileId`. Falls back to a lexically-cleaned
/// absolute path (no symlink resolution) when the path does not exist yet —
/// this keeps resolution working for extension-probed candidates that are
/// checked for existence by the caller immediately afterward.
pub fn canonicalize(path: &Path) -> FileId {
    std::fs::canonicalize(path).unwrap_or_else(|_| lexical_absolute(path))
}

fn lexical_absolute(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_default()
            .join(path)
    };

    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            std::path::Component::ParentDir => {
                out.pop();
            }
            std::path::Component::CurDir => {}
            other => out.push(other.as_os_str()),
        }
    }
    out
}

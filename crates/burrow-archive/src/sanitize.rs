use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Resolve an archive entry name under `base`, rejecting names that escape it.
///
/// A directory entry naming `base` itself (such as `./`) resolves to `None`;
/// a file entry naming it is rejected.
pub fn resolve_entry_path(
    entry_name: &str,
    base: &Path,
    is_dir: bool,
) -> Result<Option<PathBuf>> {
    let entry_path = Path::new(entry_name);
    let normalized = normalize_path(entry_path);

    if entry_name.contains('\0') || normalized.has_root() || has_prefix(&normalized) {
        return Err(Error::UnsafeEntry(entry_path.to_path_buf()));
    }

    let base = normalize_path(base);
    let resolved = normalize_path(&base.join(&normalized));
    if !resolved.starts_with(&base) {
        return Err(Error::UnsafeEntry(entry_path.to_path_buf()));
    }
    if resolved == base {
        return if is_dir {
            Ok(None)
        } else {
            Err(Error::UnsafeEntry(entry_path.to_path_buf()))
        };
    }
    Ok(Some(resolved))
}

fn has_prefix(path: &Path) -> bool {
    matches!(path.components().next(), Some(Component::Prefix(_)))
}

/// Fold `.` and `..` lexically. A `..` above the first component is kept,
/// so the escape is still visible to the caller.
fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    parts.iter().collect()
}

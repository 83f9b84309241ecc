//! Collision-free path proposals.
//!
//! A free name is returned unchanged. Otherwise a counter suffix is inserted
//! before the extension, starting at 2: `report.txt`, `report (2).txt`,
//! `report (3).txt`, ... A `(1)` suffix is never produced.
//!
//! The result does not exist at the moment it is returned. Nothing reserves
//! it, so a concurrent writer can still take it first.

use std::path::{Path, PathBuf};

use tracing::trace;

use crate::primitives;

/// Replacement for characters the platform does not allow.
pub const SUBSTITUTE: char = '-';

#[cfg(windows)]
fn is_invalid_path_char(c: char) -> bool { matches!(c, '"' | '<' | '>' | '|' | '\0'..='\u{1f}') }

#[cfg(not(windows))]
fn is_invalid_path_char(c: char) -> bool { c == '\0' }

#[cfg(windows)]
fn is_invalid_file_name_char(c: char) -> bool {
    is_invalid_path_char(c) || matches!(c, ':' | '*' | '?' | '\\' | '/')
}

#[cfg(not(windows))]
fn is_invalid_file_name_char(c: char) -> bool { c == '\0' || c == '/' }

pub fn sanitize_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    if !raw.chars().any(is_invalid_path_char) {
        return path.to_path_buf();
    }
    PathBuf::from(replace_invalid(&raw, is_invalid_path_char))
}

pub fn sanitize_file_name(name: &str) -> String { replace_invalid(name, is_invalid_file_name_char) }

fn replace_invalid(value: &str, is_invalid: fn(char) -> bool) -> String {
    value
        .chars()
        .map(|c| if is_invalid(c) { SUBSTITUTE } else { c })
        .collect()
}

/// Free path for a file named `file_name` inside `base`.
pub fn propose_file_path(base: impl AsRef<Path>, file_name: &str) -> PathBuf {
    let base = sanitize_path(base.as_ref());
    let file_name = sanitize_file_name(file_name);

    let candidate = base.join(&file_name);
    if !primitives::exists(&candidate) {
        return candidate;
    }

    let as_path = Path::new(&file_name);
    let stem = as_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = as_path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    first_free(&base, |counter| format!("{stem} ({counter}){extension}"))
}

/// Free path for a directory named `name` inside `base`. No extension split.
pub fn propose_dir_path(base: impl AsRef<Path>, name: &str) -> PathBuf {
    let base = sanitize_path(base.as_ref());
    let name = sanitize_file_name(name);

    let candidate = base.join(&name);
    if !primitives::exists(&candidate) {
        return candidate;
    }

    first_free(&base, |counter| format!("{name} ({counter})"))
}

/// Single-path form of [`propose_file_path`].
pub fn propose_path(path: impl AsRef<Path>) -> PathBuf {
    let (base, name) = split(path.as_ref());
    propose_file_path(base, &name)
}

/// Single-path form of [`propose_dir_path`].
pub fn propose_dir_path_for(path: impl AsRef<Path>) -> PathBuf {
    let (base, name) = split(path.as_ref());
    propose_dir_path(base, &name)
}

fn split(path: &Path) -> (PathBuf, String) {
    let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    (base, name)
}

fn first_free(base: &Path, render: impl Fn(u64) -> String) -> PathBuf {
    let mut counter = 2u64;
    loop {
        let candidate = base.join(render(counter));
        if !primitives::exists(&candidate) {
            return candidate;
        }
        trace!(path = %candidate.display(), "name taken, trying next suffix");
        counter += 1;
    }
}

//! Path containment — the sandbox security boundary.
//!
//! Every path handed to a sandboxed operation goes through [`resolve`]:
//! lexical normalization (`.`/`..`), symlink resolution through the deepest
//! existing ancestor, then a prefix check against the canonical root. Every
//! failure along the way — including plain I/O errors during resolution —
//! is `AccessDenied`, so a crafted path can never learn whether a file
//! exists outside the root.

use std::path::{Component, Path, PathBuf};

use super::SandboxError;

/// Resolve a requested path against the sandbox root.
///
/// The returned path is absolute, symlink-free up to its deepest existing
/// ancestor, and guaranteed to be the root itself or a descendant of it.
/// The target does not have to exist (writes create it).
pub fn resolve(root: &Path, requested: &str) -> Result<PathBuf, SandboxError> {
    if requested.is_empty() {
        return Err(SandboxError::InvalidPath("empty path".to_string()));
    }
    if requested.contains('\0') {
        return Err(SandboxError::InvalidPath(
            "path contains NUL byte".to_string(),
        ));
    }

    let requested_path = Path::new(requested);
    let joined = if requested_path.is_absolute() {
        requested_path.to_path_buf()
    } else {
        root.join(requested_path)
    };

    let normalized = normalize(&joined, requested)?;
    let resolved = resolve_existing_prefix(&normalized, requested)?;

    if resolved == root || resolved.starts_with(root) {
        Ok(resolved)
    } else {
        Err(SandboxError::AccessDenied(requested.to_string()))
    }
}

/// Lexically normalize a path: drop `.`, apply `..` by popping.
///
/// Popping past the filesystem root is an escape attempt and denied.
fn normalize(path: &Path, requested: &str) -> Result<PathBuf, SandboxError> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return Err(SandboxError::AccessDenied(requested.to_string()));
                }
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

/// Canonicalize the deepest existing ancestor, then re-append the
/// not-yet-existing remainder.
///
/// The remainder is already `..`-free after [`normalize`], so appending it
/// cannot climb back out of the canonicalized prefix.
fn resolve_existing_prefix(path: &Path, requested: &str) -> Result<PathBuf, SandboxError> {
    let mut existing = path.to_path_buf();
    let mut remainder: Vec<std::ffi::OsString> = Vec::new();

    loop {
        match existing.canonicalize() {
            Ok(canonical) => {
                let mut resolved = canonical;
                for part in remainder.iter().rev() {
                    resolved.push(part);
                }
                return Ok(resolved);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let Some(name) = existing.file_name() else {
                    // Ran out of components without finding anything real
                    return Err(SandboxError::AccessDenied(requested.to_string()));
                };
                remainder.push(name.to_os_string());
                existing.pop();
            }
            // Permission failures, loops, anything else: fail closed
            Err(_) => return Err(SandboxError::AccessDenied(requested.to_string())),
        }
    }
}

//! Sandboxed file operations
//!
//! [`SandboxedFs`] implements the five file-system operations the tool
//! server exposes: `read`, `write`, `list_directory`, `search`, `info`.
//! Every operation takes a path relative to a root directory fixed at
//! construction; nothing resolving outside that root is ever touched
//! (the containment algorithm lives in `resolve`).

mod resolve;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use conduit_domain::tool::value_objects::{ErrorKind, ToolError};

/// Error raised by a sandboxed file operation
#[derive(Debug, Clone, Error)]
pub enum SandboxError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Path is a directory: {0}")]
    IsADirectory(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),
}

impl SandboxError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SandboxError::NotFound(_) => ErrorKind::NotFound,
            SandboxError::IsADirectory(_) => ErrorKind::IsADirectory,
            SandboxError::InvalidPath(_) => ErrorKind::InvalidPath,
            SandboxError::AccessDenied(_) => ErrorKind::AccessDenied,
        }
    }
}

impl From<SandboxError> for ToolError {
    fn from(err: SandboxError) -> Self {
        ToolError::new(err.kind(), err.to_string())
    }
}

/// One entry of a directory listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirEntryInfo {
    pub name: String,
    pub is_directory: bool,
    pub size: u64,
}

/// One matching line from a content search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMatch {
    /// Path of the matching file, relative to the searched directory
    pub file: String,
    /// 1-indexed line number
    pub line_number: usize,
    /// The matching line, trimmed
    pub matched_text: String,
}

/// Metadata about a path inside the sandbox
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfo {
    pub exists: bool,
    pub is_directory: bool,
    pub size: u64,
    /// RFC 3339 modification timestamp; absent when the path does not exist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,
}

impl FileInfo {
    fn absent() -> Self {
        Self {
            exists: false,
            is_directory: false,
            size: 0,
            modified_time: None,
        }
    }
}

/// File operations confined to a single root directory.
///
/// The root is the only state; every operation is independent and the type
/// is freely shareable across non-overlapping calls.
#[derive(Debug, Clone)]
pub struct SandboxedFs {
    root: PathBuf,
}

impl SandboxedFs {
    /// Create a sandbox over `root`.
    ///
    /// The directory must exist; the stored root is canonical so the
    /// containment check compares like with like.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, SandboxError> {
        let root = root.as_ref();
        let canonical = root
            .canonicalize()
            .map_err(|_| SandboxError::NotFound(root.display().to_string()))?;
        if !canonical.is_dir() {
            return Err(SandboxError::InvalidPath(format!(
                "Sandbox root is not a directory: {}",
                root.display()
            )));
        }
        Ok(Self { root: canonical })
    }

    /// The canonical root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, SandboxError> {
        resolve::resolve(&self.root, path)
    }

    /// Read a file's contents as UTF-8 text.
    pub fn read(&self, path: &str) -> Result<String, SandboxError> {
        let resolved = self.resolve(path)?;

        if !resolved.exists() {
            return Err(SandboxError::NotFound(path.to_string()));
        }
        if resolved.is_dir() {
            return Err(SandboxError::IsADirectory(path.to_string()));
        }

        fs::read_to_string(&resolved)
            .map_err(|e| classify_io_error(e, path))
    }

    /// Create or overwrite a file. Returns the number of bytes written.
    ///
    /// With `create_parents`, missing parent directories are created inside
    /// the sandbox; without it, a missing parent is `NotFound`.
    pub fn write(
        &self,
        path: &str,
        content: &str,
        create_parents: bool,
    ) -> Result<usize, SandboxError> {
        let resolved = self.resolve(path)?;

        if resolved.is_dir() {
            return Err(SandboxError::IsADirectory(path.to_string()));
        }
        if resolved.file_name().is_none() {
            return Err(SandboxError::InvalidPath(path.to_string()));
        }

        if let Some(parent) = resolved.parent() {
            if !parent.exists() {
                if create_parents {
                    fs::create_dir_all(parent).map_err(|e| classify_io_error(e, path))?;
                } else {
                    return Err(SandboxError::NotFound(format!(
                        "Parent directory does not exist: {}",
                        path
                    )));
                }
            }
        }

        fs::write(&resolved, content).map_err(|e| classify_io_error(e, path))?;
        debug!(path, bytes = content.len(), "Wrote file in sandbox");
        Ok(content.len())
    }

    /// List a directory's entries, sorted by name.
    pub fn list_directory(&self, path: &str) -> Result<Vec<DirEntryInfo>, SandboxError> {
        let resolved = self.resolve(path)?;

        if !resolved.exists() {
            return Err(SandboxError::NotFound(path.to_string()));
        }
        if !resolved.is_dir() {
            return Err(SandboxError::InvalidPath(format!(
                "Not a directory: {}",
                path
            )));
        }

        let mut entries = Vec::new();
        let read_dir = fs::read_dir(&resolved).map_err(|e| classify_io_error(e, path))?;
        for entry in read_dir {
            let entry = entry.map_err(|e| classify_io_error(e, path))?;
            let metadata = entry.metadata().map_err(|e| classify_io_error(e, path))?;
            entries.push(DirEntryInfo {
                name: entry.file_name().to_string_lossy().to_string(),
                is_directory: metadata.is_dir(),
                size: if metadata.is_file() { metadata.len() } else { 0 },
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Search file contents for a case-insensitive substring.
    ///
    /// Returns one entry per matching line. Files that are not valid UTF-8
    /// are skipped, as are symlinks (the walk never leaves the sandbox).
    /// An optional extension filter (e.g. `".rs"`) restricts candidates.
    pub fn search(
        &self,
        path: &str,
        pattern: &str,
        recursive: bool,
        file_extension: Option<&str>,
    ) -> Result<Vec<SearchMatch>, SandboxError> {
        let resolved = self.resolve(path)?;

        if !resolved.exists() {
            return Err(SandboxError::NotFound(path.to_string()));
        }

        let mut files = Vec::new();
        if resolved.is_file() {
            files.push(resolved.clone());
        } else {
            collect_files(&resolved, recursive, &mut files);
        }
        files.sort();

        let needle = pattern.to_lowercase();
        let mut matches = Vec::new();

        for file in files {
            if let Some(ext) = file_extension
                && !file.to_string_lossy().ends_with(ext)
            {
                continue;
            }

            // Binary or unreadable files are skipped, not errors
            let Ok(content) = fs::read_to_string(&file) else {
                continue;
            };

            for (index, line) in content.lines().enumerate() {
                if line.to_lowercase().contains(&needle) {
                    let display = file
                        .strip_prefix(&resolved)
                        .unwrap_or(&file)
                        .to_string_lossy()
                        .to_string();
                    matches.push(SearchMatch {
                        file: display,
                        line_number: index + 1,
                        matched_text: line.trim().to_string(),
                    });
                }
            }
        }

        debug!(path, pattern, count = matches.len(), "Sandbox search finished");
        Ok(matches)
    }

    /// Metadata about a path. A non-existent in-sandbox path is not an
    /// error: it reports `exists: false`. Escapes are still denied.
    pub fn info(&self, path: &str) -> Result<FileInfo, SandboxError> {
        let resolved = self.resolve(path)?;

        let metadata = match fs::symlink_metadata(&resolved) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(FileInfo::absent());
            }
            Err(e) => return Err(classify_io_error(e, path)),
        };

        let modified_time = metadata
            .modified()
            .ok()
            .map(|t| DateTime::<Utc>::from(t).to_rfc3339());

        Ok(FileInfo {
            exists: true,
            is_directory: metadata.is_dir(),
            size: if metadata.is_file() { metadata.len() } else { 0 },
            modified_time,
        })
    }
}

/// Map an I/O error to the sandbox taxonomy.
fn classify_io_error(err: std::io::Error, path: &str) -> SandboxError {
    match err.kind() {
        std::io::ErrorKind::NotFound => SandboxError::NotFound(path.to_string()),
        std::io::ErrorKind::PermissionDenied => SandboxError::AccessDenied(path.to_string()),
        std::io::ErrorKind::InvalidData => SandboxError::InvalidPath(format!(
            "File is not valid UTF-8: {}",
            path
        )),
        _ => SandboxError::InvalidPath(format!("{}: {}", path, err)),
    }
}

/// Collect regular files under `dir`, never following symlinks.
fn collect_files(dir: &Path, recursive: bool, out: &mut Vec<PathBuf>) {
    let Ok(read_dir) = fs::read_dir(dir) else {
        return;
    };
    for entry in read_dir.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_symlink() {
            continue;
        }
        let path = entry.path();
        if file_type.is_dir() {
            if recursive {
                collect_files(&path, recursive, out);
            }
        } else if file_type.is_file() {
            out.push(path);
        }
    }
}

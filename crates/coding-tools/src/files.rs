//! File Lister
//!
//! Recursive listing of a workspace root, filtered by the regular expressions
//! in `<root>/.cignore`. Patterns are matched against the path relative to
//! the root and only need to match at its start.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use regex::Regex;

use crate::error::{Result, WorkspaceError};

/// Name of the ignore file read from the workspace root
pub const IGNORE_FILE: &str = ".cignore";

/// Ordered, compiled ignore patterns
#[derive(Clone, Debug, Default)]
pub struct IgnorePatterns {
    patterns: Vec<Regex>,
}

impl IgnorePatterns {
    /// Parse ignore file contents
    ///
    /// Lines are trimmed; blank lines and lines starting with `#` are skipped.
    pub fn parse(contents: &str) -> Result<Self> {
        let patterns = contents
            .lines()
            .filter(|line| !line.starts_with('#'))
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|pattern| {
                Regex::new(&format!("^(?:{pattern})")).map_err(|source| WorkspaceError::Pattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Load `<root>/.cignore`; a missing file is an empty set
    pub fn load(root: &Path) -> Result<Self> {
        match fs::read_to_string(root.join(IGNORE_FILE)) {
            Ok(contents) => Self::parse(&contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether `relative` is excluded by any pattern
    pub fn is_ignored(&self, relative: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(relative))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// List every regular file under `root` not excluded by its ignore file
///
/// Paths are relative to `root`. Hidden files are included and no
/// `.gitignore` rules apply; only `.cignore` filters the listing.
pub fn list_files(root: &Path) -> Result<Vec<PathBuf>> {
    let patterns = IgnorePatterns::load(root)?;

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        if patterns.is_ignored(&relative.to_string_lossy()) {
            continue;
        }
        files.push(relative.to_path_buf());
    }

    tracing::debug!(
        root = %root.display(),
        files = files.len(),
        patterns = patterns.len(),
        "Listed workspace files"
    );

    Ok(files)
}

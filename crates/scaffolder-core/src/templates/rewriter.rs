//! Placeholder rewriting across the workspace with extension filtering

use crate::error::{Result, ScaffoldError};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// The single substitution applied to every matching file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    pub placeholder: String,
    pub replacement: String,
    /// File extension without the dot, compared case-sensitively
    pub extension: String,
}

impl RewriteRule {
    pub fn new(
        placeholder: impl Into<String>,
        replacement: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            placeholder: placeholder.into(),
            replacement: replacement.into(),
            extension: extension.into(),
        }
    }

    /// Whether the file at `path` is subject to rewriting
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.extension)
    }
}

/// Totals for one rewrite pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// Matching files read
    pub files_scanned: usize,
    /// Matching files that contained the placeholder and were written back
    pub files_changed: usize,
    pub replacements: usize,
}

/// Replace every non-overlapping occurrence of `placeholder`, left to right
///
/// Plain substring replacement: no pattern syntax, word boundaries or case
/// folding. An empty placeholder never matches.
pub fn replace_placeholder(content: &str, placeholder: &str, replacement: &str) -> String {
    if placeholder.is_empty() {
        return content.to_string();
    }
    content.replace(placeholder, replacement)
}

/// Byte-level [`replace_placeholder`], returning the new content and the
/// number of replacements made
///
/// Content does not need to be valid UTF-8.
pub fn replace_bytes(content: &[u8], placeholder: &[u8], replacement: &[u8]) -> (Vec<u8>, usize) {
    if placeholder.is_empty() {
        return (content.to_vec(), 0);
    }

    let mut out = Vec::with_capacity(content.len());
    let mut count = 0;
    let mut rest = content;
    while rest.len() >= placeholder.len() {
        if rest.starts_with(placeholder) {
            out.extend_from_slice(replacement);
            rest = &rest[placeholder.len()..];
            count += 1;
        } else {
            out.push(rest[0]);
            rest = &rest[1..];
        }
    }
    out.extend_from_slice(rest);

    (out, count)
}

/// Apply `rule` to every matching file under `root`
///
/// Directories are descended without transformation; symlinks are not
/// followed. The first traversal, read or write failure aborts the pass and
/// leaves already-rewritten files in place.
pub fn rewrite_identifiers(root: &Path, rule: &RewriteRule) -> Result<RewriteReport> {
    let mut report = RewriteReport::default();

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            ScaffoldError::FileRewrite {
                path,
                source: e.into(),
            }
        })?;

        if !entry.file_type().is_file() || !rule.matches(entry.path()) {
            continue;
        }

        if rewrite_file(entry.path(), rule, &mut report)? {
            report.files_changed += 1;
        }
    }

    Ok(report)
}

fn rewrite_file(path: &Path, rule: &RewriteRule, report: &mut RewriteReport) -> Result<bool> {
    let to_error = |source| ScaffoldError::FileRewrite {
        path: path.to_path_buf(),
        source,
    };

    let content = fs::read(path).map_err(to_error)?;
    report.files_scanned += 1;

    let (rewritten, count) = replace_bytes(
        &content,
        rule.placeholder.as_bytes(),
        rule.replacement.as_bytes(),
    );
    if count == 0 {
        return Ok(false);
    }

    fs::write(path, rewritten).map_err(to_error)?;
    report.replacements += count;
    Ok(true)
}

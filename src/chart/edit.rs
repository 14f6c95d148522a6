//! Line-oriented chart edits
//!
//! YAML is never parsed: each edit rewrites matching lines and leaves every
//! other byte alone, so comments and formatting survive. The `*_lines`
//! functions are pure; the file wrappers read, rewrite and overwrite.
//!
//! Manifest and values files must be UTF-8; anything else fails with
//! [`Error::Chart`]. The changelog is handled as raw bytes, so any prior
//! content is kept as is.

use crate::error::{Error, Result};
use crate::types::strip_v;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

const VERSION_KEY: &str = "version:";
const IMAGE_KEY: &str = "image:";

/// Replace the value of the first top-level `version:` line
pub fn bump_version_lines(content: &str, tag: &str) -> String {
    let version = strip_v(tag);
    let mut replaced = false;

    content
        .split('\n')
        .map(|line| {
            if !replaced && line.starts_with(VERSION_KEY) {
                replaced = true;
                let eol = if line.ends_with('\r') { "\r" } else { "" };
                format!("{VERSION_KEY} {version}{eol}")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Retag every `image:` line
pub fn bump_image_lines(content: &str, tag: &str) -> String {
    let version = strip_v(tag);

    content
        .split('\n')
        .map(|line| {
            if line.contains(IMAGE_KEY) {
                retag_image_line(line, version).unwrap_or_else(|| line.to_string())
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rewrite one `image:` line, or `None` when it has no value to retag
fn retag_image_line(line: &str, version: &str) -> Option<String> {
    let (body, eol) = line
        .strip_suffix('\r')
        .map_or((line, ""), |body| (body, "\r"));

    // Key is everything before the first colon
    let (key, value) = body.split_once(':')?;
    let value = value.trim();

    // A bare `image:` opens a nested mapping
    if value.is_empty() {
        return None;
    }

    let image = match value.rfind(':') {
        Some(idx) => format!("{}{version}", &value[..=idx]),
        None => format!("{value}:{version}"),
    };
    Some(format!("{key}: {image}{eol}"))
}

/// Build the changelog block for a release
pub fn changelog_entry(tag: &str, notes: &str) -> String {
    format!("## {tag}\n\n{notes}\n\n")
}

/// Set the chart manifest's `version:` to the release version
pub fn bump_version_field(path: &Path, tag: &str) -> Result<()> {
    rewrite(path, |content| bump_version_lines(content, tag))
}

/// Point `image:` references at the release tag
pub fn bump_image_tag(path: &Path, tag: &str) -> Result<()> {
    rewrite(path, |content| bump_image_lines(content, tag))
}

/// Put a changelog entry for the release at the top of the file
///
/// A missing changelog is created.
pub fn prepend_changelog_entry(path: &Path, tag: &str, notes: &str) -> Result<()> {
    let previous = match fs::read(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
        Err(source) => return Err(chart_error(path, source)),
    };

    let mut content = changelog_entry(tag, notes).into_bytes();
    content.extend_from_slice(&previous);
    fs::write(path, content).map_err(|source| chart_error(path, source))
}

fn rewrite(path: &Path, edit: impl FnOnce(&str) -> String) -> Result<()> {
    let content = fs::read_to_string(path).map_err(|source| chart_error(path, source))?;
    let updated = edit(&content);
    if updated == content {
        return Ok(());
    }
    fs::write(path, updated).map_err(|source| chart_error(path, source))
}

fn chart_error(path: &Path, source: std::io::Error) -> Error {
    Error::Chart {
        path: path.to_path_buf(),
        source,
    }
}

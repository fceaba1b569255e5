//! `.env` serialization.
//!
//! One `KEY=VALUE` line per entry, newline-terminated, in insertion order.
//! Values are written verbatim: a value containing a newline or `=` is not
//! escaped, so such content does not survive [`parse`].

use std::fs;
use std::io;
use std::path::Path;

use crate::paths;
use crate::request::EnvVars;

/// Render variables as `.env` text.
pub fn serialize(vars: &EnvVars) -> String {
    let mut out = String::new();
    for (key, value) in vars.iter() {
        out.push_str(key);
        out.push('=');
        out.push_str(value);
        out.push('\n');
    }
    out
}

/// Inverse of [`serialize`]: split lines, then split each on the first `=`.
///
/// Blank lines are skipped. A line without `=` becomes a key with an empty value.
pub fn parse(content: &str) -> EnvVars {
    content
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once('=') {
            Some((key, value)) => (key, value),
            None => (line, ""),
        })
        .collect()
}

/// Write `<dir>/.env`, replacing any existing file.
pub fn write(dir: &Path, vars: &EnvVars) -> io::Result<()> {
    let path = paths::env_file(dir);
    log::debug!("writing {} variables to {}", vars.len(), path.display());
    fs::write(path, serialize(vars))
}

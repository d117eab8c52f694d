//! Reads the dispatcher's input list: one opaque parameter line per task.

use std::fs;
use std::path::Path;

/// Reads `path` as UTF-8 text and returns one entry per line, with trailing
/// whitespace stripped.
///
/// Blank lines are **not** filtered — they are returned as empty strings
/// and served as-is, so a blank line still consumes a task slot (see
/// `DESIGN.md`).
pub fn read_task_list(path: &Path) -> anyhow::Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to open inputs file {:?}: {e}", path))?;

    Ok(contents
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect())
}

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use jot_core::DocumentStore;

/// Read a file into buffer lines. `None` means the file does not exist
/// yet; the caller starts a fresh buffer and marks it unsaved.
pub fn load_lines(path: &Path) -> Result<Option<Vec<Vec<char>>>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", path.display()));
        }
    };
    let lines: Vec<Vec<char>> = text.lines().map(|line| line.chars().collect()).collect();
    debug!(path = %path.display(), lines = lines.len(), "loaded file");
    Ok(Some(lines))
}

/// Write the buffer back, creating missing parent directories. Every
/// line is followed by a newline; existing content is replaced
/// wholesale.
pub fn save_lines(path: &Path, lines: &[Vec<char>]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    let mut out = String::new();
    for line in lines {
        out.extend(line.iter());
        out.push('\n');
    }
    fs::write(path, out).with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), lines = lines.len(), "saved file");
    Ok(())
}

/// Flat-file implementation of the editor's persistence seam.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl DocumentStore for FileStore {
    fn persist(&mut self, lines: &[Vec<char>]) -> Result<()> {
        save_lines(&self.path, lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let lines = vec![chars("hello"), chars("world")];
        save_lines(&path, &lines).unwrap();
        assert_eq!(load_lines(&path).unwrap(), Some(lines));
    }

    #[test]
    fn test_every_line_gets_a_terminator() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        save_lines(&path, &[chars("a"), chars("b")]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\n");
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deep").join("nested").join("notes.txt");
        save_lines(&path, &[chars("x")]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "x\n");
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempdir().unwrap();
        assert_eq!(load_lines(&dir.path().join("absent.txt")).unwrap(), None);
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        save_lines(&path, &[chars("a much longer first version")]).unwrap();
        save_lines(&path, &[chars("b")]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "b\n");
    }
}

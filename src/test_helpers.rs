//! Test utilities for creating temporary csv files that grow during a test.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct TempCsvFile {
    pub path: PathBuf,
    _temp_dir: tempfile::TempDir,
}

impl TempCsvFile {
    /// Create a new empty temporary csv file
    pub fn new() -> std::io::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("test.csv");

        File::create(&path)?;

        Ok(Self {
            path,
            _temp_dir: temp_dir,
        })
    }

    /// Create a temporary csv file with initial content
    pub fn with_content(content: &str) -> std::io::Result<Self> {
        let temp_file = Self::new()?;
        temp_file.append(content)?;
        Ok(temp_file)
    }

    /// Append raw bytes exactly as given; no terminator is added.
    pub fn append(&self, content: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;

        file.write_all(content.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_csv_file_creation() {
        let temp_file = TempCsvFile::new().unwrap();
        assert!(temp_file.path().exists());
    }

    #[test]
    fn test_append_is_verbatim() {
        let temp_file = TempCsvFile::with_content("a,b").unwrap();
        temp_file.append(",c\n").unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(content, "a,b,c\n");
    }
}

use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    /// Stages every file as a temporary file next to its destination and only
    /// renames them into place once all of them are written.
    fn write_files(&self, files: &[(&str, &[u8])]) -> Result<Vec<PathBuf>> {
        let mut staged = Vec::with_capacity(files.len());
        for (path, data) in files {
            let full_path = self.base_path.join(path);
            // An early return drops `staged`, which deletes the temp files.
            staged.push((stage(&full_path, data)?, full_path));
        }

        let mut written: Vec<PathBuf> = Vec::with_capacity(staged.len());
        for (temp, full_path) in staged {
            if let Err(e) = temp.persist(&full_path) {
                for path in &written {
                    if let Err(cleanup) = fs::remove_file(path) {
                        tracing::warn!("Could not remove {}: {}", path.display(), cleanup);
                    }
                }
                return Err(e.error.into());
            }
            written.push(full_path);
        }

        Ok(written)
    }
}

fn stage(full_path: &Path, data: &[u8]) -> Result<NamedTempFile> {
    let parent = match full_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    let mut temp = NamedTempFile::new_in(&parent)?;
    temp.write_all(data)?;
    temp.as_file().sync_all()?;
    Ok(temp)
}

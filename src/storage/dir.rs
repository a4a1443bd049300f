//! DirStorage - a directory of `<collection>.txt` backing files.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::StorageBackend;
use crate::error::StoreError;

/// Directory-backed storage: one `<collection>.txt` file per collection,
/// plus a `storage/` subdirectory holding copied student photos.
#[derive(Debug, Clone)]
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    /// Open or create a storage directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(DirStorage { root })
    }

    /// Default data directory under the platform data dir, when one exists.
    pub fn default_data_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("registrar"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a collection's backing file, creating it empty when absent.
    pub fn collection_path(&self, collection: &str) -> Result<PathBuf, StoreError> {
        let path = self.root.join(format!("{}.txt", collection));
        if !path.exists() {
            fs::write(&path, "")?;
        }
        Ok(path)
    }

    /// The directory of copied photo files, created on first use.
    pub fn photo_dir(&self) -> Result<PathBuf, StoreError> {
        let dir = self.root.join("storage");
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Copy an image into the photo directory, named by student id. Returns
    /// the destination path for the student's `photo` field.
    pub fn copy_photo(&self, student_id: &str, source: &Path) -> Result<PathBuf, StoreError> {
        let dest = self.photo_dir()?.join(format!("{}.png", student_id));
        fs::copy(source, &dest)?;
        Ok(dest)
    }
}

impl StorageBackend for DirStorage {
    fn read_collection(&self, collection: &str) -> Result<String, StoreError> {
        let path = self.collection_path(collection)?;
        Ok(fs::read_to_string(path)?)
    }

    fn write_collection(&self, collection: &str, contents: &str) -> Result<(), StoreError> {
        let path = self.collection_path(collection)?;
        // Stage in the same directory, then rename over the target, so a
        // crash mid-write never leaves a truncated backing file.
        let mut staged = NamedTempFile::new_in(&self.root)?;
        staged.write_all(contents.as_bytes())?;
        staged
            .persist(&path)
            .map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(())
    }
}

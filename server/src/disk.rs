use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::classify::extension;
use crate::domain::BlobStore;

const UPLOADS_DIR: &str = "uploads";

/// Local-disk blob store rooted at the media directory.
///
/// Every blob lands under `uploads/` with a generated name; the relative
/// path is the opaque reference handed back to callers and stored in the
/// metadata row.
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    pub fn new<P: AsRef<Path>>(root: P) -> io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join(UPLOADS_DIR))?;
        Ok(Self { root })
    }

    /// Absolute location of a stored blob.
    #[must_use]
    pub fn resolve(&self, stored_path: &str) -> PathBuf {
        self.root.join(stored_path)
    }
}

impl BlobStore for DiskStore {
    type Err = io::Error;

    fn put(&self, file_name: &str, data: &[u8]) -> Result<String, Self::Err> {
        let ext = extension(file_name);
        let blob_name = if ext.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            format!("{}.{ext}", Uuid::new_v4())
        };
        let stored_path = format!("{UPLOADS_DIR}/{blob_name}");

        let mut f = fs::File::create(self.resolve(&stored_path))?;
        f.write_all(data)?;
        f.flush()?;
        Ok(stored_path)
    }

    fn delete(&self, stored_path: &str) -> Result<(), Self::Err> {
        let full = self.resolve(stored_path);
        if !full.exists() {
            // a blob removed out of band does not fail the delete
            return Ok(());
        }
        fs::remove_file(full)
    }

    fn exists(&self, stored_path: &str) -> bool {
        self.resolve(stored_path).exists()
    }
}

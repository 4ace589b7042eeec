use std::fmt::{Debug, Display};

use chrono::{DateTime, Utc};
use kernel::{Category, MediaFile};

/// Metadata of an accepted upload before the repository has assigned an id.
pub struct FileDraft {
    pub stored_path: String,
    pub file_name: String,
    pub file_size: u64,
    pub file_type: String,
    pub category: Category,
    pub uploaded_at: DateTime<Utc>,
}

impl FileDraft {
    #[must_use]
    pub fn into_persisted(self, id: i64) -> MediaFile {
        MediaFile {
            id,
            file: self.stored_path,
            file_name: self.file_name,
            file_size: self.file_size,
            file_type: self.file_type,
            category: self.category,
            uploaded_at: self.uploaded_at,
        }
    }
}

/// Durable metadata storage. One row per stored file, no update operation.
pub trait Repository {
    type Err: Debug + Display;

    fn new_database(&self) -> Result<(), Self::Err>;

    fn insert_file(&mut self, draft: &FileDraft) -> Result<i64, Self::Err>;

    fn get_file(&mut self, id: i64) -> Result<MediaFile, Self::Err>;

    fn get_files(&mut self) -> Result<Vec<MediaFile>, Self::Err>;

    /// Removes the row and reports how many rows were affected.
    fn delete_file(&mut self, id: i64) -> Result<usize, Self::Err>;
}

/// Durable byte-blob storage addressed by an opaque path.
pub trait BlobStore {
    type Err: Debug + Display;

    /// Persists the bytes under a generated path and returns that path.
    fn put(&self, file_name: &str, data: &[u8]) -> Result<String, Self::Err>;

    /// Removes the blob. An already absent blob is not an error.
    fn delete(&self, stored_path: &str) -> Result<(), Self::Err>;

    fn exists(&self, stored_path: &str) -> bool;
}

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use kernel::{Category, MediaFile};
use rusqlite::{Connection, Error, OpenFlags, Row, params};

use crate::domain::{FileDraft, Repository};

const CACHE_SIZE: &str = "4096";

const FILE_COLUMNS: &str = "id, stored_path, file_name, file_size, file_type, category, uploaded_at";

pub enum Mode {
    ReadWrite,
    ReadOnly,
}

pub struct Sqlite {
    conn: Connection,
}

impl Repository for Sqlite {
    type Err = Error;

    fn new_database(&self) -> Result<(), Self::Err> {
        self.pragma_update("encoding", "UTF-8")?;

        self.conn.execute(
            "CREATE TABLE file (
                  id           INTEGER PRIMARY KEY AUTOINCREMENT,
                  stored_path  TEXT NOT NULL,
                  file_name    TEXT NOT NULL,
                  file_size    INTEGER NOT NULL,
                  file_type    TEXT NOT NULL,
                  category     TEXT NOT NULL,
                  uploaded_at  TEXT NOT NULL
                  )",
            [],
        )?;

        self.conn.execute(
            "CREATE UNIQUE INDEX unique_stored_path_ix ON file(stored_path)",
            [],
        )?;

        Ok(())
    }

    fn insert_file(&mut self, draft: &FileDraft) -> Result<i64, Self::Err> {
        self.assign_cache_size()?;
        self.pragma_update("synchronous", "FULL")?;

        self.conn
            .prepare_cached(
                "INSERT INTO file (stored_path, file_name, file_size, file_type, category, uploaded_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?
            .execute(params![
                draft.stored_path,
                draft.file_name,
                draft.file_size,
                draft.file_type,
                draft.category.as_str(),
                draft.uploaded_at,
            ])?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_file(&mut self, id: i64) -> Result<MediaFile, Self::Err> {
        self.conn.query_row(
            &format!("SELECT {FILE_COLUMNS} FROM file WHERE id = ?1"),
            params![id],
            map_file,
        )
    }

    fn get_files(&mut self) -> Result<Vec<MediaFile>, Self::Err> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {FILE_COLUMNS} FROM file"))?;
        let files = stmt.query_map([], map_file)?;
        files.collect()
    }

    fn delete_file(&mut self, id: i64) -> Result<usize, Self::Err> {
        self.conn
            .execute("DELETE FROM file WHERE id = ?1", params![id])
    }
}

fn map_file(row: &Row<'_>) -> Result<MediaFile, Error> {
    let category: String = row.get(5)?;
    let category = Category::from_str(&category)
        .map_err(|e| Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, e.into()))?;
    let uploaded_at: DateTime<Utc> = row.get(6)?;
    Ok(MediaFile {
        id: row.get(0)?,
        file: row.get(1)?,
        file_name: row.get(2)?,
        file_size: row.get(3)?,
        file_type: row.get(4)?,
        category,
        uploaded_at,
    })
}

impl Sqlite {
    pub fn open<P: AsRef<Path>>(path: P, mode: Mode) -> Result<Self, Error> {
        let c = match mode {
            Mode::ReadWrite => Connection::open(path),
            Mode::ReadOnly => Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY),
        };
        Ok(Self { conn: c? })
    }

    fn assign_cache_size(&self) -> Result<(), Error> {
        self.pragma_update("cache_size", CACHE_SIZE)
    }

    fn pragma_update(&self, name: &str, value: &str) -> Result<(), Error> {
        self.conn.pragma_update(None, name, value)
    }
}

#![allow(clippy::unused_async)]
use crate::AppState;
use crate::classify::extension;
use crate::domain::{BlobStore, FileDraft, Repository};
use crate::error::ApiError;
use crate::sqlite::{Mode, Sqlite};
use axum::Json;
use axum::body::Bytes;
use axum::response::IntoResponse;
use chrono::Utc;
use futures::{Stream, TryStreamExt};
use futures_util::StreamExt;
use kernel::{Category, ErrorReply, MediaFile};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::io::StreamReader;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
};

/// Form field name carrying uploaded files. Parts under any other name
/// are ignored.
const FILE_FIELD: &str = "file";

/// Accepts multipart file uploads, classifies every file and persists the
/// accepted ones.
///
/// The batch is not atomic: the first unclassifiable file fails the whole
/// request, but files accepted earlier in the same request stay persisted.
#[utoipa::path(
    post,
    path = "/api/upload/",
    responses(
        (status = 201, description = "Files created successfully", body = [MediaFile]),
        (status = 400, description = "Empty upload or unclassifiable file", body = ErrorReply),
        (status = 500, description = "Server error", body = ErrorReply)
    ),
    tag = "files",
)]
pub async fn upload_files(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut repository = match Sqlite::open(&state.db, Mode::ReadWrite) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("{e}");
            return Err(ApiError::Internal(e.to_string()));
        }
    };

    let mut uploaded: Vec<MediaFile> = vec![];
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let mime_type = field.content_type().unwrap_or_default().to_string();

        let category = state.classifier.classify(&file_name, &mime_type);
        if category == Category::Other {
            tracing::warn!("file '{file_name}' declared as '{mime_type}' rejected");
            return Err(ApiError::InvalidFileType);
        }

        let (data, read_bytes) = read_from_stream(field).await?;
        let stored_path = state.store.put(&file_name, &data)?;
        let draft = FileDraft {
            stored_path,
            file_type: extension(&file_name),
            file_size: data.len() as u64,
            file_name,
            category,
            uploaded_at: Utc::now(),
        };
        let id = repository.insert_file(&draft)?;
        tracing::info!("file: {} read: {} file id: {}", draft.file_name, read_bytes, id);
        uploaded.push(draft.into_persisted(id));
    }

    if uploaded.is_empty() {
        return Err(ApiError::NoFiles);
    }

    Ok((StatusCode::CREATED, Json(uploaded)))
}

/// Lists all stored files.
#[utoipa::path(
    get,
    path = "/api/upload/",
    responses(
        (status = 200, description = "List all files successfully", body = [MediaFile]),
        (status = 500, description = "Server error", body = ErrorReply)
    ),
    tag = "files",
)]
pub async fn get_files(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    execute(&state.db, Mode::ReadOnly, move |mut repository| {
        let result = repository.get_files()?;
        Ok(Json(result))
    })
}

/// Deletes a file by id: the blob first, then the metadata row.
#[utoipa::path(
    delete,
    path = "/api/delete/{id}/",
    responses(
        (status = 204, description = "File successfully deleted"),
        (status = 404, description = "File not found", body = ErrorReply),
        (status = 500, description = "Server error", body = ErrorReply)
    ),
    tag = "files",
    params(
        ("id" = i64, Path, description = "File id")
    ),
)]
pub async fn delete_file(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db.clone();
    execute(&db, Mode::ReadWrite, move |mut repository| {
        let info = repository.get_file(id)?;

        // a blob already gone out of band does not fail the delete
        state.store.delete(&info.file)?;

        let removed = repository.delete_file(id)?;
        if removed == 0 {
            return Err(ApiError::NotFound);
        }
        tracing::info!("file: {id} deleted");
        Ok(StatusCode::NO_CONTENT)
    })
}

fn execute<F, R>(db: &PathBuf, mode: Mode, action: F) -> Result<R, ApiError>
where
    F: FnOnce(Sqlite) -> Result<R, ApiError>,
    R: IntoResponse,
{
    let start = Instant::now();
    match Sqlite::open(db, mode) {
        Ok(s) => {
            let res = action(s);
            let duration = start.elapsed();
            tracing::info!("DB query time: {:?}", duration);
            res
        }
        Err(e) => {
            tracing::error!("{e}");
            Err(ApiError::Internal(e.to_string()))
        }
    }
}

async fn read_from_stream<S, E>(stream: S) -> io::Result<(Vec<u8>, usize)>
where
    S: Stream<Item = Result<Bytes, E>> + StreamExt,
    E: Sync + std::error::Error + Send + 'static,
{
    // Convert the stream into an `AsyncRead`.
    let body_with_io_error = stream.map_err(io::Error::other);
    let body_reader = StreamReader::new(body_with_io_error);
    futures::pin_mut!(body_reader);
    let mut buffer = Vec::new();

    let copied_bytes = tokio::io::copy(&mut body_reader, &mut buffer).await?;
    let copied_bytes = usize::try_from(copied_bytes).unwrap_or(usize::MAX);
    Ok((buffer, copied_bytes))
}

use std::path::PathBuf;

use comfy_table::{Attribute, Cell, ContentArrangement, Table, presets::UTF8_HORIZONTAL_ONLY};
use endpoint::Endpoint;
use kernel::{ErrorReply, MediaFile};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use tokio::fs::File;
use tokio_util::io::ReaderStream;

pub mod endpoint;

pub struct UploadParams {
    pub uri: String,
    pub files: Vec<String>,
}

/// Uploads the given files in a single multipart request. Every part is
/// named `file` and carries the MIME type guessed from its extension,
/// which the server classifies on.
pub async fn upload_files(params: UploadParams) {
    let Some(mut endpoint) = Endpoint::new(&params.uri) else {
        println!("invalid URI: {}", params.uri);
        return;
    };
    endpoint.append_path("api/upload/");

    let mut form = Form::new();
    for file in &params.files {
        let path = PathBuf::from(file);
        let file_name = path.file_name().unwrap().to_os_string();
        let file_name = file_name.to_str().unwrap().to_string();
        let mime = mime_guess::from_path(&path).first_or_octet_stream();

        let error_message = format!("no such file {file}");
        let f = File::open(file).await.expect(&error_message);
        let meta = f.metadata().await.expect(&error_message);
        let stream = ReaderStream::new(f);
        let stream = reqwest::Body::wrap_stream(stream);
        let part = Part::stream_with_length(stream, meta.len())
            .file_name(file_name)
            .mime_str(mime.essence_str())
            .expect("invalid MIME type");
        form = form.part("file", part);
    }

    let client = Client::new();
    let result = client.post(endpoint.to_string()).multipart(form).send().await;
    match result {
        Ok(response) => {
            let status = response.status();
            if status.is_success() {
                let uploaded: Vec<MediaFile> = response.json().await.unwrap_or_default();
                for f in uploaded {
                    println!("file {} uploaded. Id: {} category: {}", f.file_name, f.id, f.category);
                }
            } else {
                let body = response.text().await.unwrap_or_default();
                match serde_json::from_str::<ErrorReply>(&body) {
                    Ok(reply) => println!("upload failed. Status: {status}. Error: {}", reply.error),
                    Err(_) => println!("upload failed. Status: {status}"),
                }
            }
        }
        Err(e) => {
            println!("upload_files error: {e}");
        }
    }
}

/// Fetches the file listing and renders it as a table.
pub async fn list_files(uri: &str) {
    let Some(mut endpoint) = Endpoint::new(uri) else {
        println!("invalid URI: {uri}");
        return;
    };
    endpoint.append_path("api/upload/");

    let client = Client::new();

    match client.get(endpoint.to_string()).send().await {
        Ok(response) => match response.json().await {
            Ok(r) => {
                let mut table = Table::new();
                table
                    .load_preset(UTF8_HORIZONTAL_ONLY)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_width(120)
                    .set_header(vec![
                        Cell::new("Id").add_attribute(Attribute::Bold),
                        Cell::new("Name").add_attribute(Attribute::Bold),
                        Cell::new("Size").add_attribute(Attribute::Bold),
                        Cell::new("Type").add_attribute(Attribute::Bold),
                        Cell::new("Category").add_attribute(Attribute::Bold),
                        Cell::new("Uploaded at").add_attribute(Attribute::Bold),
                    ]);

                let files: Vec<MediaFile> = r;
                for f in files {
                    table.add_row(vec![
                        Cell::new(f.id),
                        Cell::new(f.file_name),
                        Cell::new(f.file_size),
                        Cell::new(f.file_type),
                        Cell::new(f.category),
                        Cell::new(f.uploaded_at),
                    ]);
                }
                println!("{table}");
            }
            Err(e) => println!("JSON decode error: {e}"),
        },
        Err(e) => {
            println!("error: {e}");
        }
    }
}

/// Deletes a single file by its id.
pub async fn delete_file(uri: &str, id: i64) {
    let Some(mut endpoint) = Endpoint::new(uri) else {
        println!("invalid URI: {uri}");
        return;
    };
    endpoint.append_path(&format!("api/delete/{id}/"));

    let client = Client::new();
    match client.delete(endpoint.to_string()).send().await {
        Ok(response) => {
            let status = response.status();
            if status.is_success() {
                println!("file {id} deleted");
            } else {
                let body = response.text().await.unwrap_or_default();
                match serde_json::from_str::<ErrorReply>(&body) {
                    Ok(reply) => println!("file {id} not deleted. Status: {status}. Error: {}", reply.error),
                    Err(_) => println!("file {id} not deleted. Status: {status}"),
                }
            }
        }
        Err(e) => {
            println!("delete_file error: {e}");
        }
    }
}

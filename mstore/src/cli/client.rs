use client::UploadParams;

pub async fn upload_files(params: UploadParams) {
    client::upload_files(params).await;
}

pub async fn list_files(uri: &str) {
    client::list_files(uri).await;
}

pub async fn delete_file(uri: &str, id: i64) {
    client::delete_file(uri, id).await;
}

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{Base64UploadRequest, UploadFile, UploadResponse},
    services::storage_service,
    utils::extractors::Json,
};

pub async fn upload_file(
    State(state): State<AppState>,
    req: Request,
) -> Result<Json<UploadResponse>> {
    let is_multipart = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"));

    let file = if is_multipart {
        let multipart = Multipart::from_request(req, &state)
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart request: {}", e)))?;
        read_multipart(multipart).await?
    } else {
        let Json(payload) = Json::<Base64UploadRequest>::from_request(req, &state).await?;
        read_base64(payload)?
    };

    let storage = &state.config.storage;
    let content_type = storage_service::validate_upload(&file, storage)?;

    let key = storage_service::object_key(
        file.folder.as_deref(),
        &file.file_name,
        chrono::Utc::now().timestamp_millis(),
    );
    let size = file.data.len();

    storage_service::put_public_object(
        &state.s3_client,
        &storage.bucket,
        &key,
        &content_type,
        file.data,
    )
    .await?;

    tracing::info!("Uploaded {} ({} bytes)", key, size);

    Ok(Json(UploadResponse {
        success: true,
        url: storage_service::public_url(&storage.public_url, &key),
        key,
        size,
        content_type,
    }))
}

async fn read_multipart(mut multipart: Multipart) -> Result<UploadFile> {
    let mut file: Option<(String, Option<String>, Vec<u8>)> = None;
    let mut folder = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart request: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e)))?
                    .to_vec();
                file = Some((file_name, content_type, data));
            }
            Some("folder") => {
                folder = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e)))?,
                );
            }
            _ => {}
        }
    }

    let (file_name, content_type, data) = file
        .ok_or_else(|| AppError::BadRequest("No 'file' field found".to_string()))?;

    Ok(UploadFile {
        file_name,
        content_type,
        folder,
        data,
    })
}

fn read_base64(payload: Base64UploadRequest) -> Result<UploadFile> {
    let raw = payload
        .file
        .filter(|f| !f.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;

    let (embedded_type, data) = storage_service::decode_base64_payload(&raw)?;

    Ok(UploadFile {
        file_name: payload.file_name.unwrap_or_else(|| "upload".to_string()),
        content_type: payload.content_type.or(embedded_type),
        folder: payload.folder,
        data,
    })
}

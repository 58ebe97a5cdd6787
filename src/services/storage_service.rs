use aws_sdk_s3::{self as s3, primitives::ByteStream, types::ObjectCannedAcl};
use base64::{Engine, engine::general_purpose::STANDARD};

use crate::{
    config::StorageConfig,
    error::{AppError, Result},
    models::UploadFile,
};

const DEFAULT_FILE_NAME: &str = "file";

pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .to_lowercase()
        .chars()
        .map(|c| match c {
            c if c.is_ascii_alphanumeric() => c,
            '.' | '-' | '_' => c,
            _ => '-',
        })
        .collect();

    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '-');
    if trimmed.is_empty() {
        DEFAULT_FILE_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Keeps each path segment of a folder name key-safe and drops empty or
/// relative segments.
pub fn sanitize_folder(folder: &str) -> Option<String> {
    let segments: Vec<String> = folder
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .map(sanitize_file_name)
        .collect();

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

pub fn object_key(folder: Option<&str>, file_name: &str, timestamp_millis: i64) -> String {
    let name = format!("{}-{}", timestamp_millis, sanitize_file_name(file_name));
    match folder.and_then(sanitize_folder) {
        Some(folder) => format!("{}/{}", folder, name),
        None => name,
    }
}

pub fn public_url(base_url: &str, key: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), key)
}

pub fn content_type_from_extension(file_name: &str) -> Option<&'static str> {
    let (_, ext) = file_name.rsplit_once('.')?;
    let content_type = match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "pdf" => "application/pdf",
        _ => return None,
    };
    Some(content_type)
}

/// Decodes plain base64 or a `data:<mime>;base64,<payload>` URL, returning the
/// embedded MIME type when there is one.
pub fn decode_base64_payload(raw: &str) -> Result<(Option<String>, Vec<u8>)> {
    let raw = raw.trim();

    let (mime, payload) = match raw.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest
                .split_once(',')
                .ok_or_else(|| AppError::BadRequest("Malformed data URL".to_string()))?;
            let mime = header
                .strip_suffix(";base64")
                .ok_or_else(|| AppError::BadRequest("Data URL must be base64 encoded".to_string()))?;
            let mime = (!mime.is_empty()).then(|| mime.to_string());
            (mime, payload)
        }
        None => (None, raw),
    };

    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let data = STANDARD
        .decode(compact)
        .map_err(|e| AppError::BadRequest(format!("Invalid base64 payload: {}", e)))?;

    Ok((mime, data))
}

/// Checks emptiness, size and MIME prefix, and returns the resolved content type.
pub fn validate_upload(file: &UploadFile, storage: &StorageConfig) -> Result<String> {
    if file.data.is_empty() {
        return Err(AppError::BadRequest("File is empty".to_string()));
    }

    if file.data.len() > storage.max_upload_bytes {
        return Err(AppError::BadRequest(format!(
            "File too large. Maximum size is {} bytes",
            storage.max_upload_bytes
        )));
    }

    let content_type = file
        .content_type
        .as_deref()
        .map(str::trim)
        .filter(|ct| !ct.is_empty() && *ct != "application/octet-stream")
        .map(|ct| ct.to_ascii_lowercase())
        .or_else(|| content_type_from_extension(&file.file_name).map(str::to_string))
        .ok_or_else(|| AppError::BadRequest("Unable to determine file type".to_string()))?;

    if !storage
        .allowed_mime_prefixes
        .iter()
        .any(|prefix| content_type.starts_with(prefix.as_str()))
    {
        return Err(AppError::BadRequest(format!(
            "Unsupported file type '{}'",
            content_type
        )));
    }

    Ok(content_type)
}

pub async fn put_public_object(
    client: &s3::Client,
    bucket: &str,
    key: &str,
    content_type: &str,
    data: Vec<u8>,
) -> Result<()> {
    client
        .put_object()
        .bucket(bucket)
        .key(key)
        .content_type(content_type)
        .acl(ObjectCannedAcl::PublicRead)
        .body(ByteStream::from(data))
        .send()
        .await
        .map_err(|e| AppError::StorageError(s3::error::DisplayErrorContext(e).to_string()))?;

    Ok(())
}

use serde::{Deserialize, Serialize};

/// JSON form of an upload: `file` is plain base64 or a `data:` URL.
#[derive(Debug, Deserialize)]
pub struct Base64UploadRequest {
    pub file: Option<String>,
    #[serde(alias = "fileName", alias = "filename")]
    pub file_name: Option<String>,
    #[serde(alias = "contentType")]
    pub content_type: Option<String>,
    pub folder: Option<String>,
}

/// A decoded upload ready for validation.
#[derive(Debug)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub folder: Option<String>,
    pub data: Vec<u8>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub url: String,
    pub key: String,
    pub size: usize,
    pub content_type: String,
}

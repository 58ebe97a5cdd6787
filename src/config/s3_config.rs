use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::{Client as S3Client, config::Credentials};

use crate::config::StorageConfig;

/// Builds a client for an S3-compatible endpoint. Path-style addressing keeps
/// the bucket out of the host name, which most non-AWS providers require.
pub async fn load_s3_client(storage: &StorageConfig) -> S3Client {
    let credentials = Credentials::new(
        storage.access_key_id.clone(),
        storage.secret_access_key.clone(),
        None,
        None,
        "storage-credentials",
    );

    let shared = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(storage.region.clone()))
        .credentials_provider(credentials)
        .endpoint_url(storage.endpoint.clone())
        .load()
        .await;

    let config = aws_sdk_s3::config::Builder::from(&shared)
        .force_path_style(true)
        .build();

    tracing::info!("S3 client initialized for {}", storage.endpoint);

    S3Client::from_conf(config)
}

use aws_config::{BehaviorVersion, Region};
use aws_sdk_sesv2::{Client as SesClient, config::Credentials};

use crate::config::MailConfig;

pub async fn load_ses_client(mail: &MailConfig) -> SesClient {
    let credentials = Credentials::new(
        mail.access_key_id.clone(),
        mail.secret_access_key.clone(),
        None,
        None,
        "env-credentials",
    );

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(mail.region.clone()))
        .credentials_provider(credentials);

    if let Some(endpoint) = &mail.endpoint {
        loader = loader.endpoint_url(endpoint.clone());
    }

    let config = loader.load().await;

    let ses_client = SesClient::new(&config);

    tracing::info!("AWS SES client initialized");

    ses_client
}

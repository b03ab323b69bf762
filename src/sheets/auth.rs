use crate::blocking::run_blocking;
use crate::config::GoogleConfig;
use crate::error::{AppError, Result};
use crate::sheets::client::AUTH_SCOPES;
use hyper_util::client::legacy::connect::HttpConnector;
use std::fs;
use tracing::{debug, instrument};
use yup_oauth2::{
    ServiceAccountAuthenticator, ServiceAccountKey, authenticator::Authenticator,
    hyper_rustls::HttpsConnector,
};

pub(super) type AuthType = Authenticator<HttpsConnector<HttpConnector>>;

/// Create a service account authenticator and verify it by fetching a token
#[instrument(name = "Authenticating service account", skip_all)]
pub(super) async fn create_and_verify_authenticator(config: &GoogleConfig) -> Result<AuthType> {
    let key = load_service_account_key(config).await?;
    debug!(client_email = %key.client_email, "Loaded service account key");

    let auth = ServiceAccountAuthenticator::builder(key)
        .build()
        .await
        .map_err(|e| AppError::Auth(format!("Failed to build authenticator: {}", e)))?;

    let _token = auth
        .token(&AUTH_SCOPES)
        .await
        .map_err(|e| AppError::Auth(format!("Failed to get token: {}", e)))?;

    Ok(auth)
}

async fn load_service_account_key(config: &GoogleConfig) -> Result<ServiceAccountKey> {
    let path = config.credentials_file.clone();

    let contents = run_blocking(move || {
        fs::read_to_string(&path).map_err(|e| {
            AppError::Auth(format!(
                "Failed to read credentials file {:?}: {}",
                path, e
            ))
        })
    })
    .await?;

    yup_oauth2::parse_service_account_key(contents)
        .map_err(|e| AppError::Auth(format!("Invalid service account key: {}", e)))
}

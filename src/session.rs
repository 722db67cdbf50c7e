use crate::config::{Config, GoogleConfig};
use crate::error::{AppError, Result};
use hyper_util::client::legacy::connect::HttpConnector;
use std::fs;
use std::path::PathBuf;
use tracing::debug;
use tracing::instrument;
use yup_oauth2::{
    ApplicationSecret, InstalledFlowAuthenticator, InstalledFlowReturnMethod,
    authenticator::Authenticator, hyper_rustls::HttpsConnector,
};

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_CERT_URL: &str = "https://www.googleapis.com/oauth2/v1/certs";
pub(crate) const GOOGLE_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

type AuthType = Authenticator<HttpsConnector<HttpConnector>>;

/// One authenticated Google session, parameterized by scope and token cache.
///
/// Both facades build one of these in their constructor and hold it for their
/// lifetime; the underlying authenticator refreshes tokens and rewrites the
/// cache file as needed. No locking is done on the cache file, so concurrent
/// processes sharing a cache path must be serialized by the caller.
pub struct SessionProvider {
    auth: AuthType,
    scopes: Vec<String>,
}

impl SessionProvider {
    /// Authenticate for `scope`, verifying the session by fetching a token.
    ///
    /// Tokens are persisted to `token_cache_file` under the cache directory.
    /// If no valid token is stored, this runs the interactive consent flow
    /// (blocking on user input).
    pub async fn connect(
        config: &GoogleConfig,
        scope: &str,
        token_cache_file: &str,
    ) -> Result<Self> {
        let auth = from_installed_flow(
            config.client_id.clone(),
            config.client_secret.clone(),
            token_cache_file,
        )
        .await?;

        // Trigger authentication by requesting a token
        let scopes = vec![scope.to_string()];
        let _token = auth
            .token(&scopes)
            .await
            .map_err(|e| AppError::Auth(format!("Failed to get token: {}", e)))?;

        Ok(Self { auth, scopes })
    }

    /// Clone of the underlying authenticator, for constructing a typed API hub.
    pub fn authenticator(&self) -> AuthType {
        self.auth.clone()
    }

    /// A valid bearer token for the session's scope, refreshed if needed.
    pub async fn access_token(&self) -> Result<String> {
        let token = self
            .auth
            .token(&self.scopes)
            .await
            .map_err(|e| AppError::Auth(format!("Failed to get token: {}", e)))?;

        token
            .token()
            .map(str::to_string)
            .ok_or_else(|| AppError::Auth("Token response contained no access token".to_string()))
    }
}

async fn from_installed_flow(
    client_id: String,
    client_secret: String,
    token_cache_file: &str,
) -> Result<AuthType> {
    // Build the OAuth application secret from config values
    let secret = ApplicationSecret {
        client_id,
        client_secret,
        auth_uri: GOOGLE_AUTH_URL.to_string(),
        token_uri: GOOGLE_TOKEN_URL.to_string(),
        auth_provider_x509_cert_url: Some(GOOGLE_CERT_URL.to_string()),
        redirect_uris: vec![GOOGLE_REDIRECT_URI.to_string()],
        project_id: None,
        client_email: None,
        client_x509_cert_url: None,
    };

    let token_cache_path = token_cache_path(token_cache_file)?;

    // Create parent directory if it doesn't exist
    if let Some(parent) = token_cache_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::TokenStore(format!("Failed to create token cache directory: {}", e))
        })?;
    }

    // Build the authenticator with installed flow (interactive mode)
    // User will copy/paste the authorization code from the browser
    let auth = InstalledFlowAuthenticator::builder(secret, InstalledFlowReturnMethod::Interactive)
        .persist_tokens_to_disk(token_cache_path)
        .build()
        .await
        .map_err(|e| AppError::Auth(format!("Failed to build authenticator: {}", e)))?;

    Ok(auth)
}

/// Clear cached tokens by deleting the given token cache file
#[instrument(name = "Clearing cached tokens", skip_all, fields(token_cache_file))]
pub fn clear_tokens(token_cache_file: &str) -> Result<()> {
    let token_path = token_cache_path(token_cache_file)?;

    if !token_path.exists() {
        debug!("No cached tokens to clear");
        return Ok(());
    }

    fs::remove_file(&token_path)
        .map_err(|e| AppError::TokenStore(format!("Failed to delete tokens file: {}", e)))?;
    debug!("Cleared cached tokens");

    Ok(())
}

fn token_cache_path(token_cache_file: &str) -> Result<PathBuf> {
    Config::cache_file(token_cache_file)
}

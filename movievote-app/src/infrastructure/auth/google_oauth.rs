use crate::config::GoogleSettings;
use crate::domain::GoogleProfile;
use movievote_errors::AppError;
use oauth2::{
    basic::BasicClient, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken,
    PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, Scope, TokenResponse, TokenUrl,
};

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    oauth2::EndpointSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointSet,
>;

/// Everything the login redirect needs, plus the secrets to keep in the session
/// until Google calls back.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub url: String,
    pub csrf_state: String,
    pub pkce_verifier: String,
}

#[derive(Clone)]
pub struct GoogleOAuth {
    client: ConfiguredClient,
    redirect_uri: RedirectUrl,
    http_client: reqwest::Client,
}

impl GoogleOAuth {
    pub fn new(settings: &GoogleSettings) -> Result<Self, AppError> {
        let config_err = |e: oauth2::url::ParseError| AppError::Config(e.to_string());
        let auth_url = AuthUrl::new(GOOGLE_AUTH_URL.to_string()).map_err(config_err)?;
        let token_url = TokenUrl::new(GOOGLE_TOKEN_URL.to_string()).map_err(config_err)?;
        let redirect = RedirectUrl::new(settings.redirect_uri.clone()).map_err(config_err)?;

        let client = BasicClient::new(ClientId::new(settings.client_id.clone()))
            .set_client_secret(ClientSecret::new(settings.client_secret.clone()))
            .set_auth_uri(auth_url)
            .set_token_uri(token_url);

        Ok(Self {
            client,
            redirect_uri: redirect,
            http_client: reqwest::Client::new(),
        })
    }

    pub fn authorize(&self) -> AuthorizationRequest {
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (auth_url, csrf_token) = self
            .client
            .authorize_url(CsrfToken::new_random)
            .set_redirect_uri(std::borrow::Cow::Borrowed(&self.redirect_uri))
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .set_pkce_challenge(pkce_challenge)
            .url();

        AuthorizationRequest {
            url: auth_url.to_string(),
            csrf_state: csrf_token.secret().clone(),
            pkce_verifier: pkce_verifier.secret().clone(),
        }
    }

    /// Trades the callback code for an access token and reads the profile with it.
    pub async fn exchange_code(
        &self,
        code: &str,
        pkce_verifier: String,
    ) -> Result<GoogleProfile, AppError> {
        let http_client = oauth2::reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AppError::Auth(format!("Failed to build HTTP client: {}", e)))?;

        let token_result = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_redirect_uri(std::borrow::Cow::Borrowed(&self.redirect_uri))
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier))
            .request_async(&http_client)
            .await
            .map_err(|e| AppError::Auth(format!("Token exchange failed: {:?}", e)))?;

        let access_token = token_result.access_token().secret();

        self.http_client
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("Failed to fetch user info: {}", e)))?
            .error_for_status()
            .map_err(|e| AppError::Auth(format!("User info request rejected: {}", e)))?
            .json::<GoogleProfile>()
            .await
            .map_err(|e| AppError::Auth(format!("Failed to parse user info: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> GoogleSettings {
        GoogleSettings {
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            redirect_uri: "http://localhost:3000/auth/callback".to_string(),
        }
    }

    #[test]
    fn test_authorize_url_carries_state_and_pkce() {
        let oauth = GoogleOAuth::new(&settings()).unwrap();
        let request = oauth.authorize();

        assert!(request.url.starts_with(GOOGLE_AUTH_URL));
        assert!(request.url.contains("client_id=client-id"));
        assert!(request.url.contains("code_challenge_method=S256"));
        assert!(request.url.contains(&format!("state={}", request.csrf_state)));
        assert!(!request.pkce_verifier.is_empty());
    }

    #[test]
    fn test_each_request_gets_fresh_state() {
        let oauth = GoogleOAuth::new(&settings()).unwrap();
        assert_ne!(oauth.authorize().csrf_state, oauth.authorize().csrf_state);
    }

    #[test]
    fn test_invalid_redirect_uri_is_config_error() {
        let mut bad = settings();
        bad.redirect_uri = "not a url".to_string();
        assert!(matches!(GoogleOAuth::new(&bad), Err(AppError::Config(_))));
    }
}

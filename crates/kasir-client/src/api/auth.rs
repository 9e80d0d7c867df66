//! Login client.

use kasir_core::validation::{validate_email, validate_password};
use kasir_core::{ErrorResponse, LoginRequest, LoginResponse};
use reqwest::Method;
use tracing::{info, warn};

use super::{decode_body, ApiClient, AuthApi};
use crate::error::{ClientError, ClientResult};

const LOGIN: &str = "users/login";

/// REST implementation of [`AuthApi`].
#[derive(Debug, Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub fn new(api: ApiClient) -> Self {
        AuthClient { api }
    }
}

impl AuthApi for AuthClient {
    async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        validate_email(email)?;
        validate_password(password)?;

        let body = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let url = self.api.endpoint(LOGIN)?;
        let (status, bytes) = self
            .api
            .send(self.api.request(Method::POST, url).json(&body))
            .await?;

        if !status.is_success() {
            let error: ErrorResponse = serde_json::from_slice(&bytes)
                .map_err(|e| ClientError::Decode(format!("Unreadable error body: {}", e)))?;
            warn!(status = status.as_u16(), email = %body.email, "Login rejected");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: error.error,
            });
        }

        let response: LoginResponse = decode_body(&bytes)?;
        self.api.tokens().save(&response.token)?;
        info!(user_id = %response.user_id, "Signed in");
        Ok(response)
    }

    fn logout(&self) -> ClientResult<()> {
        self.api.tokens().clear()
    }
}

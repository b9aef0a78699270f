use serde::Deserialize;
use serde_json::json;
use tahfeez_core::{AdminIdentity, AdminSession, AppResult};
use tahfeez_domain::RequestBody;

use crate::api_ports::{ApiGateway, ApiMethod, decode, decode_nested};

const LOGIN_PATH: &str = "admin/login";
const LOGOUT_PATH: &str = "admin/logout";
const PROFILE_PATH: &str = "admin/profile";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    #[serde(alias = "user")]
    admin: AdminIdentity,
}

/// Admin authentication endpoints.
#[derive(Debug, Clone)]
pub struct AuthApi {
    gateway: ApiGateway,
}

impl AuthApi {
    /// Creates the API bound to a gateway.
    #[must_use]
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// Exchanges credentials for a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AdminSession> {
        let body = RequestBody::Json(json!({ "email": email, "password": password }));
        let value = self
            .gateway
            .send_body(ApiMethod::Post, LOGIN_PATH, Some(body))
            .await?;
        let response = decode::<LoginResponse>(value, "login response")?;

        Ok(AdminSession::new(response.token, response.admin))
    }

    /// Revokes the current token on the server.
    pub async fn logout(&self) -> AppResult<()> {
        self.gateway
            .send_body(ApiMethod::Post, LOGOUT_PATH, None)
            .await
            .map(|_| ())
    }

    /// Fetches the signed-in admin.
    pub async fn profile(&self) -> AppResult<AdminIdentity> {
        let value = self.gateway.get(PROFILE_PATH, Vec::new()).await?;
        decode_nested(value, "admin")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tahfeez_core::{AppError, Locale};

    use super::AuthApi;
    use crate::ApiGateway;
    use crate::test_support::{FakeTransport, authorized_gateway};

    #[tokio::test]
    async fn login_accepts_user_alias_and_sends_no_token() {
        let transport = FakeTransport::new(|_| {
            Ok(json!({
                "token": "abc",
                "user": {"id": 1, "name": "المدير", "email": "admin@academy.com"}
            }))
        });
        let api = AuthApi::new(ApiGateway::new(transport.clone(), Locale::Ar));

        let session = api.login("admin@academy.com", "secret").await;

        assert!(matches!(
            session,
            Ok(ref value) if value.token() == "abc" && value.admin().name() == "المدير"
        ));
        let requests = transport.requests().await;
        assert!(requests[0].bearer_token.is_none());
        assert_eq!(requests[0].path, "admin/login");
    }

    #[tokio::test]
    async fn profile_unwraps_admin_key() {
        let transport =
            FakeTransport::new(|_| Ok(json!({"admin": {"id": 3, "name": "مشرف"}})));
        let api = AuthApi::new(authorized_gateway(transport));

        let profile = api.profile().await;

        assert!(matches!(profile, Ok(ref admin) if admin.id() == 3));
    }

    #[tokio::test]
    async fn malformed_login_response_is_a_decode_error() {
        let transport = FakeTransport::new(|_| Ok(json!({"token": "abc"})));
        let api = AuthApi::new(ApiGateway::new(transport, Locale::Ar));

        let session = api.login("admin@academy.com", "secret").await;

        assert!(matches!(session, Err(AppError::Decode(_))));
    }
}

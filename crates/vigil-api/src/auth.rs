// Login exchange and logout
//
// The login exchange is the one unauthenticated call: it trades
// username/password for an identity, role, and opaque credential token.
// Installing the returned token into the client is the session layer's
// job, not this module's.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::LoginResponse;

impl ApiClient {
    /// Exchange credentials for a session token.
    ///
    /// `POST /api/auth/login` — does not attach any stored credential.
    /// A 401 maps to [`Error::Unauthenticated`] (invalid credentials).
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, Error> {
        let url = self.api_url("auth/login")?;
        debug!(username, "logging in at {url}");

        let body = json!({
            "username": username,
            "password": password.expose_secret(),
        });

        let resp = self
            .http()
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Network)?;

        let payload = Self::normalize(resp).await?;
        let login: LoginResponse =
            serde_json::from_value(payload.clone()).map_err(|e| Error::Decode {
                message: e.to_string(),
                body: payload.to_string(),
            })?;

        debug!(identity = %login.identity, role = %login.role, "login successful");
        Ok(login)
    }

    /// End the current session on the backend.
    ///
    /// `POST /api/auth/logout` — callers treat failures as non-fatal;
    /// the local session is discarded regardless.
    pub async fn logout(&self) -> Result<(), Error> {
        let _: serde_json::Value = self.post("auth/logout", &json!({})).await?;
        debug!("logout complete");
        Ok(())
    }
}

// Vigil backend HTTP client
//
// Wraps `reqwest::Client` with URL construction, credential injection,
// and payload normalization. Endpoint groups (auth, sensors, events)
// are implemented as inherent methods via separate files to keep this
// module focused on transport mechanics.

use std::sync::RwLock;

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// HTTP client for the Vigil backend.
///
/// Holds the bearer credential for the current session in an interior
/// slot; the session layer installs it after a successful login
/// exchange and clears it on logout. Every authenticated request
/// checks the slot first and fails with [`Error::Unauthenticated`]
/// before any network I/O when it is empty.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: RwLock<Option<SecretString>>,
}

impl ApiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the backend root (e.g. `https://vigil.local:8443`);
    /// the `/api` prefix is added per request.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            token: RwLock::new(None),
        }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client (for the login exchange, which must
    /// not carry a credential).
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── Credential management ────────────────────────────────────────

    /// Install the session credential. Replaces any previous one atomically.
    pub fn install_credential(&self, token: SecretString) {
        debug!("installing session credential");
        *self.token.write().expect("credential lock poisoned") = Some(token);
    }

    /// Remove the session credential.
    pub fn clear_credential(&self) {
        debug!("clearing session credential");
        *self.token.write().expect("credential lock poisoned") = None;
    }

    /// Whether a credential is currently installed.
    pub fn has_credential(&self) -> bool {
        self.token.read().expect("credential lock poisoned").is_some()
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/api/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/api/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send an authenticated GET request.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.request(Method::GET, path, None::<&()>).await
    }

    /// Send an authenticated POST request with a JSON body.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Send an authenticated PATCH request without a body.
    pub(crate) async fn patch<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.request(Method::PATCH, path, None::<&()>).await
    }

    /// Issue an authenticated request and decode the normalized payload.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&(impl Serialize + Sync)>,
    ) -> Result<T, Error> {
        // Short-circuit before any I/O when anonymous.
        let token = {
            let guard = self.token.read().expect("credential lock poisoned");
            guard
                .as_ref()
                .map(|t| t.expose_secret().to_owned())
                .ok_or(Error::Unauthenticated)?
        };

        let url = self.api_url(path)?;
        debug!("{method} {url}");

        let mut builder = self.http.request(method, url).bearer_auth(token);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(Error::Network)?;
        let payload = Self::normalize(resp).await?;

        serde_json::from_value(payload.clone()).map_err(|e| Error::Decode {
            message: e.to_string(),
            body: payload.to_string(),
        })
    }

    /// Normalize a response into a single JSON payload shape.
    ///
    /// Non-success statuses become typed errors (401 maps to
    /// [`Error::Unauthenticated`]). Successful responses with a JSON
    /// content type are parsed as-is; any other content type is wrapped
    /// as `{"success": true, "message": <raw body>}` so callers see one
    /// uniform payload shape.
    pub(crate) async fn normalize(resp: reqwest::Response) -> Result<serde_json::Value, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Unauthenticated);
        }
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
            });
        }

        let is_json = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("json"));

        let body = resp.text().await.map_err(Error::Network)?;

        if is_json {
            serde_json::from_str(&body).map_err(|e| Error::Decode {
                message: e.to_string(),
                body,
            })
        } else {
            trace!("non-JSON response body, wrapping");
            Ok(serde_json::json!({ "success": true, "message": body }))
        }
    }
}

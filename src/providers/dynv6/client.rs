use std::fmt;
use std::future::Future;
use std::sync::Arc;

use log::{debug, error};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Request, Response};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::auth::credentials::{CredentialManager, DYNV6_TOKEN_KEY};
use crate::config::Config;
use crate::providers::dynv6::error::Dynv6Error;
use crate::providers::dynv6::types::{Dynv6Record, Dynv6Zone};

const TRUNCATE_LIMIT: usize = 256;

/// Client for the dynv6 REST API.
///
/// Cloning is cheap: clones share the HTTP transport and the token.
#[derive(Clone)]
pub struct Dynv6Provider {
    config: Config,
    client: Client,
    token: Arc<str>,
    cancel: CancellationToken,
}

impl fmt::Debug for Dynv6Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dynv6Provider")
            .field("config", &self.config)
            .field("token", &"<redacted>")
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

impl Dynv6Provider {
    pub fn new(
        config: Config,
        credentials: Arc<dyn CredentialManager>,
    ) -> Result<Self, Dynv6Error> {
        let token = credentials
            .get(DYNV6_TOKEN_KEY)
            .map_err(|e| Dynv6Error::Credential(e.to_string()))?;
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self::with_client(config, token, client))
    }

    /// Builds a provider on top of a caller-supplied transport.
    pub fn with_client(config: Config, token: impl Into<String>, client: Client) -> Self {
        let token: String = token.into();
        Self {
            config,
            client,
            token: Arc::from(token),
            cancel: CancellationToken::new(),
        }
    }

    /// Returns a handle whose requests fail with [`Dynv6Error::Cancelled`]
    /// once `cancel` fires.
    pub fn with_cancellation(&self, cancel: CancellationToken) -> Self {
        Self {
            cancel,
            ..self.clone()
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path)
    }

    pub(crate) fn new_request(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Request, Dynv6Error> {
        if self.cancel.is_cancelled() {
            return Err(Dynv6Error::Cancelled);
        }
        let url = Url::parse(url).map_err(|source| Dynv6Error::UrlParse {
            url: url.to_string(),
            source,
        })?;

        let mut builder = self.client.request(method, url).bearer_auth(&self.token);
        if let Some(body) = body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }
        Ok(builder.build()?)
    }

    async fn cancellable<T, F>(&self, fut: F) -> Result<T, Dynv6Error>
    where
        F: Future<Output = Result<T, Dynv6Error>>,
    {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(Dynv6Error::Cancelled),
            result = fut => result,
        }
    }

    async fn execute(&self, request: Request) -> Result<Response, Dynv6Error> {
        debug!("[dynv6] {} {}", request.method(), request.url());
        let response = self.client.execute(request).await?;
        debug!("[dynv6] Response Status: {}", response.status());
        check_status_code(response).await
    }

    async fn fetch_json<T>(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<T, Dynv6Error>
    where
        T: DeserializeOwned,
    {
        let request = self.new_request(method, url, body)?;
        self.cancellable(async {
            let response = self.execute(request).await?;
            let bytes = response.bytes().await?;
            decode(&bytes)
        })
        .await
    }

    async fn fetch_empty(&self, method: Method, url: &str) -> Result<(), Dynv6Error> {
        let request = self.new_request(method, url, None)?;
        self.cancellable(async { self.execute(request).await.map(|_| ()) })
            .await
    }

    pub async fn get_zone_by_name(&self, zone_name: &str) -> Result<Dynv6Zone, Dynv6Error> {
        let zone_name = zone_name.strip_suffix('.').unwrap_or(zone_name);
        let url = self.endpoint(&format!("/zones/by-name/{zone_name}"));
        self.fetch_json(Method::GET, &url, None).await
    }

    pub async fn get_zone_by_id(&self, zone_id: i64) -> Result<Dynv6Zone, Dynv6Error> {
        let url = self.endpoint(&format!("/zones/{zone_id}"));
        self.fetch_json(Method::GET, &url, None).await
    }

    pub async fn get_zones(&self) -> Result<Vec<Dynv6Zone>, Dynv6Error> {
        let url = self.endpoint("/zones");
        self.fetch_json(Method::GET, &url, None).await
    }

    /// Resolves a numeric zone reference by ID and anything else by name.
    pub async fn resolve_zone(&self, zone: &str) -> Result<Dynv6Zone, Dynv6Error> {
        match zone.trim().parse::<i64>() {
            Ok(zone_id) => self.get_zone_by_id(zone_id).await,
            Err(_) => self.get_zone_by_name(zone.trim()).await,
        }
    }

    pub async fn get_records(&self, zone_id: i64) -> Result<Vec<Dynv6Record>, Dynv6Error> {
        let url = self.endpoint(&format!("/zones/{zone_id}/records"));
        self.fetch_json(Method::GET, &url, None).await
    }

    pub async fn delete_record(&self, zone_id: i64, record_id: i64) -> Result<(), Dynv6Error> {
        let url = self.endpoint(&format!("/zones/{zone_id}/records/{record_id}"));
        self.fetch_empty(Method::DELETE, &url).await
    }

    pub async fn add_record(
        &self,
        zone_id: i64,
        rec: &Dynv6Record,
    ) -> Result<Dynv6Record, Dynv6Error> {
        let url = self.endpoint(&format!("/zones/{zone_id}/records"));
        self.add_or_update_record(Method::POST, &url, rec).await
    }

    /// `rec.id` must already be assigned.
    pub async fn update_record(
        &self,
        zone_id: i64,
        rec: &Dynv6Record,
    ) -> Result<Dynv6Record, Dynv6Error> {
        let url = self.endpoint(&format!("/zones/{zone_id}/records/{}", rec.id));
        self.add_or_update_record(Method::PATCH, &url, rec).await
    }

    async fn add_or_update_record(
        &self,
        method: Method,
        url: &str,
        rec: &Dynv6Record,
    ) -> Result<Dynv6Record, Dynv6Error> {
        let body = serde_json::to_vec(rec).map_err(Dynv6Error::Encode)?;
        self.fetch_json(method, url, Some(body)).await
    }
}

/// Rejects any status outside 2xx, keeping the response body for diagnostics.
pub(crate) async fn check_status_code(response: Response) -> Result<Response, Dynv6Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let reason = status.canonical_reason().unwrap_or_default().to_string();
    match response.text().await {
        Ok(body) => Err(Dynv6Error::Status {
            status: status.as_u16(),
            reason,
            body,
        }),
        Err(source) => Err(Dynv6Error::StatusUnreadable {
            status: status.as_u16(),
            reason,
            source,
        }),
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, Dynv6Error> {
    serde_json::from_slice(body).map_err(|e| {
        error!("[dynv6] JSON parse failed: {e}");
        error!(
            "[dynv6] Raw response: {}",
            truncate_for_log(&String::from_utf8_lossy(body))
        );
        Dynv6Error::Decode(e)
    })
}

fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let mut end = TRUNCATE_LIMIT;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... [truncated, total {} bytes]", &s[..end], s.len())
}

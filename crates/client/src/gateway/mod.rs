// Path: crates/client/src/gateway/mod.rs
//! HTTP client for the registry REST backend.

use crate::api::{AuthorizeOutcome, RegistryApi};
use async_trait::async_trait;
use cfp_telemetry::client_metrics;
use cfp_telemetry::time::{Measured, Timer};
use cfp_types::app::{
    closing_time, Call, CallId, CallRecord, ContentDigest, ProposalData, ProposalRegistration,
    RegisterOutcome,
};
use cfp_types::config::HttpConfig;
use cfp_types::error::{ApiError, ErrorCode};
use chrono::{DateTime, FixedOffset};
use reqwest::{
    header::{HeaderValue, RETRY_AFTER},
    Client, StatusCode, Url,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::time::{sleep, Duration};

// Upper bound for a server-provided Retry-After.
const MAX_RETRY_AFTER_SECS: u64 = 30;
const SNIPPET_CHARS: usize = 160;

/// Talks to the registry backend over REST.
///
/// Idempotent GETs are retried on transport errors, 429 and 5xx with
/// exponential backoff. POSTs are sent exactly once.
#[derive(Clone, Debug)]
pub struct RegistryGateway {
    base: Url,
    client: Client,
    http: HttpConfig,
}

struct Reply {
    status: StatusCode,
    body: Vec<u8>,
}

impl Reply {
    fn error(&self) -> ApiError {
        let e = ApiError::Status {
            status: self.status.as_u16(),
            message: error_message(&self.body),
        };
        client_metrics().inc_error(e.code());
        e
    }

    fn decode<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        if !self.status.is_success() {
            return Err(self.error());
        }
        serde_json::from_slice(&self.body).map_err(|e| {
            client_metrics().inc_error("API_DECODE");
            ApiError::Decode(format!("{e}; body='{}'", ascii_snippet(&self.body)))
        })
    }
}

/// The `message` field of a JSON error body, or a printable snippet of the body.
fn error_message(body: &[u8]) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(b) => b.message,
        Err(_) => ascii_snippet(body),
    }
}

fn ascii_snippet(bytes: &[u8]) -> String {
    let s = String::from_utf8_lossy(bytes);
    let s: String = s.trim().chars().take(SNIPPET_CHARS).collect();
    s.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

impl RegistryGateway {
    /// Creates a gateway for the backend at `base`.
    pub fn new(base: &str, http: HttpConfig) -> Result<Self, ApiError> {
        let normalized = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        };
        let base_url =
            Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl(format!("{base}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base.to_string()));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(http.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self {
            base: base_url,
            client,
            http,
        })
    }

    /// The backend base URL.
    pub fn base(&self) -> &Url {
        &self.base
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn retry_delay(&self, attempt: usize, retry_after: Option<&HeaderValue>) -> Duration {
        if let Some(secs) = retry_after
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
        {
            return Duration::from_secs(secs.min(MAX_RETRY_AFTER_SECS));
        }
        let shift = u32::try_from(attempt).unwrap_or(u32::MAX).min(16);
        let ms = self
            .http
            .base_backoff_ms
            .saturating_mul(1u64 << shift)
            .min(self.http.max_backoff_ms);
        Duration::from_millis(ms)
    }

    async fn get(&self, endpoint: &'static str, segments: &[&str]) -> Result<Reply, ApiError> {
        let url = self.url(segments)?;
        let sink = client_metrics();
        let _timer = Timer::new(sink, Measured::Request(endpoint));
        let mut attempt = 0;
        loop {
            let resp = match self.client.get(url.clone()).send().await {
                Ok(r) => r,
                Err(e) => {
                    let err = ApiError::Transport(format!("GET {url}: {e}"));
                    if err.is_transient() && attempt < self.http.retries {
                        let delay = self.retry_delay(attempt, None);
                        tracing::debug!(
                            target: "gateway",
                            %url, attempt, ?delay, error = %err,
                            "send failed; retrying"
                        );
                        sink.inc_retries_total(endpoint);
                        sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    sink.inc_error(err.code());
                    return Err(err);
                }
            };

            let status = resp.status();
            let retry_after = resp.headers().get(RETRY_AFTER).cloned();
            let body = resp
                .bytes()
                .await
                .map_err(|e| ApiError::Transport(format!("GET {url}: {e}")))?;

            if ApiError::transient_status(status.as_u16()) && attempt < self.http.retries {
                let delay = self.retry_delay(attempt, retry_after.as_ref());
                tracing::debug!(
                    target: "gateway",
                    %url, status = status.as_u16(), attempt, ?delay,
                    body = %ascii_snippet(&body),
                    "transient status; backing off"
                );
                sink.inc_retries_total(endpoint);
                sleep(delay).await;
                attempt += 1;
                continue;
            }

            sink.inc_requests_total(endpoint, status.as_u16());
            return Ok(Reply {
                status,
                body: body.to_vec(),
            });
        }
    }

    async fn post<B: Serialize + ?Sized + Sync>(
        &self,
        endpoint: &'static str,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<Reply, ApiError> {
        let url = self.url(segments)?;
        let sink = client_metrics();
        let _timer = Timer::new(sink, Measured::Request(endpoint));
        let mut req = self.client.post(url.clone());
        if let Some(b) = body {
            req = req.json(b);
        }
        let resp = req.send().await.map_err(|e| {
            sink.inc_error("API_TRANSPORT");
            ApiError::Transport(format!("POST {url}: {e}"))
        })?;
        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(format!("POST {url}: {e}")))?;
        sink.inc_requests_total(endpoint, status.as_u16());
        tracing::debug!(target: "gateway", %url, status = status.as_u16(), "POST completed");
        Ok(Reply {
            status,
            body: body.to_vec(),
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CallsList {
    calls_list: Vec<Call>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClosingTimeReply {
    #[serde(with = "closing_time")]
    closing_time: DateTime<FixedOffset>,
}

#[derive(Deserialize)]
struct CreatorsReply {
    creators: Vec<String>,
}

#[derive(Deserialize)]
struct CreatedByReply {
    calls: Vec<CallId>,
}

#[derive(Deserialize)]
struct PendingReply {
    pending: Vec<String>,
}

#[derive(Deserialize)]
struct AuthorizedReply {
    authorized: bool,
}

#[derive(Deserialize)]
struct RegisteredReply {
    registered: bool,
}

#[derive(Deserialize)]
struct AddressReply {
    address: String,
}

#[async_trait]
impl RegistryApi for RegistryGateway {
    async fn calls(&self) -> Result<Vec<Call>, ApiError> {
        let r: CallsList = self.get("calls", &["calls"]).await?.decode()?;
        Ok(r.calls_list)
    }

    async fn call(&self, call_id: &CallId) -> Result<Option<CallRecord>, ApiError> {
        let reply = self.get("call", &["calls", &call_id.prefixed()]).await?;
        if reply.status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        reply.decode().map(Some)
    }

    async fn closing_time(
        &self,
        call_id: &CallId,
    ) -> Result<Option<DateTime<FixedOffset>>, ApiError> {
        let reply = self
            .get("closing_time", &["closing-time", &call_id.prefixed()])
            .await?;
        if reply.status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let r: ClosingTimeReply = reply.decode()?;
        Ok(Some(r.closing_time))
    }

    async fn creators(&self) -> Result<Vec<String>, ApiError> {
        let r: CreatorsReply = self.get("creators", &["creators"]).await?.decode()?;
        Ok(r.creators)
    }

    async fn created_by(&self, creator: &str) -> Result<Vec<CallId>, ApiError> {
        let r: CreatedByReply = self
            .get("created_by", &["createdBy", creator])
            .await?
            .decode()?;
        Ok(r.calls)
    }

    async fn pending(&self) -> Result<Vec<String>, ApiError> {
        let r: PendingReply = self.get("pending", &["pending"]).await?.decode()?;
        Ok(r.pending)
    }

    async fn is_authorized(&self, address: &str) -> Result<bool, ApiError> {
        let r: AuthorizedReply = self
            .get("authorized", &["authorized", address])
            .await?
            .decode()?;
        Ok(r.authorized)
    }

    async fn is_registered(&self, address: &str) -> Result<bool, ApiError> {
        let r: RegisteredReply = self
            .get("registered", &["registered", address])
            .await?
            .decode()?;
        Ok(r.registered)
    }

    async fn proposal_data(
        &self,
        call_id: &CallId,
        digest: &ContentDigest,
    ) -> Result<Option<ProposalData>, ApiError> {
        let reply = self
            .get(
                "proposal_data",
                &["proposal-data", &call_id.prefixed(), &digest.prefixed()],
            )
            .await?;
        if reply.status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        reply.decode().map(Some)
    }

    async fn register_proposal(
        &self,
        call_id: &CallId,
        digest: &ContentDigest,
    ) -> Result<RegisterOutcome, ApiError> {
        let body = ProposalRegistration {
            call_id: call_id.clone(),
            proposal: *digest,
        };
        let reply = self
            .post("register_proposal", &["register-proposal"], Some(&body))
            .await?;
        match reply.status {
            s if s.is_success() => Ok(RegisterOutcome::Created),
            StatusCode::FORBIDDEN | StatusCode::CONFLICT => {
                tracing::info!(
                    target: "gateway",
                    call_id = %call_id, digest = %digest,
                    message = %error_message(&reply.body),
                    "backend rejected duplicate registration"
                );
                Ok(RegisterOutcome::AlreadyRegistered)
            }
            _ => Err(reply.error()),
        }
    }

    async fn contract_owner(&self) -> Result<String, ApiError> {
        let r: AddressReply = self
            .get("contract_owner", &["contract-owner"])
            .await?
            .decode()?;
        Ok(r.address)
    }

    async fn contract_address(&self) -> Result<String, ApiError> {
        let r: AddressReply = self
            .get("contract_address", &["contract-address"])
            .await?
            .decode()?;
        Ok(r.address)
    }

    async fn authorize(&self, address: &str) -> Result<AuthorizeOutcome, ApiError> {
        let reply = self
            .post::<()>("authorize", &["authorize", address], None)
            .await?;
        match reply.status {
            s if s.is_success() => Ok(AuthorizeOutcome::Authorized),
            StatusCode::FORBIDDEN | StatusCode::CONFLICT => Ok(AuthorizeOutcome::AlreadyAuthorized),
            _ => Err(reply.error()),
        }
    }
}

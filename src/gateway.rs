use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tokio::time::{Instant, sleep, sleep_until};

use crate::warning;

/// Minimum delay between two request dispatches.
const REQUEST_SPACING: Duration = Duration::from_millis(100);

/// Errors produced by the HTTP gateway.
#[derive(Debug)]
pub enum GatewayError {
    /// Network-level failure before a response was received
    Transport(reqwest::Error),
    /// Response arrived with a non-200 status
    Http(StatusCode),
    /// Response body was not valid JSON
    Parse(serde_json::Error),
    /// Response parsed but carried a top-level `error` envelope
    Api(Value),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Transport(err) => write!(f, "transport error: {}", err),
            GatewayError::Http(status) => write!(f, "http error: status {}", status),
            GatewayError::Parse(err) => write!(f, "parse error: {}", err),
            GatewayError::Api(body) => write!(f, "api error: {}", body),
        }
    }
}

impl std::error::Error for GatewayError {}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transport(err)
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Parse(err)
    }
}

/// The remote-lookup contract: `GET(url) -> parsed JSON | failure`.
///
/// Everything that talks to a remote API goes through this trait, which is
/// what lets the integration tests substitute a canned-response mock for the
/// live [`Gateway`].
pub trait Remote {
    fn request(&mut self, url: &str) -> impl Future<Output = Result<Value, GatewayError>>;

    /// Whether a cancellation signal has been received. A resolver checks
    /// this between items and stops issuing further requests once set.
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Throttled HTTP gateway over a single `reqwest::Client`.
///
/// All remote lookups of one playlist run are issued through one gateway
/// instance, which owns the pacing clock: each dispatch is delayed until at
/// least [`REQUEST_SPACING`] after the previous dispatch, regardless of which
/// API the request targets. There is never more than one request in flight.
///
/// Rate-limit handling follows the surrounding APIs' conventions: a 429 with
/// a `Retry-After` of up to 120 seconds is waited out and retried in place, a
/// 502 is retried after 10 seconds. Anything else non-200 is an error.
pub struct Gateway {
    client: Client,
    bearer: Option<String>,
    next_dispatch: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl Gateway {
    pub fn new(bearer: Option<String>) -> Self {
        Self {
            client: Client::new(),
            bearer,
            next_dispatch: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns a handle that aborts the run when flipped. The in-flight
    /// request is allowed to finish; no further requests are dispatched.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    async fn pace(&mut self) {
        if let Some(at) = self.next_dispatch {
            sleep_until(at).await;
        }
        self.next_dispatch = Some(Instant::now() + REQUEST_SPACING);
    }
}

impl Remote for Gateway {
    async fn request(&mut self, url: &str) -> Result<Value, GatewayError> {
        loop {
            self.pace().await;

            let mut request = self.client.get(url);
            if let Some(token) = &self.bearer {
                request = request.bearer_auth(token);
            }
            let response = request.send().await?;

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS {
                if let Some(retry_after) = response.headers().get("retry-after") {
                    let retry_after = retry_after
                        .to_str()
                        .unwrap_or("0")
                        .parse::<u64>()
                        .unwrap_or(0);
                    if retry_after <= 120 {
                        sleep(Duration::from_secs(retry_after)).await;
                        continue; // retry
                    }
                    warning!(
                        "Retry after has reached a abnormal high of {} seconds. Try your best tommorrow again.",
                        retry_after
                    );
                }
                return Err(GatewayError::Http(status));
            }
            if status == StatusCode::BAD_GATEWAY {
                sleep(Duration::from_secs(10)).await;
                continue; // retry
            }
            if status != StatusCode::OK {
                return Err(GatewayError::Http(status));
            }

            let body = response.text().await?;
            let json: Value = serde_json::from_str(&body)?;
            if json.get("error").is_some() {
                return Err(GatewayError::Api(json));
            }

            return Ok(json);
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

//! Fun-fact resolution
//!
//! A [`FactProvider`] asks a remote [`FactSource`] first and falls back to the
//! local templates from `numfacts_core::facts` on any failure. The remote
//! source, the randomness behind the local pick and the observer that hears
//! about failures are all injected.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use numfacts_core::facts::{pick_local_fact, Picker};
use rand::Rng;

pub const DEFAULT_FACT_HOST: &str = "numbersapi.com";
pub const DEFAULT_FACT_TIMEOUT: Duration = Duration::from_millis(2000);

/// Why a remote fact could not be used
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("remote fact request timed out")]
    Timeout,

    #[error("remote fact request failed: {0}")]
    Request(String),

    #[error("remote fact source returned HTTP {0}")]
    Status(u16),

    #[error("remote fact source returned an empty body")]
    EmptyBody,
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

/// Remote capability that knows a fact about a number
pub trait FactSource: Send + Sync {
    fn fetch(&self, number: i64) -> BoxFuture<'_, Result<String, FetchError>>;
}

/// Plain-text fact service queried as `GET <base>/{number}/math`
#[derive(Debug, Clone)]
pub struct HttpFactSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFactSource {
    /// `host` may be a bare `host[:port]` (plain HTTP is assumed) or a full URL.
    pub fn new(host: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("numfacts/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url(host),
        })
    }

    pub fn url_for(&self, number: i64) -> String {
        format!("{}/{number}/math", self.base_url)
    }
}

fn base_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{host}")
    }
}

impl FactSource for HttpFactSource {
    fn fetch(&self, number: i64) -> BoxFuture<'_, Result<String, FetchError>> {
        Box::pin(async move {
            let response = self.client.get(self.url_for(number)).send().await?;

            if !response.status().is_success() {
                return Err(FetchError::Status(response.status().as_u16()));
            }

            let body = response.text().await?;
            let fact = body.trim();
            if fact.is_empty() {
                return Err(FetchError::EmptyBody);
            }

            Ok(fact.to_string())
        })
    }
}

/// Uniform pick backed by the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPicker;

impl Picker for RandomPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Hears how each remote lookup went
pub trait FactObserver: Send + Sync {
    fn remote_resolved(&self, number: i64);
    fn remote_unavailable(&self, number: i64, error: &FetchError);
}

/// Forwards lookup outcomes to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl FactObserver for LogObserver {
    fn remote_resolved(&self, number: i64) {
        log::debug!("remote fact resolved for {number}");
    }

    fn remote_unavailable(&self, number: i64, error: &FetchError) {
        log::warn!("remote fact unavailable for {number}, using local fact: {error}");
    }
}

pub struct FactProvider {
    source: Option<Arc<dyn FactSource>>,
    timeout: Duration,
    picker: Arc<dyn Picker + Send + Sync>,
    observer: Arc<dyn FactObserver>,
}

impl Default for FactProvider {
    fn default() -> Self {
        Self::new(Arc::new(RandomPicker), Arc::new(LogObserver))
    }
}

impl FactProvider {
    /// Provider with no remote source; every fact comes from the local menu.
    pub fn new(picker: Arc<dyn Picker + Send + Sync>, observer: Arc<dyn FactObserver>) -> Self {
        Self {
            source: None,
            timeout: DEFAULT_FACT_TIMEOUT,
            picker,
            observer,
        }
    }

    pub fn with_source(mut self, source: Arc<dyn FactSource>, timeout: Duration) -> Self {
        self.source = Some(source);
        self.timeout = timeout;
        self
    }

    pub fn is_offline(&self) -> bool {
        self.source.is_none()
    }

    /// Resolve a fact for `number`. Never fails.
    ///
    /// The remote source gets a single attempt bounded by the timeout. Any
    /// failure is reported to the observer and replaced by a local fact.
    pub async fn resolve(&self, number: i64) -> String {
        if let Some(source) = &self.source {
            match tokio::time::timeout(self.timeout, source.fetch(number)).await {
                Ok(Ok(fact)) => {
                    self.observer.remote_resolved(number);
                    return fact;
                }
                Ok(Err(err)) => self.observer.remote_unavailable(number, &err),
                Err(_) => self
                    .observer
                    .remote_unavailable(number, &FetchError::Timeout),
            }
        }

        pick_local_fact(number, self.picker.as_ref())
    }
}

/// Remote fact options shared by every subcommand that resolves facts
#[derive(Debug, Clone, clap::Args)]
pub struct FactOptions {
    /// Fact service host, queried as http://<host>/<num>/math
    #[arg(long, env = "NUMFACTS_FACT_HOST", default_value = DEFAULT_FACT_HOST)]
    pub fact_host: String,

    /// Remote fact timeout in milliseconds
    #[arg(long, env = "NUMFACTS_FACT_TIMEOUT_MS", default_value = "2000")]
    pub fact_timeout_ms: u64,

    /// Never query the fact service, always use local facts
    #[arg(long, env = "NUMFACTS_OFFLINE")]
    pub offline: bool,
}

impl FactOptions {
    pub fn build_provider(&self) -> Result<FactProvider, FetchError> {
        let provider = FactProvider::default();
        if self.offline {
            return Ok(provider);
        }

        let timeout = Duration::from_millis(self.fact_timeout_ms);
        let source = HttpFactSource::new(&self.fact_host, timeout)?;

        Ok(provider.with_source(Arc::new(source), timeout))
    }
}

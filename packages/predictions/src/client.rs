use crate::config::PredictionConfig;
use crate::endpoints::PredictionEndpoint;
use crate::endpoints::predictions::{CreatePrediction, GetPrediction};
use crate::error::{Error, Result};
use crate::job::{Job, JobHandle};
use crate::poll::{CancelToken, Delay, PollPolicy, TokioDelay};
use crate::transport::{HttpRequest, HttpTransport, RequestBody, ReqwestTransport};
use http::header::{AUTHORIZATION, HeaderValue};
use http::Method;
use std::sync::Arc;
use tracing::{debug, info, warn};
use voicely_domain::JobSpec;

/// Client for the prediction API: submits jobs and drives them to a terminal
/// status.
///
/// Cloning is cheap; clones share the transport and its connection pool.
pub struct PredictionClient<T = ReqwestTransport, D = TokioDelay> {
    transport: Arc<T>,
    delay: Arc<D>,
    config: Arc<PredictionConfig>,
}

impl<T, D> Clone for PredictionClient<T, D> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            delay: Arc::clone(&self.delay),
            config: Arc::clone(&self.config),
        }
    }
}

impl PredictionClient {
    pub fn from_env() -> Result<Self> {
        Self::new(PredictionConfig::from_env()?)
    }

    pub fn new(config: PredictionConfig) -> Result<Self> {
        let transport = ReqwestTransport::with_config(config.http.clone())?;
        Ok(Self::with_transport(config, transport, TokioDelay))
    }
}

impl<T: HttpTransport, D: Delay> PredictionClient<T, D> {
    pub fn with_transport(config: PredictionConfig, transport: T, delay: D) -> Self {
        Self::with_shared_transport(config, Arc::new(transport), delay)
    }

    /// Build a client on a transport that is also used elsewhere, e.g. by a blob store
    pub fn with_shared_transport(config: PredictionConfig, transport: Arc<T>, delay: D) -> Self {
        Self {
            transport,
            delay: Arc::new(delay),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &PredictionConfig {
        &self.config
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    pub async fn hit<E: PredictionEndpoint>(&self, endpoint: E) -> Result<E::ResponseBody> {
        let url = endpoint.url(&self.config.base_url)?;
        let mut request = HttpRequest::new(E::METHOD, url);

        let mut token = HeaderValue::from_str(&format!("Token {}", self.config.api_key()))
            .map_err(|_| Error::Configuration("API key is not a valid header value".to_string()))?;
        token.set_sensitive(true);
        request.headers.insert(AUTHORIZATION, token);

        if matches!(E::METHOD, Method::POST | Method::PATCH) {
            request.body = match endpoint.request_body()? {
                RequestBody::Empty => {
                    return Err(Error::InvalidInput("request must have a body".to_string()));
                }
                body => body,
            };
        }

        let resp = self.transport.send(request).await?;

        if !resp.status.is_success() {
            debug!(status = %resp.status, path = E::PATH, "prediction API returned non-success status");
        }

        endpoint.response_body(&resp.body)
    }

    /// Submit a job. Not retried: on failure the caller decides whether to resubmit.
    pub async fn submit(&self, spec: &JobSpec) -> Result<JobHandle> {
        let kind = spec.kind();
        let version = self.config.version_for(kind);
        let response = self.hit(CreatePrediction::new(version, spec)).await?;

        info!(job_id = %response.id, %kind, status = %response.status, "submitted prediction");
        Ok(JobHandle::new(response.id, kind))
    }

    /// Fetch the job's current state once.
    pub async fn status(&self, handle: &JobHandle) -> Result<Job> {
        let response = self.hit(GetPrediction::new(handle.id())).await?;
        let mut job = Job::submitted(handle);
        job.apply(response)?;
        Ok(job)
    }

    /// Poll until the job reaches `Succeeded` or `Failed`.
    ///
    /// The first status request is sent immediately; every non-terminal
    /// answer schedules exactly one more request after `policy.interval`.
    /// Transport and parse errors abort the loop without retrying.
    pub async fn poll(
        &self,
        handle: &JobHandle,
        policy: PollPolicy,
        cancel: &CancelToken,
    ) -> Result<Job> {
        let mut job = Job::submitted(handle);
        let mut attempts: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                info!(job_id = handle.id(), attempts, "polling cancelled");
                return Err(Error::Cancelled);
            }

            let response = self.hit(GetPrediction::new(handle.id())).await?;
            attempts += 1;
            let status = job.apply(response)?;
            debug!(job_id = handle.id(), attempt = attempts, %status, "polled prediction");

            if status.is_terminal() {
                info!(job_id = handle.id(), kind = %handle.kind(), %status, attempts, "prediction finished");
                return Ok(job);
            }

            if let Some(max_attempts) = policy.max_attempts {
                if attempts >= max_attempts {
                    warn!(job_id = handle.id(), attempts, "prediction did not finish in time");
                    return Err(Error::Timeout { attempts });
                }
            }

            tokio::select! {
                _ = self.delay.sleep(policy.interval) => {}
                _ = cancel.cancelled() => {
                    info!(job_id = handle.id(), attempts, "polling cancelled");
                    return Err(Error::Cancelled);
                }
            }
        }
    }

    /// Submit and poll with the configured policy for the job's kind.
    pub async fn run(&self, spec: &JobSpec, cancel: &CancelToken) -> Result<Job> {
        let handle = self.submit(spec).await?;
        self.poll(&handle, self.config.poll_policy(handle.kind()), cancel)
            .await
    }
}

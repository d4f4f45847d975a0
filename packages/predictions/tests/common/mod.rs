#![allow(dead_code)]

use bytes::Bytes;
use http::StatusCode;
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use voicely_predictions::transport::{HttpRequest, HttpResponse, RequestBody};
use voicely_predictions::{
    BlobStore, Delay, Error, HttpTransport, PredictionClient, PredictionConfig, Result,
};

pub const API_BASE: &str = "http://api.test";
pub const API_KEY: &str = "test-key";

pub enum Reply {
    Respond(StatusCode, Bytes),
    Fail(String),
}

impl Reply {
    pub fn json(status: StatusCode, body: Value) -> Self {
        Reply::Respond(status, Bytes::from(body.to_string()))
    }

    pub fn ok(body: Value) -> Self {
        Self::json(StatusCode::OK, body)
    }

    pub fn prediction(id: &str, status: &str) -> Self {
        Self::ok(json!({ "id": id, "status": status }))
    }

    pub fn detail(status: StatusCode, detail: &str) -> Self {
        Self::json(status, json!({ "detail": detail }))
    }
}

/// Answers requests from a fixed script and records every request it saw.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn remaining(&self) -> usize {
        self.script.lock().len()
    }
}

impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().push(request);
        let reply = self.script.lock().pop_front();

        match reply {
            Some(Reply::Respond(status, body)) => Ok(HttpResponse { status, body }),
            Some(Reply::Fail(message)) => Err(Error::transport(message)),
            None => Err(Error::transport("script exhausted")),
        }
    }
}

/// Answers each job from its own status queue, keyed by the id in the URL.
///
/// Submissions are matched to job ids by their `text` input. The last status
/// in a queue repeats forever.
#[derive(Default)]
pub struct RoutedTransport {
    ids_by_text: HashMap<String, String>,
    statuses: Mutex<HashMap<String, VecDeque<Value>>>,
    served: Mutex<Vec<(String, String)>>,
}

impl RoutedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn job(mut self, text: &str, id: &str, statuses: impl IntoIterator<Item = Value>) -> Self {
        self.ids_by_text.insert(text.to_string(), id.to_string());
        self.statuses
            .get_mut()
            .insert(id.to_string(), statuses.into_iter().collect());
        self
    }

    /// `(job id, status)` for every poll, in the order they were answered
    pub fn served(&self) -> Vec<(String, String)> {
        self.served.lock().clone()
    }

    pub fn served_for(&self, id: &str) -> Vec<String> {
        self.served()
            .into_iter()
            .filter(|(job, _)| job == id)
            .map(|(_, status)| status)
            .collect()
    }

    pub fn poll_count(&self) -> usize {
        self.served.lock().len()
    }

    fn submit(&self, request: &HttpRequest) -> HttpResponse {
        let text = match &request.body {
            RequestBody::Json(body) => body["input"]["text"].as_str().unwrap_or_default().to_string(),
            _ => String::new(),
        };
        let body = match self.ids_by_text.get(&text) {
            Some(id) => json!({ "id": id, "status": "starting" }),
            None => json!({ "detail": format!("no job scripted for {text:?}") }),
        };
        HttpResponse {
            status: StatusCode::OK,
            body: Bytes::from(body.to_string()),
        }
    }

    fn poll(&self, request: &HttpRequest) -> HttpResponse {
        let id = request
            .url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
            .to_string();

        let next = {
            let mut statuses = self.statuses.lock();
            match statuses.get_mut(&id) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };
        let mut body = next.unwrap_or_else(|| json!({ "detail": "Not found." }));
        body["id"] = json!(id);

        let status = body["status"].as_str().unwrap_or_default().to_string();
        self.served.lock().push((id, status));
        HttpResponse {
            status: StatusCode::OK,
            body: Bytes::from(body.to_string()),
        }
    }
}

impl HttpTransport for RoutedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        if request.method == http::Method::POST {
            Ok(self.submit(&request))
        } else {
            Ok(self.poll(&request))
        }
    }
}

pub fn status(status: &str) -> Value {
    json!({ "status": status })
}

pub fn audio(url: &str) -> Value {
    json!({ "status": "succeeded", "output": url })
}

/// Returns immediately and remembers each requested pause.
#[derive(Clone, Default)]
pub struct RecordingDelay {
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingDelay {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().clone()
    }
}

impl Delay for RecordingDelay {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().push(duration);
        tokio::task::yield_now().await;
    }
}

/// Never finishes; lets tests cancel a job while it waits between polls.
#[derive(Clone, Default)]
pub struct StalledDelay {
    entered: Arc<tokio::sync::Notify>,
}

impl StalledDelay {
    pub async fn wait_until_sleeping(&self) {
        self.entered.notified().await;
    }
}

impl Delay for StalledDelay {
    async fn sleep(&self, _duration: Duration) {
        self.entered.notify_one();
        std::future::pending::<()>().await;
    }
}

/// In-memory blob store.
#[derive(Default)]
pub struct MemoryBlobStore {
    uploads: Mutex<Vec<(String, usize)>>,
    deletes: Mutex<Vec<String>>,
    fail_uploads: bool,
    calls: AtomicUsize,
}

impl MemoryBlobStore {
    pub fn failing() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    pub fn uploads(&self) -> Vec<(String, usize)> {
        self.uploads.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl BlobStore for MemoryBlobStore {
    async fn upload(&self, data: Bytes, file_name: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_uploads {
            return Err(Error::UploadFailed("bucket unavailable".to_string()));
        }
        self.uploads.lock().push((file_name.to_string(), data.len()));
        Ok(format!("https://storage.test/voices/{file_name}"))
    }

    async fn delete(&self, file_name: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.deletes.lock().push(file_name.to_string());
        Ok(())
    }
}

pub fn config() -> PredictionConfig {
    PredictionConfig::new(API_KEY)
        .unwrap()
        .with_base_url(API_BASE)
        .unwrap()
}

pub fn client<T: HttpTransport, D: Delay>(
    transport: &Arc<T>,
    delay: D,
) -> PredictionClient<T, D> {
    PredictionClient::with_shared_transport(config(), Arc::clone(transport), delay)
}

pub fn json_body(request: &HttpRequest) -> Value {
    match &request.body {
        RequestBody::Json(value) => value.clone(),
        other => panic!("expected a JSON body, got {other:?}"),
    }
}

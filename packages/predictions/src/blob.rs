//! Durable storage for audio that must be hosted before submission.

use crate::config::BlobStoreConfig;
use crate::error::{Error, Result};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, RequestBody};
use bytes::Bytes;
use http::Method;
use http::header::{AUTHORIZATION, HeaderValue};
use reqwest::Url;
use serde::Deserialize;
use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Content type of every uploaded sample
pub const AUDIO_CONTENT_TYPE: &str = "audio/wav";

/// Uploaded samples never change, so clients may cache them for a year
pub const CACHE_CONTROL: &str = "public, max-age=31536000";

pub trait BlobStore: Send + Sync + 'static {
    /// Store `data` under `file_name` and return a publicly fetchable URL.
    fn upload(&self, data: Bytes, file_name: &str) -> impl Future<Output = Result<String>> + Send;

    fn delete(&self, file_name: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Firebase Storage over its REST API.
pub struct FirebaseStorage<T> {
    transport: Arc<T>,
    config: BlobStoreConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectMetadata {
    name: String,
    #[serde(default)]
    download_tokens: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StorageErrorBody {
    error: StorageErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StorageErrorDetail {
    message: String,
}

impl<T: HttpTransport> FirebaseStorage<T> {
    pub fn new(config: BlobStoreConfig, transport: Arc<T>) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &BlobStoreConfig {
        &self.config
    }

    /// `{base}/v0/b/{bucket}/o`, keeping any path prefix of the base URL
    fn objects_url(&self) -> Url {
        let mut url = self.config.base_url.clone();
        url.set_query(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v0", "b", self.config.bucket.as_str(), "o"]);
        }
        url
    }

    /// `{base}/v0/b/{bucket}/o/{url-encoded object path}`
    fn object_url(&self, object_path: &str) -> Url {
        let mut url = self.objects_url();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(object_path);
        }
        url
    }

    fn download_url(&self, object_path: &str, token: Option<&str>) -> String {
        let mut url = self.object_url(object_path);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("alt", "media");
            if let Some(token) = token {
                query.append_pair("token", token);
            }
        }
        url.to_string()
    }

    fn authorized(&self, mut request: HttpRequest) -> std::result::Result<HttpRequest, String> {
        if let Some(token) = self.config.auth_token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| "storage token is not a valid header value".to_string())?;
            value.set_sensitive(true);
            request.headers.insert(AUTHORIZATION, value);
        }
        Ok(request)
    }

    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, String> {
        let request = self.authorized(request)?;
        self.transport.send(request).await.map_err(|e| e.to_string())
    }

    async fn upload_object(&self, data: Bytes, object_path: &str) -> Result<String> {
        let mut url = self.objects_url();
        url.query_pairs_mut().append_pair("name", object_path);

        let mut request = HttpRequest::new(Method::POST, url);
        request.body = RequestBody::Bytes {
            content_type: AUDIO_CONTENT_TYPE.to_string(),
            data,
        };
        let resp = self.send(request).await.map_err(Error::UploadFailed)?;
        let metadata: ObjectMetadata = storage_body(&resp).map_err(Error::UploadFailed)?;

        if let Err(reason) = self.set_metadata(&metadata.name).await {
            // the object exists without cache headers; don't leave it behind
            if let Err(cleanup) = self.delete_object(&metadata.name).await {
                warn!(object = %metadata.name, error = %cleanup, "failed to remove partial upload");
            }
            return Err(Error::UploadFailed(reason));
        }

        Ok(self.download_url(&metadata.name, metadata.download_tokens.as_deref()))
    }

    async fn set_metadata(&self, object_path: &str) -> std::result::Result<(), String> {
        let mut request = HttpRequest::new(Method::PATCH, self.object_url(object_path));
        request.body = RequestBody::Json(json!({
            "contentType": AUDIO_CONTENT_TYPE,
            "cacheControl": CACHE_CONTROL,
        }));
        let resp = self.send(request).await?;
        storage_body::<serde_json::Value>(&resp).map(|_| ())
    }

    async fn delete_object(&self, object_path: &str) -> std::result::Result<(), String> {
        let request = HttpRequest::new(Method::DELETE, self.object_url(object_path));
        let resp = self.send(request).await?;
        if !resp.status.is_success() {
            return Err(storage_error(&resp));
        }
        Ok(())
    }
}

impl<T: HttpTransport> BlobStore for FirebaseStorage<T> {
    async fn upload(&self, data: Bytes, file_name: &str) -> Result<String> {
        let object_path = self.config.object_path(file_name);
        let size = data.len();
        debug!(object = %object_path, bytes = size, "uploading audio");

        let url = self.upload_object(data, &object_path).await?;
        info!(object = %object_path, bytes = size, "uploaded audio");
        Ok(url)
    }

    async fn delete(&self, file_name: &str) -> Result<()> {
        let object_path = self.config.object_path(file_name);
        self.delete_object(&object_path)
            .await
            .map_err(Error::DeleteFailed)?;
        info!(object = %object_path, "deleted audio");
        Ok(())
    }
}

/// Decode a storage response, or describe why it failed
fn storage_body<B: serde::de::DeserializeOwned>(resp: &HttpResponse) -> std::result::Result<B, String> {
    if !resp.status.is_success() {
        return Err(storage_error(resp));
    }
    serde_json::from_slice(&resp.body).map_err(|e| format!("unexpected storage response: {e}"))
}

fn storage_error(resp: &HttpResponse) -> String {
    match serde_json::from_slice::<StorageErrorBody>(&resp.body) {
        Ok(body) => format!("{} ({})", body.error.message, resp.status),
        Err(_) => format!("storage returned {}", resp.status),
    }
}

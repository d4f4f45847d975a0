use crate::error::{Error, Result};
use crate::transport::RequestBody;
use http::Method;
use reqwest::Url;
use serde::Deserialize;
use serde::de::DeserializeOwned;

pub mod predictions;

/// Error body returned by the prediction API instead of a prediction.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub detail: String,
}

/// Longest body excerpt quoted in an `InvalidResponse` message
const BODY_EXCERPT_LEN: usize = 200;

/// Decode an API response body.
///
/// Error and success bodies have different shapes, so the error shape is
/// tried first: a `{"detail": ...}` body is always a rejection, whatever else
/// it carries.
pub fn parse_api_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    if let Ok(rejection) = serde_json::from_slice::<ApiErrorBody>(body) {
        return Err(Error::RemoteRejected(rejection.detail));
    }

    serde_json::from_slice::<T>(body).map_err(|e| {
        let text = String::from_utf8_lossy(body);
        let excerpt: String = text.chars().take(BODY_EXCERPT_LEN).collect();
        Error::InvalidResponse(format!("{e} (body: {excerpt})"))
    })
}

pub trait PredictionEndpoint {
    const PATH: &'static str;

    const METHOD: Method;

    type ResponseBody: DeserializeOwned;

    fn path_params(&self) -> Vec<(&'static str, &str)> {
        vec![]
    }

    fn request_body(&self) -> Result<RequestBody> {
        Ok(RequestBody::Empty)
    }

    fn response_body(&self, body: &[u8]) -> Result<Self::ResponseBody> {
        parse_api_body(body)
    }

    fn url(&self, base: &Url) -> Result<Url> {
        let mut url = base.clone();
        let mut path = Self::PATH.to_string();

        for (placeholder, value) in self.path_params() {
            path = path.replace(placeholder, value);
        }

        // endpoint paths are relative to any prefix the base URL carries
        let prefix = base.path().trim_end_matches('/');
        url.set_path(&format!("{prefix}/{path}"));
        if url.cannot_be_a_base() {
            return Err(Error::Configuration(format!("invalid API base URL '{base}'")));
        }

        Ok(url)
    }
}

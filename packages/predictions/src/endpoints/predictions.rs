//! Prediction endpoints: create a job and read its status.

use super::PredictionEndpoint;
use crate::error::{Error, Result};
use crate::transport::RequestBody;
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use voicely_domain::{JobPayload, JobSpec};

/// Starts a prediction for one job.
///
/// Request body: `{"version": <model version>, "input": {...}}`.
#[derive(Clone, Debug)]
pub struct CreatePrediction {
    body: CreatePredictionBody,
}

#[derive(Clone, Debug, Serialize)]
pub struct CreatePredictionBody {
    pub version: String,
    pub input: JobPayload,
}

impl CreatePrediction {
    pub fn new(version: impl Into<String>, spec: &JobSpec) -> Self {
        CreatePrediction {
            body: CreatePredictionBody {
                version: version.into(),
                input: spec.payload().clone(),
            },
        }
    }
}

impl PredictionEndpoint for CreatePrediction {
    const PATH: &'static str = "v1/predictions";

    const METHOD: Method = Method::POST;

    type ResponseBody = PredictionResponse;

    fn request_body(&self) -> Result<RequestBody> {
        let json = serde_json::to_value(&self.body)
            .map_err(|e| Error::InvalidInput(format!("unserializable job input: {e}")))?;
        Ok(RequestBody::Json(json))
    }
}

/// Returns the current state of a prediction.
#[derive(Clone, Debug)]
pub struct GetPrediction {
    prediction_id: String,
}

impl GetPrediction {
    pub fn new(prediction_id: impl Into<String>) -> Self {
        GetPrediction {
            prediction_id: prediction_id.into(),
        }
    }
}

impl PredictionEndpoint for GetPrediction {
    const PATH: &'static str = "v1/predictions/:prediction_id";

    const METHOD: Method = Method::GET;

    type ResponseBody = PredictionResponse;

    fn path_params(&self) -> Vec<(&'static str, &str)> {
        vec![(":prediction_id", self.prediction_id.as_str())]
    }
}

/// Prediction as reported by both endpoints.
#[derive(Clone, Debug, Deserialize)]
pub struct PredictionResponse {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub output: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `output` of a finished voice clone prediction.
#[derive(Clone, Debug, Deserialize)]
pub struct VoiceCloneOutput {
    pub voice_id: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub preview: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Url;
    use serde_json::json;
    use voicely_domain::SpeechInput;

    #[test]
    fn create_body_wraps_input_with_version() {
        let spec = JobSpec::speech(SpeechInput::new("Hi", "Calm_Woman"));
        let endpoint = CreatePrediction::new("minimax/speech-02-hd", &spec);
        let RequestBody::Json(body) = endpoint.request_body().unwrap() else {
            panic!("expected JSON body");
        };
        assert_eq!(body["version"], "minimax/speech-02-hd");
        assert_eq!(body["input"]["voice_id"], "Calm_Woman");
        assert_eq!(body["input"]["text"], "Hi");
    }

    #[test]
    fn get_url_embeds_prediction_id() {
        let base = Url::parse("https://api.replicate.com").unwrap();
        let url = GetPrediction::new("abc123").url(&base).unwrap();
        assert_eq!(url.as_str(), "https://api.replicate.com/v1/predictions/abc123");
    }

    #[test]
    fn response_tolerates_missing_optional_fields() {
        let response: PredictionResponse =
            serde_json::from_value(json!({"id": "x", "status": "starting"})).unwrap();
        assert!(response.output.is_none());
        assert!(response.error.is_none());
    }
}

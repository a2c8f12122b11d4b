use crate::error::AppError;
use crate::models::detection_types::DetectionResult;

const DEFAULT_UPSTREAM_URL: &str = "https://deepfake-api-c598.onrender.com";

/// Substituted when the service omits the confidence field. A reported
/// confidence of 0.0 is kept as-is; only omission triggers the fallback.
const DEFAULT_CONFIDENCE: f32 = 0.95;

#[derive(serde::Deserialize)]
struct PredictResponse {
    prediction: String,
    confidence: Option<f32>,
}

/// Where the predict request goes. Two routing modes:
///
/// - upstream: requests are sent straight to the separately hosted inference
///   service with the `/api` prefix stripped (`{upstream}/predict`). Default.
/// - origin: `DEEPGUARD_API_ORIGIN` names an origin that serves
///   `/api/predict` directly, no forwarding involved.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub upstream: Option<String>,
    pub origin: Option<String>,
}

impl DetectorConfig {
    pub fn from_env() -> Self {
        DetectorConfig {
            upstream: non_empty_env("DEEPGUARD_UPSTREAM_URL"),
            origin: non_empty_env("DEEPGUARD_API_ORIGIN"),
        }
    }

    pub fn endpoint(&self) -> String {
        if let Some(origin) = &self.origin {
            format!("{}/api/predict", origin.trim_end_matches('/'))
        } else {
            let upstream = self.upstream.as_deref().unwrap_or(DEFAULT_UPSTREAM_URL);
            format!("{}/predict", upstream.trim_end_matches('/'))
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Client for the remote classification endpoint. The model behind it is a
/// black box; this only ships bytes out and maps the reply.
pub struct DetectorClient {
    client: reqwest::Client,
    config: DetectorConfig,
}

impl DetectorClient {
    pub fn new(config: DetectorConfig) -> Self {
        DetectorClient {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// POST the image as a multipart form (single `file` field) and map the
    /// reply. Network failure, non-2xx status, and malformed payloads all
    /// surface as one error kind; the caller turns that into the error state.
    pub async fn classify(&self, file_name: &str, bytes: Vec<u8>) -> Result<DetectionResult, AppError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.config.endpoint())
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(format!("Prediction request failed: HTTP {}", response.status()).into());
        }

        let payload: PredictResponse = response.json().await.map_err(|e| AppError {
            message: format!("Failed to parse prediction response: {}", e),
        })?;

        Ok(map_prediction(payload))
    }
}

fn map_prediction(payload: PredictResponse) -> DetectionResult {
    let confidence = match payload.confidence {
        Some(value) => value,
        None => {
            eprintln!(
                "Prediction response carried no confidence, substituting {}",
                DEFAULT_CONFIDENCE
            );
            DEFAULT_CONFIDENCE
        }
    };

    DetectionResult {
        is_real: payload.prediction.eq_ignore_ascii_case("real"),
        confidence,
    }
}

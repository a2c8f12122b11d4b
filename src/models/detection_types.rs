use serde::Serialize;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DetectionStatus {
    Idle,
    Uploading,
    Processing,
    Complete,
    Error,
}

/// Outcome of one completed analysis. Replaced wholesale on the next run,
/// never mutated in place.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub is_real: bool,
    pub confidence: f32,
}

impl DetectionResult {
    pub fn confidence_percent(&self) -> String {
        format!("{:.1}%", self.confidence * 100.0)
    }

    pub fn headline(&self) -> &'static str {
        if self.is_real {
            "Image Appears Authentic"
        } else {
            "Potential AI-Generated Image Detected"
        }
    }

    pub fn detail(&self) -> &'static str {
        if self.is_real {
            "Analysis suggests this image is likely authentic and has not been manipulated."
        } else {
            "Analysis indicates this image was likely created or modified using artificial intelligence."
        }
    }
}

/// Snapshot of one upload-and-classify interaction, shipped to the webview
/// after every transition.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub status: DetectionStatus,
    pub image_preview: Option<String>,
    pub result: Option<DetectionResult>,
}

impl SessionState {
    pub fn initial() -> Self {
        SessionState {
            status: DetectionStatus::Idle,
            image_preview: None,
            result: None,
        }
    }
}

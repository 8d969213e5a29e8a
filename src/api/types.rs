use serde::{Deserialize, Serialize};

/// Body of `POST /predict_risk`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskRequest {
    pub lat: f64,
    pub lon: f64,
}

/// What a client consumes from a `/predict_risk` response. Extra fields are
/// ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<i64>,

    #[serde(default)]
    pub message: String,
}

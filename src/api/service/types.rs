use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::risk::RiskScore;

#[derive(Serialize, Deserialize)]
pub struct PredictRiskResponse {
    pub success: bool,
    pub latitude: f64,
    pub longitude: f64,
    pub risk_score: RiskScore,
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,

    #[serde(skip)]
    pub status: StatusCode,
}

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use serde_json::Value;

use crate::model::RiskModel;

use super::types::*;

pub type Result<T> = std::result::Result<T, ErrorResponse>;

/// Reads `body[key]` as a coordinate. Numbers and numeric strings are both
/// accepted; anything non-finite or beyond `±limit` is rejected.
fn coordinate(body: &Value, key: &str, limit: f64) -> Result<f64> {
    let value = match body.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    // A missing field is a 400 here, not a model error, and so is a value
    // outside the coordinate range.
    match value {
        Some(v) if v.is_finite() && (-limit..=limit).contains(&v) => Ok(v),
        _ => {
            log::debug!("rejected {key}: {:?}", body.get(key));
            Err(ErrorResponse::invalid_input())
        }
    }
}

pub async fn predict_risk(
    State(model): State<Arc<RiskModel>>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictRiskResponse>> {
    let Json(body) = body.map_err(|e| {
        log::debug!("rejected body: {e}");
        ErrorResponse::invalid_input()
    })?;

    let latitude = coordinate(&body, "lat", 90.0)?;
    let longitude = coordinate(&body, "lon", 180.0)?;

    let risk_score = model.predict(latitude, longitude).map_err(|e| {
        log::error!("prediction error: {e:#}");
        ErrorResponse::internal()
    })?;

    log::info!("predicted risk {risk_score} for ({latitude}, {longitude})");

    Ok(Json(PredictRiskResponse {
        success: true,
        latitude,
        longitude,
        risk_score,
        message: risk_score.severity().assessment().to_string(),
    }))
}

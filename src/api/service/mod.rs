pub mod endpoints;
pub mod router;
pub mod types;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::model::RiskModel;

pub const INVALID_INPUT_MESSAGE: &str = "Invalid latitude or longitude provided.";
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred during prediction.";

#[derive(Clone)]
pub struct State {
    pub model: Arc<RiskModel>,
}

impl State {
    pub fn new(model: RiskModel) -> Self {
        Self {
            model: Arc::new(model),
        }
    }
}

impl axum::extract::FromRef<State> for Arc<RiskModel> {
    fn from_ref(input: &State) -> Self {
        input.model.clone()
    }
}

impl IntoResponse for types::ErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl types::ErrorResponse {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            status,
        }
    }

    pub fn invalid_input() -> Self {
        Self::new(StatusCode::BAD_REQUEST, INVALID_INPUT_MESSAGE)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }
}

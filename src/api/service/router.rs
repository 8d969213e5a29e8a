use axum::routing::post;

use crate::api::PREDICT_RISK_PATH;

use super::{endpoints, State};

pub fn router(state: State) -> axum::Router {
    axum::Router::new()
        .route(PREDICT_RISK_PATH, post(endpoints::predict_risk))
        .with_state(state)
}

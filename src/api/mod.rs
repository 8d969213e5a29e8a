pub mod predict_service;
pub mod service;
pub mod types;

pub use types::{RiskRequest, RiskResult};

/// Path of the prediction endpoint, relative to the service root.
pub const PREDICT_RISK_PATH: &str = "/predict_risk";

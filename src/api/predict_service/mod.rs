pub mod client;

pub use client::Client;

use super::types::{RiskRequest, RiskResult};

/// Anything that can answer a risk query. An `Err` means the answer never
/// arrived or could not be decoded; a service-side refusal is an `Ok` with
/// `success == false`.
#[async_trait::async_trait]
pub trait RiskService: Send + Sync {
    async fn predict_risk(&self, request: RiskRequest) -> anyhow::Result<RiskResult>;
}

#[async_trait::async_trait]
impl RiskService for Client {
    async fn predict_risk(&self, request: RiskRequest) -> anyhow::Result<RiskResult> {
        Client::predict_risk(self, request).await
    }
}

use anyhow::anyhow;
use reqwest::Url;

use crate::api::types::{RiskRequest, RiskResult};
use crate::api::PREDICT_RISK_PATH;

#[derive(Clone)]
pub struct Client {
    inner: reqwest::Client,
    base: Url,
}

impl Client {
    pub fn new(base: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::new();
        let base = base
            .parse()
            .map_err(|e| anyhow!("{} is not a valid url: {}", base, e))?;

        Ok(Self {
            inner: client,
            base,
        })
    }

    /// The body is decoded whatever the status code: the service reports
    /// rejected input as a JSON body on a 4xx/5xx.
    pub async fn predict_risk(&self, r: RiskRequest) -> anyhow::Result<RiskResult> {
        let url = self
            .base
            .join(PREDICT_RISK_PATH)
            .map_err(|e| anyhow!("error joining url: {e}"))?;

        let response = self
            .inner
            .post(url)
            .json(&r)
            .send()
            .await?
            .json()
            .await?;

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::Json;

    use super::*;

    async fn serve(router: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn posts_json_body_to_predict_risk() {
        let seen: Arc<Mutex<Option<(String, String)>>> = Arc::default();
        let captured = seen.clone();

        let router = axum::Router::new().route(
            "/predict_risk",
            post(move |headers: HeaderMap, body: String| async move {
                let content_type = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                *captured.lock().unwrap() = Some((content_type, body));

                Json(serde_json::json!({
                    "success": true,
                    "latitude": 34.05,
                    "longitude": -118.25,
                    "risk_score": 85,
                    "message": "Severe"
                }))
            }),
        );

        let client = Client::new(&serve(router).await).unwrap();
        let result = client
            .predict_risk(RiskRequest { lat: 34.05, lon: -118.25 })
            .await
            .unwrap();

        assert_eq!(
            result,
            RiskResult {
                success: true,
                risk_score: Some(85),
                message: "Severe".into(),
            }
        );

        let (content_type, body) = seen.lock().unwrap().clone().unwrap();
        assert_eq!(content_type, "application/json");
        assert_eq!(body, r#"{"lat":34.05,"lon":-118.25}"#);
    }

    #[tokio::test]
    async fn error_status_with_json_body_is_a_result() {
        let router = axum::Router::new().route(
            "/predict_risk",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({ "success": false, "message": "model unavailable" })),
                )
            }),
        );

        let client = Client::new(&serve(router).await).unwrap();
        let result = client
            .predict_risk(RiskRequest { lat: 1.0, lon: 2.0 })
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.risk_score, None);
        assert_eq!(result.message, "model unavailable");
    }

    #[tokio::test]
    async fn non_json_body_is_an_error() {
        let router = axum::Router::new().route(
            "/predict_risk",
            post(|| async { "<html>gateway timeout</html>" }),
        );

        let client = Client::new(&serve(router).await).unwrap();
        assert!(client
            .predict_risk(RiskRequest { lat: 1.0, lon: 2.0 })
            .await
            .is_err());
    }

    #[tokio::test]
    async fn unreachable_service_is_an_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = Client::new(&format!("http://{addr}")).unwrap();
        assert!(client
            .predict_risk(RiskRequest { lat: 1.0, lon: 2.0 })
            .await
            .is_err());
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = Client::new("not a url").err().unwrap();
        assert!(err.to_string().contains("not a url is not a valid url"));
    }
}

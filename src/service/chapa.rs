use std::time::Duration;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::{config::Config, service::error::ServiceError};

const GATEWAY_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutSession {
    pub checkout_url: String,
    /// Gateway-assigned transaction reference. Authoritative for all
    /// later verification lookups, even if it differs from the tx_ref
    /// we submitted.
    pub tx_ref: String,
}

#[derive(Debug, Clone)]
pub struct ChapaClient {
    client: reqwest::Client,
    secret_key: String,
    base_url: String,
    callback_url: String,
    return_url: String,
}

impl ChapaClient {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(GATEWAY_TIMEOUT)
            .build()
            .expect("failed to build gateway http client");

        Self {
            client,
            secret_key: config.chapa_secret_key.clone(),
            base_url: config.chapa_api_url.trim_end_matches('/').to_string(),
            callback_url: format!("{}/api/payments/verify", config.app_url),
            return_url: format!("{}/payment-complete", config.app_url),
        }
    }

    /// POST /transaction/initialize. Returns the hosted checkout session on
    /// success; any transport error, non-2xx status or malformed body is
    /// reported as a failed initiation and nothing is persisted locally.
    pub async fn initialize_payment(
        &self,
        tx_ref: &str,
        amount: &BigDecimal,
        email: &str,
    ) -> Result<CheckoutSession, ServiceError> {
        let payload = serde_json::json!({
            "amount": amount.to_string(),
            "currency": "ETB",
            "email": email,
            "tx_ref": tx_ref,
            "callback_url": self.callback_url,
            "return_url": self.return_url,
        });

        let response = self
            .client
            .post(format!("{}/transaction/initialize", self.base_url))
            .header("Authorization", format!("Bearer {}", self.secret_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| ServiceError::PaymentInitiationFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ServiceError::PaymentInitiationFailed(format!(
                "gateway returned {}",
                response.status()
            )));
        }

        let body: JsonValue = response
            .json()
            .await
            .map_err(|e| ServiceError::PaymentInitiationFailed(e.to_string()))?;

        parse_checkout_session(&body).ok_or_else(|| {
            ServiceError::PaymentInitiationFailed("malformed gateway response".to_string())
        })
    }

    /// GET /transaction/verify/{tx_ref}. Returns the gateway-reported
    /// status string ("success" means paid). Safe to retry.
    pub async fn verify_payment(&self, tx_ref: &str) -> Result<String, ServiceError> {
        let response = self
            .client
            .get(format!("{}/transaction/verify/{}", self.base_url, tx_ref))
            .header("Authorization", format!("Bearer {}", self.secret_key))
            .send()
            .await
            .map_err(|e| ServiceError::PaymentVerificationFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ServiceError::PaymentVerificationFailed(format!(
                "gateway returned {}",
                response.status()
            )));
        }

        let body: JsonValue = response
            .json()
            .await
            .map_err(|e| ServiceError::PaymentVerificationFailed(e.to_string()))?;

        parse_verification_status(&body).ok_or_else(|| {
            ServiceError::PaymentVerificationFailed("malformed gateway response".to_string())
        })
    }
}

pub fn parse_checkout_session(body: &JsonValue) -> Option<CheckoutSession> {
    let data = body.get("data")?;
    Some(CheckoutSession {
        checkout_url: data.get("checkout_url")?.as_str()?.to_string(),
        tx_ref: data.get("tx_ref")?.as_str()?.to_string(),
    })
}

pub fn parse_verification_status(body: &JsonValue) -> Option<String> {
    Some(body.get("data")?.get("status")?.as_str()?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::json;
    use std::str::FromStr;

    fn test_config(base_url: String) -> Config {
        Config {
            database_url: "postgres://localhost/tripnest_test".to_string(),
            app_url: "http://localhost:8000".to_string(),
            port: 8000,
            chapa_secret_key: "test_secret_key".to_string(),
            chapa_api_url: base_url,
        }
    }

    async fn spawn_gateway(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_parse_checkout_session() {
        let body = json!({
            "message": "Hosted Link",
            "status": "success",
            "data": {
                "checkout_url": "https://pay/TX1",
                "tx_ref": "TX1"
            }
        });

        let session = parse_checkout_session(&body).unwrap();
        assert_eq!(session.checkout_url, "https://pay/TX1");
        assert_eq!(session.tx_ref, "TX1");
    }

    #[test]
    fn test_parse_checkout_session_malformed() {
        assert!(parse_checkout_session(&json!({"status": "success"})).is_none());
        assert!(parse_checkout_session(&json!({"data": {"checkout_url": "https://pay/TX1"}})).is_none());
    }

    #[test]
    fn test_parse_verification_status() {
        let body = json!({"data": {"status": "success"}});
        assert_eq!(parse_verification_status(&body).unwrap(), "success");

        let body = json!({"data": {"status": "failed"}});
        assert_eq!(parse_verification_status(&body).unwrap(), "failed");

        assert!(parse_verification_status(&json!({"error": "nope"})).is_none());
    }

    #[tokio::test]
    async fn test_initialize_payment_returns_gateway_session() {
        let app = Router::new().route(
            "/transaction/initialize",
            post(|| async {
                Json(json!({
                    "status": "success",
                    "data": {"checkout_url": "https://pay/TX1", "tx_ref": "TX1"}
                }))
            }),
        );
        let base_url = spawn_gateway(app).await;

        let client = ChapaClient::new(&test_config(base_url));
        let amount = BigDecimal::from_str("500").unwrap();
        let session = client
            .initialize_payment("BK1", &amount, "a@b.com")
            .await
            .unwrap();

        assert_eq!(session.checkout_url, "https://pay/TX1");
        assert_eq!(session.tx_ref, "TX1");
    }

    #[tokio::test]
    async fn test_initialize_payment_gateway_error() {
        let app = Router::new().route(
            "/transaction/initialize",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base_url = spawn_gateway(app).await;

        let client = ChapaClient::new(&test_config(base_url));
        let amount = BigDecimal::from_str("500").unwrap();
        let err = client.initialize_payment("BK1", &amount, "a@b.com").await;

        assert!(matches!(err, Err(ServiceError::PaymentInitiationFailed(_))));
    }

    #[tokio::test]
    async fn test_initialize_payment_malformed_body() {
        let app = Router::new().route(
            "/transaction/initialize",
            post(|| async { Json(json!({"status": "success"})) }),
        );
        let base_url = spawn_gateway(app).await;

        let client = ChapaClient::new(&test_config(base_url));
        let amount = BigDecimal::from_str("500").unwrap();
        let err = client.initialize_payment("BK1", &amount, "a@b.com").await;

        assert!(matches!(err, Err(ServiceError::PaymentInitiationFailed(_))));
    }

    #[tokio::test]
    async fn test_verify_payment_success_status() {
        let app = Router::new().route(
            "/transaction/verify/:tx_ref",
            get(|| async { Json(json!({"status": "success", "data": {"status": "success"}})) }),
        );
        let base_url = spawn_gateway(app).await;

        let client = ChapaClient::new(&test_config(base_url));
        let status = client.verify_payment("TX1").await.unwrap();
        assert_eq!(status, "success");
    }

    #[tokio::test]
    async fn test_verify_payment_gateway_error() {
        let app = Router::new().route(
            "/transaction/verify/:tx_ref",
            get(|| async { (StatusCode::BAD_GATEWAY, "unavailable") }),
        );
        let base_url = spawn_gateway(app).await;

        let client = ChapaClient::new(&test_config(base_url));
        let err = client.verify_payment("TX1").await;
        assert!(matches!(
            err,
            Err(ServiceError::PaymentVerificationFailed(_))
        ));
    }
}

use crate::domain::gateway::{
    CardInfo, CustomerSource, GatewayBackend, GatewayError, GatewayResponse, GatewayResult,
    PaymentInformation,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

/// How a scripted mock gateway answers every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MockBehavior {
    /// Well-formed successful response with card info.
    #[default]
    Success,
    /// Well-formed response with `is_success = false` and a decline reason.
    Declined,
    /// The backend call itself errors out.
    Fault,
    /// Response that fails structural validation (empty transaction id).
    Malformed,
    /// Never answers; exercises the dispatcher timeout.
    Hang,
}

/// Scripted gateway backend for tests and the CLI harness.
pub struct MockGateway {
    name: String,
    behavior: MockBehavior,
}

impl MockGateway {
    pub fn new(name: impl Into<String>, behavior: MockBehavior) -> Self {
        Self {
            name: name.into(),
            behavior,
        }
    }

    async fn call(&self, info: &PaymentInformation) -> GatewayResult<GatewayResponse> {
        match self.behavior {
            MockBehavior::Success => Ok(GatewayResponse {
                is_success: true,
                transaction_id: format!("{}-{}", self.name, Uuid::new_v4()),
                amount: info.amount,
                currency: info.currency.clone(),
                error: None,
                card_info: Some(CardInfo {
                    brand: "visa".to_string(),
                    last_digits: "4242".to_string(),
                    exp_month: 12,
                    exp_year: 2030,
                }),
                raw_response: serde_json::json!({"result": "ok", "gateway": self.name}),
            }),
            MockBehavior::Declined => Ok(GatewayResponse {
                is_success: false,
                transaction_id: format!("{}-{}", self.name, Uuid::new_v4()),
                amount: info.amount,
                currency: info.currency.clone(),
                error: Some("Card declined".to_string()),
                card_info: None,
                raw_response: serde_json::json!({"result": "declined"}),
            }),
            MockBehavior::Fault => Err(GatewayError::Backend(
                "connection reset by gateway".to_string(),
            )),
            MockBehavior::Malformed => Ok(GatewayResponse {
                is_success: true,
                transaction_id: String::new(),
                amount: info.amount,
                currency: info.currency.clone(),
                error: None,
                card_info: None,
                raw_response: serde_json::json!({}),
            }),
            MockBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(GatewayError::Backend("unreachable".to_string()))
            }
        }
    }
}

#[async_trait]
impl GatewayBackend for MockGateway {
    fn name(&self) -> &str {
        &self.name
    }

    async fn authorize(&self, info: &PaymentInformation) -> GatewayResult<GatewayResponse> {
        self.call(info).await
    }

    async fn capture(&self, info: &PaymentInformation) -> GatewayResult<GatewayResponse> {
        self.call(info).await
    }

    async fn refund(&self, info: &PaymentInformation) -> GatewayResult<GatewayResponse> {
        self.call(info).await
    }

    async fn void(&self, info: &PaymentInformation) -> GatewayResult<GatewayResponse> {
        self.call(info).await
    }

    async fn confirm(&self, info: &PaymentInformation) -> GatewayResult<GatewayResponse> {
        self.call(info).await
    }

    async fn process(&self, info: &PaymentInformation) -> GatewayResult<GatewayResponse> {
        self.call(info).await
    }

    async fn list_payment_sources(&self, customer_id: &str) -> GatewayResult<Vec<CustomerSource>> {
        match self.behavior {
            MockBehavior::Fault => Err(GatewayError::Backend(
                "connection reset by gateway".to_string(),
            )),
            _ => Ok(vec![CustomerSource {
                id: format!("src-{customer_id}"),
                gateway: self.name.clone(),
                card: Some(CardInfo {
                    brand: "visa".to_string(),
                    last_digits: "4242".to_string(),
                    exp_month: 12,
                    exp_year: 2030,
                }),
            }]),
        }
    }

    async fn get_client_token(&self, info: &PaymentInformation) -> GatewayResult<String> {
        match self.behavior {
            MockBehavior::Fault => Err(GatewayError::Backend(
                "connection reset by gateway".to_string(),
            )),
            _ => Ok(format!("{}-client-{}", self.name, info.payment_id)),
        }
    }
}

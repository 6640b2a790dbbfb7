use crate::domain::gateway::{GatewayError, GatewayResponse, GatewayResult};
use rust_decimal::Decimal;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

/// Generic message substituted for every classified gateway failure.
/// Internal detail stays in the logs; this is all the caller and the
/// persisted transaction ever see.
pub const ERROR_MSG: &str = "Oops! Something went wrong.";
/// Fallback for a failed transaction that recorded no error of its own.
pub const GENERIC_TRANSACTION_ERROR: &str = "Transaction was unsuccessful";

/// Structural checks a response must pass before the pipeline trusts it.
pub fn validate_gateway_response(response: &GatewayResponse) -> GatewayResult<()> {
    if response.transaction_id.is_empty() {
        return Err(GatewayError::InvalidResponse(
            "missing transaction id".to_string(),
        ));
    }
    if response.currency.is_empty() {
        return Err(GatewayError::InvalidResponse("missing currency".to_string()));
    }
    if response.amount < Decimal::ZERO {
        return Err(GatewayError::InvalidResponse("negative amount".to_string()));
    }
    Ok(())
}

/// Wraps exactly one backend invocation and normalizes its outcome.
///
/// A validated response comes back as `(Some(response), None)`. Any
/// validation rejection, backend fault, or timeout expiry is logged at
/// error severity and collapsed into `(None, Some(ERROR_MSG))`.
pub async fn fetch_gateway_response<F>(
    call: F,
    deadline: Duration,
) -> (Option<GatewayResponse>, Option<String>)
where
    F: Future<Output = GatewayResult<GatewayResponse>>,
{
    match timeout(deadline, call).await {
        Ok(Ok(response)) => match validate_gateway_response(&response) {
            Ok(()) => (Some(response), None),
            Err(err) => {
                tracing::error!(error = %err, "gateway response validation failed");
                (None, Some(ERROR_MSG.to_string()))
            }
        },
        Ok(Err(err)) => {
            tracing::error!(error = %err, "error encountered while executing payment gateway");
            (None, Some(ERROR_MSG.to_string()))
        }
        Err(_) => {
            tracing::error!(
                timeout_ms = deadline.as_millis() as u64,
                "payment gateway call timed out"
            );
            (None, Some(ERROR_MSG.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn response() -> GatewayResponse {
        GatewayResponse {
            is_success: true,
            transaction_id: "gw-1".to_string(),
            amount: dec!(10.0),
            currency: "USD".to_string(),
            error: None,
            card_info: None,
            raw_response: serde_json::json!({"result": "ok"}),
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_response() {
        assert!(validate_gateway_response(&response()).is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let mut bad = response();
        bad.transaction_id.clear();
        assert!(validate_gateway_response(&bad).is_err());

        let mut bad = response();
        bad.currency.clear();
        assert!(validate_gateway_response(&bad).is_err());

        let mut bad = response();
        bad.amount = dec!(-1.0);
        assert!(validate_gateway_response(&bad).is_err());
    }

    #[tokio::test]
    async fn test_fetch_passes_validated_response_through() {
        let (resp, error) =
            fetch_gateway_response(async { Ok(response()) }, Duration::from_secs(1)).await;

        assert_eq!(resp.unwrap().transaction_id, "gw-1");
        assert!(error.is_none());
    }

    #[tokio::test]
    async fn test_fetch_substitutes_generic_message_on_backend_fault() {
        let (resp, error) = fetch_gateway_response(
            async { Err(GatewayError::Backend("connection reset".to_string())) },
            Duration::from_secs(1),
        )
        .await;

        assert!(resp.is_none());
        assert_eq!(error.as_deref(), Some(ERROR_MSG));
    }

    #[tokio::test]
    async fn test_fetch_substitutes_generic_message_on_malformed_response() {
        let mut bad = response();
        bad.transaction_id.clear();

        let (resp, error) =
            fetch_gateway_response(async { Ok(bad) }, Duration::from_secs(1)).await;

        assert!(resp.is_none());
        assert_eq!(error.as_deref(), Some(ERROR_MSG));
    }

    #[tokio::test]
    async fn test_fetch_classifies_timeout_as_failure() {
        let (resp, error) = fetch_gateway_response(
            async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(response())
            },
            Duration::from_millis(10),
        )
        .await;

        assert!(resp.is_none());
        assert_eq!(error.as_deref(), Some(ERROR_MSG));
    }
}

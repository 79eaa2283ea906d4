// --- File: crates/pairup_stripe/src/logic.rs ---
use crate::error::StripeError;
use pairup_common::services::PaymentIntentResult;
use pairup_common::HTTP_CLIENT;
use pairup_config::StripeConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

// --- Data Structures ---

/// Request from the frontend: the price in major currency units.
///
/// The price may arrive as a number or a numeric string (`"10.00"`).
#[derive(Deserialize, Debug)]
pub struct CreatePaymentIntentRequest {
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub price: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Text(String),
}

/// Unparseable strings become NaN and are rejected by [`to_minor_units`].
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match RawPrice::deserialize(deserializer)? {
        RawPrice::Number(n) => n,
        RawPrice::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
    })
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct CreatePaymentIntentResponse {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

#[derive(Deserialize, Debug)]
struct StripePaymentIntentApiResponse {
    id: String,
    status: String,
    amount: i64,
    currency: String,
    client_secret: Option<String>,
}

// --- Core Logic ---

/// Converts a major-unit price to minor units, dropping any fraction of a cent.
pub fn to_minor_units(price: f64) -> Result<i64, StripeError> {
    if !price.is_finite() || price < 0.0 {
        return Err(StripeError::InvalidAmount(price));
    }
    Ok((price * 100.0).trunc() as i64)
}

/// Creates a card payment intent for `amount` minor units.
pub async fn create_payment_intent(
    stripe_config: &StripeConfig,
    amount: i64,
    currency: &str,
) -> Result<PaymentIntentResult, StripeError> {
    if stripe_config.secret_key.is_empty() {
        return Err(StripeError::ConfigError);
    }

    let form_body: Vec<(&str, String)> = vec![
        ("amount", amount.to_string()),
        ("currency", currency.to_lowercase()),
        ("payment_method_types[]", "card".to_string()),
    ];

    let api_url = format!(
        "{}/v1/payment_intents",
        stripe_config.api_base.trim_end_matches('/')
    );
    info!("[Stripe Logic] Creating payment intent of {} {}", amount, currency);

    let response = HTTP_CLIENT
        .post(&api_url)
        .basic_auth(&stripe_config.secret_key, None::<&str>)
        .form(&form_body)
        .send()
        .await?;

    let status = response.status();
    let body_text = response.text().await?;

    info!("[Stripe Logic] Stripe API response status: {}", status);

    if status.is_success() {
        let intent: StripePaymentIntentApiResponse = serde_json::from_str(&body_text)?;
        info!("[Stripe Logic] Payment intent {} created", intent.id);
        Ok(PaymentIntentResult {
            id: intent.id,
            status: intent.status,
            amount: intent.amount,
            currency: intent.currency,
            client_secret: intent.client_secret,
        })
    } else {
        let error_message = match serde_json::from_str::<serde_json::Value>(&body_text) {
            Ok(json_body) => json_body
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .unwrap_or(&body_text)
                .to_string(),
            Err(_) => body_text,
        };
        info!(
            "[Stripe Logic] Stripe API request failed with HTTP status: {}. Message: {}",
            status, error_message
        );
        Err(StripeError::ApiError {
            status_code: status.as_u16(),
            message: error_message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(api_base: String) -> StripeConfig {
        StripeConfig {
            secret_key: "sk_test_123".to_string(),
            currency: "usd".to_string(),
            api_base,
        }
    }

    #[test]
    fn price_is_truncated_to_cents() {
        assert_eq!(to_minor_units(10.0).unwrap(), 1000);
        assert_eq!(to_minor_units(12.345).unwrap(), 1234);
        assert_eq!(to_minor_units(0.0).unwrap(), 0);
        assert!(to_minor_units(-5.0).is_err());
        assert!(to_minor_units(f64::NAN).is_err());
    }

    #[test]
    fn price_accepts_numeric_strings() {
        let parsed: CreatePaymentIntentRequest =
            serde_json::from_value(json!({"price": "10.00"})).unwrap();
        assert_eq!(to_minor_units(parsed.price).unwrap(), 1000);

        let parsed: CreatePaymentIntentRequest =
            serde_json::from_value(json!({"price": 7.5})).unwrap();
        assert_eq!(to_minor_units(parsed.price).unwrap(), 750);

        let parsed: CreatePaymentIntentRequest =
            serde_json::from_value(json!({"price": "ten"})).unwrap();
        assert!(to_minor_units(parsed.price).is_err());
    }

    #[tokio::test]
    async fn posts_form_and_returns_client_secret() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .and(header_exists("authorization"))
            .and(body_string_contains("amount=1000"))
            .and(body_string_contains("currency=usd"))
            .and(body_string_contains("payment_method_types%5B%5D=card"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "pi_1",
                "status": "requires_payment_method",
                "amount": 1000,
                "currency": "usd",
                "client_secret": "pi_1_secret_abc"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = create_payment_intent(&config(server.uri()), 1000, "usd")
            .await
            .unwrap();
        assert_eq!(result.amount, 1000);
        assert_eq!(result.client_secret.as_deref(), Some("pi_1_secret_abc"));
    }

    #[tokio::test]
    async fn api_errors_carry_stripe_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Invalid API Key provided"}
            })))
            .mount(&server)
            .await;

        let err = create_payment_intent(&config(server.uri()), 500, "usd")
            .await
            .unwrap_err();
        match err {
            StripeError::ApiError {
                status_code,
                message,
            } => {
                assert_eq!(status_code, 401);
                assert_eq!(message, "Invalid API Key provided");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_secret_key_is_a_config_error() {
        let mut cfg = config("http://127.0.0.1:9".to_string());
        cfg.secret_key.clear();
        let err = create_payment_intent(&cfg, 100, "usd").await.unwrap_err();
        assert!(matches!(err, StripeError::ConfigError));
    }
}

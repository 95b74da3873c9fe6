//! Tests for the webhook listener

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::format::Formatter;
    use crate::notify::{MockDeliver, Notifier};

    fn relay(delivery: MockDeliver) -> Relay {
        Relay::new(Formatter::system(), Arc::new(delivery))
    }

    #[tokio::test]
    async fn test_home() {
        assert_eq!(home().await, HOME_TEXT);
    }

    #[tokio::test]
    async fn test_empty_body_is_bad_request() {
        let mut delivery = MockDeliver::new();
        delivery.expect_deliver().times(0);

        let (status, Json(body)) = handle(&relay(delivery), b"").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.status, "error");
        assert_eq!(body.message, "Empty payload");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let mut delivery = MockDeliver::new();
        delivery.expect_deliver().times(0);

        let (status, Json(body)) = handle(&relay(delivery), b"{\"ticker\": ").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.message.contains("JSON parsing error"));
    }

    #[tokio::test]
    async fn test_success_response() {
        let mut delivery = MockDeliver::new();
        delivery.expect_deliver().times(1).returning(|_| Ok(()));

        let body = br#"{"ticker": "BINANCE:XLMUSDT", "action": "BUY", "close": 0.12}"#;
        let (status, Json(response)) = handle(&relay(delivery), body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            response,
            WebhookResponse {
                status: "success",
                message: "BUY signal sent to Telegram!".to_string(),
                category: None,
                reason: None,
            }
        );
    }

    #[tokio::test]
    async fn test_filtered_response() {
        let mut delivery = MockDeliver::new();
        delivery.expect_deliver().times(0);

        let body = br#"{"action": "BUY", "open": 100, "close": 100.1, "high": 100.2, "low": 100.0}"#;
        let (status, Json(response)) = handle(&relay(delivery), body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.status, "filtered");
        assert_eq!(response.category, Some("too_choppy"));
        assert_eq!(response.reason, Some("stagnant"));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "filtered");
        assert_eq!(json["reason"], "stagnant");
    }

    #[tokio::test]
    async fn test_delivery_failure_is_server_error() {
        let mut delivery = MockDeliver::new();
        delivery
            .expect_deliver()
            .returning(|_| Err(RelayError::Delivery("Bad Request: chat not found".to_string())));

        let (status, Json(response)) = handle(&relay(delivery), br#"{"action": "SELL"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.status, "error");
        assert_eq!(response.message, "Bad Request: chat not found");

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("category").is_none());
    }

    #[tokio::test]
    async fn test_disabled_notifier_still_succeeds() {
        let relay = Relay::new(Formatter::system(), Arc::new(Notifier::disabled()));
        let (status, _) = handle(&relay, br#"{"signal_type": "CONFIRMED"}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[test]
    fn test_router_builds() {
        let _ = router(relay(MockDeliver::new()));
    }

    #[tokio::test]
    async fn test_structured_field_is_not_a_client_error() {
        let mut delivery = MockDeliver::new();
        delivery.expect_deliver().times(1).returning(|_| Ok(()));

        let body = br#"{"action": "BUY", "ticker": "BINANCE:BTCUSDT", "volume": [1, 2]}"#;
        let (status, Json(response)) = handle(&relay(delivery), body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.status, "success");
    }
}

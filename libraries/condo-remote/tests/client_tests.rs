//! Tests for the remote document store client.
//!
//! These use mock servers to verify client behavior without a real blob
//! store connection.

use condo_core::{PaymentDraft, PaymentType, Snapshot};
use condo_remote::{AddressLookup, DocumentClient, RemoteStoreError};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_payment(house: &str) -> condo_core::Payment {
    PaymentDraft {
        house_id: house.into(),
        amount_bs: Some(500.0),
        exchange_rate: Some(50.0),
        payment_type: PaymentType::Ordinary,
        extraordinary_reason: None,
        bank_reference: "123456".into(),
        receipt_ref: None,
    }
    .build()
    .unwrap()
}

// =============================================================================
// Create
// =============================================================================

mod create {
    use super::*;

    #[tokio::test]
    async fn returns_id_from_location_header() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_json(Snapshot::seed()))
            .respond_with(
                ResponseTemplate::new(201)
                    .insert_header("Location", "https://store.example/api/jsonBlob/abc123def"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = DocumentClient::new(mock_server.uri()).unwrap();
        let id = client.create(&Snapshot::seed()).await.unwrap();
        assert_eq!(id, "abc123def");
    }

    #[tokio::test]
    async fn tolerates_trailing_slash_in_location() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(201).insert_header("Location", "/api/jsonBlob/xyz789/"),
            )
            .mount(&mock_server)
            .await;

        let client = DocumentClient::new(mock_server.uri()).unwrap();
        let id = client.create(&Snapshot::default()).await.unwrap();
        assert_eq!(id, "xyz789");
    }

    #[tokio::test]
    async fn rejection_is_remote_unavailable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&mock_server)
            .await;

        let client = DocumentClient::new(mock_server.uri()).unwrap();
        let err = client.create(&Snapshot::seed()).await.unwrap_err();
        assert!(matches!(err, RemoteStoreError::RemoteUnavailable(_)));
    }

    #[tokio::test]
    async fn missing_location_header_is_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = DocumentClient::new(mock_server.uri()).unwrap();
        let err = client.create(&Snapshot::seed()).await.unwrap_err();
        assert!(matches!(err, RemoteStoreError::Parse(_)));
    }
}

// =============================================================================
// Fetch
// =============================================================================

mod fetch {
    use super::*;

    #[tokio::test]
    async fn parses_stored_document() {
        let mock_server = MockServer::start().await;

        let mut stored = Snapshot::seed();
        stored.payments.push(sample_payment("TH01A"));

        Mock::given(method("GET"))
            .and(path("/doc42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&stored))
            .mount(&mock_server)
            .await;

        let client = DocumentClient::new(mock_server.uri()).unwrap();
        let snapshot = client.fetch("doc42").await.unwrap();
        assert_eq!(snapshot, stored);
    }

    #[tokio::test]
    async fn missing_collections_default_to_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/doc42"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"houses": []})),
            )
            .mount(&mock_server)
            .await;

        let client = DocumentClient::new(mock_server.uri()).unwrap();
        let snapshot = client.fetch("doc42").await.unwrap();
        assert!(snapshot.payments.is_empty());
        assert!(snapshot.suggestions.is_empty());
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/expired"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = DocumentClient::new(mock_server.uri()).unwrap();
        let err = client.fetch("expired").await.unwrap_err();
        assert!(matches!(err, RemoteStoreError::NotFound(id) if id == "expired"));
    }

    #[tokio::test]
    async fn any_non_success_status_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = DocumentClient::new(mock_server.uri()).unwrap();
        let err = client.fetch("doc42").await.unwrap_err();
        assert!(matches!(err, RemoteStoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn network_failure_is_remote_unavailable() {
        // Nothing listens here
        let client = DocumentClient::new("http://127.0.0.1:9").unwrap();
        let err = client.fetch("doc42").await.unwrap_err();
        assert!(matches!(err, RemoteStoreError::RemoteUnavailable(_)));
    }

    #[tokio::test]
    async fn garbage_body_is_a_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = DocumentClient::new(mock_server.uri()).unwrap();
        let err = client.fetch("doc42").await.unwrap_err();
        assert!(matches!(err, RemoteStoreError::Parse(_)));
    }
}

// =============================================================================
// Replace
// =============================================================================

mod replace {
    use super::*;

    #[tokio::test]
    async fn puts_whole_snapshot() {
        let mock_server = MockServer::start().await;

        let mut snapshot = Snapshot::seed();
        snapshot.payments.push(sample_payment("TH01A"));
        snapshot.last_update = Some(1_700_000_000_000);

        Mock::given(method("PUT"))
            .and(path("/doc42"))
            .and(body_json(&snapshot))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = DocumentClient::new(mock_server.uri()).unwrap();
        client.replace("doc42", &snapshot).await.unwrap();
    }

    #[tokio::test]
    async fn non_success_is_remote_unavailable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = DocumentClient::new(mock_server.uri()).unwrap();
        let err = client
            .replace("doc42", &Snapshot::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteStoreError::RemoteUnavailable(_)));
    }
}

// =============================================================================
// Address lookup
// =============================================================================

mod lookup {
    use super::*;

    #[tokio::test]
    async fn returns_address_on_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"ip": "203.0.113.7"})),
            )
            .mount(&mock_server)
            .await;

        let lookup = AddressLookup::new(mock_server.uri()).unwrap();
        assert_eq!(lookup.public_address().await.as_deref(), Some("203.0.113.7"));
    }

    #[tokio::test]
    async fn failures_yield_none() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let lookup = AddressLookup::new(mock_server.uri()).unwrap();
        assert!(lookup.public_address().await.is_none());

        let unreachable = AddressLookup::new("http://127.0.0.1:9").unwrap();
        assert!(unreachable.public_address().await.is_none());
    }
}

// =============================================================================
// Error type
// =============================================================================

mod errors {
    use super::*;

    #[test]
    fn error_display() {
        let err = RemoteStoreError::NotFound("doc42".into());
        assert!(format!("{err}").contains("doc42"));

        let err = RemoteStoreError::RemoteUnavailable("timed out".into());
        assert!(format!("{err}").contains("timed out"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RemoteStoreError>();
    }
}

// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Integration tests for the HTTP SOAP transport against a mock UltraDNS endpoint.
//!
//! A `wiremock` server plays the UltraDNS web service: it serves the WSDL on GET
//! and answers SOAP envelopes on POST.
//!
//! Run with: cargo test --test http_transport_integration

use std::time::Duration;
use ultradnssec::client::DnssecZoneClient;
use ultradnssec::config::ClientConfig;
use ultradnssec::errors::{ClientError, Delivery, InvokeError, TransportError};
use ultradnssec::soap::{HttpSoapTransport, Session, SoapTransport};
use ultradnssec::types::{Credentials, KeyType, Operation, RemoteCall};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SERVICE_PATH: &str = "/UltraDNS_WS/v01";
const NAMESPACE: &str = "http://webservice.api.ultra.neustar.com/v01/";

// ============================================================================
// Helper Functions
// ============================================================================

fn wsdl(endpoint: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<wsdl:definitions name="UltraWebServiceV01Service"
    targetNamespace="{NAMESPACE}"
    xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
    xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/">
  <wsdl:service name="UltraWebServiceV01Service">
    <wsdl:port name="UltraWebServiceV01Port" binding="tns:UltraWebServiceV01ServiceSoapBinding">
      <soap:address location="{endpoint}"/>
    </wsdl:port>
  </wsdl:service>
</wsdl:definitions>"#
    )
}

fn soap_response(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>{body}</soap:Body>
</soap:Envelope>"#
    )
}

fn ultra_fault(code: &str, description: &str) -> String {
    soap_response(&format!(
        r#"<soap:Fault>
      <faultcode>soap:Server</faultcode>
      <faultstring>Fault occurred while processing.</faultstring>
      <detail>
        <ns1:UltraWSException xmlns:ns1="{NAMESPACE}">
          <errorCode>{code}</errorCode>
          <errorDescription>{description}</errorDescription>
        </ns1:UltraWSException>
      </detail>
    </soap:Fault>"#
    ))
}

/// Start a mock server that serves the WSDL pointing back at itself.
async fn start_ultradns() -> MockServer {
    let server = MockServer::start().await;
    let endpoint = format!("{}{SERVICE_PATH}", server.uri());

    Mock::given(method("GET"))
        .and(path(SERVICE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(wsdl(&endpoint)))
        .mount(&server)
        .await;

    server
}

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig {
        wsdl_url: format!("{}{SERVICE_PATH}?wsdl", server.uri()),
        credentials: Credentials::new("alice", "s3cret"),
        timeout: Duration::from_secs(5),
        debug: false,
    }
}

// ============================================================================
// Session Establishment
// ============================================================================

#[tokio::test]
async fn test_session_reads_endpoint_and_namespace_from_wsdl() {
    let server = start_ultradns().await;

    let client = DnssecZoneClient::connect(&config_for(&server)).await.unwrap();

    assert_eq!(
        client.session().endpoint(),
        format!("{}{SERVICE_PATH}", server.uri())
    );
    assert_eq!(client.session().namespace(), NAMESPACE);
}

#[tokio::test]
async fn test_session_falls_back_to_wsdl_url_without_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SERVICE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"/>"#,
        ))
        .mount(&server)
        .await;

    let client = DnssecZoneClient::connect(&config_for(&server)).await.unwrap();

    assert_eq!(
        client.session().endpoint(),
        format!("{}{SERVICE_PATH}", server.uri())
    );
    assert_eq!(client.session().namespace(), NAMESPACE);
}

#[tokio::test]
async fn test_session_rejected_with_401() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SERVICE_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = DnssecZoneClient::connect(&config_for(&server))
        .await
        .unwrap_err();

    match err {
        ClientError::Authentication { reason, .. } => assert!(reason.contains("401"), "{reason}"),
        other => panic!("expected authentication error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_session_unreachable_endpoint() {
    let config = ClientConfig {
        wsdl_url: "http://127.0.0.1:1/UltraDNS_WS/v01?wsdl".to_string(),
        credentials: Credentials::new("alice", "s3cret"),
        timeout: Duration::from_secs(2),
        debug: false,
    };

    let err = DnssecZoneClient::connect(&config).await.unwrap_err();
    assert!(matches!(err, ClientError::Authentication { .. }), "{err:?}");
}

#[tokio::test]
async fn test_session_rejects_empty_credentials_without_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.credentials = Credentials::new("alice", "");

    let err = DnssecZoneClient::connect(&config).await.unwrap_err();
    assert!(matches!(err, ClientError::Authentication { .. }));
}

#[tokio::test]
async fn test_session_malformed_wsdl() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SERVICE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = DnssecZoneClient::connect(&config_for(&server))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Authentication { .. }));
}

// ============================================================================
// Remote Calls
// ============================================================================

#[tokio::test]
async fn test_query_pending_changes_end_to_end() {
    let server = start_ultradns().await;

    Mock::given(method("POST"))
        .and(path(SERVICE_PATH))
        .and(header("content-type", "text/xml; charset=utf-8"))
        .and(body_string_contains("<ns:queryPendingChanges>"))
        .and(body_string_contains("<zoneName>example.com.</zoneName>"))
        .and(body_string_contains("<wsse:Username>alice</wsse:Username>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(soap_response(&format!(
            r#"<ns1:queryPendingChangesResponse xmlns:ns1="{NAMESPACE}">
      <PendingChange changeId="11"><owner>www.example.com.</owner></PendingChange>
      <PendingChange changeId="12"><owner>ftp.example.com.</owner></PendingChange>
    </ns1:queryPendingChangesResponse>"#
        ))))
        .expect(1)
        .mount(&server)
        .await;

    let client = DnssecZoneClient::connect(&config_for(&server)).await.unwrap();
    let changes = client.query_pending_changes("example.com").await.unwrap();

    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0].attribute("changeId"), Some("11"));
    assert_eq!(changes[1].child_text("owner"), Some("ftp.example.com."));
}

#[tokio::test]
async fn test_key_type_on_the_wire() {
    let server = start_ultradns().await;

    Mock::given(method("POST"))
        .and(body_string_contains("<ns:getDnssecKeyRecordList>"))
        .and(body_string_contains("<keyType>KSK</keyType>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(soap_response(
            r#"<ns1:getDnssecKeyRecordListResponse xmlns:ns1="urn:x"><DnssecKey keyTag="20326"/></ns1:getDnssecKeyRecordListResponse>"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = DnssecZoneClient::connect(&config_for(&server)).await.unwrap();
    let keys = client
        .get_dnssec_key_record_list("example.com.", KeyType::Ksk)
        .await
        .unwrap();

    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0].attribute("keyTag"), Some("20326"));
}

#[tokio::test]
async fn test_fault_with_http_500_is_remote_operation_error() {
    let server = start_ultradns().await;

    Mock::given(method("POST"))
        .and(body_string_contains("<ns:signZone>"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string(ultra_fault("1801", "Zone does not exist in the system.")),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("<ns:unsignZone>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(soap_response(
            r#"<ns1:unsignZoneResponse xmlns:ns1="urn:x"><result>Successful</result></ns1:unsignZoneResponse>"#,
        )))
        .mount(&server)
        .await;

    let client = DnssecZoneClient::connect(&config_for(&server)).await.unwrap();

    let err = client.sign_zone("missing.example").await.unwrap_err();
    assert_eq!(
        err,
        ClientError::RemoteOperation {
            operation: Operation::SignZone,
            code: "1801".to_string(),
            description: "Zone does not exist in the system.".to_string(),
        }
    );

    // Session still usable after a fault
    let status = client.un_sign_zone("example.com").await.unwrap();
    assert_eq!(status.name, "unsignZoneResponse");
    assert_eq!(status.child_text("result"), Some("Successful"));
}

#[tokio::test]
async fn test_http_503_without_fault_is_transport_error() {
    let server = start_ultradns().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let client = DnssecZoneClient::connect(&config_for(&server)).await.unwrap();
    let err = client.get_ds_records("example.com").await.unwrap_err();

    match &err {
        ClientError::Transport {
            operation,
            source: TransportError::HttpStatus { status, body, .. },
        } => {
            assert_eq!(*operation, Operation::GetDsRecords);
            assert_eq!(*status, 503);
            assert_eq!(body, "Service Unavailable");
        }
        other => panic!("expected HTTP status transport error, got {other:?}"),
    }
    assert!(!err.is_remote_fault());
    assert!(err.reached_remote());
}

#[tokio::test]
async fn test_malformed_success_response_is_transport_error() {
    let server = start_ultradns().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"not\": \"soap\"}"))
        .mount(&server)
        .await;

    let client = DnssecZoneClient::connect(&config_for(&server)).await.unwrap();
    let err = client.get_domain_dnssec_policies("example.com").await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::Transport {
            source: TransportError::MalformedResponse { .. },
            ..
        }
    ));
}

#[tokio::test]
async fn test_request_timeout_is_transport_timeout() {
    let server = start_ultradns().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(soap_response("<r/>"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let transport = HttpSoapTransport::new(
        &format!("{}{SERVICE_PATH}?wsdl", server.uri()),
        Duration::from_millis(300),
    )
    .unwrap();
    assert!(transport.endpoint().ends_with("?wsdl"));

    let client = DnssecZoneClient::with_transport(transport, Credentials::new("alice", "s3cret"))
        .await
        .unwrap();
    let err = client.sign_zone("example.com").await.unwrap_err();

    assert!(
        matches!(
            err,
            ClientError::Transport {
                source: TransportError::Timeout { .. },
                ..
            }
        ),
        "{err:?}"
    );

    // The server saw the mutating request even though the client gave up
    let posts = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|request| request.method.as_str() == "POST")
        .count();
    assert_eq!(posts, 1);
    assert_eq!(err.delivery(), Delivery::Unknown);
    assert!(!err.reached_remote());
    assert!(!err.is_retry_safe());
}

#[tokio::test]
async fn test_refused_connection_was_not_sent() {
    let transport =
        HttpSoapTransport::new("http://127.0.0.1:1/UltraDNS_WS/v01?wsdl", Duration::from_secs(2))
            .unwrap();
    let session = Session::new(
        "http://127.0.0.1:1/UltraDNS_WS/v01",
        NAMESPACE,
        Credentials::new("alice", "s3cret"),
    );
    let call = RemoteCall::new(Operation::SignZone).arg("zoneName", "example.com.");

    let err = transport.invoke(&session, &call).await.unwrap_err();
    match err {
        InvokeError::Transport(source) => {
            assert!(matches!(source, TransportError::Unreachable { .. }), "{source:?}");
            assert_eq!(source.delivery(), Delivery::NotSent);
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[test]
fn test_invalid_wsdl_url_rejected() {
    let err = HttpSoapTransport::new("not a url", Duration::from_secs(1)).unwrap_err();
    assert!(matches!(err, TransportError::InvalidEndpoint { .. }));
}

//! ESearch tests against a mocked E-utilities server

mod common;

use rstest::rstest;
use serde_json::json;
use tracing_test::traced_test;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{create_mock_client, esearch_body};
use pubmed_report::{ReportError, RetrievalFailure, SearchQuery, Stage};

#[tokio::test]
#[traced_test]
async fn test_search_returns_ids_in_service_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("db", "pubmed"))
        .and(query_param("retmode", "json"))
        .and(query_param("retmax", "3"))
        .and(query_param("term", "covid"))
        .and(query_param("tool", "pubmed-report"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(esearch_body(&["38000003", "38000001", "38000002"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let query = SearchQuery::new("covid", 3).unwrap();

    let pmids = client.search_ids(&query).await.expect("search should succeed");
    let ids: Vec<String> = pmids.iter().map(|p| p.to_string()).collect();

    assert_eq!(ids, vec!["38000003", "38000001", "38000002"]);
}

#[tokio::test]
#[traced_test]
async fn test_search_term_is_url_encoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("term", "long covid AND (fatigue[tiab])"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_body(&["1"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let query = SearchQuery::new("long covid AND (fatigue[tiab])", 1).unwrap();

    assert_eq!(client.search_ids(&query).await.unwrap().len(), 1);
}

#[tokio::test]
#[traced_test]
async fn test_search_truncates_to_max_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_body(&["1", "2", "3", "4"])))
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let query = SearchQuery::new("covid", 2).unwrap();

    let pmids = client.search_ids(&query).await.unwrap();
    assert_eq!(pmids.len(), 2);
    assert_eq!(pmids[0].to_string(), "1");
    assert_eq!(pmids[1].to_string(), "2");
}

#[tokio::test]
#[traced_test]
async fn test_search_empty_result_is_ok() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_body(&[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let query = SearchQuery::new("zzzxqv", 20).unwrap();

    assert!(client.search_ids(&query).await.unwrap().is_empty());
}

#[rstest]
#[case::not_found(404)]
#[case::too_many_requests(429)]
#[case::server_error(500)]
#[case::bad_gateway(502)]
#[tokio::test]
async fn test_search_http_error_status(#[case] status: u16) {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(status))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let err = client
        .search_ids(&SearchQuery::new("covid", 5).unwrap())
        .await
        .expect_err("non-success status should fail");

    match err {
        ReportError::Retrieval {
            stage: Stage::Search,
            pmid: None,
            source: RetrievalFailure::Status { status: got, .. },
        } => assert_eq!(got, status),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
#[traced_test]
async fn test_search_unparsable_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Service unavailable</html>"))
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let err = client
        .search_ids(&SearchQuery::new("covid", 5).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ReportError::Retrieval {
            stage: Stage::Search,
            source: RetrievalFailure::Json(_),
            ..
        }
    ));
}

#[tokio::test]
#[traced_test]
async fn test_search_missing_idlist() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"esearchresult": {"count": "0"}})))
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let err = client
        .search_ids(&SearchQuery::new("covid", 5).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ReportError::Retrieval {
            stage: Stage::Search,
            source: RetrievalFailure::MissingField { ref field },
            ..
        } if field == "esearchresult.idlist"
    ));
}

#[tokio::test]
#[traced_test]
async fn test_search_error_without_idlist_keeps_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "esearchresult": {"ERROR": "Search Backend failed"}
        })))
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let err = client
        .search_ids(&SearchQuery::new("covid", 5).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ReportError::Retrieval {
            stage: Stage::Search,
            source: RetrievalFailure::Status { status: 200, .. },
            ..
        }
    ));
    assert!(err.to_string().contains("Search Backend failed"), "{err}");
}

#[tokio::test]
#[traced_test]
async fn test_search_api_error_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "esearchresult": {"idlist": [], "ERROR": "Invalid query"}
        })))
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let err = client
        .search_ids(&SearchQuery::new("covid", 5).unwrap())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Invalid query"));
}

#[tokio::test]
#[traced_test]
async fn test_search_sends_email_when_configured() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("email", "researcher@example.org"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_body(&["7"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = pubmed_report::ClientConfig::new()
        .with_base_url(mock_server.uri())
        .with_email("researcher@example.org")
        .with_request_interval(std::time::Duration::ZERO);
    let client = pubmed_report::PubMedClient::with_config(config).unwrap();

    let pmids = client
        .search_ids(&SearchQuery::new("covid", 1).unwrap())
        .await
        .unwrap();
    assert_eq!(pmids.len(), 1);
}

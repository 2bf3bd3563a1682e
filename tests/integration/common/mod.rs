//! Shared fixtures for the mocked E-utilities tests
#![allow(dead_code)]

use std::time::Duration;

use serde_json::{Map, Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pubmed_report::{ClientConfig, PubMedClient, PubMedId};

/// Client pointed at the mock server with pacing disabled
pub fn create_mock_client(mock_server: &MockServer) -> PubMedClient {
    create_mock_client_with_interval(mock_server, Duration::ZERO)
}

pub fn create_mock_client_with_interval(mock_server: &MockServer, interval: Duration) -> PubMedClient {
    let config = ClientConfig::new()
        .with_base_url(mock_server.uri())
        .with_request_interval(interval);

    PubMedClient::with_config(config).expect("client should build")
}

pub fn pmids(ids: &[&str]) -> Vec<PubMedId> {
    ids.iter()
        .map(|id| PubMedId::parse(id).expect("fixture PMID should be valid"))
        .collect()
}

pub fn esearch_body(ids: &[&str]) -> Value {
    json!({
        "header": {"type": "esearch", "version": "0.3"},
        "esearchresult": {
            "count": ids.len().to_string(),
            "retmax": ids.len().to_string(),
            "retstart": "0",
            "idlist": ids,
            "translationset": [],
            "querytranslation": ""
        }
    })
}

/// ESummary document with the four fields the report reads
pub fn esummary_doc(pmid: &str, title: &str, author: &str, source: &str, epubdate: &str) -> Value {
    json!({
        "uid": pmid,
        "pubdate": "2024 Jan",
        "epubdate": epubdate,
        "source": source,
        "authors": [{"name": author, "authtype": "Author", "clusterid": ""}],
        "lastauthor": author,
        "title": title,
        "sortfirstauthor": author,
        "fulljournalname": source
    })
}

pub fn esummary_body(pmid: &str, doc: Value) -> Value {
    let mut result = Map::new();
    result.insert("uids".to_string(), json!([pmid]));
    result.insert(pmid.to_string(), doc);

    json!({
        "header": {"type": "esummary", "version": "0.3"},
        "result": result
    })
}

pub fn efetch_xml(pmid: &str, sections: &[&str]) -> String {
    let abstract_xml = if sections.is_empty() {
        String::new()
    } else {
        let texts: String = sections
            .iter()
            .map(|text| format!("<AbstractText>{text}</AbstractText>"))
            .collect();
        format!("<Abstract>{texts}</Abstract>")
    };

    format!(
        r#"<?xml version="1.0" ?>
<!DOCTYPE PubmedArticleSet PUBLIC "-//NLM//DTD PubMedArticle, 1st January 2024//EN" "https://dtd.nlm.nih.gov/ncbi/pubmed/out/pubmed_240101.dtd">
<PubmedArticleSet>
<PubmedArticle>
    <MedlineCitation Status="MEDLINE" Owner="NLM">
        <PMID Version="1">{pmid}</PMID>
        <Article PubModel="Print-Electronic">
            <ArticleTitle>Article {pmid}</ArticleTitle>
            {abstract_xml}
        </Article>
    </MedlineCitation>
</PubmedArticle>
</PubmedArticleSet>"#
    )
}

pub async fn mount_esearch(mock_server: &MockServer, term: &str, ids: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("db", "pubmed"))
        .and(query_param("retmode", "json"))
        .and(query_param("term", term))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_body(ids)))
        .mount(mock_server)
        .await;
}

pub async fn mount_esummary(mock_server: &MockServer, pmid: &str, title: &str) {
    let doc = esummary_doc(pmid, title, "Smith J", "Lancet", "2024 Jan 3");
    Mock::given(method("GET"))
        .and(path("/esummary.fcgi"))
        .and(query_param("db", "pubmed"))
        .and(query_param("retmode", "json"))
        .and(query_param("id", pmid))
        .respond_with(ResponseTemplate::new(200).set_body_json(esummary_body(pmid, doc)))
        .expect(1)
        .mount(mock_server)
        .await;
}

pub async fn mount_efetch(mock_server: &MockServer, pmid: &str, body: String) {
    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("db", "pubmed"))
        .and(query_param("retmode", "xml"))
        .and(query_param("id", pmid))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/xml"),
        )
        .expect(1)
        .mount(mock_server)
        .await;
}

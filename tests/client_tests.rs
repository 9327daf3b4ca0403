//! Integration tests for the AirtableClient using mockito for HTTP mocking.

use assistant_mcp_server::client::{ListQuery, SortDirection, TableRequest};
use assistant_mcp_server::compose::{FieldUpdate, FilterBuilder};
use assistant_mcp_server::{AirtableClient, AssistantError, Credential, RecordId};
use mockito::{Matcher, Server};
use serde_json::json;

fn credential() -> Credential {
    Credential::new("patTest").unwrap()
}

fn client(server: &Server) -> AirtableClient {
    AirtableClient::with_base_url(server.url(), Some("appBase".to_string()))
}

#[test]
fn test_list_records_with_filter() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/v0/appBase/tblPlaces")
        .match_header("authorization", "Bearer patTest")
        .match_query(Matcher::UrlEncoded(
            "filterByFormula".into(),
            "AND(LOWER({type}) = LOWER('cafe'), {rating} >= 4)".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "records": [{
                "id": "rec1",
                "createdTime": "2026-01-01T00:00:00.000Z",
                "fields": {"name": "Blue Bottle", "type": "cafe", "rating": 5}
            }]
        }"#,
        )
        .create();

    let filter = FilterBuilder::new()
        .any_of("type", Some(&["cafe".to_string()][..]))
        .at_least("rating", Some(4))
        .build();
    let records = client(&server)
        .list_records(&credential(), "tblPlaces", &ListQuery::new().filter(filter))
        .unwrap();

    mock.assert();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "rec1");
    assert_eq!(records[0].field_str("name"), Some("Blue Bottle"));
}

#[test]
fn test_list_records_view_sort_and_limit() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/v0/appBase/tblLogs")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("view".into(), "today".into()),
            Matcher::UrlEncoded("sort[0][field]".into(), "timestamp".into()),
            Matcher::UrlEncoded("sort[0][direction]".into(), "desc".into()),
            Matcher::UrlEncoded("maxRecords".into(), "1".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"records": []}"#)
        .create();

    let query = ListQuery::new()
        .view("today")
        .sort("timestamp", SortDirection::Desc)
        .max_records(Some(1));
    let records = client(&server)
        .list_records(&credential(), "tblLogs", &query)
        .unwrap();

    mock.assert();
    assert!(records.is_empty());
}

#[test]
fn test_list_records_missing_records_key() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/v0/appBase/tblPlaces")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create();

    let records = client(&server)
        .list_records(&credential(), "tblPlaces", &ListQuery::new())
        .unwrap();

    mock.assert();
    assert!(records.is_empty());
}

#[test]
fn test_create_record_sends_typecast() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/v0/appBase/tblPlaces")
        .match_header("authorization", "Bearer patTest")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "fields": {"name": "Blue Bottle", "type": ["cafe"]},
            "typecast": true
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "recNew", "fields": {"name": "Blue Bottle", "type": ["cafe"]}}"#)
        .create();

    let fields = FieldUpdate::new()
        .set("name", Some("Blue Bottle"))
        .set("type", Some(vec!["cafe".to_string()]))
        .into_fields();
    let record = client(&server)
        .create_record(&credential(), "tblPlaces", &fields)
        .unwrap();

    mock.assert();
    assert_eq!(record.id, "recNew");
}

#[test]
fn test_update_record_patches_record_path() {
    let mut server = Server::new();

    let mock = server
        .mock("PATCH", "/v0/appBase/tblContacts/recABC")
        .match_body(Matcher::PartialJson(json!({"fields": {"city": "tokyo"}})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "recABC", "fields": {"name": "Ana", "city": "tokyo"}}"#)
        .create();

    let fields = FieldUpdate::new().set("city", Some("tokyo")).build().unwrap();
    let record = client(&server)
        .update_record(
            &credential(),
            "tblContacts",
            &RecordId::new("recABC").unwrap(),
            &fields,
        )
        .unwrap();

    mock.assert();
    assert_eq!(record.field_str("city"), Some("tokyo"));
}

#[test]
fn test_delete_record() {
    let mut server = Server::new();

    let mock = server
        .mock("DELETE", "/v0/appBase/tblPlaces/recABC")
        .match_header("authorization", "Bearer patTest")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "recABC", "deleted": true}"#)
        .create();

    let deleted = client(&server)
        .delete_record(
            &credential(),
            "tblPlaces",
            &RecordId::new("recABC").unwrap(),
        )
        .unwrap();

    mock.assert();
    assert_eq!(deleted.id.as_deref(), Some("recABC"));
    assert!(deleted.deleted);
}

#[test]
fn test_error_status_with_json_detail() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/v0/appBase/tblPlaces")
        .with_status(422)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": {"type": "INVALID_FILTER_BY_FORMULA", "message": "bad"}}"#)
        .create();

    let client = client(&server);
    let result = client.dispatch(&credential(), "tblPlaces", &TableRequest::get(vec![]));

    mock.assert();
    match result {
        Err(AssistantError::Request { status, detail }) => {
            assert_eq!(status, 422);
            assert_eq!(detail["error"]["type"], "INVALID_FILTER_BY_FORMULA");
        }
        other => panic!("Expected Request error, got {:?}", other),
    }
    assert_eq!(client.metrics().http_errors_total(), 1);
}

#[test]
fn test_error_status_with_raw_detail() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/v0/appBase/tblPlaces")
        .with_status(503)
        .with_body("upstream unavailable")
        .create();

    let result =
        client(&server).dispatch(&credential(), "tblPlaces", &TableRequest::get(vec![]));

    mock.assert();
    match result {
        Err(AssistantError::Request { status, detail }) => {
            assert_eq!(status, 503);
            assert_eq!(detail, json!("upstream unavailable"));
        }
        other => panic!("Expected Request error, got {:?}", other),
    }
}

#[test]
fn test_unauthorized_error_payload() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/v0/appBase/tblPlaces")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": {"type": "AUTHENTICATION_REQUIRED"}}"#)
        .create();

    let err = client(&server)
        .dispatch(&credential(), "tblPlaces", &TableRequest::get(vec![]))
        .unwrap_err();

    mock.assert();
    let payload = err.payload();
    assert_eq!(payload["error"], "Request failed with status 401");
    assert_eq!(payload["status"], 401);
    assert_eq!(payload["detail"]["error"]["type"], "AUTHENTICATION_REQUIRED");
}

#[test]
fn test_transport_error() {
    // Nothing listens on the discard port.
    let client = AirtableClient::with_base_url(
        "http://127.0.0.1:9".to_string(),
        Some("appBase".to_string()),
    );

    let result = client.dispatch(&credential(), "tblPlaces", &TableRequest::get(vec![]));
    assert!(matches!(result, Err(AssistantError::Transport(_))));
}

#[test]
fn test_field_options_from_schema() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/v0/meta/bases/appBase/tables")
        .match_header("authorization", "Bearer patTest")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "tables": [{
                "id": "tblPlaces",
                "name": "Places",
                "fields": [
                    {"name": "name", "type": "singleLineText"},
                    {"name": "Type", "type": "multipleSelects",
                     "options": {"choices": [{"name": "cafe"}, {"name": "coworking"}]}}
                ]
            }]
        }"#,
        )
        .create();

    let options = client(&server).field_options(&credential(), "tblPlaces", "type");

    mock.assert();
    assert_eq!(options, vec!["cafe", "coworking"]);
}

#[test]
fn test_field_options_empty_on_failure() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/v0/meta/bases/appBase/tables")
        .with_status(403)
        .with_body(r#"{"error": "NOT_AUTHORIZED"}"#)
        .create();

    let options = client(&server).field_options(&credential(), "tblPlaces", "type");

    mock.assert();
    assert!(options.is_empty());
}

#[test]
fn test_unfollowed_redirect_is_request_error() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/v0/appBase/tblPlaces")
        .with_status(302)
        .with_body("moved")
        .create();

    let client = client(&server);
    let result = client.dispatch(&credential(), "tblPlaces", &TableRequest::get(vec![]));

    mock.assert();
    match result {
        Err(AssistantError::Request { status, detail }) => {
            assert_eq!(status, 302);
            assert_eq!(detail, json!("moved"));
        }
        other => panic!("Expected Request error, got {:?}", other),
    }
    assert_eq!(client.metrics().http_errors_total(), 1);
}

#[test]
fn test_fetch_schema_unfollowed_redirect_is_request_error() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/v0/meta/bases/appBase/tables")
        .with_status(302)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "MOVED"}"#)
        .create();

    let result = client(&server).fetch_schema(&credential());

    mock.assert();
    match result {
        Err(AssistantError::Request { status, detail }) => {
            assert_eq!(status, 302);
            assert_eq!(detail["error"], "MOVED");
        }
        other => panic!("Expected Request error, got {:?}", other),
    }
}

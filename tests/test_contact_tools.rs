mod mocks;

use assistant_mcp_server::tools::{
    ContactTools, CreateContactParams, GetContactsParams, Sex, UpdateContactParams,
};
use assistant_mcp_server::{AssistantError, Credential, Record, TableIds};
use mocks::MockAirtableClient;
use serde_json::json;
use std::sync::Arc;

fn setup() -> (MockAirtableClient, ContactTools) {
    let mock = MockAirtableClient::new();
    mock.set_options("tblContacts", "relationship", &["friend", "colleague", "family"]);
    mock.set_options("tblContacts", "city", &["tokyo", "osaka"]);
    let tables = TableIds {
        contacts: Some("tblContacts".to_string()),
        ..Default::default()
    };
    let tools = ContactTools::new(Arc::new(mock.clone()), tables);
    (mock, tools)
}

fn credential() -> Credential {
    Credential::new("patTest").unwrap()
}

fn contact(id: &str, alert: &str) -> Record {
    serde_json::from_value(json!({
        "id": id,
        "fields": {"name": id, "birthday_alert": alert}
    }))
    .unwrap()
}

#[tokio::test]
async fn test_get_contacts_filters() {
    let (mock, tools) = setup();
    let params = GetContactsParams {
        name: Some("ana".to_string()),
        sex: Some(Sex::Women),
        relationship: Some(vec!["friend".to_string(), "colleague".to_string()]),
        ..Default::default()
    };

    let response = tools.get_contacts(Some(&credential()), params).await.unwrap();

    let call = mock.last_call("list").unwrap();
    let formula = call
        .params
        .iter()
        .find(|(k, _)| k == "filterByFormula")
        .map(|(_, v)| v.as_str());
    assert_eq!(
        formula,
        Some(
            "AND(FIND(LOWER('ana'), LOWER({name})), LOWER({sex}) = LOWER('women'), \
             OR(FIND('friend', ARRAYJOIN({relationship}, ',')), FIND('colleague', ARRAYJOIN({relationship}, ','))))"
        )
    );
    assert_eq!(response.available_relationships, vec!["friend", "colleague", "family"]);
    assert_eq!(response.available_cities, vec!["tokyo", "osaka"]);
    assert_eq!(mock.get_call_count("field_options"), 2);
}

#[tokio::test]
async fn test_create_contact_normalizes_select_fields() {
    let (mock, tools) = setup();
    let params: CreateContactParams = serde_json::from_value(json!({
        "name": "Ana Souza",
        "city": "Tokyo",
        "sex": "women",
        "relationship": ["Friend"],
        "email": "Ana@Example.com"
    }))
    .unwrap();

    let response = tools
        .create_contact(Some(&credential()), params)
        .await
        .unwrap();

    let call = mock.last_call("create").unwrap();
    assert_eq!(
        call.fields.unwrap(),
        json!({
            "name": "Ana Souza",
            "city": "tokyo",
            "sex": "women",
            "relationship": ["friend"],
            "email": "Ana@Example.com"
        })
    );
    assert_eq!(response.message, "Contact 'Ana Souza' saved successfully.");
}

#[tokio::test]
async fn test_update_contact_without_fields_makes_no_call() {
    let (mock, tools) = setup();
    let params: UpdateContactParams =
        serde_json::from_value(json!({"contact_id": "recC1"})).unwrap();

    let err = tools
        .update_contact(Some(&credential()), params)
        .await
        .unwrap_err();

    assert!(matches!(err, AssistantError::NoFieldsProvided(None)));
    assert_eq!(err.payload(), json!({"error": "No fields provided to update."}));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_update_contact_partial() {
    let (mock, tools) = setup();
    let params: UpdateContactParams = serde_json::from_value(json!({
        "contact_id": "recC1",
        "company": "Acme",
        "city": "OSAKA"
    }))
    .unwrap();

    let response = tools
        .update_contact(Some(&credential()), params)
        .await
        .unwrap();

    let call = mock.last_call("update").unwrap();
    assert_eq!(call.record_id.as_deref(), Some("recC1"));
    assert_eq!(call.fields.unwrap(), json!({"company": "Acme", "city": "osaka"}));
    assert_eq!(response.message, "Contact updated successfully.");
    assert_eq!(response.contact.id, "recC1");
}

#[tokio::test]
async fn test_get_birthdays_groups_by_alert() {
    let (mock, tools) = setup();
    mock.add_record("tblContacts", contact("recA", "today"));
    mock.add_record("tblContacts", contact("recB", "this_month"));
    mock.add_record("tblContacts", contact("recC", "none"));
    mock.add_record("tblContacts", contact("recD", "this_week"));

    let response = tools.get_birthdays(Some(&credential())).await.unwrap();

    let call = mock.last_call("list").unwrap();
    assert_eq!(call.params, vec![("view".to_string(), "birthday".to_string())]);
    assert_eq!(response.today.len(), 1);
    assert_eq!(response.today[0].id, "recA");
    assert_eq!(response.this_week[0].id, "recD");
    assert_eq!(response.this_month[0].id, "recB");
}

#[tokio::test]
async fn test_get_birthdays_unconfigured() {
    let mock = MockAirtableClient::new();
    let tools = ContactTools::new(Arc::new(mock.clone()), TableIds::default());

    let err = tools.get_birthdays(Some(&credential())).await.unwrap_err();

    assert_eq!(err.to_string(), "Contacts table is not configured.");
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_authentication_checked_before_configuration() {
    let mock = MockAirtableClient::new();
    let tools = ContactTools::new(Arc::new(mock), TableIds::default());

    let err = tools
        .get_contacts(None, GetContactsParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AssistantError::Authentication));
}

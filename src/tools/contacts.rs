//! Contact tools.
//!
//! City, sex and relationship are select fields in the contacts table. They
//! are stored lower-case so that options created through `typecast` don't
//! multiply by capitalization.

use crate::client::{AsyncAirtableClient, ListQuery};
use crate::compose::{FieldUpdate, FilterBuilder, Normalization};
use crate::config::{Table, TableIds};
use crate::domain::{Credential, RecordId};
use crate::error::AssistantResult;
use crate::models::Record;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const RELATIONSHIP_FIELD: &str = "relationship";
const CITY_FIELD: &str = "city";
const BIRTHDAY_VIEW: &str = "birthday";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Man,
    Women,
    Other,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Man => "man",
            Sex::Women => "women",
            Sex::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetContactsParams {
    /// Search by name (partial match). For example 'John' will match 'John Doe' and 'Johnny'.
    #[serde(default)]
    pub name: Option<String>,

    /// Search by nickname (partial match).
    #[serde(default)]
    pub nickname: Option<String>,

    /// Filter by city (partial match). Call get_parameter_options(source='contact', parameter='city') to see available values.
    #[serde(default)]
    pub city: Option<String>,

    /// Filter by gender: 'man', 'women', or 'other'.
    #[serde(default)]
    pub sex: Option<Sex>,

    /// Filter by one or more relationship types (e.g. ['friend'], ['friend', 'colleague']).
    #[serde(default)]
    pub relationship: Option<Vec<String>>,

    /// Search by company or workplace (partial match).
    #[serde(default)]
    pub company: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateContactParams {
    /// Full name of the contact
    pub name: String,

    /// Casual name or how you refer to them
    #[serde(default)]
    pub nickname: Option<String>,

    /// Date of birth in YYYY-MM-DD format
    #[serde(default)]
    pub birthday: Option<String>,

    /// City where they live. Call get_parameter_options(source='contact', parameter='city') to see available values.
    #[serde(default)]
    pub city: Option<String>,

    /// Gender of the contact
    #[serde(default)]
    pub sex: Option<Sex>,

    /// One or more relationship types (e.g. ['friend'], ['friend', 'colleague']).
    #[serde(default)]
    pub relationship: Option<Vec<String>>,

    /// Phone number
    #[serde(default)]
    pub phone: Option<String>,

    /// Email address
    #[serde(default)]
    pub email: Option<String>,

    /// Company or workplace
    #[serde(default)]
    pub company: Option<String>,

    /// Free-form personal notes (e.g. 'met at Tokyo conference', 'loves hiking')
    #[serde(default)]
    pub notes: Option<String>,

    /// When you first met them, in YYYY-MM-DD format
    #[serde(default)]
    pub met_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateContactParams {
    /// The record ID of the contact to update
    pub contact_id: String,

    /// Updated full name
    #[serde(default)]
    pub name: Option<String>,

    /// Updated casual name
    #[serde(default)]
    pub nickname: Option<String>,

    /// Updated date of birth in YYYY-MM-DD format
    #[serde(default)]
    pub birthday: Option<String>,

    /// Updated city
    #[serde(default)]
    pub city: Option<String>,

    /// Updated gender
    #[serde(default)]
    pub sex: Option<Sex>,

    /// Updated relationship types (e.g. ['friend', 'colleague'])
    #[serde(default)]
    pub relationship: Option<Vec<String>>,

    /// Updated phone number
    #[serde(default)]
    pub phone: Option<String>,

    /// Updated email address
    #[serde(default)]
    pub email: Option<String>,

    /// Updated company or workplace
    #[serde(default)]
    pub company: Option<String>,

    /// Updated personal notes
    #[serde(default)]
    pub notes: Option<String>,

    /// Updated met date in YYYY-MM-DD format
    #[serde(default)]
    pub met_date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactsResponse {
    pub contacts: Vec<Record>,
    pub count: usize,
    pub available_relationships: Vec<String>,
    pub available_cities: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactResponse {
    pub contact: Record,
    pub message: String,
    pub available_relationships: Vec<String>,
    pub available_cities: Vec<String>,
}

/// Contacts with an upcoming birthday, grouped by urgency.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BirthdaysResponse {
    pub today: Vec<Record>,
    pub this_week: Vec<Record>,
    pub this_month: Vec<Record>,
}

impl BirthdaysResponse {
    /// Bucket records by their `birthday_alert` field. Records with any
    /// other alert value are dropped.
    pub fn group(records: Vec<Record>) -> Self {
        let mut grouped = Self::default();
        for record in records {
            match record.field_str("birthday_alert") {
                Some("today") => grouped.today.push(record),
                Some("this_week") => grouped.this_week.push(record),
                Some("this_month") => grouped.this_month.push(record),
                _ => {}
            }
        }
        grouped
    }
}

/// Tools over the contacts table.
pub struct ContactTools {
    client: Arc<dyn AsyncAirtableClient>,
    tables: TableIds,
}

impl ContactTools {
    pub fn new(client: Arc<dyn AsyncAirtableClient>, tables: TableIds) -> Self {
        Self { client, tables }
    }

    fn contact_fields() -> FieldUpdate {
        FieldUpdate::new()
            .normalize(CITY_FIELD, Normalization::Lowercase)
            .normalize("sex", Normalization::Lowercase)
            .normalize(RELATIONSHIP_FIELD, Normalization::Lowercase)
    }

    async fn options(&self, credential: &Credential, table_id: &str) -> (Vec<String>, Vec<String>) {
        let relationships = self
            .client
            .field_options(credential, table_id, RELATIONSHIP_FIELD)
            .await;
        let cities = self
            .client
            .field_options(credential, table_id, CITY_FIELD)
            .await;
        (relationships, cities)
    }

    /// Search contacts.
    pub async fn get_contacts(
        &self,
        credential: Option<&Credential>,
        params: GetContactsParams,
    ) -> AssistantResult<ContactsResponse> {
        let credential = super::require_credential(credential)?;
        let table_id = self.tables.require(Table::Contacts)?;

        let filter = FilterBuilder::new()
            .contains("name", params.name.as_deref())
            .contains("nickname", params.nickname.as_deref())
            .contains(CITY_FIELD, params.city.as_deref())
            .equals("sex", params.sex.as_ref().map(Sex::as_str))
            .contains("company", params.company.as_deref())
            .any_in_list(RELATIONSHIP_FIELD, params.relationship.as_deref())
            .build();

        let contacts = self
            .client
            .list_records(credential, table_id, &ListQuery::new().filter(filter))
            .await?;
        let (available_relationships, available_cities) =
            self.options(credential, table_id).await;

        Ok(ContactsResponse {
            count: contacts.len(),
            contacts,
            available_relationships,
            available_cities,
        })
    }

    /// Save a new contact.
    pub async fn create_contact(
        &self,
        credential: Option<&Credential>,
        params: CreateContactParams,
    ) -> AssistantResult<ContactResponse> {
        let credential = super::require_credential(credential)?;
        let table_id = self.tables.require(Table::Contacts)?;

        let fields = Self::contact_fields()
            .set("name", Some(params.name.as_str()))
            .set("nickname", params.nickname)
            .set("birthday", params.birthday)
            .set(CITY_FIELD, params.city)
            .set("sex", params.sex.map(|s| s.as_str()))
            .set(RELATIONSHIP_FIELD, params.relationship)
            .set("phone", params.phone)
            .set("email", params.email)
            .set("company", params.company)
            .set("notes", params.notes)
            .set("met_date", params.met_date)
            .into_fields();

        let contact = self
            .client
            .create_record(credential, table_id, &fields)
            .await?;
        let (available_relationships, available_cities) =
            self.options(credential, table_id).await;

        Ok(ContactResponse {
            contact,
            message: format!("Contact '{}' saved successfully.", params.name),
            available_relationships,
            available_cities,
        })
    }

    /// Partially update a contact.
    pub async fn update_contact(
        &self,
        credential: Option<&Credential>,
        params: UpdateContactParams,
    ) -> AssistantResult<ContactResponse> {
        let credential = super::require_credential(credential)?;
        let table_id = self.tables.require(Table::Contacts)?;
        let contact_id = RecordId::new(params.contact_id)?;

        let fields = Self::contact_fields()
            .set("name", params.name)
            .set("nickname", params.nickname)
            .set("birthday", params.birthday)
            .set(CITY_FIELD, params.city)
            .set("sex", params.sex.map(|s| s.as_str()))
            .set(RELATIONSHIP_FIELD, params.relationship)
            .set("phone", params.phone)
            .set("email", params.email)
            .set("company", params.company)
            .set("notes", params.notes)
            .set("met_date", params.met_date)
            .build()?;

        let contact = self
            .client
            .update_record(credential, table_id, &contact_id, &fields)
            .await?;
        let (available_relationships, available_cities) =
            self.options(credential, table_id).await;

        Ok(ContactResponse {
            contact,
            message: "Contact updated successfully.".to_string(),
            available_relationships,
            available_cities,
        })
    }

    /// Contacts whose birthday is coming up, read from the `birthday` view.
    pub async fn get_birthdays(
        &self,
        credential: Option<&Credential>,
    ) -> AssistantResult<BirthdaysResponse> {
        let credential = super::require_credential(credential)?;
        let table_id = self.tables.require(Table::Contacts)?;

        let records = self
            .client
            .list_records(credential, table_id, &ListQuery::new().view(BIRTHDAY_VIEW))
            .await?;

        Ok(BirthdaysResponse::group(records))
    }
}

//! Saved place tools.

use crate::client::{AsyncAirtableClient, ListQuery};
use crate::compose::{FieldUpdate, FilterBuilder, Normalization};
use crate::config::{Table, TableIds};
use crate::domain::{Credential, RecordId};
use crate::error::AssistantResult;
use crate::models::Record;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const TYPE_FIELD: &str = "type";

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreatePlaceParams {
    /// Name of the place (e.g. 'Blue Bottle Coffee', 'WeWork Shibuya')
    pub name: String,

    /// Full address of the place
    pub address: String,

    /// One or more categories for the place (e.g. ['cafe'], ['cafe', 'coworking']). Call get_parameter_options(source='place', parameter='type') to see available values.
    #[serde(rename = "type")]
    pub place_type: Vec<String>,

    /// Rating from 1 to 5
    #[serde(default)]
    pub rating: Option<u8>,

    /// Personal notes about the place, e.g. 'great wifi', 'quiet area', 'good for working'
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdatePlaceParams {
    /// The record ID of the place to update
    pub place_id: String,

    /// Updated name of the place
    #[serde(default)]
    pub name: Option<String>,

    /// Updated full address of the place
    #[serde(default)]
    pub address: Option<String>,

    /// Updated categories for the place (e.g. ['cafe', 'coworking']). Call get_parameter_options(source='place', parameter='type') to see available values.
    #[serde(default, rename = "type")]
    pub place_type: Option<Vec<String>>,

    /// Updated rating from 1 to 5
    #[serde(default)]
    pub rating: Option<u8>,

    /// Updated personal notes about the place
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetPlacesParams {
    /// Search by place name (partial match). For example 'Blue Bottle' will match 'Blue Bottle Coffee Shibuya'.
    #[serde(default)]
    pub name: Option<String>,

    /// Filter by one or more place categories (e.g. ['cafe'] or ['cafe', 'coworking']). Leave empty for all types.
    #[serde(default, rename = "type")]
    pub place_type: Option<Vec<String>>,

    /// Minimum rating to filter by (1-5). Only places with this rating or higher will be returned.
    #[serde(default)]
    pub rating: Option<u8>,

    /// Search by address (partial match). For example 'Shibuya' will match any place with Shibuya in its address.
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaceResponse {
    pub place: Record,
    pub message: String,
    pub available_types: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlacesResponse {
    pub places: Vec<Record>,
    pub count: usize,
    pub available_types: Vec<String>,
}

/// Tools over the places table.
pub struct PlaceTools {
    client: Arc<dyn AsyncAirtableClient>,
    tables: TableIds,
}

impl PlaceTools {
    pub fn new(client: Arc<dyn AsyncAirtableClient>, tables: TableIds) -> Self {
        Self { client, tables }
    }

    /// Save a new place. Categories are stored lower-case.
    pub async fn create_place(
        &self,
        credential: Option<&Credential>,
        params: CreatePlaceParams,
    ) -> AssistantResult<PlaceResponse> {
        let credential = super::require_credential(credential)?;
        let table_id = self.tables.require(Table::Places)?;
        let rating = super::validate_rating(params.rating)?;

        let fields = FieldUpdate::new()
            .normalize(TYPE_FIELD, Normalization::Lowercase)
            .set("name", Some(params.name.as_str()))
            .set("address", Some(params.address))
            .set(TYPE_FIELD, Some(params.place_type))
            .set("rating", rating)
            .set("notes", params.notes)
            .into_fields();

        let place = self
            .client
            .create_record(credential, table_id, &fields)
            .await?;
        let available_types = self
            .client
            .field_options(credential, table_id, TYPE_FIELD)
            .await;

        Ok(PlaceResponse {
            place,
            message: format!("Saved '{}' successfully.", params.name),
            available_types,
        })
    }

    /// Partially update a saved place.
    pub async fn update_place(
        &self,
        credential: Option<&Credential>,
        params: UpdatePlaceParams,
    ) -> AssistantResult<PlaceResponse> {
        let credential = super::require_credential(credential)?;
        let table_id = self.tables.require(Table::Places)?;
        let place_id = RecordId::new(params.place_id)?;
        let rating = super::validate_rating(params.rating)?;

        let fields = FieldUpdate::new()
            .normalize(TYPE_FIELD, Normalization::Lowercase)
            .set("name", params.name)
            .set("address", params.address)
            .set(TYPE_FIELD, params.place_type)
            .set("rating", rating)
            .set("notes", params.notes)
            .build()?;

        let place = self
            .client
            .update_record(credential, table_id, &place_id, &fields)
            .await?;
        let available_types = self
            .client
            .field_options(credential, table_id, TYPE_FIELD)
            .await;

        Ok(PlaceResponse {
            place,
            message: "Place updated successfully.".to_string(),
            available_types,
        })
    }

    /// Search saved places.
    pub async fn get_places(
        &self,
        credential: Option<&Credential>,
        params: GetPlacesParams,
    ) -> AssistantResult<PlacesResponse> {
        let credential = super::require_credential(credential)?;
        let table_id = self.tables.require(Table::Places)?;

        let filter = FilterBuilder::new()
            .contains("name", params.name.as_deref())
            .any_of(TYPE_FIELD, params.place_type.as_deref())
            .at_least("rating", params.rating.map(i64::from))
            .contains("address", params.address.as_deref())
            .build();

        let places = self
            .client
            .list_records(credential, table_id, &ListQuery::new().filter(filter))
            .await?;
        let available_types = self
            .client
            .field_options(credential, table_id, TYPE_FIELD)
            .await;

        Ok(PlacesResponse {
            count: places.len(),
            places,
            available_types,
        })
    }
}

//! Tool operations over the assistant base.
//!
//! Each category wraps the async client and the configured table IDs:
//! - **messages**: message history by time range
//! - **locations**: automatic location check-ins
//! - **places**: saved places
//! - **contacts**: contacts and upcoming birthdays
//! - **entries**: cross-table deletion and select-field options
//!
//! Every operation resolves the credential first and the table second, so
//! a call without a token never reports a configuration problem.

pub mod contacts;
pub mod entries;
pub mod locations;
pub mod messages;
pub mod places;

pub use contacts::{
    BirthdaysResponse, ContactResponse, ContactTools, ContactsResponse, CreateContactParams,
    GetContactsParams, Sex, UpdateContactParams,
};
pub use entries::{
    DeleteEntryParams, DeleteEntryResponse, EntryTools, ParameterOptionsParams,
    ParameterOptionsResponse, Source,
};
pub use locations::{
    GetLocationLogParams, LocationLogResponse, LocationLogUpdateResponse, LocationTools,
    LogStatus, UpdateLocationLogParams,
};
pub use messages::{GetMessagesParams, MessageRange, MessageTools, MessagesResponse};
pub use places::{
    CreatePlaceParams, GetPlacesParams, PlaceResponse, PlaceTools, PlacesResponse,
    UpdatePlaceParams,
};

use crate::domain::Credential;
use crate::error::{AssistantError, AssistantResult};

/// Fail with an authentication error when no bearer token came with the call.
pub(crate) fn require_credential(credential: Option<&Credential>) -> AssistantResult<&Credential> {
    credential.ok_or(AssistantError::Authentication)
}

/// Ratings are stored on a 1-5 scale.
pub(crate) fn validate_rating(rating: Option<u8>) -> AssistantResult<Option<u8>> {
    match rating {
        Some(r) if !(1..=5).contains(&r) => Err(AssistantError::InvalidParameter(format!(
            "rating must be between 1 and 5, got {}",
            r
        ))),
        other => Ok(other),
    }
}

mod mock_airtable_client;

#[allow(unused_imports)]
pub use mock_airtable_client::{MockAirtableClient, RecordedCall};

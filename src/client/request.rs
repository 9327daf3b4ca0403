//! Request descriptions handed to the dispatcher.

use crate::compose::Formula;
use crate::domain::RecordId;
use serde_json::Value;

/// HTTP methods used against the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// One request against a table, optionally addressed to a single record.
#[derive(Debug, Clone)]
pub struct TableRequest {
    pub method: HttpMethod,
    pub record_id: Option<RecordId>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl TableRequest {
    /// List records with the given query parameters.
    pub fn get(query: Vec<(String, String)>) -> Self {
        Self {
            method: HttpMethod::Get,
            record_id: None,
            query,
            body: None,
        }
    }

    /// Create a record.
    pub fn post(body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            record_id: None,
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Partially update one record.
    pub fn patch(record_id: RecordId, body: Value) -> Self {
        Self {
            method: HttpMethod::Patch,
            record_id: Some(record_id),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Delete one record.
    pub fn delete(record_id: RecordId) -> Self {
        Self {
            method: HttpMethod::Delete,
            record_id: Some(record_id),
            query: Vec::new(),
            body: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Query parameters of a list request.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    view: Option<String>,
    sort: Option<(String, SortDirection)>,
    max_records: Option<u32>,
    filter: Formula,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read through a named view of the table.
    pub fn view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some((field.into(), direction));
        self
    }

    /// Cap the number of returned records. Zero means no cap.
    pub fn max_records(mut self, limit: Option<u32>) -> Self {
        self.max_records = limit.filter(|l| *l > 0);
        self
    }

    pub fn filter(mut self, formula: Formula) -> Self {
        self.filter = formula;
        self
    }

    /// The rendered filter, or `None` when there is nothing to filter on.
    pub fn filter_formula(&self) -> Option<String> {
        if self.filter.is_empty() {
            None
        } else {
            Some(self.filter.render())
        }
    }

    /// Wire-level query parameters. `filterByFormula` is omitted entirely
    /// for an empty filter.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(view) = &self.view {
            params.push(("view".to_string(), view.clone()));
        }
        if let Some((field, direction)) = &self.sort {
            params.push(("sort[0][field]".to_string(), field.clone()));
            params.push((
                "sort[0][direction]".to_string(),
                direction.as_str().to_string(),
            ));
        }
        if let Some(limit) = self.max_records {
            params.push(("maxRecords".to_string(), limit.to_string()));
        }
        if let Some(formula) = self.filter_formula() {
            params.push(("filterByFormula".to_string(), formula));
        }
        params
    }
}

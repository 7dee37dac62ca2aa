use serde::{Deserialize, Serialize};

/// Body of `POST /api/2.0/sql/statements`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementRequest {
    pub warehouse_id: String,
    pub statement: String,

    /// Server-side wait before the call returns, formatted as `"{n}s"` (5..=50, or 0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_timeout: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_wait_timeout: Option<OnWaitTimeout>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disposition: Option<Disposition>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ResultFormat>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<StatementParameter>,
}

impl StatementRequest {
    /// Synchronous inline request: wait up to `wait_timeout_secs`, then cancel.
    pub fn inline(
        warehouse_id: impl Into<String>,
        statement: impl Into<String>,
        wait_timeout_secs: u64,
    ) -> Self {
        Self {
            warehouse_id: warehouse_id.into(),
            statement: statement.into(),
            wait_timeout: Some(format!("{wait_timeout_secs}s")),
            on_wait_timeout: Some(OnWaitTimeout::Cancel),
            disposition: Some(Disposition::Inline),
            format: Some(ResultFormat::JsonArray),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameters(mut self, parameters: Vec<StatementParameter>) -> Self {
        self.parameters = parameters;
        self
    }
}

/// A named parameter marker binding (`:name` in the statement text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementParameter {
    pub name: String,

    /// `None` binds SQL `NULL`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// SQL type name; the API defaults to `STRING` when omitted.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

impl StatementParameter {
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            type_name: Some("STRING".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OnWaitTimeout {
    Continue,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Disposition {
    Inline,
    ExternalLinks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultFormat {
    JsonArray,
    ArrowStream,
    Csv,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn inline_request_serializes_api_field_names() {
        let req = StatementRequest::inline("abc123", "DELETE FROM t WHERE k = :p1", 30)
            .with_parameters(vec![StatementParameter::string("p1", "USA")]);

        let value = serde_json::to_value(&req).expect("serialize request");
        assert_eq!(
            value,
            json!({
                "warehouse_id": "abc123",
                "statement": "DELETE FROM t WHERE k = :p1",
                "wait_timeout": "30s",
                "on_wait_timeout": "CANCEL",
                "disposition": "INLINE",
                "format": "JSON_ARRAY",
                "parameters": [{ "name": "p1", "value": "USA", "type": "STRING" }]
            })
        );
    }

    #[test]
    fn empty_parameters_are_omitted() {
        let req = StatementRequest::inline("abc123", "SELECT 1", 10);
        let value = serde_json::to_value(&req).expect("serialize request");
        assert!(value.get("parameters").is_none());
    }
}

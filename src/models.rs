//! Request and response shapes for the agent search endpoint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{SdkError, SdkResult};

/// Number of agents requested when the caller does not say otherwise.
pub const DEFAULT_MAX_RESULT: u32 = 10;

/// Behavioural trait an agent must advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    Streaming,
    PushNotifications,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Streaming => "streaming",
            Capability::PushNotifications => "pushNotifications",
        }
    }
}

impl FromStr for Capability {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "streaming" => Ok(Capability::Streaming),
            "pushNotifications" | "push-notifications" => Ok(Capability::PushNotifications),
            other => Err(SdkError::validation(format!(
                "unknown capability '{}', expected 'streaming' or 'pushNotifications'",
                other
            ))),
        }
    }
}

/// Content format an agent accepts or produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IoMode {
    #[serde(rename = "text/plain")]
    TextPlain,
    #[serde(rename = "application/json")]
    ApplicationJson,
    #[serde(rename = "text/markdown")]
    TextMarkdown,
}

impl IoMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IoMode::TextPlain => "text/plain",
            IoMode::ApplicationJson => "application/json",
            IoMode::TextMarkdown => "text/markdown",
        }
    }
}

impl fmt::Display for IoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IoMode {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text/plain" => Ok(IoMode::TextPlain),
            "application/json" => Ok(IoMode::ApplicationJson),
            "text/markdown" => Ok(IoMode::TextMarkdown),
            other => Err(SdkError::validation(format!(
                "unknown I/O mode '{}', expected one of text/plain, application/json, text/markdown",
                other
            ))),
        }
    }
}

/// Latency versus relevance tradeoff applied by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    Advanced,
    Basic,
}

impl FromStr for SearchDepth {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "advanced" => Ok(SearchDepth::Advanced),
            "basic" => Ok(SearchDepth::Basic),
            other => Err(SdkError::validation(format!(
                "unknown search depth '{}', expected 'advanced' or 'basic'",
                other
            ))),
        }
    }
}

/// Body of a search call.
///
/// `query` must be non-empty; it is otherwise sent as given. Fields left
/// unset are omitted from the JSON body entirely rather than sent as `null`.
/// Instances only exist in a validated state: build one with
/// [`SearchRequest::new`] or [`SearchRequest::builder`], or deserialize one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireSearchRequest")]
pub struct SearchRequest {
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_result: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    capability: Option<Capability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_input_mode: Option<Vec<IoMode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_output_mode: Option<Vec<IoMode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search_depth: Option<SearchDepth>,
    /// When set, these organizations are searched instead of discovered ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    allowed_url: Option<Vec<String>>,
}

impl SearchRequest {
    /// Request with only a query and the default `max_result`.
    pub fn new(query: impl Into<String>) -> SdkResult<Self> {
        Self::builder().query(query).build()
    }

    pub fn builder() -> SearchRequestBuilder {
        SearchRequestBuilder::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn max_result(&self) -> Option<u32> {
        self.max_result
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn capability(&self) -> Option<Capability> {
        self.capability
    }

    pub fn default_input_mode(&self) -> Option<&[IoMode]> {
        self.default_input_mode.as_deref()
    }

    pub fn default_output_mode(&self) -> Option<&[IoMode]> {
        self.default_output_mode.as_deref()
    }

    pub fn search_depth(&self) -> Option<SearchDepth> {
        self.search_depth
    }

    pub fn allowed_url(&self) -> Option<&[String]> {
        self.allowed_url.as_deref()
    }

    /// Wire form of the request, with unset fields absent.
    pub fn to_json(&self) -> SdkResult<Value> {
        serde_json::to_value(self)
            .map_err(|e| SdkError::validation(format!("Failed to serialize request: {}", e)))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchRequestBuilder {
    query: Option<String>,
    max_result: Option<u32>,
    country: Option<String>,
    capability: Option<Capability>,
    default_input_mode: Option<Vec<IoMode>>,
    default_output_mode: Option<Vec<IoMode>>,
    search_depth: Option<SearchDepth>,
    allowed_url: Option<Vec<String>>,
}

impl SearchRequestBuilder {
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn max_result(mut self, max_result: u32) -> Self {
        self.max_result = Some(max_result);
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn capability(mut self, capability: Capability) -> Self {
        self.capability = Some(capability);
        self
    }

    pub fn default_input_mode(mut self, modes: Vec<IoMode>) -> Self {
        self.default_input_mode = Some(modes);
        self
    }

    pub fn default_output_mode(mut self, modes: Vec<IoMode>) -> Self {
        self.default_output_mode = Some(modes);
        self
    }

    pub fn search_depth(mut self, depth: SearchDepth) -> Self {
        self.search_depth = Some(depth);
        self
    }

    pub fn allowed_url(mut self, urls: Vec<String>) -> Self {
        self.allowed_url = Some(urls);
        self
    }

    pub fn build(self) -> SdkResult<SearchRequest> {
        WireSearchRequest {
            query: self.query,
            max_result: Some(self.max_result.unwrap_or(DEFAULT_MAX_RESULT)),
            country: self.country,
            capability: self.capability,
            default_input_mode: self.default_input_mode,
            default_output_mode: self.default_output_mode,
            search_depth: self.search_depth,
            allowed_url: self.allowed_url,
        }
        .try_into()
    }
}

/// Unvalidated mirror of [`SearchRequest`] used for deserialization.
#[derive(Deserialize)]
struct WireSearchRequest {
    query: Option<String>,
    #[serde(default = "default_max_result")]
    max_result: Option<u32>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    capability: Option<Capability>,
    #[serde(default)]
    default_input_mode: Option<Vec<IoMode>>,
    #[serde(default)]
    default_output_mode: Option<Vec<IoMode>>,
    #[serde(default)]
    search_depth: Option<SearchDepth>,
    #[serde(default)]
    allowed_url: Option<Vec<String>>,
}

fn default_max_result() -> Option<u32> {
    Some(DEFAULT_MAX_RESULT)
}

impl TryFrom<WireSearchRequest> for SearchRequest {
    type Error = SdkError;

    fn try_from(wire: WireSearchRequest) -> Result<Self, Self::Error> {
        let query = wire
            .query
            .ok_or_else(|| SdkError::validation("query is required"))?;
        if query.is_empty() {
            return Err(SdkError::validation("query must not be empty"));
        }
        if wire.max_result == Some(0) {
            return Err(SdkError::validation("max_result must be a positive integer"));
        }

        Ok(SearchRequest {
            query,
            max_result: wire.max_result,
            country: wire.country,
            capability: wire.capability,
            default_input_mode: wire.default_input_mode,
            default_output_mode: wire.default_output_mode,
            search_depth: wire.search_depth,
            allowed_url: wire.allowed_url,
        })
    }
}

/// One matching agent. The service may omit any field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDetails {
    pub agent_id: Option<String>,
    pub agent_name: Option<String>,
    pub agent_description: Option<String>,
    /// URL of the agent's card
    pub agent_url: Option<String>,
    pub organization_name: Option<String>,
    pub organization_url: Option<String>,
}

impl AgentDetails {
    /// Extracts an agent from one element of the response `data` array.
    pub fn from_json(value: &Value) -> SdkResult<Self> {
        let object = value.as_object().ok_or_else(|| {
            SdkError::invalid_response(format!(
                "Expected agent entry to be an object, got {}",
                json_kind(value)
            ))
        })?;

        Ok(AgentDetails {
            agent_id: optional_string(object, "agent_id")?,
            agent_name: optional_string(object, "agent_name")?,
            agent_description: optional_string(object, "agent_description")?,
            agent_url: optional_string(object, "agent_url")?,
            organization_name: optional_string(object, "organization_name")?,
            organization_url: optional_string(object, "organization_url")?,
        })
    }
}

/// Typed result of a search call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    #[serde(default)]
    pub agents: Vec<AgentDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    /// Decodes the raw object returned by the transport.
    ///
    /// `success` mirrors the payload's own flag (absent means `true`), and
    /// `error` is only read when that flag is `false`, so a response never
    /// reports success and an error at the same time.
    pub fn from_payload(payload: &Map<String, Value>) -> SdkResult<Self> {
        let success = match payload.get("success") {
            None | Some(Value::Null) => true,
            Some(Value::Bool(flag)) => *flag,
            Some(other) => {
                return Err(SdkError::invalid_response(format!(
                    "Expected 'success' to be a boolean, got {}",
                    json_kind(other)
                )));
            }
        };

        let agents = match payload.get("data") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(entries)) => entries
                .iter()
                .map(AgentDetails::from_json)
                .collect::<SdkResult<Vec<_>>>()?,
            Some(other) => {
                return Err(SdkError::invalid_response(format!(
                    "Expected 'data' to be an array, got {}",
                    json_kind(other)
                )));
            }
        };

        let message = optional_string(payload, "message")?;
        let error = if success {
            None
        } else {
            optional_string(payload, "error")?
        };

        Ok(SearchResponse {
            success,
            agents,
            message,
            error,
        })
    }
}

fn optional_string(object: &Map<String, Value>, key: &str) -> SdkResult<Option<String>> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(SdkError::invalid_response(format!(
            "Expected '{}' to be a string, got {}",
            key,
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test payload must be an object"),
        }
    }

    #[test]
    fn test_search_request_minimal() {
        let req = SearchRequest::new("Convert USD to KES").unwrap();
        assert_eq!(req.query(), "Convert USD to KES");
        assert_eq!(req.max_result(), Some(10));
        assert_eq!(req.country(), None);
        assert_eq!(req.allowed_url(), None);
    }

    #[test]
    fn test_minimal_request_serializes_only_query_and_max_result() {
        let body = SearchRequest::new("translate documents").unwrap().to_json().unwrap();
        assert_eq!(body, json!({"query": "translate documents", "max_result": 10}));
    }

    #[test]
    fn test_search_request_with_filters() {
        let req = SearchRequest::builder()
            .query("finance")
            .max_result(5)
            .country("KE")
            .capability(Capability::Streaming)
            .default_input_mode(vec![IoMode::TextPlain])
            .default_output_mode(vec![IoMode::ApplicationJson])
            .search_depth(SearchDepth::Basic)
            .allowed_url(vec!["https://org.example.com".to_string()])
            .build()
            .unwrap();

        assert_eq!(
            req.to_json().unwrap(),
            json!({
                "query": "finance",
                "max_result": 5,
                "country": "KE",
                "capability": "streaming",
                "default_input_mode": ["text/plain"],
                "default_output_mode": ["application/json"],
                "search_depth": "basic",
                "allowed_url": ["https://org.example.com"],
            })
        );
    }

    #[test]
    fn test_search_request_query_required() {
        let err = SearchRequest::builder().build().unwrap_err();
        assert!(matches!(err, SdkError::Validation { .. }));

        let err = SearchRequest::new("").unwrap_err();
        assert!(matches!(err, SdkError::Validation { .. }));
    }

    #[test]
    fn test_search_request_accepts_whitespace_query() {
        let req = SearchRequest::new("   ").unwrap();
        assert_eq!(req.query(), "   ");
    }

    #[test]
    fn test_search_request_rejects_zero_max_result() {
        let err = SearchRequest::builder()
            .query("x")
            .max_result(0)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("max_result"));
    }

    #[test]
    fn test_search_request_deserialize_validates() {
        let req: SearchRequest = serde_json::from_value(json!({"query": "pay"})).unwrap();
        assert_eq!(req.max_result(), Some(10));

        let req: SearchRequest =
            serde_json::from_value(json!({"query": "pay", "capability": "pushNotifications"}))
                .unwrap();
        assert_eq!(req.capability(), Some(Capability::PushNotifications));

        assert!(serde_json::from_value::<SearchRequest>(json!({"country": "KE"})).is_err());
        assert!(serde_json::from_value::<SearchRequest>(json!({"query": ""})).is_err());
        assert!(
            serde_json::from_value::<SearchRequest>(json!({"query": "x", "capability": "telepathy"}))
                .is_err()
        );
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("text/markdown".parse::<IoMode>().unwrap(), IoMode::TextMarkdown);
        assert!("image/png".parse::<IoMode>().is_err());
        assert_eq!(
            "push-notifications".parse::<Capability>().unwrap(),
            Capability::PushNotifications
        );
        assert_eq!(Capability::PushNotifications.as_str(), "pushNotifications");
        assert_eq!("advanced".parse::<SearchDepth>().unwrap(), SearchDepth::Advanced);
        assert!("deep".parse::<SearchDepth>().is_err());
    }

    #[test]
    fn test_agent_details_from_json() {
        let agent = AgentDetails::from_json(&json!({
            "agent_id": "budget-planner",
            "agent_name": "Budget Planner",
            "agent_description": "Helps plan budgets",
            "agent_url": "https://acme.com/.well-known/agents/budget-planner.json",
            "organization_name": "Acme Finance Ltd",
            "organization_url": "https://acme.com",
        }))
        .unwrap();

        assert_eq!(agent.agent_id.as_deref(), Some("budget-planner"));
        assert_eq!(agent.agent_name.as_deref(), Some("Budget Planner"));
        assert_eq!(agent.organization_url.as_deref(), Some("https://acme.com"));
    }

    #[test]
    fn test_agent_details_optional_fields() {
        let agent = AgentDetails::from_json(&json!({})).unwrap();
        assert_eq!(agent, AgentDetails::default());

        let agent = AgentDetails::from_json(&json!({"agent_id": "a", "agent_name": null})).unwrap();
        assert_eq!(agent.agent_id.as_deref(), Some("a"));
        assert!(agent.agent_name.is_none());
    }

    #[test]
    fn test_agent_details_type_mismatch() {
        let err = AgentDetails::from_json(&json!({"agent_id": 7})).unwrap_err();
        assert!(matches!(err, SdkError::InvalidResponse { .. }));
        assert!(err.to_string().contains("agent_id"));

        let err = AgentDetails::from_json(&json!("agent")).unwrap_err();
        assert!(matches!(err, SdkError::InvalidResponse { .. }));
    }

    #[test]
    fn test_search_response_preserves_order() {
        let payload = object(json!({
            "success": true,
            "data": [{"agent_id": "a1", "agent_name": "N1"}, {"agent_id": "a2"}],
        }));
        let resp = SearchResponse::from_payload(&payload).unwrap();

        assert!(resp.success);
        assert_eq!(resp.agents.len(), 2);
        assert_eq!(resp.agents[0].agent_name.as_deref(), Some("N1"));
        assert_eq!(resp.agents[1].agent_id.as_deref(), Some("a2"));
        assert!(resp.agents[1].agent_name.is_none());
        assert!(resp.error.is_none());
    }

    #[test]
    fn test_search_response_message_and_missing_data() {
        let payload = object(json!({"success": true, "message": "Found 0 agent(s)"}));
        let resp = SearchResponse::from_payload(&payload).unwrap();
        assert!(resp.agents.is_empty());
        assert_eq!(resp.message.as_deref(), Some("Found 0 agent(s)"));
    }

    #[test]
    fn test_search_response_failure_flag_carries_error() {
        let payload = object(json!({"success": false, "error": "no agents found"}));
        let resp = SearchResponse::from_payload(&payload).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("no agents found"));
    }

    #[test]
    fn test_search_response_ignores_error_when_successful() {
        let payload = object(json!({"success": true, "data": [], "error": "stale"}));
        let resp = SearchResponse::from_payload(&payload).unwrap();
        assert!(resp.success);
        assert!(resp.error.is_none());
    }

    #[test]
    fn test_search_response_rejects_malformed_shapes() {
        for payload in [
            json!({"success": "yes"}),
            json!({"success": true, "data": {"agent_id": "a"}}),
            json!({"success": true, "data": [1, 2]}),
            json!({"success": true, "message": 3}),
        ] {
            let err = SearchResponse::from_payload(&object(payload)).unwrap_err();
            assert!(matches!(err, SdkError::InvalidResponse { .. }));
        }
    }
}

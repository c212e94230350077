//! RFC 7807 problem details (pure data model)

use http::StatusCode;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Content type for problem details responses
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// Schema name of a plain problem
pub const PROBLEM_DETAILS_SCHEMA: &str = "ProblemDetails";

/// Schema name of a problem carrying failed validation fields
pub const VALIDATION_PROBLEM_DETAILS_SCHEMA: &str = "ValidationProblemDetails";

#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T
fn serialize_status<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

fn deserialize_status<'de, D>(deserializer: D) -> Result<StatusCode, D::Error>
where
    D: Deserializer<'de>,
{
    let code = u16::deserialize(deserializer)?;
    StatusCode::from_u16(code).map_err(serde::de::Error::custom)
}

/// A structured error response body
///
/// Built fresh for every error occurrence and serialized once. Members beyond
/// the RFC 7807 core live in `extensions` and are flattened into the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct ProblemDetail {
    /// Name of the result shape (`ProblemDetails`, `ValidationProblemDetails`, ...)
    #[serde(rename = "_schema")]
    pub schema: String,
    /// URI identifying the problem category
    #[serde(rename = "type")]
    pub type_uri: String,
    /// Short, static summary of the problem category
    pub title: String,
    /// HTTP status, serialized as an integer
    #[serde(serialize_with = "serialize_status", deserialize_with = "deserialize_status")]
    pub status: StatusCode,
    /// Explanation specific to this occurrence
    pub detail: String,
    /// URI identifying this occurrence
    pub instance: String,
    /// Kind-specific members
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

impl ProblemDetail {
    /// Empty plain problem; rules fill in every field
    pub fn new() -> Self {
        Self::with_schema(PROBLEM_DETAILS_SCHEMA)
    }

    /// Empty problem of the validation shape
    pub fn validation() -> Self {
        Self::with_schema(VALIDATION_PROBLEM_DETAILS_SCHEMA)
    }

    pub fn with_schema(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            type_uri: "about:blank".to_owned(),
            title: String::new(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: String::new(),
            instance: String::new(),
            extensions: IndexMap::new(),
        }
    }

    /// Set (or replace) an extension member
    pub fn set_extension(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.extensions.insert(key.into(), value.into());
    }

    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions.get(key)
    }
}

impl Default for ProblemDetail {
    fn default() -> Self {
        Self::new()
    }
}

/// Axum integration: the problem's status becomes the response status
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for ProblemDetail {
    fn into_response(self) -> axum::response::Response {
        use axum::http::{HeaderValue, header};

        let status = self.status;
        let mut resp = axum::Json(self).into_response();
        *resp.status_mut() = status;
        resp.headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_PROBLEM_JSON));
        resp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found() -> ProblemDetail {
        let mut problem = ProblemDetail::new();
        problem.type_uri = "urn:problem:not-found".to_owned();
        problem.title = "Resource not found".to_owned();
        problem.status = StatusCode::NOT_FOUND;
        problem.detail = "The element of id 404 could not be found".to_owned();
        problem.instance = "urn:uuid:6f1c2d1e-8f4a-4c55-9d0a-6a1f1b7c2e90".to_owned();
        problem
    }

    #[test]
    fn serializes_rfc7807_members() {
        let json = serde_json::to_value(not_found()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "_schema": "ProblemDetails",
                "type": "urn:problem:not-found",
                "title": "Resource not found",
                "status": 404,
                "detail": "The element of id 404 could not be found",
                "instance": "urn:uuid:6f1c2d1e-8f4a-4c55-9d0a-6a1f1b7c2e90",
            })
        );
    }

    #[test]
    fn extensions_are_flattened() {
        let mut problem = ProblemDetail::validation();
        problem.set_extension("failedValidation", vec!["numberOfSeats".to_owned()]);

        let json = serde_json::to_value(&problem).unwrap();
        assert_eq!(json["_schema"], "ValidationProblemDetails");
        assert_eq!(json["failedValidation"], serde_json::json!(["numberOfSeats"]));
    }

    #[test]
    fn deserializes_back_with_extensions() {
        let body = r#"{"_schema":"ValidationProblemDetails","type":"urn:problem:validation-error","title":"A validation failed","status":406,"detail":"Validation failed for 1 fields","instance":"urn:uuid:x","failedValidation":["numberOfSeats"]}"#;
        let problem: ProblemDetail = serde_json::from_str(body).unwrap();

        assert_eq!(problem.status, StatusCode::NOT_ACCEPTABLE);
        assert_eq!(
            problem.extension("failedValidation"),
            Some(&serde_json::json!(["numberOfSeats"]))
        );
    }

    #[test]
    fn rejects_out_of_range_status() {
        let body = r#"{"_schema":"ProblemDetails","type":"t","title":"t","status":1000,"detail":"d","instance":"i"}"#;
        assert!(serde_json::from_str::<ProblemDetail>(body).is_err());
    }

    #[cfg(feature = "axum")]
    #[tokio::test]
    async fn into_response_uses_problem_status_and_content_type() {
        use axum::response::IntoResponse;
        use http_body_util::BodyExt;

        let resp = not_found().into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            resp.headers().get(http::header::CONTENT_TYPE).unwrap(),
            APPLICATION_PROBLEM_JSON
        );

        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], 404);
    }
}

//! Wire contract with the newsdesk CRUD layer.
//!
//! The editor never talks to the network. The admin form collects the editor
//! value plus any uploaded asset URLs and submits them through the update
//! endpoint; these types build that request and decode the reply.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::EditorError;

/// Update endpoint for a news feed entry.
pub fn newsfeed_update_path(id: &str) -> String {
    format!("/api/v1/newsfeed/update/{id}")
}

/// Asset URLs accumulated by the upload widget before form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PendingUpload {
    urls: Vec<String>,
}

impl PendingUpload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record URLs reported by the widget's `onUploadSuccess`.
    pub fn on_upload_success<I, U>(&mut self, urls: I)
    where
        I: IntoIterator<Item = U>,
        U: Into<String>,
    {
        for url in urls {
            let url = url.into();
            if !self.urls.contains(&url) {
                self.urls.push(url);
            }
        }
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// `PUT` request for the update endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    id: String,
    body: Map<String, Value>,
}

impl UpdateRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: Map::new(),
        }
    }

    /// Set an arbitrary form field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.body.insert(name.into(), value.into());
        self
    }

    /// Set the serialized editor markup under `name`.
    pub fn markup(self, name: impl Into<String>, markup: &str) -> Self {
        self.field(name, markup)
    }

    /// Merge uploaded asset URLs into the array field `name`, keeping any
    /// URLs already present. Fails if `name` already holds a non-array value.
    pub fn uploads(mut self, name: impl Into<String>, uploads: &PendingUpload) -> Result<Self, EditorError> {
        if uploads.is_empty() {
            return Ok(self);
        }
        let name = name.into();
        let entry = self
            .body
            .entry(name.clone())
            .or_insert_with(|| Value::Array(Vec::new()));
        let Value::Array(existing) = entry else {
            return Err(EditorError::Serialization(format!(
                "field `{name}` is not an array, cannot merge uploads"
            )));
        };
        for url in uploads.urls() {
            let url = Value::String(url.clone());
            if !existing.contains(&url) {
                existing.push(url);
            }
        }
        Ok(self)
    }

    pub fn method(&self) -> &'static str {
        "PUT"
    }

    pub fn path(&self) -> String {
        newsfeed_update_path(&self.id)
    }

    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string(&self.body)?)
    }
}

/// Response envelope shared by the CRUD endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T = Value> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: DeserializeOwned> ApiResponse<T> {
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<T> ApiResponse<T> {
    /// `success: false` becomes [`EditorError::Api`] carrying the message.
    pub fn into_result(self) -> Result<Option<T>, EditorError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(EditorError::Api(self.message))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_update_request_path_and_body() {
        let mut uploads = PendingUpload::new();
        uploads.on_upload_success(["https://cdn.example/a.png", "https://cdn.example/b.png"]);
        uploads.on_upload_success(["https://cdn.example/a.png"]);

        let req = UpdateRequest::new("42")
            .field("title", "Derby day")
            .field("images", json!(["https://cdn.example/old.png"]))
            .markup("description", "<p><b>Goal!</b></p>")
            .uploads("images", &uploads)
            .unwrap();

        assert_eq!(req.method(), "PUT");
        assert_eq!(req.path(), "/api/v1/newsfeed/update/42");
        assert_eq!(
            Value::Object(req.body().clone()),
            json!({
                "title": "Derby day",
                "description": "<p><b>Goal!</b></p>",
                "images": [
                    "https://cdn.example/old.png",
                    "https://cdn.example/a.png",
                    "https://cdn.example/b.png"
                ]
            })
        );
    }

    #[test]
    fn test_uploads_without_urls_leave_body_alone() {
        let req = UpdateRequest::new("1")
            .uploads("images", &PendingUpload::new())
            .unwrap();
        assert!(req.body().is_empty());
        assert_eq!(req.to_json().unwrap(), "{}");
    }

    #[test]
    fn test_uploads_into_scalar_field_is_rejected() {
        let mut uploads = PendingUpload::new();
        uploads.on_upload_success(["https://cdn.example/a.png"]);

        let result = UpdateRequest::new("7")
            .field("images", "https://cdn.example/cover.png")
            .uploads("images", &uploads);

        match result {
            Err(EditorError::Serialization(msg)) => assert!(msg.contains("images")),
            other => panic!("Expected Serialization error, got {other:?}"),
        }
    }

    #[test]
    fn test_response_success() {
        let resp: ApiResponse = ApiResponse::from_json(r#"{"success":true,"data":{"id":"42"}}"#).unwrap();
        assert_eq!(resp.into_result().unwrap(), Some(json!({"id": "42"})));
    }

    #[test]
    fn test_response_failure_carries_message() {
        let resp: ApiResponse = ApiResponse::from_json(r#"{"success":false,"message":"not found"}"#).unwrap();
        match resp.into_result() {
            Err(EditorError::Api(Some(msg))) => assert_eq!(msg, "not found"),
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_response_failure_without_message() {
        let resp: ApiResponse = ApiResponse::from_json(r#"{"success":false}"#).unwrap();
        let err = resp.into_result().unwrap_err();
        assert_eq!(err.to_string(), "api error: request failed");
    }
}

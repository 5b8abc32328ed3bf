use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::filler::FormFiller;
use crate::profile::Profile;
use crate::surface::FormSurface;

/// A request understood by the form endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum Request {
    #[serde(rename = "fillForm")]
    FillForm {
        profile: Profile,
        #[serde(rename = "autoDetect", default = "default_auto_detect")]
        auto_detect: bool,
    },
    #[serde(rename = "clearForm")]
    ClearForm,
}

fn default_auto_detect() -> bool {
    true
}

impl Request {
    /// Decode a raw message. Unknown or missing actions yield `Ok(None)`.
    pub fn from_value(value: &Value) -> Result<Option<Self>> {
        match value.get("action").and_then(Value::as_str) {
            Some("fillForm") | Some("clearForm") => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| Error::InvalidMessage(e.to_string())),
            other => {
                debug!(action = ?other, "ignoring message");
                Ok(None)
            }
        }
    }

    pub fn to_value(&self) -> Value {
        // Serializing a Request cannot fail: every field is plain data.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Fill { success: bool, filled: usize, found: usize },
    Clear { success: bool },
}

impl Response {
    pub fn success(&self) -> bool {
        match self {
            Response::Fill { success, .. } | Response::Clear { success } => *success,
        }
    }
}

/// Something that accepts raw request messages and may answer them.
#[async_trait]
pub trait MessageTarget: Send + Sync {
    async fn send(&self, message: Value) -> Result<Option<Value>>;
}

impl<S: FormSurface + 'static> FormFiller<S> {
    /// Handle one decoded request.
    pub async fn handle(&self, request: &Request) -> Result<Response> {
        match request {
            Request::FillForm { profile, auto_detect } => {
                let result = self.fill(profile, *auto_detect).await?;
                Ok(Response::Fill {
                    success: result.filled > 0,
                    filled: result.filled,
                    found: result.found,
                })
            }
            Request::ClearForm => Ok(Response::Clear { success: self.clear().await? }),
        }
    }

    /// Handle a raw message. Unrecognized actions get no response.
    pub async fn handle_message(&self, message: &Value) -> Result<Option<Response>> {
        match Request::from_value(message)? {
            Some(request) => self.handle(&request).await.map(Some),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl<S: FormSurface + 'static> MessageTarget for FormFiller<S> {
    async fn send(&self, message: Value) -> Result<Option<Value>> {
        let response = self.handle_message(&message).await?;
        response
            .map(|r| serde_json::to_value(r).map_err(Error::from))
            .transpose()
    }
}

//! Request and response types as they appear on the wire.

use crate::session::TransitionFailure;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Error code for every lockdown transition failure.
pub const KIOSK_ERROR: &str = "KIOSK_ERROR";

/// Error code for lines that are not a valid method call.
pub const BAD_REQUEST: &str = "BAD_REQUEST";

/// A request from the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    /// Caller-chosen correlation id, echoed in the response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    /// Channel the call is addressed to. Calls without one go to this channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,

    pub method: String,

    /// Accepted for compatibility; neither method takes arguments.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            id: None,
            channel: None,
            method: method.into(),
            arguments: Value::Null,
        }
    }

    pub fn with_id(mut self, id: Value) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }
}

/// Outcome of one call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Success {
        success: bool,
    },
    Error {
        #[serde(rename = "errorCode")]
        error_code: String,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<Value>,
    },
    NotImplemented {
        #[serde(rename = "notImplemented")]
        not_implemented: bool,
    },
}

impl Reply {
    pub fn success() -> Self {
        Reply::Success { success: true }
    }

    pub fn not_implemented() -> Self {
        Reply::NotImplemented {
            not_implemented: true,
        }
    }

    /// Both failure kinds share `KIOSK_ERROR`; the kind travels in `details`.
    pub fn kiosk_error(failure: &TransitionFailure) -> Self {
        Reply::Error {
            error_code: KIOSK_ERROR.to_string(),
            message: failure.detail.clone(),
            details: Some(json!({ "kind": failure.kind.as_str() })),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Reply::Error {
            error_code: BAD_REQUEST.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Reply::Success { success: true })
    }
}

/// A reply paired with the id of the call it answers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(flatten)]
    pub reply: Reply,
}

impl Response {
    pub fn new(id: Option<Value>, reply: Reply) -> Self {
        Self { id, reply }
    }
}

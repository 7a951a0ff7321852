/// Session message structures and JSON-RPC handling
///
/// This module defines the JSON-RPC 2.0 message format a front end uses to
/// drive a companion session, plus the typed parameters of each method.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Mood, RitualId, SoundId, TaskId};
use crate::navigation::{NavTab, Screen};
use crate::store::Applied;

/// Notification method carrying applied advice
pub const ADVICE_NOTIFICATION: &str = "mood/advice";

/// JSON-RPC 2.0 request message
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (must be "2.0")
    pub jsonrpc: String,
    /// Unique identifier for this request
    #[serde(default)]
    pub id: Value,
    /// The method to call (e.g., "task/add")
    pub method: String,
    /// Parameters for the method call
    pub params: Option<Value>,
}

/// JSON-RPC 2.0 response message
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,
    /// Request ID that we're responding to
    pub id: Value,
    /// Successful result (if no error occurred)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error information (if something went wrong)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error information
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Server-initiated message without an id
#[derive(Debug, Serialize)]
pub struct JsonRpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
}

// JSON-RPC error codes
pub mod error_codes {
    /// Parse error - Invalid JSON was received by the server
    pub const PARSE_ERROR: i32 = -32700;
    /// Invalid Request - The JSON sent is not a valid Request object
    pub const INVALID_REQUEST: i32 = -32600;
    /// Method not found - The requested method doesn't exist
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid parameters - Method exists but parameters are wrong
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal error - Internal JSON-RPC error
    pub const INTERNAL_ERROR: i32 = -32603;

    // Application-specific error codes (-32000 to -32099)
    /// Validation error - Input was rejected by the domain rules
    pub const VALIDATION_ERROR: i32 = -32003;
}

impl JsonRpcResponse {
    /// Create a successful response
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Value, code: i32, message: String, data: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError { code, message, data }),
        }
    }
}

impl JsonRpcNotification {
    pub fn new(method: &str, params: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        }
    }
}

/// Result of a state-changing method
#[derive(Debug, Serialize)]
pub struct MutationResult<T: Serialize> {
    pub value: T,
    /// False when the change is only held in memory
    pub persisted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Screen after the change
    pub screen: Screen,
}

impl<T: Serialize> MutationResult<T> {
    pub fn new(applied: Applied<T>, screen: Screen) -> Self {
        Self {
            persisted: applied.is_durable(),
            warning: applied.warning.map(|e| e.to_string()),
            value: applied.value,
            screen,
        }
    }
}

/// Where the session is after a navigation intent
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenView {
    pub screen: Screen,
    pub shows_bottom_nav: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_tab: Option<NavTab>,
}

impl From<Screen> for ScreenView {
    fn from(screen: Screen) -> Self {
        Self {
            screen,
            shows_bottom_nav: screen.shows_bottom_nav(),
            active_tab: screen.active_tab(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TextParams {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ContentParams {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct TaskIdParams {
    pub id: TaskId,
}

#[derive(Debug, Deserialize)]
pub struct RitualIdParams {
    pub id: RitualId,
}

#[derive(Debug, Deserialize)]
pub struct SoundIdParams {
    pub id: SoundId,
}

#[derive(Debug, Deserialize)]
pub struct MoodParams {
    pub mood: Mood,
}

/// Profile fields a client may change; the join date is kept
#[derive(Debug, Deserialize)]
pub struct ProfileParams {
    pub name: String,
    pub avatar: String,
}

/// An imported sound; `fileName` is used to derive the display name
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundParams {
    pub name: Option<String>,
    pub file_name: Option<String>,
    pub data: String,
}

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// A call coming in from the host bridge, e.g.
/// `{"method": "data", "arguments": {"video": "/a/clip.mp4", "format": 0, "maxhow": 128, "quality": 50}}`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

/// The synchronous answer to a [`MethodCall`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MethodResponse {
    Success { result: Value },
    Error { code: String, message: String },
    NotImplemented,
}

impl MethodResponse {
    #[must_use]
    pub const fn accepted() -> Self {
        Self::Success {
            result: Value::Bool(true),
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Which kind of output a method call asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputMode {
    /// Encoded image bytes.
    Data,
    /// A file on disk; the final path is delivered.
    File,
}

impl OutputMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::File => "file",
        }
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "data" => Ok(Self::Data),
            "file" => Ok(Self::File),
            other => Err(format!("unknown method: {other}")),
        }
    }
}

use thiserror::Error;

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INTERNAL_ERROR: i32 = -32603;

/// Protocol-level failures. `Display` is the exact wire message.
///
/// A tool reporting `isError: true` is not one of these: that is a successful
/// call whose payload describes a failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FixtureError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Method not found: {0}")]
    MethodNotFound(String),
    #[error("Tool not found: {0}")]
    ToolNotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl FixtureError {
    pub fn code(&self) -> i32 {
        match self {
            FixtureError::Parse(_) => PARSE_ERROR,
            FixtureError::MethodNotFound(_) | FixtureError::ToolNotFound(_) => METHOD_NOT_FOUND,
            FixtureError::Internal(_) => INTERNAL_ERROR,
        }
    }

    /// Internal failures are only reported when the request carried an id;
    /// everything else is answered even with `id: null`.
    pub fn needs_id(&self) -> bool {
        matches!(self, FixtureError::Internal(_))
    }
}

impl From<serde_json::Error> for FixtureError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_syntax() || e.is_eof() {
            FixtureError::Parse(e.to_string())
        } else {
            FixtureError::Internal(e.to_string())
        }
    }
}

/// Failures raised inside a tool implementation.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<ToolError> for FixtureError {
    fn from(e: ToolError) -> Self {
        FixtureError::Internal(e.to_string())
    }
}

//! Tool domain value objects — immutable result and error types
//!
//! Every tool invocation produces a [`ToolResult`]: either an output payload
//! or a [`ToolError`], never both. The [`ErrorKind`] taxonomy is shared by
//! every backend; the dispatcher passes kinds through unchanged and only
//! annotates which tool produced them.

use serde::{Deserialize, Serialize};

/// Closed taxonomy of tool failure kinds.
///
/// Kinds are classified at the point of occurrence and survive every layer
/// unchanged. Which layer produces which kind:
///
/// | Kind | Origin |
/// |------|--------|
/// | `NotFound`, `IsADirectory`, `InvalidPath`, `AccessDenied` | sandboxed file operations |
/// | `InvalidArguments`, `UnknownTool` | argument validation / name lookup |
/// | `DuplicateTool` | registry construction (fatal at startup) |
/// | `ConnectionError`, `DisconnectedBackend` | tool-server client |
/// | `BackendUnavailable`, `BackendError` | retrieval sources |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    NotFound,
    IsADirectory,
    InvalidPath,
    AccessDenied,
    InvalidArguments,
    UnknownTool,
    DuplicateTool,
    ConnectionError,
    DisconnectedBackend,
    BackendUnavailable,
    BackendError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::IsADirectory => "IS_A_DIRECTORY",
            ErrorKind::InvalidPath => "INVALID_PATH",
            ErrorKind::AccessDenied => "ACCESS_DENIED",
            ErrorKind::InvalidArguments => "INVALID_ARGUMENTS",
            ErrorKind::UnknownTool => "UNKNOWN_TOOL",
            ErrorKind::DuplicateTool => "DUPLICATE_TOOL",
            ErrorKind::ConnectionError => "CONNECTION_ERROR",
            ErrorKind::DisconnectedBackend => "DISCONNECTED_BACKEND",
            ErrorKind::BackendUnavailable => "BACKEND_UNAVAILABLE",
            ErrorKind::BackendError => "BACKEND_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error that occurred during tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolError {
    /// Failure kind
    pub kind: ErrorKind,
    /// Human-readable error message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ToolError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Common error constructors
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::NotFound,
            format!("Not found: {}", resource.into()),
        )
    }

    pub fn is_a_directory(path: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::IsADirectory,
            format!("Path is a directory: {}", path.into()),
        )
    }

    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidPath, message)
    }

    pub fn access_denied(path: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::AccessDenied,
            format!("Access denied: {}", path.into()),
        )
    }

    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArguments, message)
    }

    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::UnknownTool,
            format!("Unknown tool: {}", name.into()),
        )
    }

    pub fn connection_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConnectionError, message)
    }

    pub fn disconnected_backend(backend: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::DisconnectedBackend,
            format!("Backend disconnected: {}", backend.into()),
        )
    }

    pub fn backend_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BackendUnavailable, message)
    }

    pub fn backend_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BackendError, message)
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}

/// Result of a tool invocation, carrying output or error information.
///
/// Returned synchronously to whoever issued the call; the dispatcher never
/// retries on its own — retry policy, if any, belongs to the reasoning loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the tool that was invoked
    pub tool_name: String,
    /// Whether the invocation was successful
    pub success: bool,
    /// Output payload (for successful invocation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<serde_json::Value>,
    /// Error information (for failed invocation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(tool_name: impl Into<String>, output: impl Into<serde_json::Value>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            output: Some(output.into()),
            error: None,
        }
    }

    /// Create a failed result
    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            output: None,
            error: Some(error),
        }
    }

    /// Check if the invocation was successful
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get the output payload
    pub fn output(&self) -> Option<&serde_json::Value> {
        self.output.as_ref()
    }

    /// Get the output payload as a string, if it is one
    pub fn output_str(&self) -> Option<&str> {
        self.output.as_ref().and_then(|v| v.as_str())
    }

    /// Get the error
    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }

    /// Get the error kind, if the invocation failed
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(|e| e.kind)
    }
}

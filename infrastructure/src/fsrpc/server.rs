//! File tool server
//!
//! Hosts a [`SandboxedFs`] behind the request/response protocol. The server
//! answers exactly two message types: `list_tools` (the fixed catalog of
//! five descriptors) and `call_tool` (marshal arguments, run the matching
//! sandbox operation, marshal the result or error back).
//!
//! The server keeps no per-call state; the sandbox root is its only
//! configuration, so independent calls can never observe each other.

use std::collections::HashMap;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use conduit_domain::tool::{
    entities::{ParamType, ToolCall, ToolDefinition, ToolParameter},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::ToolError,
};

use super::protocol::{Request, Response, WireToolDescriptor};
use crate::sandbox::SandboxedFs;

/// Tool name constants
pub const READ_FILE: &str = "read_file";
pub const WRITE_FILE: &str = "write_file";
pub const LIST_DIRECTORY: &str = "list_directory";
pub const SEARCH_FILES: &str = "search_files";
pub const FILE_INFO: &str = "file_info";

/// Depth of the request queue feeding a spawned server task
const REQUEST_QUEUE_DEPTH: usize = 32;

/// A request paired with its reply slot
pub type ServerMessage = (Request, oneshot::Sender<Response>);

/// The sending half of a server connection
pub type ServerConnection = mpsc::Sender<ServerMessage>;

/// The fixed tool catalog this server advertises.
pub fn catalog() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(READ_FILE, "Read the contents of a file").with_parameter(
            ToolParameter::new("file_path", "Path to the file to read", true),
        ),
        ToolDefinition::new(WRITE_FILE, "Write content to a file (creates or overwrites)")
            .with_parameter(ToolParameter::new(
                "file_path",
                "Path to the file to write",
                true,
            ))
            .with_parameter(ToolParameter::new(
                "content",
                "Content to write to the file",
                true,
            ))
            .with_parameter(
                ToolParameter::new(
                    "create_parents",
                    "Create missing parent directories",
                    false,
                )
                .with_type(ParamType::Boolean),
            ),
        ToolDefinition::new(LIST_DIRECTORY, "List contents of a directory").with_parameter(
            ToolParameter::new(
                "directory_path",
                "Path to the directory to list (default: sandbox root)",
                false,
            ),
        ),
        ToolDefinition::new(SEARCH_FILES, "Search for text within files in a directory")
            .with_parameter(ToolParameter::new("search_term", "Text to search for", true))
            .with_parameter(ToolParameter::new(
                "directory_path",
                "Directory to search in (default: sandbox root)",
                false,
            ))
            .with_parameter(
                ToolParameter::new(
                    "recursive",
                    "Descend into subdirectories (default: true)",
                    false,
                )
                .with_type(ParamType::Boolean),
            )
            .with_parameter(ToolParameter::new(
                "file_extension",
                "File extension to filter by (e.g. '.rs', '.txt')",
                false,
            )),
        ToolDefinition::new(FILE_INFO, "Get information about a file or directory")
            .with_parameter(ToolParameter::new(
                "path",
                "Path to the file or directory",
                true,
            )),
    ]
}

/// Server hosting sandboxed file operations behind the wire protocol.
pub struct FileToolServer {
    fs: SandboxedFs,
    tools: Vec<ToolDefinition>,
}

impl FileToolServer {
    pub fn new(fs: SandboxedFs) -> Self {
        Self {
            fs,
            tools: catalog(),
        }
    }

    /// Answer a single request. Pure dispatch; no state survives the call.
    pub fn handle(&self, request: Request) -> Response {
        match request {
            Request::ListTools => Response::Tools {
                tools: self.tools.iter().map(WireToolDescriptor::from).collect(),
            },
            Request::CallTool {
                tool_name,
                arguments,
            } => match self.invoke(&tool_name, arguments) {
                Ok(payload) => Response::Ok { payload },
                Err(error) => Response::Error {
                    kind: error.kind,
                    message: error.message,
                },
            },
        }
    }

    /// Validate arguments against the catalog, then run the operation.
    fn invoke(
        &self,
        tool_name: &str,
        arguments: HashMap<String, serde_json::Value>,
    ) -> Result<serde_json::Value, ToolError> {
        let Some(definition) = self.tools.iter().find(|t| t.name == tool_name) else {
            return Err(ToolError::unknown_tool(tool_name));
        };

        let call = ToolCall {
            tool_name: tool_name.to_string(),
            arguments,
        };
        DefaultToolValidator
            .validate(&call, definition)
            .map_err(ToolError::invalid_arguments)?;

        debug!(tool = tool_name, "Invoking sandboxed file operation");

        match tool_name {
            READ_FILE => {
                let path = call.require_string("file_path").map_err(ToolError::invalid_arguments)?;
                let content = self.fs.read(path)?;
                Ok(serde_json::Value::String(content))
            }
            WRITE_FILE => {
                let path = call.require_string("file_path").map_err(ToolError::invalid_arguments)?;
                let content = call.require_string("content").map_err(ToolError::invalid_arguments)?;
                let create_parents = call.get_bool("create_parents").unwrap_or(false);
                let bytes = self.fs.write(path, content, create_parents)?;
                Ok(serde_json::json!({
                    "path": path,
                    "bytes_written": bytes,
                }))
            }
            LIST_DIRECTORY => {
                let path = call.get_string("directory_path").unwrap_or(".");
                let entries = self.fs.list_directory(path)?;
                Ok(serde_json::to_value(entries).unwrap_or_default())
            }
            SEARCH_FILES => {
                let term = call
                    .require_string("search_term")
                    .map_err(ToolError::invalid_arguments)?;
                let path = call.get_string("directory_path").unwrap_or(".");
                let recursive = call.get_bool("recursive").unwrap_or(true);
                let extension = call.get_string("file_extension").filter(|e| !e.is_empty());
                let matches = self.fs.search(path, term, recursive, extension)?;
                Ok(serde_json::to_value(matches).unwrap_or_default())
            }
            FILE_INFO => {
                let path = call.require_string("path").map_err(ToolError::invalid_arguments)?;
                let info = self.fs.info(path)?;
                Ok(serde_json::to_value(info).unwrap_or_default())
            }
            _ => Err(ToolError::unknown_tool(tool_name)),
        }
    }

    /// Spawn the serving task and return a handle clients connect to.
    pub fn spawn(self) -> ServerHandle {
        let (tx, mut rx) = mpsc::channel::<ServerMessage>(REQUEST_QUEUE_DEPTH);
        let task = tokio::spawn(async move {
            while let Some((request, reply)) = rx.recv().await {
                let response = self.handle(request);
                if reply.send(response).is_err() {
                    warn!("Tool server reply dropped: caller went away");
                }
            }
            debug!("File tool server shutting down");
        });
        ServerHandle { tx, task }
    }
}

/// Handle to a spawned [`FileToolServer`] task.
pub struct ServerHandle {
    tx: ServerConnection,
    task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// A connection for a client. Clones share the same server task.
    pub fn connection(&self) -> ServerConnection {
        self.tx.clone()
    }

    /// Stop the server task. Existing connections observe a closed channel
    /// and report subsequent calls as disconnected.
    pub fn shutdown(self) {
        drop(self.tx);
        self.task.abort();
    }
}

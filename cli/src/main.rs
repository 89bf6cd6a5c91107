//! CLI entrypoint for conduit
//!
//! Thin I/O shim that wires the layers together: the sandboxed file tool
//! server, its client, the configured retrieval source, and the dispatcher.
//! The reasoning loop drives it over a line protocol: one JSON tool call
//! per stdin line, one JSON result per stdout line.

use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use conduit_application::{ToolExecutorPort, ToolSchemaPort, ValidateRetrievalUseCase};
use conduit_domain::retrieval::RetrievalSource;
use conduit_domain::tool::backend::DiscoveryError;
use conduit_domain::tool::entities::ToolCall;
use conduit_domain::tool::value_objects::{ToolError, ToolResult};
use conduit_infrastructure::{
    ConfigLoader, FileToolServer, JsonSchemaToolConverter, NoopRetrievalSource, RemoteToolBackend,
    RetrievalSourceKind, RetrievalToolBackend, SandboxedFs, ToolDispatcher, ToolServerClient,
    VectorizeConfig, VectorizeSource,
};

#[derive(Parser, Debug)]
#[command(name = "conduit", about = "Tool dispatcher for a conversational agent")]
struct Cli {
    /// Sandbox root directory for file tools (overrides config)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Explicit configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the tool catalog as JSON Schema and exit
    #[arg(long)]
    list_tools: bool,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = ConfigLoader::load(cli.config.as_ref())
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?;

    let root = cli
        .root
        .unwrap_or_else(|| PathBuf::from(&config.sandbox.root));

    // === Dependency injection ===
    let sandbox = SandboxedFs::new(&root)
        .with_context(|| format!("Invalid sandbox root: {}", root.display()))?;
    info!(root = %sandbox.root().display(), "Sandbox ready");

    let env: HashMap<String, String> = std::env::vars().collect();

    let sources: Vec<Arc<dyn RetrievalSource>> = match config.retrieval.source {
        RetrievalSourceKind::None => vec![Arc::new(NoopRetrievalSource::new())],
        RetrievalSourceKind::Vectorize => {
            let vectorize_config = VectorizeConfig::from_env(&env)
                .context("Vectorize retrieval source is not configured")?;
            vec![Arc::new(VectorizeSource::new(vectorize_config))]
        }
    };

    // Misconfiguration surfaces here, before the first turn
    ValidateRetrievalUseCase::new(sources.clone())
        .execute(&env)
        .context("Retrieval configuration validation failed")?;

    let server_handle = FileToolServer::new(sandbox).spawn();

    let mut builder = ToolDispatcher::builder();
    for source in sources {
        builder = builder.backend(RetrievalToolBackend::new(source));
    }
    match ToolServerClient::connect("fs-server", server_handle.connection()).await {
        Ok(client) => {
            builder = builder.backend(RemoteToolBackend::new(client));
        }
        Err(e @ DiscoveryError::Malformed(_)) => {
            // A server that answers wrongly is a configuration error
            return Err(anyhow::anyhow!(e)).context("File tool server discovery failed");
        }
        Err(e) => {
            // Unreachable server: keep running with the backends that did come up
            warn!(error = %e, "File tool server unreachable; continuing without its tools");
        }
    }
    #[cfg(feature = "web-tools")]
    if config.tools.web_search {
        builder = builder.backend(conduit_infrastructure::tools::WebSearchBackend::new());
    }

    let dispatcher = builder
        .build()
        .map_err(|e| anyhow::anyhow!("Tool registry construction failed: {e}"))?;
    info!(tools = dispatcher.describe_all().len(), "Dispatcher ready");

    if cli.list_tools {
        let schemas = JsonSchemaToolConverter.all_tools_schema(&dispatcher.describe_all());
        println!("{}", serde_json::to_string_pretty(&schemas)?);
        return Ok(());
    }

    run_dispatch_loop(&dispatcher).await?;

    server_handle.shutdown();
    Ok(())
}

/// Read one JSON tool call per line, write one JSON result per line.
///
/// Calls are issued one at a time, synchronously from the caller's point of
/// view; the loop suspends until each result returns.
async fn run_dispatch_loop(dispatcher: &ToolDispatcher) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let result = match serde_json::from_str::<ToolCall>(&line) {
            Ok(call) => dispatcher.invoke(&call).await,
            Err(e) => ToolResult::failure(
                "unknown",
                ToolError::invalid_arguments(format!("Malformed tool call: {e}")),
            ),
        };
        let mut out = stdout.lock();
        serde_json::to_writer(&mut out, &result)?;
        writeln!(out)?;
    }

    Ok(())
}
